use rand::RngCore;
use rand_core::OsRng;

use crate::zeroizing::ZeroizingBytes;

/// Draws `len` bytes from the operating system CSPRNG.
///
/// The buffer is returned in a [`ZeroizingBytes`] because every caller in
/// this workspace uses it as key entropy.
pub fn secure_random_bytes(len: usize) -> ZeroizingBytes {
    let mut buf = vec![0u8; len];
    OsRng.fill_bytes(&mut buf);
    ZeroizingBytes::new(buf)
}
