//! secp256k1 public-key encodings.
//!
//! Accepted inputs: 33-byte SEC1 compressed (`02`/`03` || x), 65-byte SEC1
//! uncompressed (`04` || x || y) and 64-byte raw (x || y). Every input is
//! checked against the curve equation before it is re-encoded.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;

use crate::error::CryptoError;

pub const COMPRESSED_LEN: usize = 33;
pub const UNCOMPRESSED_LEN: usize = 65;
pub const RAW_LEN: usize = 64;

/// Parse any supported encoding into a curve point.
pub fn parse_public_key(bytes: &[u8]) -> Result<PublicKey, CryptoError> {
    let parsed = match bytes.len() {
        COMPRESSED_LEN | UNCOMPRESSED_LEN => PublicKey::from_sec1_bytes(bytes),
        RAW_LEN => {
            let mut prefixed = [0u8; UNCOMPRESSED_LEN];
            prefixed[0] = 0x04;
            prefixed[1..].copy_from_slice(bytes);
            PublicKey::from_sec1_bytes(&prefixed)
        }
        other => {
            return Err(CryptoError::InvalidKeyLength {
                expected: COMPRESSED_LEN,
                actual: other,
            })
        }
    };
    parsed.map_err(|_| CryptoError::InvalidPoint("point is not on the secp256k1 curve".into()))
}

/// Compress a public key to 33 bytes. The prefix is `0x02` for even y and
/// `0x03` for odd y.
pub fn compress(bytes: &[u8]) -> Result<[u8; COMPRESSED_LEN], CryptoError> {
    let key = parse_public_key(bytes)?;
    Ok(compressed_bytes(&key))
}

/// Decompress a public key to the 65-byte `0x04`-prefixed form.
pub fn decompress(bytes: &[u8]) -> Result<[u8; UNCOMPRESSED_LEN], CryptoError> {
    let key = parse_public_key(bytes)?;
    Ok(uncompressed_bytes(&key))
}

pub fn compressed_bytes(key: &PublicKey) -> [u8; COMPRESSED_LEN] {
    let mut out = [0u8; COMPRESSED_LEN];
    out.copy_from_slice(key.to_encoded_point(true).as_bytes());
    out
}

pub fn uncompressed_bytes(key: &PublicKey) -> [u8; UNCOMPRESSED_LEN] {
    let mut out = [0u8; UNCOMPRESSED_LEN];
    out.copy_from_slice(key.to_encoded_point(false).as_bytes());
    out
}
