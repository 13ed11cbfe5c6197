use std::fmt;
use std::ops::Deref;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret bytes (entropy, seeds, private keys) that are wiped on drop.
///
/// `Debug` prints only the length so secrets never end up in logs.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ZeroizingBytes(Vec<u8>);

impl ZeroizingBytes {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Lowercase hex of the secret. The caller owns the returned copy.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl Deref for ZeroizingBytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ZeroizingBytes {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for ZeroizingBytes {
    fn from(data: &[u8]) -> Self {
        Self::new(data.to_vec())
    }
}

impl fmt::Debug for ZeroizingBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZeroizingBytes({} bytes)", self.0.len())
    }
}

/// Secret text (mnemonic phrases, passphrases) that is wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ZeroizingString(String);

impl ZeroizingString {
    pub fn new(data: String) -> Self {
        Self(data)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Deref for ZeroizingString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<String> for ZeroizingString {
    fn from(data: String) -> Self {
        Self::new(data)
    }
}

impl From<&str> for ZeroizingString {
    fn from(data: &str) -> Self {
        Self::new(data.to_owned())
    }
}

impl fmt::Debug for ZeroizingString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ZeroizingString(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_deref_and_hex() {
        let zb = ZeroizingBytes::new(vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(&*zb, &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(zb.to_hex(), "deadbeef");
        assert_eq!(zb.len(), 4);
        assert!(!zb.is_empty());
    }

    #[test]
    fn bytes_debug_hides_content() {
        let zb = ZeroizingBytes::new(vec![0xAA; 32]);
        let debug = format!("{zb:?}");
        assert_eq!(debug, "ZeroizingBytes(32 bytes)");
        assert!(!debug.contains("aa"));
    }

    #[test]
    fn bytes_manual_zeroize_clears() {
        let mut zb: ZeroizingBytes = vec![0xAA; 32].into();
        zb.zeroize();
        assert!(zb.is_empty());
    }

    #[test]
    fn string_debug_is_redacted() {
        let zs: ZeroizingString = "abandon abandon about".into();
        assert_eq!(format!("{zs:?}"), "ZeroizingString(<redacted>)");
        assert!(zs.starts_with("abandon"));
    }

    #[test]
    fn string_manual_zeroize_clears() {
        let mut zs = ZeroizingString::new("passphrase".into());
        zs.zeroize();
        assert!(zs.is_empty());
    }
}
