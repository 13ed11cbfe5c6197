//! BIP-32 derivation paths such as `m/44'/60'/0'/0/0`.

use std::fmt;
use std::str::FromStr;

use crate::error::WalletError;

/// Bit set on a child index to mark hardened derivation.
pub const HARDENED_BIT: u32 = 0x8000_0000;

/// One path segment: a 31-bit index plus the hardened flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildIndex {
    index: u32,
    hardened: bool,
}

impl ChildIndex {
    pub fn new(index: u32, hardened: bool) -> Result<Self, WalletError> {
        if index >= HARDENED_BIT {
            return Err(WalletError::DerivationFailed(format!(
                "child index {index} does not fit in 31 bits"
            )));
        }
        Ok(Self { index, hardened })
    }

    pub fn normal(index: u32) -> Result<Self, WalletError> {
        Self::new(index, false)
    }

    pub fn hardened(index: u32) -> Result<Self, WalletError> {
        Self::new(index, true)
    }

    /// Index without the hardened bit.
    pub fn index(self) -> u32 {
        self.index
    }

    pub fn is_hardened(self) -> bool {
        self.hardened
    }

    /// The 32-bit value serialized into HMAC input and extended keys.
    pub fn to_u32(self) -> u32 {
        if self.hardened {
            self.index | HARDENED_BIT
        } else {
            self.index
        }
    }

    pub fn from_u32(raw: u32) -> Self {
        Self {
            index: raw & !HARDENED_BIT,
            hardened: raw & HARDENED_BIT != 0,
        }
    }

    /// The sibling `offset` positions further along, keeping the hardened flag.
    pub fn checked_add(self, offset: u32) -> Result<Self, WalletError> {
        let index = self
            .index
            .checked_add(offset)
            .ok_or_else(|| WalletError::DerivationFailed("child index overflow".into()))?;
        Self::new(index, self.hardened)
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

impl FromStr for ChildIndex {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (digits, hardened) = match s.strip_suffix(['\'', 'h', 'H']) {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(WalletError::DerivationFailed(format!(
                "invalid path component '{s}'"
            )));
        }
        let index = digits.parse::<u32>().map_err(|e| {
            WalletError::DerivationFailed(format!("invalid path component '{s}': {e}"))
        })?;
        Self::new(index, hardened)
    }
}

/// An ordered list of child indices applied from the master key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath {
    segments: Vec<ChildIndex>,
}

impl DerivationPath {
    /// The empty path `m`.
    pub fn master() -> Self {
        Self::default()
    }

    pub fn from_segments(segments: Vec<ChildIndex>) -> Self {
        Self { segments }
    }

    /// BIP-44 external-chain path `m/44'/coin'/account'/0/index`.
    pub fn bip44(coin_type: u32, account: u32, index: u32) -> Result<Self, WalletError> {
        Ok(Self::from_segments(vec![
            ChildIndex::hardened(44)?,
            ChildIndex::hardened(coin_type)?,
            ChildIndex::hardened(account)?,
            ChildIndex::normal(0)?,
            ChildIndex::normal(index)?,
        ]))
    }

    pub fn segments(&self) -> &[ChildIndex] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<ChildIndex> {
        self.segments.last().copied()
    }

    /// Path without its final segment, or `None` for `m`.
    pub fn parent(&self) -> Option<Self> {
        let (_, head) = self.segments.split_last()?;
        Some(Self::from_segments(head.to_vec()))
    }

    pub fn child(&self, index: ChildIndex) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index);
        Self { segments }
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().split('/');
        match parts.next() {
            Some("m") | Some("M") => {}
            _ => {
                return Err(WalletError::DerivationFailed(format!(
                    "path '{s}' must start with m"
                )))
            }
        }
        let segments = parts.map(str::parse).collect::<Result<Vec<ChildIndex>, _>>()?;
        Ok(Self { segments })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bip44_path() {
        let path: DerivationPath = "m/44'/60'/0'/0/0".parse().unwrap();
        let raw: Vec<u32> = path.segments().iter().map(|c| c.to_u32()).collect();
        assert_eq!(
            raw,
            vec![44 | HARDENED_BIT, 60 | HARDENED_BIT, HARDENED_BIT, 0, 0]
        );
        assert_eq!(path.to_string(), "m/44'/60'/0'/0/0");
    }

    #[test]
    fn hardened_markers_are_equivalent() {
        let a: DerivationPath = "m/44'/0'".parse().unwrap();
        let b: DerivationPath = "m/44h/0H".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn master_path() {
        let path: DerivationPath = "m".parse().unwrap();
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "m");
        assert_eq!(path.parent(), None);
    }

    #[test]
    fn malformed_paths_are_rejected() {
        let cases = [
            "",
            "44'/0'",
            "m/",
            "m//0",
            "m/x",
            "m/-1",
            "m/1''",
            "n/0",
            "m/2147483648",
        ];
        for bad in cases {
            assert!(
                matches!(
                    bad.parse::<DerivationPath>(),
                    Err(WalletError::DerivationFailed(_))
                ),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn largest_index_is_accepted() {
        let path: DerivationPath = "m/2147483647'".parse().unwrap();
        assert_eq!(path.last().unwrap().to_u32(), u32::MAX);
    }

    #[test]
    fn parent_and_child() {
        let path: DerivationPath = "m/44'/0'/0'/0/7".parse().unwrap();
        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "m/44'/0'/0'/0");
        assert_eq!(parent.child(path.last().unwrap()), path);
    }

    #[test]
    fn bip44_constructor() {
        let path = DerivationPath::bip44(3, 1, 9).unwrap();
        assert_eq!(path.to_string(), "m/44'/3'/1'/0/9");
    }

    #[test]
    fn child_index_arithmetic() {
        let idx = ChildIndex::hardened(5).unwrap();
        assert_eq!(idx.checked_add(4).unwrap().to_string(), "9'");
        let top = ChildIndex::normal(HARDENED_BIT - 1).unwrap();
        assert!(top.checked_add(1).is_err());
        assert_eq!(ChildIndex::from_u32(idx.to_u32()), idx);
    }
}
