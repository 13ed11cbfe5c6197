//! Entropy text parsing and BIP-39 word-count/entropy-size mapping.

use std::fmt;
use std::str::FromStr;

use crypto_utils::zeroizing::ZeroizingBytes;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::WalletError;

/// Textual encodings accepted for user-supplied entropy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntropyEncoding {
    /// Hex digits; whitespace is ignored.
    #[default]
    Hex,
    /// `0`/`1` characters; everything else is ignored.
    Binary,
    /// Die faces `1`-`6`; everything else is ignored.
    Dice,
}

impl EntropyEncoding {
    /// Resolve an encoding name, falling back to hex for unknown names.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(
                encoding = name,
                "unknown entropy encoding, treating input as hex"
            );
            EntropyEncoding::Hex
        })
    }
}

impl FromStr for EntropyEncoding {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(EntropyEncoding::Hex),
            "binary" => Ok(EntropyEncoding::Binary),
            "dice" => Ok(EntropyEncoding::Dice),
            other => Err(WalletError::InvalidEntropyFormat(format!(
                "unknown encoding '{other}'"
            ))),
        }
    }
}

impl fmt::Display for EntropyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntropyEncoding::Hex => write!(f, "hex"),
            EntropyEncoding::Binary => write!(f, "binary"),
            EntropyEncoding::Dice => write!(f, "dice"),
        }
    }
}

/// Supported mnemonic lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordCount {
    Words12,
    Words15,
    Words18,
    Words21,
    Words24,
}

impl WordCount {
    pub const ALL: [WordCount; 5] = [
        WordCount::Words12,
        WordCount::Words15,
        WordCount::Words18,
        WordCount::Words21,
        WordCount::Words24,
    ];

    pub fn word_count(self) -> usize {
        match self {
            WordCount::Words12 => 12,
            WordCount::Words15 => 15,
            WordCount::Words18 => 18,
            WordCount::Words21 => 21,
            WordCount::Words24 => 24,
        }
    }

    /// Entropy size in bytes: 128 bits for 12 words up to 256 bits for 24.
    pub fn entropy_bytes(self) -> usize {
        self.word_count() * 4 / 3
    }

    pub fn from_word_count(count: usize) -> Result<Self, WalletError> {
        Self::ALL
            .into_iter()
            .find(|wc| wc.word_count() == count)
            .ok_or_else(|| {
                WalletError::InvalidMnemonic(format!(
                    "unsupported word count {count}, expected 12, 15, 18, 21 or 24"
                ))
            })
    }
}

/// Entropy bytes needed for a mnemonic of `count` words.
pub fn entropy_bytes_for_word_count(count: usize) -> Result<usize, WalletError> {
    WordCount::from_word_count(count).map(WordCount::entropy_bytes)
}

/// Parse entropy text in the given encoding into raw bytes.
///
/// Binary and dice input is reduced to a bit string, trailing bits beyond
/// the last full nibble are dropped, and the remaining nibbles must pair up
/// into whole bytes.
pub fn parse_entropy(text: &str, encoding: EntropyEncoding) -> Result<ZeroizingBytes, WalletError> {
    match encoding {
        EntropyEncoding::Hex => parse_hex(text),
        EntropyEncoding::Binary => {
            let mut bits: Vec<u8> = text
                .chars()
                .filter_map(|c| match c {
                    '0' => Some(0),
                    '1' => Some(1),
                    _ => None,
                })
                .collect();
            let bytes = bits_to_bytes(&bits);
            bits.zeroize();
            bytes
        }
        EntropyEncoding::Dice => {
            let mut bits = Vec::new();
            let digits = text.chars().filter_map(|c| c.to_digit(10));
            for roll in digits.filter(|d| (1..=6).contains(d)) {
                let value = (roll - 1) as u8;
                bits.extend_from_slice(&[(value >> 2) & 1, (value >> 1) & 1, value & 1]);
            }
            let bytes = bits_to_bytes(&bits);
            bits.zeroize();
            bytes
        }
    }
}

fn parse_hex(text: &str) -> Result<ZeroizingBytes, WalletError> {
    let mut digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.is_empty() {
        return Err(WalletError::InvalidEntropyFormat("no hex digits".into()));
    }
    let decoded = hex::decode(&digits)
        .map_err(|e| WalletError::InvalidEntropyFormat(format!("hex: {e}")));
    digits.zeroize();
    decoded.map(ZeroizingBytes::new)
}

fn bits_to_bytes(bits: &[u8]) -> Result<ZeroizingBytes, WalletError> {
    let usable = bits.len() / 4 * 4;
    if usable == 0 {
        return Err(WalletError::InvalidEntropyFormat(
            "fewer than 4 bits of entropy".into(),
        ));
    }
    if usable != bits.len() {
        tracing::warn!(
            dropped = bits.len() - usable,
            kept = usable,
            "truncating entropy to a whole number of nibbles"
        );
    }
    if usable % 8 != 0 {
        return Err(WalletError::InvalidEntropyFormat(format!(
            "{usable} bits is not a whole number of bytes"
        )));
    }

    let bytes = bits[..usable]
        .chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit))
        .collect();
    Ok(ZeroizingBytes::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_counts_map_to_entropy_sizes() {
        let sizes: Vec<(usize, usize)> = WordCount::ALL
            .iter()
            .map(|wc| (wc.word_count(), wc.entropy_bytes()))
            .collect();
        assert_eq!(
            sizes,
            vec![(12, 16), (15, 20), (18, 24), (21, 28), (24, 32)]
        );
    }

    #[test]
    fn unsupported_word_count_is_rejected() {
        for bad in [0, 11, 13, 25] {
            assert!(matches!(
                entropy_bytes_for_word_count(bad),
                Err(WalletError::InvalidMnemonic(_))
            ));
        }
        assert_eq!(entropy_bytes_for_word_count(24).unwrap(), 32);
    }

    #[test]
    fn encoding_names() {
        let parse = |name: &str| name.parse::<EntropyEncoding>();
        assert_eq!(parse("HEX").unwrap(), EntropyEncoding::Hex);
        assert_eq!(parse("binary").unwrap(), EntropyEncoding::Binary);
        assert_eq!(parse(" dice ").unwrap(), EntropyEncoding::Dice);
        assert!(parse("base64").is_err());
        assert_eq!(EntropyEncoding::from_name("base64"), EntropyEncoding::Hex);
        assert_eq!(EntropyEncoding::Dice.to_string(), "dice");
    }

    #[test]
    fn hex_ignores_whitespace() {
        let bytes = parse_entropy("00 11\n22\t33", EntropyEncoding::Hex).unwrap();
        assert_eq!(&*bytes, &[0x00, 0x11, 0x22, 0x33]);
    }

    #[test]
    fn hex_rejects_odd_length_and_bad_digits() {
        assert!(matches!(
            parse_entropy("abc", EntropyEncoding::Hex),
            Err(WalletError::InvalidEntropyFormat(_))
        ));
        assert!(matches!(
            parse_entropy("zz", EntropyEncoding::Hex),
            Err(WalletError::InvalidEntropyFormat(_))
        ));
        assert!(parse_entropy("   ", EntropyEncoding::Hex).is_err());
    }

    #[test]
    fn binary_exact_bytes() {
        let bytes = parse_entropy("0000 0001 1111 1111", EntropyEncoding::Binary).unwrap();
        assert_eq!(&*bytes, &[0x01, 0xff]);
    }

    #[test]
    fn binary_truncates_trailing_bits() {
        // 129 bits: the extra bit is dropped, leaving exactly 16 bytes.
        let input = format!("{}1", "10".repeat(64));
        let bytes = parse_entropy(&input, EntropyEncoding::Binary).unwrap();
        assert_eq!(bytes.len(), 16);
        assert!(bytes.iter().all(|&b| b == 0xaa));
    }

    #[test]
    fn binary_odd_nibble_count_fails() {
        // 12 bits = 3 nibbles, not a whole number of bytes.
        assert!(matches!(
            parse_entropy("000000011111", EntropyEncoding::Binary),
            Err(WalletError::InvalidEntropyFormat(_))
        ));
    }

    #[test]
    fn binary_without_bits_fails() {
        assert!(parse_entropy("abc", EntropyEncoding::Binary).is_err());
        assert!(parse_entropy("101", EntropyEncoding::Binary).is_err());
    }

    #[test]
    fn dice_maps_faces_to_three_bits() {
        // Faces 1..6 -> 000 001 010 011 100 101 (18 bits) -> 16 bits kept.
        let bytes = parse_entropy("123456", EntropyEncoding::Dice).unwrap();
        assert_eq!(&*bytes, &[0x05, 0x39]);
    }

    #[test]
    fn dice_ignores_other_characters() {
        let plain = parse_entropy("123456", EntropyEncoding::Dice).unwrap();
        let noisy = parse_entropy("1-2-3 0 4,5,7,6 9", EntropyEncoding::Dice).unwrap();
        assert_eq!(plain, noisy);
    }

    #[test]
    fn dice_rolls_for_128_bits() {
        // 43 rolls = 129 bits, truncated to 128.
        let rolls = "6".repeat(43);
        let bytes = parse_entropy(&rolls, EntropyEncoding::Dice).unwrap();
        assert_eq!(bytes.len(), 16);
        // Face 6 -> 101 repeated.
        assert_eq!(bytes[0], 0b1011_0110);
    }
}
