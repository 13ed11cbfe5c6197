use bip39::{Language, Mnemonic};
use crypto_utils::random::secure_random_bytes;
use crypto_utils::zeroizing::{ZeroizingBytes, ZeroizingString};

use crate::entropy::WordCount;
use crate::error::WalletError;

/// Length of a BIP-39 seed.
pub const SEED_LEN: usize = 64;

/// Encode entropy as an English BIP-39 mnemonic.
///
/// The first `len * 8 / 32` bits of SHA-256(entropy) are appended as a
/// checksum and the result is split into 11-bit word indices. Entropy must
/// be 16, 20, 24, 28 or 32 bytes.
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<String, WalletError> {
    if !WordCount::ALL.iter().any(|wc| wc.entropy_bytes() == entropy.len()) {
        return Err(WalletError::InvalidEntropyFormat(format!(
            "{} bytes of entropy, expected 16, 20, 24, 28 or 32",
            entropy.len()
        )));
    }
    let mnemonic = Mnemonic::from_entropy_in(Language::English, entropy)
        .map_err(|e| WalletError::InvalidEntropyFormat(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Generate a mnemonic from fresh OS randomness.
pub fn generate_mnemonic(word_count: WordCount) -> Result<String, WalletError> {
    let entropy = secure_random_bytes(word_count.entropy_bytes());
    entropy_to_mnemonic(&entropy)
}

/// Collapse runs of whitespace and surrounding blanks into single spaces.
pub fn normalize_phrase(phrase: &str) -> ZeroizingString {
    phrase.split_whitespace().collect::<Vec<_>>().join(" ").into()
}

fn parse(phrase: &str) -> Result<Mnemonic, WalletError> {
    let normalized = normalize_phrase(phrase);
    Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| WalletError::InvalidMnemonic(e.to_string()))
}

/// Check word count, word-list membership and checksum.
///
/// This is a predicate: any defect yields `false`, never an error.
pub fn validate_mnemonic(phrase: &str) -> bool {
    parse(phrase).is_ok()
}

/// Recover the entropy a valid mnemonic encodes.
pub fn mnemonic_to_entropy(phrase: &str) -> Result<ZeroizingBytes, WalletError> {
    let mnemonic = parse(phrase)?;
    Ok(ZeroizingBytes::new(mnemonic.to_entropy()))
}

/// Recovered entropy as lowercase hex.
pub fn mnemonic_to_entropy_hex(phrase: &str) -> Result<String, WalletError> {
    Ok(mnemonic_to_entropy(phrase)?.to_hex())
}

/// Derive the 64-byte seed: PBKDF2-HMAC-SHA512, 2048 rounds, salt
/// `"mnemonic" + passphrase`, normalized phrase as the password.
///
/// The phrase must be valid; an invalid one fails rather than producing a
/// seed nobody else would derive.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> Result<ZeroizingBytes, WalletError> {
    let mnemonic = parse(phrase)?;
    let seed = mnemonic.to_seed(passphrase);
    Ok(ZeroizingBytes::from(&seed[..]))
}

/// The English BIP-39 word list (2048 words).
pub fn word_list() -> &'static [&'static str] {
    Language::English.word_list()
}

/// Validate a single word against the BIP-39 word list
pub fn is_valid_word(word: &str) -> bool {
    Language::English.find_word(word).is_some()
}
