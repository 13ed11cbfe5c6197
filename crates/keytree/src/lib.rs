//! HD wallet key derivation and multi-chain address encoding.
//!
//! Entropy becomes a BIP-39 mnemonic, the mnemonic and passphrase become a
//! seed, the seed roots a BIP-32 key tree, and nodes of that tree are encoded
//! as Ethereum, Bitcoin, Litecoin or Dogecoin addresses. Every function here
//! is a pure transform of its arguments; nothing is cached between calls.

pub mod address;
pub mod config;
pub mod entropy;
pub mod error;
pub mod extended_key;
pub mod mnemonic;
pub mod path;
pub mod types;

use chain_btc::network::BtcNetwork;
use error::WalletError;
use path::DerivationPath;
use types::{DerivedAddress, Network};
use zeroize::Zeroize;

pub use entropy::{EntropyEncoding, WordCount};
pub use extended_key::ExtendedKey;
pub use mnemonic::{mnemonic_to_entropy_hex, mnemonic_to_seed, validate_mnemonic};

/// Generate a mnemonic of 12, 15, 18, 21 or 24 words from OS randomness.
#[tracing::instrument(level = "debug")]
pub fn generate_random_mnemonic(word_count: usize) -> Result<String, WalletError> {
    let word_count = WordCount::from_word_count(word_count)?;
    mnemonic::generate_mnemonic(word_count)
}

/// Turn user-supplied entropy text into a mnemonic.
///
/// `encoding` is `"hex"`, `"binary"` or `"dice"`; unknown names are read as hex.
#[tracing::instrument(level = "debug", skip(entropy_text))]
pub fn entropy_to_mnemonic(entropy_text: &str, encoding: &str) -> Result<String, WalletError> {
    let encoding = EntropyEncoding::from_name(encoding);
    let entropy = entropy::parse_entropy(entropy_text, encoding)?;
    mnemonic::entropy_to_mnemonic(&entropy)
}

/// Derive `count` consecutive addresses starting at `path`.
///
/// A blank `path` selects the network's default; an unknown `network` name
/// falls back to Bitcoin. Ethereum addresses are lowercase.
pub fn derive_addresses(
    mnemonic_phrase: &str,
    passphrase: &str,
    path: &str,
    network: &str,
    count: u32,
) -> Result<Vec<DerivedAddress>, WalletError> {
    let path = Some(path).filter(|p| !p.trim().is_empty());
    derive_addresses_with_options(mnemonic_phrase, passphrase, path, network, count, false)
}

/// [`derive_addresses`] with an optional path and EIP-55 casing switch.
#[tracing::instrument(skip(mnemonic_phrase, passphrase), err)]
pub fn derive_addresses_with_options(
    mnemonic_phrase: &str,
    passphrase: &str,
    path: Option<&str>,
    network: &str,
    count: u32,
    checksum_case: bool,
) -> Result<Vec<DerivedAddress>, WalletError> {
    let network = Network::from_name(network);
    let path = match path {
        Some(p) => p.parse::<DerivationPath>()?,
        None => network.default_path(),
    };

    let mut seed = mnemonic::mnemonic_to_seed(mnemonic_phrase, passphrase)?;
    let result = address::derive_addresses(&seed, &path, network, count, checksum_case);
    seed.zeroize();

    if let Ok(addrs) = &result {
        tracing::debug!(%network, %path, derived = addrs.len(), "derived addresses");
    }
    result
}

/// Export a hex private key as Bitcoin WIF.
pub fn private_key_to_wif(
    private_key_hex: &str,
    compressed: bool,
    testnet: bool,
) -> Result<String, WalletError> {
    let mut key = hex::decode(private_key_hex.trim().trim_start_matches("0x"))
        .map_err(|e| WalletError::InvalidKeyMaterial(format!("private key hex: {e}")))?;

    let in_range = k256::SecretKey::from_slice(&key).is_ok() && key.len() == 32;
    let result = if in_range {
        let version = BtcNetwork::from_testnet_flag(testnet).version_bytes().wif;
        chain_btc::wif::private_key_to_wif(&key, version, compressed).map_err(WalletError::from)
    } else {
        Err(WalletError::InvalidKeyMaterial(format!(
            "private key must be 32 bytes in [1, n), got {} bytes",
            key.len()
        )))
    };
    key.zeroize();
    result
}

/// Default BIP-44 path for a network name, e.g. `m/44'/60'/0'/0/0`.
pub fn default_derivation_path(network: &str) -> String {
    Network::from_name(network).default_path().to_string()
}
