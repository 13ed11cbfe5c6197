use std::fmt;
use std::str::FromStr;

use chain_btc::network::{
    VersionBytes, BITCOIN_MAINNET, BITCOIN_TESTNET, DOGECOIN_MAINNET, DOGECOIN_TESTNET,
    LITECOIN_MAINNET, LITECOIN_TESTNET,
};
use serde::{Deserialize, Serialize};

use crate::error::WalletError;
use crate::path::DerivationPath;

/// Public-key hash used to build an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressHash {
    /// Last 20 bytes of Keccak-256 over the raw 64-byte point.
    Keccak256,
    /// RIPEMD-160(SHA-256(compressed key)) wrapped in Base58Check.
    Hash160,
}

/// Constant parameters for one supported network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkParams {
    pub name: &'static str,
    pub display_name: &'static str,
    /// BIP-44 coin type
    pub coin_type: u32,
    pub hash: AddressHash,
    /// Base58Check version bytes; `None` for Keccak-addressed networks.
    pub versions: Option<VersionBytes>,
    pub compressed_keys: bool,
    pub is_testnet: bool,
}

const fn base58_params(
    name: &'static str,
    display_name: &'static str,
    coin_type: u32,
    versions: VersionBytes,
    is_testnet: bool,
) -> NetworkParams {
    NetworkParams {
        name,
        display_name,
        coin_type,
        hash: AddressHash::Hash160,
        versions: Some(versions),
        compressed_keys: true,
        is_testnet,
    }
}

const BIP44: NetworkParams = base58_params("bip44", "BIP44", 0, BITCOIN_MAINNET, false);
const BITCOIN: NetworkParams = base58_params("bitcoin", "Bitcoin", 0, BITCOIN_MAINNET, false);
const BITCOIN_TEST: NetworkParams = base58_params(
    "bitcoin-testnet",
    "Bitcoin Testnet",
    1,
    BITCOIN_TESTNET,
    true,
);
const LITECOIN: NetworkParams = base58_params("litecoin", "Litecoin", 2, LITECOIN_MAINNET, false);
const LITECOIN_TEST: NetworkParams = base58_params(
    "litecoin-testnet",
    "Litecoin Testnet",
    1,
    LITECOIN_TESTNET,
    true,
);
const DOGECOIN: NetworkParams = base58_params("dogecoin", "Dogecoin", 3, DOGECOIN_MAINNET, false);
const DOGECOIN_TEST: NetworkParams = base58_params(
    "dogecoin-testnet",
    "Dogecoin Testnet",
    1,
    DOGECOIN_TESTNET,
    true,
);
const ETHEREUM: NetworkParams = NetworkParams {
    name: "ethereum",
    display_name: "Ethereum",
    coin_type: 60,
    hash: AddressHash::Keccak256,
    versions: None,
    compressed_keys: false,
    is_testnet: false,
};

/// Supported networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Network {
    /// Generic BIP-44 wallet using Bitcoin's encoding.
    Bip44,
    #[default]
    Bitcoin,
    BitcoinTestnet,
    Ethereum,
    Litecoin,
    LitecoinTestnet,
    Dogecoin,
    DogecoinTestnet,
}

impl Network {
    pub const ALL: [Network; 8] = [
        Network::Bip44,
        Network::Bitcoin,
        Network::BitcoinTestnet,
        Network::Ethereum,
        Network::Litecoin,
        Network::LitecoinTestnet,
        Network::Dogecoin,
        Network::DogecoinTestnet,
    ];

    pub fn params(&self) -> &'static NetworkParams {
        match self {
            Network::Bip44 => &BIP44,
            Network::Bitcoin => &BITCOIN,
            Network::BitcoinTestnet => &BITCOIN_TEST,
            Network::Ethereum => &ETHEREUM,
            Network::Litecoin => &LITECOIN,
            Network::LitecoinTestnet => &LITECOIN_TEST,
            Network::Dogecoin => &DOGECOIN,
            Network::DogecoinTestnet => &DOGECOIN_TEST,
        }
    }

    /// Resolve a network name, falling back to Bitcoin for unknown names.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!(network = name, "unknown network, using the Bitcoin encoder");
            Network::Bitcoin
        })
    }

    /// BIP-44 coin type
    pub fn coin_type(&self) -> u32 {
        self.params().coin_type
    }

    pub fn display_name(&self) -> &'static str {
        self.params().display_name
    }

    pub fn is_testnet(&self) -> bool {
        self.params().is_testnet
    }

    /// First external address of account 0: `m/44'/coin'/0'/0/0`.
    pub fn default_path(&self) -> DerivationPath {
        let coin = self.coin_type();
        DerivationPath::bip44(coin, 0, 0).unwrap_or_default()
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Network::ALL
            .into_iter()
            .find(|n| n.params().name == lower)
            .ok_or_else(|| WalletError::InvalidConfig(format!("unknown network '{s}'")))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.params().name)
    }
}

/// One derived address, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedAddress {
    /// Full path of this key, e.g. `m/44'/60'/0'/0/3`.
    pub path: String,
    pub address: String,
    /// Compressed SEC1 public key, lowercase hex.
    pub public_key_hex: String,
    /// WIF for Base58Check networks, lowercase hex for Ethereum.
    pub private_key: String,
}
