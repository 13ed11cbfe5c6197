use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Invalid entropy: {0}")]
    InvalidEntropyFormat(String),

    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Invalid point: {0}")]
    InvalidPoint(String),

    #[error("Invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("Invalid base58: {0}")]
    InvalidBase58(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<crypto_utils::CryptoError> for WalletError {
    fn from(e: crypto_utils::CryptoError) -> Self {
        use crypto_utils::CryptoError;
        match e {
            CryptoError::InvalidPoint(msg) => WalletError::InvalidPoint(msg),
            CryptoError::InvalidBase58(msg) => WalletError::InvalidBase58(msg),
            other => WalletError::InvalidKeyMaterial(other.to_string()),
        }
    }
}

impl From<chain_btc::error::BtcError> for WalletError {
    fn from(e: chain_btc::error::BtcError) -> Self {
        WalletError::InvalidKeyMaterial(format!("BTC: {e}"))
    }
}

impl From<chain_eth::error::EthError> for WalletError {
    fn from(e: chain_eth::error::EthError) -> Self {
        WalletError::InvalidKeyMaterial(format!("ETH: {e}"))
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        WalletError::InvalidConfig(e.to_string())
    }
}
