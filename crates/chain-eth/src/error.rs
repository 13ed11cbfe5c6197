use thiserror::Error;

/// Ethereum encoding errors.
#[derive(Debug, Error)]
pub enum EthError {
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),
}

impl From<crypto_utils::CryptoError> for EthError {
    fn from(e: crypto_utils::CryptoError) -> Self {
        EthError::InvalidPublicKey(e.to_string())
    }
}
