use thiserror::Error;

/// Bitcoin-family encoding errors.
#[derive(Debug, Error)]
pub enum BtcError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid WIF: {0}")]
    InvalidWif(String),
}

impl From<crypto_utils::CryptoError> for BtcError {
    fn from(e: crypto_utils::CryptoError) -> Self {
        BtcError::InvalidPublicKey(e.to_string())
    }
}
