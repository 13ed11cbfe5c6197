use std::fmt;

use crypto_utils::base58;
use zeroize::Zeroize;

use crate::error::BtcError;

/// Suffix appended to a WIF payload whose address uses the compressed key.
const COMPRESSED_FLAG: u8 = 0x01;

/// Private key recovered from a WIF string.
pub struct DecodedWif {
    pub version: u8,
    pub private_key: [u8; 32],
    pub compressed: bool,
}

impl Drop for DecodedWif {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

impl fmt::Debug for DecodedWif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedWif")
            .field("version", &self.version)
            .field("private_key", &"<redacted>")
            .field("compressed", &self.compressed)
            .finish()
    }
}

/// Encode a 32-byte private key in Wallet Import Format.
///
/// Layout before Base58Check: `version || key || [0x01 if compressed]`.
pub fn private_key_to_wif(
    private_key: &[u8],
    version: u8,
    compressed: bool,
) -> Result<String, BtcError> {
    if private_key.len() != 32 {
        return Err(BtcError::InvalidPrivateKey(format!(
            "expected 32 bytes, got {}",
            private_key.len()
        )));
    }

    let mut payload = Vec::with_capacity(34);
    payload.push(version);
    payload.extend_from_slice(private_key);
    if compressed {
        payload.push(COMPRESSED_FLAG);
    }

    let wif = base58::encode_check(&payload);
    payload.zeroize();
    Ok(wif)
}

/// Decode a WIF string, verifying its checksum.
pub fn wif_to_private_key(wif: &str) -> Result<DecodedWif, BtcError> {
    let mut payload =
        base58::decode_check(wif).map_err(|e| BtcError::InvalidWif(e.to_string()))?;

    let compressed = match payload.len() {
        33 => false,
        34 if payload[33] == COMPRESSED_FLAG => true,
        34 => {
            payload.zeroize();
            return Err(BtcError::InvalidWif("bad compression flag".into()));
        }
        other => {
            payload.zeroize();
            return Err(BtcError::InvalidWif(format!(
                "unexpected payload length {other}"
            )));
        }
    };

    let mut private_key = [0u8; 32];
    private_key.copy_from_slice(&payload[1..33]);
    let version = payload[0];
    payload.zeroize();

    Ok(DecodedWif {
        version,
        private_key,
        compressed,
    })
}
