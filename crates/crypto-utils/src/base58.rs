//! Base58 and Base58Check codecs over the Bitcoin alphabet.
//!
//! The payload is treated as a big-endian integer and re-expressed in base
//! 58; every leading zero byte becomes a leading `'1'`. Base58Check appends
//! the first four bytes of `SHA-256(SHA-256(payload))` before encoding.

use crate::error::CryptoError;
use crate::hash::checksum4;

/// The 58-character Bitcoin alphabet (digits and letters minus `0OIl`).
pub const ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Encode raw bytes as Base58.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decode a Base58 string. Any character outside [`ALPHABET`] is rejected.
pub fn decode(input: &str) -> Result<Vec<u8>, CryptoError> {
    bs58::decode(input)
        .into_vec()
        .map_err(|e| CryptoError::InvalidBase58(e.to_string()))
}

/// Append the 4-byte double-SHA-256 checksum and Base58-encode.
pub fn encode_check(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum4(payload));
    encode(&data)
}

/// Decode a Base58Check string and return the payload without its checksum.
pub fn decode_check(input: &str) -> Result<Vec<u8>, CryptoError> {
    let mut data = decode(input)?;
    if data.len() < 4 {
        return Err(CryptoError::InvalidBase58(format!(
            "payload too short for checksum: {} bytes",
            data.len()
        )));
    }

    let split = data.len() - 4;
    if data[split..] != checksum4(&data[..split]) {
        return Err(CryptoError::InvalidBase58("checksum mismatch".into()));
    }
    data.truncate(split);
    Ok(data)
}
