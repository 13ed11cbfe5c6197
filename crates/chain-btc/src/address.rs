use crypto_utils::{base58, hash, point};

use crate::error::BtcError;

/// Length of a decoded P2PKH address: version + HASH160 + checksum.
pub const P2PKH_ADDRESS_LEN: usize = 25;

/// Derive a legacy P2PKH address from a secp256k1 public key.
///
/// The key may be given compressed (33 bytes), uncompressed (65 bytes) or
/// raw (64 bytes); it is always compressed before hashing, so all three
/// forms of the same point yield the same address.
///
/// Steps:
/// 1. HASH160 = RIPEMD-160(SHA-256(compressed pubkey))
/// 2. Prepend the 1-byte `version`
/// 3. Base58Check encode (4-byte double SHA-256 checksum)
pub fn pubkey_to_p2pkh_address(pubkey: &[u8], version: u8) -> Result<String, BtcError> {
    let compressed = point::compress(pubkey)?;
    let pubkey_hash = hash::hash160(&compressed);

    let mut payload = [0u8; 21];
    payload[0] = version;
    payload[1..].copy_from_slice(&pubkey_hash);

    Ok(base58::encode_check(&payload))
}

/// Split a P2PKH address into its version byte and 20-byte public key hash.
///
/// Fails if the string is not Base58, does not decode to exactly 25 bytes,
/// or carries a wrong checksum.
pub fn decode_address(address: &str) -> Result<(u8, [u8; 20]), BtcError> {
    let raw = base58::decode(address)
        .map_err(|e| BtcError::InvalidAddress(e.to_string()))?;
    if raw.len() != P2PKH_ADDRESS_LEN {
        return Err(BtcError::InvalidAddress(format!(
            "expected {P2PKH_ADDRESS_LEN} bytes, got {}",
            raw.len()
        )));
    }

    let payload = base58::decode_check(address)
        .map_err(|e| BtcError::InvalidAddress(e.to_string()))?;

    let mut pubkey_hash = [0u8; 20];
    pubkey_hash.copy_from_slice(&payload[1..]);
    Ok((payload[0], pubkey_hash))
}

/// Validate a P2PKH address against an expected version byte.
///
/// Returns `Ok(false)` for a well-formed address of another network and an
/// error for anything that is not a well-formed address at all.
pub fn validate_address(address: &str, version: u8) -> Result<bool, BtcError> {
    let (found, _) = decode_address(address)?;
    Ok(found == version)
}
