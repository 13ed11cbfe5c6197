use crypto_utils::{hash, point};

use crate::error::EthError;

/// Raw 20-byte account address of a secp256k1 public key.
///
/// Accepts 33-byte compressed, 65-byte `0x04`-prefixed or 64-byte raw keys;
/// compressed keys are decompressed on the curve first.
pub fn pubkey_to_address_bytes(pubkey: &[u8]) -> Result<[u8; 20], EthError> {
    let uncompressed = point::decompress(pubkey)?;

    // Keccak-256 over x || y, without the 0x04 tag.
    let digest = hash::keccak256(&uncompressed[1..]);

    let mut addr = [0u8; 20];
    addr.copy_from_slice(&digest[12..]);
    Ok(addr)
}

/// Lowercase `0x`-prefixed address (42 characters).
pub fn pubkey_to_eth_address(pubkey: &[u8]) -> Result<String, EthError> {
    let addr = pubkey_to_address_bytes(pubkey)?;
    Ok(format!("0x{}", hex::encode(addr)))
}

/// EIP-55 mixed-case address for a public key.
pub fn pubkey_to_checksum_address(pubkey: &[u8]) -> Result<String, EthError> {
    let lower = pubkey_to_eth_address(pubkey)?;
    checksum_address(&lower)
}

/// Applies EIP-55 casing to a `0x`-prefixed address of any case.
///
/// A hex letter is uppercased when the matching nibble of
/// `keccak256(lowercase_hex)` is 8 or higher.
pub fn checksum_address(address: &str) -> Result<String, EthError> {
    let hex_part = strip_and_check(address)?.to_ascii_lowercase();
    let digest = hash::keccak256(hex_part.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in hex_part.chars().enumerate() {
        let byte = digest[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Validates an Ethereum address string.
///
/// All-lowercase and all-uppercase addresses carry no checksum and are
/// accepted on format alone; mixed case must match EIP-55 exactly.
pub fn validate_address(address: &str) -> Result<bool, EthError> {
    let hex_part = strip_and_check(address)?;

    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return Ok(true);
    }

    Ok(checksum_address(address)?[2..] == *hex_part)
}

fn strip_and_check(address: &str) -> Result<&str, EthError> {
    let hex_part = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| EthError::InvalidAddress("address must start with 0x".into()))?;

    if hex_part.len() != 40 {
        return Err(EthError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_part.len()
        )));
    }
    if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EthError::InvalidAddress(
            "address contains non-hex characters".into(),
        ));
    }
    Ok(hex_part)
}
