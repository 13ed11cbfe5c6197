use chain_btc::address::pubkey_to_p2pkh_address;
use chain_btc::wif::private_key_to_wif;

use crate::error::WalletError;
use crate::extended_key::ExtendedKey;
use crate::path::DerivationPath;
use crate::types::{AddressHash, DerivedAddress, Network};

/// Encode a public key (33, 64 or 65 bytes) as a display address for `network`.
///
/// `checksum_case` applies EIP-55 casing to Ethereum addresses and is ignored
/// by Base58Check networks.
pub fn encode_address(
    network: Network,
    public_key: &[u8],
    checksum_case: bool,
) -> Result<String, WalletError> {
    let params = network.params();
    match (params.hash, params.versions) {
        (AddressHash::Hash160, Some(versions)) => {
            Ok(pubkey_to_p2pkh_address(public_key, versions.p2pkh)?)
        }
        (AddressHash::Keccak256, _) if checksum_case => {
            Ok(chain_eth::address::pubkey_to_checksum_address(public_key)?)
        }
        (AddressHash::Keccak256, _) => Ok(chain_eth::address::pubkey_to_eth_address(public_key)?),
        (AddressHash::Hash160, None) => Err(WalletError::InvalidConfig(format!(
            "network {network} has no version bytes"
        ))),
    }
}

/// Largest batch a single [`derive_addresses`] call will produce.
pub const MAX_ADDRESS_COUNT: u32 = 1000;

/// Render a 32-byte private key for `network`: WIF for Base58Check networks
/// (flagged compressed when the network uses compressed keys), lowercase hex
/// for Ethereum.
pub fn encode_private_key(
    network: Network,
    private_key: &[u8; 32],
) -> Result<String, WalletError> {
    let params = network.params();
    match params.versions {
        Some(versions) => Ok(private_key_to_wif(
            private_key,
            versions.wif,
            params.compressed_keys,
        )?),
        None => Ok(hex::encode(private_key)),
    }
}

/// Check that `address` is well-formed for `network`.
pub fn validate_address(address: &str, network: Network) -> Result<bool, WalletError> {
    match network.params().versions {
        Some(versions) => Ok(chain_btc::address::validate_address(address, versions.p2pkh)?),
        None => Ok(chain_eth::address::validate_address(address)?),
    }
}

/// Project one private node into its display form.
pub fn describe_node(
    node: &ExtendedKey,
    path: &DerivationPath,
    network: Network,
    checksum_case: bool,
) -> Result<DerivedAddress, WalletError> {
    let private_key = node.private_key().ok_or_else(|| {
        WalletError::DerivationFailed(format!("node at {path} has no private key"))
    })?;

    Ok(DerivedAddress {
        path: path.to_string(),
        address: encode_address(network, node.public_key(), checksum_case)?,
        public_key_hex: hex::encode(node.public_key()),
        private_key: encode_private_key(network, private_key)?,
    })
}

/// Derive `count` sibling addresses starting at `path`.
///
/// The parent of `path` is derived once; each address then needs a single
/// child step at `last + i`, keeping the hardened flag of the final segment.
pub fn derive_addresses(
    seed: &[u8],
    path: &DerivationPath,
    network: Network,
    count: u32,
    checksum_case: bool,
) -> Result<Vec<DerivedAddress>, WalletError> {
    let (Some(parent_path), Some(first)) = (path.parent(), path.last()) else {
        return Err(WalletError::DerivationFailed(
            "path must have at least one segment".into(),
        ));
    };

    if count == 0 {
        return Ok(Vec::new());
    }
    if count > MAX_ADDRESS_COUNT {
        return Err(WalletError::DerivationFailed(format!(
            "cannot derive {count} addresses, the limit is {MAX_ADDRESS_COUNT}"
        )));
    }
    // The last sibling must still be a valid 31-bit index.
    first.checked_add(count - 1)?;

    let parent = ExtendedKey::from_seed_and_path(seed, &parent_path)?;
    tracing::debug!(parent = %parent_path, depth = parent.depth(), "derived parent node");

    (0..count)
        .map(|offset| {
            let index = first.checked_add(offset)?;
            let child = parent.derive_child(index)?;
            describe_node(&child, &parent_path.child(index), network, checksum_case)
        })
        .collect()
}
