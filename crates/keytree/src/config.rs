//! JSON-configurable derivation requests.

use serde::Deserialize;

use crate::error::WalletError;
use crate::types::DerivedAddress;

fn default_network() -> String {
    "ethereum".to_string()
}

fn default_count() -> u32 {
    5
}

/// Everything needed to derive a batch of addresses.
///
/// ```json
/// { "mnemonic": "abandon ... about", "network": "litecoin", "count": 3 }
/// ```
#[derive(Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeriveRequest {
    pub mnemonic: String,
    #[serde(default)]
    pub passphrase: String,
    #[serde(default = "default_network")]
    pub network: String,
    /// Defaults to the network's BIP-44 path.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_count")]
    pub count: u32,
    /// EIP-55 casing for Ethereum addresses.
    #[serde(default)]
    pub checksum_case: bool,
}

impl DeriveRequest {
    pub fn from_json(json: &str) -> Result<Self, WalletError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn derive(&self) -> Result<Vec<DerivedAddress>, WalletError> {
        crate::derive_addresses_with_options(
            &self.mnemonic,
            &self.passphrase,
            self.path.as_deref(),
            &self.network,
            self.count,
            self.checksum_case,
        )
    }
}

impl Drop for DeriveRequest {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.mnemonic.zeroize();
        self.passphrase.zeroize();
    }
}

impl std::fmt::Debug for DeriveRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeriveRequest")
            .field("mnemonic", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .field("network", &self.network)
            .field("path", &self.path)
            .field("count", &self.count)
            .field("checksum_case", &self.checksum_case)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn defaults_apply() {
        let json = format!(r#"{{"mnemonic": "{TEST_MNEMONIC}"}}"#);
        let req = DeriveRequest::from_json(&json).unwrap();
        assert_eq!(req.passphrase, "");
        assert_eq!(req.network, "ethereum");
        assert_eq!(req.path, None);
        assert_eq!(req.count, 5);
        assert!(!req.checksum_case);

        let addrs = req.derive().unwrap();
        assert_eq!(addrs.len(), 5);
        assert_eq!(
            addrs[0].address,
            "0x9858effd232b4033e47d90003d41ec34ecaeda94"
        );
    }

    #[test]
    fn explicit_fields() {
        let json = format!(
            r#"{{"mnemonic": "{TEST_MNEMONIC}", "network": "bitcoin", "path": "m/44'/0'/0'/0/0", "count": 1}}"#
        );
        let addrs = DeriveRequest::from_json(&json).unwrap().derive().unwrap();
        assert_eq!(addrs.len(), 1);
        assert_eq!(addrs[0].address, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
    }

    #[test]
    fn malformed_json_is_config_error() {
        let cases = [
            "{}",
            "not json",
            r#"{"mnemonic": "x", "colour": "red"}"#,
            r#"{"mnemonic": "x", "count": -1}"#,
        ];
        for bad in cases {
            assert!(
                matches!(
                    DeriveRequest::from_json(bad),
                    Err(WalletError::InvalidConfig(_))
                ),
                "{bad}"
            );
        }
    }

    #[test]
    fn debug_redacts_secrets() {
        let req = DeriveRequest::from_json(&format!(
            r#"{{"mnemonic": "{TEST_MNEMONIC}", "passphrase": "hunter2"}}"#
        ))
        .unwrap();
        let debug = format!("{req:?}");
        assert!(!debug.contains("abandon"));
        assert!(!debug.contains("hunter2"));
    }
}
