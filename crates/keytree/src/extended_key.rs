//! BIP-32 extended keys and child derivation over secp256k1.
//!
//! Nodes are immutable values: deriving a child builds a new `ExtendedKey`
//! that records its parent only through the 4-byte fingerprint.

use std::fmt;
use std::str::FromStr;

use crypto_utils::zeroizing::ZeroizingString;
use crypto_utils::{base58, hash, point};
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, FieldBytes, ProjectivePoint, PublicKey, Scalar, SecretKey};
use zeroize::Zeroize;

use crate::error::WalletError;
use crate::path::{ChildIndex, DerivationPath};

/// HMAC key for master key generation.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// Mainnet BIP-32 serialization versions.
pub const XPRV_VERSION: u32 = 0x0488_ADE4;
pub const XPUB_VERSION: u32 = 0x0488_B21E;

const SERIALIZED_LEN: usize = 78;

/// A node of the BIP-32 key tree.
///
/// `private_key` is `None` for public-only (neutered) nodes, which can only
/// derive normal children.
#[derive(Clone)]
pub struct ExtendedKey {
    private_key: Option<[u8; 32]>,
    public_key: [u8; 33],
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: ChildIndex,
}

impl ExtendedKey {
    /// Master node: `HMAC-SHA512("Bitcoin seed", seed)` split into private
    /// key (left half) and chain code (right half).
    pub fn master(seed: &[u8]) -> Result<Self, WalletError> {
        if !(16..=64).contains(&seed.len()) {
            return Err(WalletError::InvalidKeyMaterial(format!(
                "seed must be 16 to 64 bytes, got {}",
                seed.len()
            )));
        }

        let mut i = hash::hmac_sha512(MASTER_HMAC_KEY, &[seed])?;
        let result = Self::private_from_halves(&i, 0, [0u8; 4], ChildIndex::from_u32(0));
        i.zeroize();
        result
    }

    /// Convenience: master node of `seed` followed by `path`.
    pub fn from_seed_and_path(seed: &[u8], path: &DerivationPath) -> Result<Self, WalletError> {
        Self::master(seed)?.derive_path(path)
    }

    fn private_from_halves(
        i: &[u8; 64],
        depth: u8,
        parent_fingerprint: [u8; 4],
        child_index: ChildIndex,
    ) -> Result<Self, WalletError> {
        let secret = SecretKey::from_slice(&i[..32]).map_err(|_| {
            WalletError::DerivationFailed("master key is zero or exceeds the curve order".into())
        })?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);

        Ok(Self {
            private_key: Some(secret.to_bytes().into()),
            public_key: point::compressed_bytes(&secret.public_key()),
            chain_code,
            depth,
            parent_fingerprint,
            child_index,
        })
    }

    pub fn private_key(&self) -> Option<&[u8; 32]> {
        self.private_key.as_ref()
    }

    /// 33-byte compressed public key.
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    pub fn child_index(&self) -> ChildIndex {
        self.child_index
    }

    pub fn is_private(&self) -> bool {
        self.private_key.is_some()
    }

    /// First four bytes of HASH160 of this node's public key.
    pub fn fingerprint(&self) -> [u8; 4] {
        let h = hash::hash160(&self.public_key);
        [h[0], h[1], h[2], h[3]]
    }

    /// Copy of this node without its private key.
    pub fn neuter(&self) -> Self {
        Self {
            private_key: None,
            public_key: self.public_key,
            chain_code: self.chain_code,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
        }
    }

    /// Derive one child.
    ///
    /// Hardened: `HMAC-SHA512(c, 0x00 || k || index)`; normal:
    /// `HMAC-SHA512(c, K || index)`. The left half is added to the parent key
    /// modulo n (or `IL * G` to the parent point for public-only nodes); the
    /// right half is the child chain code. An out-of-range tweak or a zero
    /// result is rejected rather than skipped.
    pub fn derive_child(&self, index: ChildIndex) -> Result<Self, WalletError> {
        let depth = self
            .depth
            .checked_add(1)
            .ok_or_else(|| WalletError::DerivationFailed("maximum depth of 255 reached".into()))?;
        let index_be = index.to_u32().to_be_bytes();

        let mut i = match (&self.private_key, index.is_hardened()) {
            (Some(k), true) => hash::hmac_sha512(&self.chain_code, &[&[0x00], k, &index_be])?,
            (_, false) => hash::hmac_sha512(&self.chain_code, &[&self.public_key, &index_be])?,
            (None, true) => {
                return Err(WalletError::DerivationFailed(format!(
                    "cannot derive hardened child {index} from a public-only key"
                )))
            }
        };

        let result = self.apply_tweak(&i, depth, index);
        i.zeroize();
        result
    }

    fn apply_tweak(&self, i: &[u8; 64], depth: u8, index: ChildIndex) -> Result<Self, WalletError> {
        let mut il = [0u8; 32];
        il.copy_from_slice(&i[..32]);
        let tweak: Option<Scalar> = Scalar::from_repr(FieldBytes::from(il)).into();
        il.zeroize();
        let tweak = tweak.ok_or_else(|| {
            WalletError::DerivationFailed(format!(
                "tweak for child {index} exceeds the curve order"
            ))
        })?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);

        let (private_key, public_key) = match &self.private_key {
            Some(parent_bytes) => {
                let parent = SecretKey::from_slice(parent_bytes)
                    .map_err(|e| WalletError::InvalidKeyMaterial(e.to_string()))?;
                let child_scalar = tweak + *parent.to_nonzero_scalar();
                let child = SecretKey::from_bytes(&child_scalar.to_repr()).map_err(|_| {
                    WalletError::DerivationFailed(format!("child {index} has a zero private key"))
                })?;
                let public_key = point::compressed_bytes(&child.public_key());
                (Some(child.to_bytes().into()), public_key)
            }
            None => {
                let parent = point::parse_public_key(&self.public_key)?;
                let child_point = ProjectivePoint::GENERATOR * tweak + parent.to_projective();
                let child = PublicKey::from_affine(AffinePoint::from(child_point)).map_err(|_| {
                    WalletError::DerivationFailed(format!("child {index} is the point at infinity"))
                })?;
                (None, point::compressed_bytes(&child))
            }
        };

        Ok(Self {
            private_key,
            public_key,
            chain_code,
            depth,
            parent_fingerprint: self.fingerprint(),
            child_index: index,
        })
    }

    /// Fold [`derive_child`](Self::derive_child) over every segment of `path`.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, WalletError> {
        path.segments()
            .iter()
            .try_fold(self.clone(), |node, &segment| node.derive_child(segment))
    }

    /// 78-byte BIP-32 layout: version, depth, parent fingerprint, child
    /// index, chain code, then 33 bytes of key data.
    fn serialize(&self, version: u32, key_data: &[u8; 33]) -> [u8; SERIALIZED_LEN] {
        let mut out = [0u8; SERIALIZED_LEN];
        out[0..4].copy_from_slice(&version.to_be_bytes());
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.child_index.to_u32().to_be_bytes());
        out[13..45].copy_from_slice(&self.chain_code);
        out[45..].copy_from_slice(key_data);
        out
    }

    /// Base58Check `xprv…` string.
    pub fn to_xprv(&self) -> Result<ZeroizingString, WalletError> {
        let key = self.private_key.as_ref().ok_or_else(|| {
            WalletError::InvalidKeyMaterial("public-only key has no xprv form".into())
        })?;

        let mut key_data = [0u8; 33];
        key_data[1..].copy_from_slice(key);
        let mut raw = self.serialize(XPRV_VERSION, &key_data);
        let encoded = base58::encode_check(&raw);
        key_data.zeroize();
        raw.zeroize();
        Ok(encoded.into())
    }

    /// Base58Check `xpub…` string.
    pub fn to_xpub(&self) -> String {
        base58::encode_check(&self.serialize(XPUB_VERSION, &self.public_key))
    }
}

impl FromStr for ExtendedKey {
    type Err = WalletError;

    /// Parse an `xprv`/`xpub` string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut raw = base58::decode_check(s.trim())?;
        let result = parse_serialized(&raw);
        raw.zeroize();
        result
    }
}

fn parse_serialized(raw: &[u8]) -> Result<ExtendedKey, WalletError> {
    if raw.len() != SERIALIZED_LEN {
        return Err(WalletError::InvalidKeyMaterial(format!(
            "extended key must be {SERIALIZED_LEN} bytes, got {}",
            raw.len()
        )));
    }

    let version = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]);
    let depth = raw[4];
    let mut parent_fingerprint = [0u8; 4];
    parent_fingerprint.copy_from_slice(&raw[5..9]);
    let child_index = ChildIndex::from_u32(u32::from_be_bytes([raw[9], raw[10], raw[11], raw[12]]));
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&raw[13..45]);

    if depth == 0 && (parent_fingerprint != [0u8; 4] || child_index.to_u32() != 0) {
        return Err(WalletError::InvalidKeyMaterial(
            "master key with non-zero parent fingerprint or index".into(),
        ));
    }

    let (private_key, public_key) = match version {
        XPRV_VERSION => {
            if raw[45] != 0x00 {
                return Err(WalletError::InvalidKeyMaterial(
                    "private key data must start with 0x00".into(),
                ));
            }
            let secret = SecretKey::from_slice(&raw[46..])
                .map_err(|_| WalletError::InvalidKeyMaterial("private key out of range".into()))?;
            (
                Some(secret.to_bytes().into()),
                point::compressed_bytes(&secret.public_key()),
            )
        }
        XPUB_VERSION => {
            if raw[45] != 0x02 && raw[45] != 0x03 {
                return Err(WalletError::InvalidKeyMaterial(
                    "public key data must be compressed".into(),
                ));
            }
            (None, point::compress(&raw[45..])?)
        }
        other => {
            return Err(WalletError::InvalidKeyMaterial(format!(
                "unknown extended key version 0x{other:08x}"
            )))
        }
    };

    Ok(ExtendedKey {
        private_key,
        public_key,
        chain_code,
        depth,
        parent_fingerprint,
        child_index,
    })
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        if let Some(key) = self.private_key.as_mut() {
            key.zeroize();
        }
        self.chain_code.zeroize();
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("private", &self.is_private())
            .field("public_key", &hex::encode(self.public_key))
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_index", &self.child_index.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mnemonic::mnemonic_to_seed;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    /// BIP-32 test vector 1.
    const TV1_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    fn tv1_master() -> ExtendedKey {
        ExtendedKey::master(&hex::decode(TV1_SEED).unwrap()).unwrap()
    }

    fn path(s: &str) -> DerivationPath {
        s.parse().unwrap()
    }

    #[test]
    fn tv1_master_key() {
        let master = tv1_master();
        assert_eq!(
            &*master.to_xprv().unwrap(),
            "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi"
        );
        assert_eq!(
            master.to_xpub(),
            "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8"
        );
        assert_eq!(master.depth(), 0);
        assert_eq!(master.parent_fingerprint(), [0u8; 4]);
        assert_eq!(master.child_index().to_u32(), 0);
    }

    #[test]
    fn tv1_hardened_child() {
        let child = tv1_master().derive_path(&path("m/0'")).unwrap();
        assert_eq!(
            &*child.to_xprv().unwrap(),
            "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7"
        );
        assert_eq!(
            child.to_xpub(),
            "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw"
        );
        assert_eq!(child.depth(), 1);
        assert_eq!(child.parent_fingerprint(), tv1_master().fingerprint());
    }

    #[test]
    fn tv1_normal_child_of_hardened() {
        let child = tv1_master().derive_path(&path("m/0'/1")).unwrap();
        assert_eq!(
            &*child.to_xprv().unwrap(),
            "xprv9wTYmMFdV23N2TdNG573QoEsfRrWKQgWeibmLntzniatZvR9BmLnvSxqu53Kw1UmYPxLgboyZQaXwTCg8MSY3H2EU4pWcQDnRnrVA1xe8fs"
        );
        assert_eq!(
            child.to_xpub(),
            "xpub6ASuArnXKPbfEwhqN6e3mwBcDTgzisQN1wXN9BJcM47sSikHjJf3UFHKkNAWbWMiGj7Wf5uMash7SyYq527Hqck2AxYysAA7xmALppuCkwQ"
        );
    }

    #[test]
    fn public_derivation_matches_private_derivation() {
        let parent = tv1_master().derive_path(&path("m/0'")).unwrap();
        let via_private = parent.derive_child(ChildIndex::normal(1).unwrap()).unwrap();
        let via_public = parent
            .neuter()
            .derive_child(ChildIndex::normal(1).unwrap())
            .unwrap();
        assert!(!via_public.is_private());
        assert_eq!(via_public.public_key(), via_private.public_key());
        assert_eq!(via_public.chain_code(), via_private.chain_code());
        assert_eq!(via_public.to_xpub(), via_private.to_xpub());
    }

    #[test]
    fn hardened_from_public_fails() {
        let public = tv1_master().neuter();
        let err = public
            .derive_child(ChildIndex::hardened(0).unwrap())
            .unwrap_err();
        assert!(matches!(err, WalletError::DerivationFailed(_)));
        assert!(public.to_xprv().is_err());
    }

    #[test]
    fn abandon_root_key() {
        // Root key of the "abandon ... about" mnemonic, as published in BIP-84.
        let seed = mnemonic_to_seed(TEST_MNEMONIC, "").unwrap();
        let master = ExtendedKey::master(&seed).unwrap();
        assert_eq!(
            &*master.to_xprv().unwrap(),
            "xprv9s21ZrQH143K3GJpoapnV8SFfukcVBSfeCficPSGfubmSFDxo1kuHnLisriDvSnRRuL2Qrg5ggqHKNVpxR86QEC8w35uxmGoggxtQTPvfUu"
        );
    }

    #[test]
    fn matches_bip32_crate() {
        let seed = mnemonic_to_seed(TEST_MNEMONIC, "").unwrap();
        let paths = [
            "m/44'/60'/0'/0/0",
            "m/44'/0'/0'/0/3",
            "m/84'/0'/0'/1/0",
            "m/0/1/2'",
        ];
        for p in paths {
            let ours = ExtendedKey::from_seed_and_path(&seed, &path(p)).unwrap();
            let theirs =
                bip32::XPrv::derive_from_path(&*seed, &p.parse::<bip32::DerivationPath>().unwrap())
                    .unwrap();
            let their_key: [u8; 32] = theirs.to_bytes().into();
            assert_eq!(ours.private_key().unwrap(), &their_key, "{p}");
            assert_eq!(ours.chain_code(), &theirs.attrs().chain_code, "{p}");
            assert_eq!(ours.public_key(), &theirs.public_key().to_bytes(), "{p}");
        }
    }

    #[test]
    fn serialization_roundtrip() {
        let node = tv1_master().derive_path(&path("m/0'/1")).unwrap();

        let xprv = node.to_xprv().unwrap();
        let parsed: ExtendedKey = xprv.parse().unwrap();
        assert!(parsed.is_private());
        assert_eq!(parsed.private_key(), node.private_key());
        assert_eq!(parsed.depth(), 2);
        assert_eq!(parsed.child_index(), ChildIndex::normal(1).unwrap());

        let parsed_pub: ExtendedKey = node.to_xpub().parse().unwrap();
        assert!(!parsed_pub.is_private());
        assert_eq!(parsed_pub.public_key(), node.public_key());
        assert_eq!(parsed_pub.parent_fingerprint(), node.parent_fingerprint());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            "xpub0000".parse::<ExtendedKey>(),
            Err(WalletError::InvalidBase58(_))
        ));
        // Valid Base58Check, wrong length.
        let short = base58::encode_check(&[0u8; 10]);
        assert!(matches!(
            short.parse::<ExtendedKey>(),
            Err(WalletError::InvalidKeyMaterial(_))
        ));
    }

    #[test]
    fn seed_length_is_checked() {
        assert!(ExtendedKey::master(&[0u8; 15]).is_err());
        assert!(ExtendedKey::master(&[0u8; 65]).is_err());
        assert!(ExtendedKey::master(&[0u8; 64]).is_ok());
    }

    #[test]
    fn debug_output_hides_private_key() {
        let master = tv1_master();
        let key_hex = hex::encode(master.private_key().unwrap());
        let debug = format!("{master:?}");
        assert!(!debug.contains(&key_hex));
        assert!(debug.contains("private: true"));
    }
}
