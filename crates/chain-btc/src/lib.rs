//! Bitcoin-family chain support for the key-derivation toolkit.
//!
//! Bitcoin, Litecoin and Dogecoin share the same legacy encodings and differ
//! only in version bytes: P2PKH addresses are `Base58Check(version ||
//! HASH160(pubkey))` and private keys export as WIF.

pub mod address;
pub mod error;
pub mod network;
pub mod wif;
