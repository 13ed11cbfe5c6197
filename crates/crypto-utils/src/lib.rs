//! # crypto-utils
//!
//! Hashing, Base58Check, secp256k1 point handling, memory safety, and secure
//! random generation shared by the key-derivation crates.

pub mod base58;
pub mod error;
pub mod hash;
pub mod point;
pub mod random;
pub mod zeroizing;

pub use error::CryptoError;
