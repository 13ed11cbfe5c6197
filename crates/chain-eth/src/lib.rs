//! Ethereum address support for the key-derivation toolkit.
//!
//! Addresses are the last 20 bytes of Keccak-256 over the 64-byte
//! uncompressed public key, rendered lowercase by default with optional
//! EIP-55 mixed-case checksums.

pub mod address;
pub mod error;
