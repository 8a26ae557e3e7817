#![forbid(unsafe_code)]

//! # Privote Crypto
//!
//! Credential recovery for the vote-casting protocol: hashing the canonical
//! vote message, recovering the signer's public key from a recoverable
//! signature, and deriving the ledger address from the recovered key.
//!
//! Everything here is pure computation; the only network-adjacent component
//! is [`wallet::LocalKeyWallet`], a local implementation of the wallet
//! signing seam used by tests and single-node deployments.

/// Keccak-256 helpers.
pub mod hash;
/// Public-key recovery and address derivation.
pub mod recover;
/// A local secp256k1 implementation of the wallet signing seam.
pub mod wallet;

pub use hash::keccak_digest;
pub use recover::{address_from_credential, recover_credential};
pub use wallet::LocalKeyWallet;
