//! Defines the canonical `AccountId` used to identify voters and proposal
//! creators on the ledger.
//!
//! The identifier is an Ethereum-style 20-byte address: the trailing 20 bytes
//! of the Keccak-256 digest of the 64-byte uncompressed public key body. The
//! derivation itself lives in `privote-crypto`; this module only defines the
//! canonical representation so every crate agrees on it.

use serde::{Deserialize, Serialize};

/// A unique, stable identifier for an account, derived from the hash of a
/// secp256k1 public key.
///
/// Represented as a 20-byte array and displayed as `0x` + lowercase hex. The
/// textual form participates in the canonical vote message, so both the
/// byte layout and the display format are protocol-fixed.
#[derive(
    Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash,
)]
pub struct AccountId(pub [u8; 20]);

impl AccountId {
    /// Parses an `AccountId` from a `0x`-prefixed or bare hex string.
    pub fn from_hex(s: &str) -> Result<Self, crate::error::InputError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(stripped)
            .map_err(|e| crate::error::InputError::MalformedField(format!("account id: {e}")))?;
        let arr: [u8; 20] = bytes.try_into().map_err(|_| {
            crate::error::InputError::MalformedField("account id must be 20 bytes".into())
        })?;
        Ok(Self(arr))
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(addr: [u8; 20]) -> Self {
        Self(addr)
    }
}

impl core::fmt::Display for AccountId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
