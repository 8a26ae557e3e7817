//! Public-key recovery and address derivation.
//!
//! A vote attempt turns `(message, signature)` into a [`Credential`]: the
//! keccak digest of the message, the recovered uncompressed public key split
//! into its two 32-byte coordinates, and the signature with the recovery
//! byte discarded. The 65-byte uncompressed SEC1 encoding starts with a
//! one-byte marker (0x04) which is dropped.

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

use privote_types::app::{AccountId, Credential};
use privote_types::error::CryptoError;

use crate::hash::keccak_digest;

/// Recovers a credential from the canonical vote message and a 65-byte
/// recoverable signature (`r || s || v`).
///
/// The recovery byte accepts both the raw 0/1 encoding and the Ethereum
/// 27/28 convention. All failures surface as [`CryptoError`]; nothing is
/// silently defaulted.
pub fn recover_credential(message: &str, signature: &[u8]) -> Result<Credential, CryptoError> {
    if signature.len() != 65 {
        return Err(CryptoError::MalformedSignature(format!(
            "expected 65 bytes, got {}",
            signature.len()
        )));
    }
    let digest = keccak_digest(message);

    let (sig_bytes, v) = signature.split_at(64);
    let recovery = normalize_recovery_byte(v[0])?;
    let recovery_id = RecoveryId::try_from(recovery)
        .map_err(|e| CryptoError::MalformedSignature(format!("recovery id: {e}")))?;
    let sig = Signature::from_slice(sig_bytes)
        .map_err(|e| CryptoError::MalformedSignature(e.to_string()))?;

    let key = VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;

    let point = key.to_encoded_point(false);
    let encoded = point.as_bytes();
    // Uncompressed SEC1: 1-byte marker + 32-byte x + 32-byte y.
    if encoded.len() != 65 {
        return Err(CryptoError::MalformedKey(format!(
            "uncompressed key must be 65 bytes, got {}",
            encoded.len()
        )));
    }

    let mut public_key_x = [0u8; 32];
    let mut public_key_y = [0u8; 32];
    public_key_x.copy_from_slice(&encoded[1..33]);
    public_key_y.copy_from_slice(&encoded[33..65]);
    let mut signature_64 = [0u8; 64];
    signature_64.copy_from_slice(sig_bytes);

    Ok(Credential {
        public_key_x,
        public_key_y,
        digest,
        signature: signature_64,
    })
}

/// Derives the ledger address from a recovered credential: the trailing 20
/// bytes of Keccak-256 over the 64-byte public key body.
pub fn address_from_credential(credential: &Credential) -> AccountId {
    let mut hasher = Keccak256::new();
    hasher.update(credential.public_key_x);
    hasher.update(credential.public_key_y);
    let digest: [u8; 32] = hasher.finalize().into();
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&digest[12..]);
    AccountId(addr)
}

fn normalize_recovery_byte(v: u8) -> Result<u8, CryptoError> {
    match v {
        0 | 1 => Ok(v),
        27 | 28 => Ok(v - 27),
        other => Err(CryptoError::MalformedSignature(format!(
            "recovery byte {other} out of range"
        ))),
    }
}
