//! A local secp256k1 implementation of the wallet signing seam.
//!
//! Production deployments hand signing to an external wallet; this
//! implementation holds a key in-process for tests and single-node
//! operation. It signs the keccak digest of the message directly, which is
//! what credential recovery verifies against.

use async_trait::async_trait;
use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};

use privote_api::wallet::WalletSigner;
use privote_types::app::AccountId;
use privote_types::error::SigningError;

use crate::hash::keccak_digest;

/// A wallet backed by an in-process secp256k1 signing key.
pub struct LocalKeyWallet {
    key: SigningKey,
}

impl LocalKeyWallet {
    /// Generates a wallet with a fresh random key.
    pub fn random() -> Self {
        Self {
            key: SigningKey::random(&mut rand::rngs::OsRng),
        }
    }

    /// Builds a wallet from raw secret-key bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SigningError> {
        let key = SigningKey::from_slice(bytes)
            .map_err(|e| SigningError::Backend(format!("invalid secret key: {e}")))?;
        Ok(Self { key })
    }

    /// The ledger address controlled by this wallet.
    pub fn address(&self) -> AccountId {
        let point = self.key.verifying_key().to_encoded_point(false);
        let mut hasher = Keccak256::new();
        // Skip the 1-byte SEC1 marker; the address hashes the 64-byte body.
        hasher.update(&point.as_bytes()[1..]);
        let digest: [u8; 32] = hasher.finalize().into();
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&digest[12..]);
        AccountId(addr)
    }

    /// Synchronous signing, for callers outside an async context.
    pub fn sign_blocking(&self, message: &str) -> Result<Vec<u8>, SigningError> {
        let digest = keccak_digest(message);
        let (signature, recovery_id) = self
            .key
            .sign_prehash_recoverable(&digest)
            .map_err(|e| SigningError::Backend(e.to_string()))?;

        let mut out = Vec::with_capacity(65);
        out.extend_from_slice(&signature.to_bytes());
        out.push(recovery_id.to_byte());
        Ok(out)
    }
}

impl core::fmt::Debug for LocalKeyWallet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LocalKeyWallet")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl WalletSigner for LocalKeyWallet {
    async fn sign_message(&self, message: &str) -> Result<Vec<u8>, SigningError> {
        self.sign_blocking(message)
    }
}
