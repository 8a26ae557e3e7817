use serde::{Deserialize, Serialize};

/// Configuration for the Honk ZK driver.
///
/// Circuit hashes are pinned as trust anchors: a proof or proving request for
/// a circuit whose content hash does not match the pin is rejected. An empty
/// pin disables the check for that circuit kind (development mode).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HonkDriverConfig {
    /// Expected hash of the signed-ballot vote circuit (hex string).
    pub signed_ballot_circuit_hash: String,
    /// Expected hash of the inscription circuit (hex string).
    pub inscription_circuit_hash: String,
    /// Expected hash of the encrypted-ballot vote circuit (hex string).
    pub encrypted_ballot_circuit_hash: String,
}

impl Default for HonkDriverConfig {
    fn default() -> Self {
        // Development defaults: no pinning.
        Self {
            signed_ballot_circuit_hash: String::new(),
            inscription_circuit_hash: String::new(),
            encrypted_ballot_circuit_hash: String::new(),
        }
    }
}

impl HonkDriverConfig {
    /// The pinned hash for a circuit kind, if any.
    pub fn pin_for(&self, kind: zk_types::CircuitKind) -> &str {
        match kind {
            zk_types::CircuitKind::SignedBallot => &self.signed_ballot_circuit_hash,
            zk_types::CircuitKind::Inscription => &self.inscription_circuit_hash,
            zk_types::CircuitKind::EncryptedBallot => &self.encrypted_ballot_circuit_hash,
        }
    }
}
