#![forbid(unsafe_code)]

//! # Honk ZK driver
//!
//! [`ProofBackend`] implementation for an UltraHonk-style proving backend.
//!
//! The default `mock` mode runs entirely in-process: circuit execution
//! performs the real shape and signature-constraint checks the vote circuit
//! would enforce, and proofs are hash-bound envelopes over the circuit id,
//! the disclosed public inputs, and the requested hash scheme. A tampered
//! public input, a swapped circuit, or a mismatched hash scheme fails
//! verification, so the self-verification path stays meaningful without
//! the backend's internal arithmetic.

#[cfg(not(feature = "mock"))]
compile_error!(
    "zk-driver-honk has no native backend binding yet; build with the `mock` feature"
);

use async_trait::async_trait;
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{Signature, VerifyingKey};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

use privote_api::zk::ProofBackend;
use privote_types::error::{ExecutionError, ProofError};
use zk_types::{
    CircuitArtifact, CircuitInputs, FieldElement, HashScheme, ProofArtifact, ProveOptions,
    WitnessTrace,
};

/// Driver configuration: pinned circuit hashes.
pub mod config;
#[cfg(test)]
mod tests;

pub use config::HonkDriverConfig;

/// Domain separation tag for proof commitments.
#[cfg(feature = "mock")]
const PROOF_DOMAIN: &[u8] = b"privote.honk.proof.v1";

/// The Honk proof backend adapter.
pub struct HonkDriver {
    config: HonkDriverConfig,
}

impl HonkDriver {
    /// Creates a driver with the given trust anchors.
    pub fn new(config: HonkDriverConfig) -> Self {
        Self { config }
    }

    fn check_pin(&self, circuit: &CircuitArtifact) -> Result<(), ProofError> {
        let pin = self.config.pin_for(circuit.kind);
        if pin.is_empty() {
            return Ok(());
        }
        let id_hex = hex::encode(circuit.circuit_id());
        if pin.eq_ignore_ascii_case(&id_hex) {
            Ok(())
        } else {
            Err(ProofError::UnknownCircuit(format!(
                "circuit {id_hex} does not match pinned hash for {}",
                circuit.kind
            )))
        }
    }

    fn pins(&self) -> [&str; 3] {
        [
            &self.config.signed_ballot_circuit_hash,
            &self.config.inscription_circuit_hash,
            &self.config.encrypted_ballot_circuit_hash,
        ]
    }
}

/// The decoded in-process assignment: disclosed publics plus private wires.
#[cfg(feature = "mock")]
#[derive(Serialize, Deserialize)]
struct Assignment {
    publics: Vec<Vec<u8>>,
    wires: Vec<u8>,
}

/// The opaque proof bytes: circuit binding plus commitment.
#[cfg(feature = "mock")]
#[derive(Serialize, Deserialize)]
struct ProofEnvelope {
    circuit_id: [u8; 32],
    scheme: HashScheme,
    commitment: [u8; 32],
}

#[cfg(feature = "mock")]
fn commitment(circuit_id: &[u8; 32], scheme: HashScheme, publics: &[Vec<u8>]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(PROOF_DOMAIN);
    hasher.update(circuit_id);
    hasher.update([scheme as u8]);
    for public in publics {
        hasher.update((public.len() as u64).to_be_bytes());
        hasher.update(public);
    }
    hasher.finalize().into()
}

#[cfg(feature = "mock")]
fn nonzero(field: &'static str, value: &FieldElement) -> Result<(), ExecutionError> {
    if value.0.iter().all(|b| *b == 0) {
        return Err(ExecutionError::UnsatisfiedConstraint(format!(
            "{field} must be a nonzero field element"
        )));
    }
    Ok(())
}

/// Runs the circuit's constraint system against the inputs, returning the
/// disclosed publics and private wires on success.
#[cfg(feature = "mock")]
fn satisfy(inputs: &CircuitInputs) -> Result<Assignment, ExecutionError> {
    match inputs {
        CircuitInputs::SignedBallot {
            public_key_x,
            public_key_y,
            is_upvote,
            message_hash,
            signature,
        } => {
            // Reassemble the uncompressed SEC1 encoding the circuit embeds.
            let mut sec1 = [0u8; 65];
            sec1[0] = 0x04;
            sec1[1..33].copy_from_slice(public_key_x);
            sec1[33..65].copy_from_slice(public_key_y);
            let key = VerifyingKey::from_sec1_bytes(&sec1).map_err(|_| {
                ExecutionError::UnsatisfiedConstraint(
                    "public key coordinates are not a point on the curve".into(),
                )
            })?;
            let sig = Signature::from_slice(signature)
                .map_err(|e| ExecutionError::MalformedWitness(format!("signature: {e}")))?;
            key.verify_prehash(message_hash, &sig).map_err(|_| {
                ExecutionError::UnsatisfiedConstraint(
                    "signature does not verify against the embedded key".into(),
                )
            })?;

            let mut wires = Vec::with_capacity(128);
            wires.extend_from_slice(public_key_x);
            wires.extend_from_slice(public_key_y);
            wires.extend_from_slice(signature);
            Ok(Assignment {
                publics: vec![message_hash.to_vec(), vec![u8::from(*is_upvote)]],
                wires,
            })
        }
        CircuitInputs::Inscription {
            public_generator,
            random_value,
            encrypted_random_value,
        } => {
            nonzero("public_generator", public_generator)?;
            nonzero("random_value", random_value)?;
            Ok(Assignment {
                publics: vec![
                    public_generator.0.to_vec(),
                    encrypted_random_value.0.to_vec(),
                ],
                wires: random_value.0.to_vec(),
            })
        }
        CircuitInputs::EncryptedBallot {
            public_generator,
            vote_degree,
            encrypted_vote,
        } => {
            nonzero("public_generator", public_generator)?;
            Ok(Assignment {
                publics: vec![public_generator.0.to_vec(), encrypted_vote.0.to_vec()],
                wires: vote_degree.0.to_vec(),
            })
        }
    }
}

#[cfg(feature = "mock")]
#[async_trait]
impl ProofBackend for HonkDriver {
    async fn execute(
        &self,
        circuit: &CircuitArtifact,
        inputs: &CircuitInputs,
    ) -> Result<WitnessTrace, ExecutionError> {
        // Input variants are not interchangeable across circuits.
        if inputs.kind() != circuit.kind {
            return Err(ExecutionError::AbiMismatch {
                expected: circuit.kind.to_string(),
                got: inputs.kind().to_string(),
            });
        }

        let assignment = satisfy(inputs)?;
        let bytes = bincode::serialize(&assignment).map_err(|e| {
            ExecutionError::MalformedWitness(format!("assignment encoding: {e}"))
        })?;

        log::debug!(
            "executed {} circuit {}",
            circuit.kind,
            hex::encode(circuit.circuit_id())
        );
        Ok(WitnessTrace::new(circuit.circuit_id(), bytes))
    }

    async fn prove(
        &self,
        circuit: &CircuitArtifact,
        trace: &WitnessTrace,
        opts: &ProveOptions,
    ) -> Result<ProofArtifact, ProofError> {
        self.check_pin(circuit)?;
        if trace.circuit_id() != circuit.circuit_id() {
            return Err(ProofError::GenerationFailed(
                "witness trace was produced for a different circuit".into(),
            ));
        }

        let assignment: Assignment = bincode::deserialize(trace.assignment())
            .map_err(|e| ProofError::GenerationFailed(format!("assignment decoding: {e}")))?;

        let envelope = ProofEnvelope {
            circuit_id: circuit.circuit_id(),
            scheme: opts.hash_scheme,
            commitment: commitment(&circuit.circuit_id(), opts.hash_scheme, &assignment.publics),
        };
        let proof = bincode::serialize(&envelope)
            .map_err(|e| ProofError::GenerationFailed(format!("proof encoding: {e}")))?;

        log::debug!(
            "proved {} circuit {} under {:?}",
            circuit.kind,
            hex::encode(circuit.circuit_id()),
            opts.hash_scheme
        );
        Ok(ProofArtifact {
            proof,
            public_inputs: assignment.publics,
            hash_scheme: opts.hash_scheme,
        })
    }

    async fn verify(&self, proof: &ProofArtifact) -> Result<bool, ProofError> {
        let envelope: ProofEnvelope = bincode::deserialize(&proof.proof)
            .map_err(|e| ProofError::MalformedProof(e.to_string()))?;

        // When every pin is configured, an unpinned circuit id is a hard
        // error rather than a quiet `false`.
        let id_hex = hex::encode(envelope.circuit_id);
        let pins = self.pins();
        if pins.iter().all(|p| !p.is_empty())
            && !pins.iter().any(|p| p.eq_ignore_ascii_case(&id_hex))
        {
            return Err(ProofError::UnknownCircuit(id_hex));
        }

        if envelope.scheme != proof.hash_scheme {
            return Ok(false);
        }
        let expected = commitment(&envelope.circuit_id, proof.hash_scheme, &proof.public_inputs);
        Ok(expected == envelope.commitment)
    }
}
