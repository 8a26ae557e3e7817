//! Circuit input shapes, witness traces, and proof artifacts.
//!
//! Two divergent witness schemes exist for the "cast a vote" use case: a
//! signature-recovery scheme and a generator/degree commitment scheme. They
//! are modeled here as distinct variants of [`CircuitInputs`], validated at
//! construction against the fixed field widths each circuit declares, so a
//! malformed witness is rejected before it ever reaches the proof backend.
//! The variants are not interchangeable; drivers must fail fast on a
//! kind/circuit mismatch rather than produce a silently invalid proof.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use thiserror::Error;
use zeroize::Zeroizing;

/// A witness field had the wrong width or encoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WitnessShapeError {
    /// A fixed-width field did not have its declared width.
    #[error("Field '{field}' must be {expected} bytes, got {got}")]
    BadWidth {
        /// The circuit ABI field name.
        field: &'static str,
        /// The declared width.
        expected: usize,
        /// The supplied width.
        got: usize,
    },
    /// A field element was not valid hex.
    #[error("Field '{field}' is not valid hex: {reason}")]
    BadEncoding {
        /// The circuit ABI field name.
        field: &'static str,
        /// Decoder diagnostic.
        reason: String,
    },
}

/// A BN254-sized field element, stored as 32 big-endian bytes.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct FieldElement(pub [u8; 32]);

impl FieldElement {
    /// Parses a field element from a `0x`-prefixed or bare hex string of at
    /// most 64 digits, left-padding to 32 bytes.
    pub fn from_hex(field: &'static str, s: &str) -> Result<Self, WitnessShapeError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        if stripped.len() > 64 {
            return Err(WitnessShapeError::BadWidth {
                field,
                expected: 32,
                got: stripped.len() / 2,
            });
        }
        // Left-pad odd/short encodings so "0x5" and "0x05" agree.
        let padded = format!("{stripped:0>64}");
        let bytes = hex::decode(&padded).map_err(|e| WitnessShapeError::BadEncoding {
            field,
            reason: e.to_string(),
        })?;
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

/// The circuit variants the protocol knows about.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum CircuitKind {
    /// The signature-recovery vote circuit: proves possession of a valid
    /// signing credential over the vote message.
    SignedBallot,
    /// The commitment/inscription circuit of the encrypted-ballot protocol
    /// version.
    Inscription,
    /// The generator/degree vote circuit of the encrypted-ballot protocol
    /// version.
    EncryptedBallot,
}

impl CircuitKind {
    /// Stable name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignedBallot => "signed-ballot",
            Self::Inscription => "inscription",
            Self::EncryptedBallot => "encrypted-ballot",
        }
    }
}

impl core::fmt::Display for CircuitKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A compiled circuit: opaque bytecode plus its declared input kind.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct CircuitArtifact {
    /// Which input shape this circuit declares.
    pub kind: CircuitKind,
    /// Opaque compiled bytecode, consumed by the backend.
    pub bytecode: Vec<u8>,
}

impl CircuitArtifact {
    /// Content-addressed identifier: Keccak-256 of the bytecode.
    pub fn circuit_id(&self) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(&self.bytecode);
        hasher.finalize().into()
    }
}

/// The public-input hashing convention a proof is produced under.
///
/// The scheme must match what the ledger-side verifier expects; a proof
/// under the wrong scheme is internally valid but unusable on-chain.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum HashScheme {
    /// The backend-native scheme, suitable for off-chain verification.
    #[default]
    Poseidon,
    /// Keccak-flavored public-input hashing, compatible with EVM-style
    /// ledger verifiers.
    Keccak,
}

/// Options for proof generation.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct ProveOptions {
    /// The public-input hashing convention to produce the proof under.
    pub hash_scheme: HashScheme,
}

/// A fixed-shape circuit input map, one variant per declared ABI.
///
/// Construction through the typed constructors is the only way to obtain a
/// value, so every instance is shape-valid by the time a driver sees it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CircuitInputs {
    /// Inputs for [`CircuitKind::SignedBallot`]: keys `public_key_x`,
    /// `public_key_y`, `is_upvote`, `message_hash`, `signature`.
    SignedBallot {
        /// 32-byte X coordinate of the voter's public key.
        public_key_x: [u8; 32],
        /// 32-byte Y coordinate of the voter's public key.
        public_key_y: [u8; 32],
        /// The ballot value.
        is_upvote: bool,
        /// 32-byte keccak digest of the canonical vote message.
        message_hash: [u8; 32],
        /// 64-byte signature (recovery byte discarded).
        signature: [u8; 64],
    },
    /// Inputs for [`CircuitKind::Inscription`]: keys `public_generator`,
    /// `random_value`, `encrypted_random_value`.
    Inscription {
        /// The group generator disclosed publicly.
        public_generator: FieldElement,
        /// The voter's secret randomness.
        random_value: FieldElement,
        /// The encryption of the randomness under the generator.
        encrypted_random_value: FieldElement,
    },
    /// Inputs for [`CircuitKind::EncryptedBallot`]: keys `public_generator`,
    /// `vote_degree`, `encrypted_vote`.
    EncryptedBallot {
        /// The group generator disclosed publicly.
        public_generator: FieldElement,
        /// The vote's position in the tally encoding.
        vote_degree: FieldElement,
        /// The encrypted ballot value.
        encrypted_vote: FieldElement,
    },
}

impl CircuitInputs {
    /// Builds signed-ballot inputs from raw slices, validating every width.
    pub fn signed_ballot(
        public_key_x: &[u8],
        public_key_y: &[u8],
        is_upvote: bool,
        message_hash: &[u8],
        signature: &[u8],
    ) -> Result<Self, WitnessShapeError> {
        Ok(Self::SignedBallot {
            public_key_x: fixed::<32>("public_key_x", public_key_x)?,
            public_key_y: fixed::<32>("public_key_y", public_key_y)?,
            is_upvote,
            message_hash: fixed::<32>("message_hash", message_hash)?,
            signature: fixed::<64>("signature", signature)?,
        })
    }

    /// Builds inscription inputs from hex-encoded field elements.
    pub fn inscription(
        public_generator: &str,
        random_value: &str,
        encrypted_random_value: &str,
    ) -> Result<Self, WitnessShapeError> {
        Ok(Self::Inscription {
            public_generator: FieldElement::from_hex("public_generator", public_generator)?,
            random_value: FieldElement::from_hex("random_value", random_value)?,
            encrypted_random_value: FieldElement::from_hex(
                "encrypted_random_value",
                encrypted_random_value,
            )?,
        })
    }

    /// Builds encrypted-ballot inputs from hex-encoded field elements.
    pub fn encrypted_ballot(
        public_generator: &str,
        vote_degree: &str,
        encrypted_vote: &str,
    ) -> Result<Self, WitnessShapeError> {
        Ok(Self::EncryptedBallot {
            public_generator: FieldElement::from_hex("public_generator", public_generator)?,
            vote_degree: FieldElement::from_hex("vote_degree", vote_degree)?,
            encrypted_vote: FieldElement::from_hex("encrypted_vote", encrypted_vote)?,
        })
    }

    /// The circuit kind this input map is shaped for.
    pub fn kind(&self) -> CircuitKind {
        match self {
            Self::SignedBallot { .. } => CircuitKind::SignedBallot,
            Self::Inscription { .. } => CircuitKind::Inscription,
            Self::EncryptedBallot { .. } => CircuitKind::EncryptedBallot,
        }
    }
}

fn fixed<const N: usize>(
    field: &'static str,
    bytes: &[u8],
) -> Result<[u8; N], WitnessShapeError> {
    bytes.try_into().map_err(|_| WitnessShapeError::BadWidth {
        field,
        expected: N,
        got: bytes.len(),
    })
}

/// The satisfying assignment produced by executing a circuit.
///
/// Transient and private: the assignment encodes the voter's credential and
/// ballot, so it is zeroized on drop and never rendered by `Debug`.
pub struct WitnessTrace {
    circuit_id: [u8; 32],
    assignment: Zeroizing<Vec<u8>>,
}

impl WitnessTrace {
    /// Wraps a backend-produced assignment for the given circuit.
    pub fn new(circuit_id: [u8; 32], assignment: Vec<u8>) -> Self {
        Self {
            circuit_id,
            assignment: Zeroizing::new(assignment),
        }
    }

    /// The circuit this trace satisfies.
    pub fn circuit_id(&self) -> [u8; 32] {
        self.circuit_id
    }

    /// The raw assignment bytes, for the proving call only.
    pub fn assignment(&self) -> &[u8] {
        &self.assignment
    }
}

impl core::fmt::Debug for WitnessTrace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WitnessTrace")
            .field("circuit_id", &hex::encode(self.circuit_id))
            .field("assignment_len", &self.assignment.len())
            .finish()
    }
}

/// A generated proof together with its disclosed public inputs.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct ProofArtifact {
    /// The opaque proof bytes.
    pub proof: Vec<u8>,
    /// The public inputs disclosed alongside the proof.
    pub public_inputs: Vec<Vec<u8>>,
    /// The hashing convention the proof was produced under.
    pub hash_scheme: HashScheme,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_ballot_rejects_bad_widths() {
        let err = CircuitInputs::signed_ballot(&[0u8; 31], &[0u8; 32], true, &[0u8; 32], &[0u8; 64])
            .unwrap_err();
        assert_eq!(
            err,
            WitnessShapeError::BadWidth {
                field: "public_key_x",
                expected: 32,
                got: 31
            }
        );

        let err = CircuitInputs::signed_ballot(&[0u8; 32], &[0u8; 32], true, &[0u8; 32], &[0u8; 65])
            .unwrap_err();
        assert!(matches!(
            err,
            WitnessShapeError::BadWidth {
                field: "signature",
                ..
            }
        ));
    }

    #[test]
    fn kind_matches_variant() {
        let inputs =
            CircuitInputs::signed_ballot(&[0u8; 32], &[0u8; 32], false, &[0u8; 32], &[0u8; 64])
                .unwrap();
        assert_eq!(inputs.kind(), CircuitKind::SignedBallot);

        let inputs = CircuitInputs::inscription("0x2", "0x1234", "0xff").unwrap();
        assert_eq!(inputs.kind(), CircuitKind::Inscription);
    }

    #[test]
    fn field_element_left_pads_short_hex() {
        let a = FieldElement::from_hex("public_generator", "0x5").unwrap();
        let b = FieldElement::from_hex("public_generator", "0x05").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.0[31], 5);
    }

    #[test]
    fn field_element_rejects_oversize_and_garbage() {
        let long = "ab".repeat(33);
        assert!(FieldElement::from_hex("vote_degree", &long).is_err());
        assert!(matches!(
            FieldElement::from_hex("vote_degree", "0xzz").unwrap_err(),
            WitnessShapeError::BadEncoding { .. }
        ));
    }

    #[test]
    fn circuit_id_is_content_addressed() {
        let a = CircuitArtifact {
            kind: CircuitKind::SignedBallot,
            bytecode: vec![1, 2, 3],
        };
        let b = CircuitArtifact {
            kind: CircuitKind::SignedBallot,
            bytecode: vec![1, 2, 4],
        };
        assert_ne!(a.circuit_id(), b.circuit_id());
        assert_eq!(a.circuit_id(), a.circuit_id());
    }

    #[test]
    fn witness_trace_debug_is_redacted() {
        let trace = WitnessTrace::new([9u8; 32], vec![1, 2, 3, 4]);
        let rendered = format!("{trace:?}");
        assert!(rendered.contains("assignment_len"));
        assert!(!rendered.contains("[1, 2, 3, 4]"));
    }
}
