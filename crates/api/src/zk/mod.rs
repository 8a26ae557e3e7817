//! Core abstraction for the proof backend.
//!
//! The backend is consumed as an opaque "execute circuit, produce proof,
//! verify proof" service; its internal arithmetic is out of scope. Each call
//! is a long-latency operation and therefore an async suspension point.

use async_trait::async_trait;
use privote_types::error::{ExecutionError, ProofError};
use zk_types::{CircuitArtifact, CircuitInputs, ProofArtifact, ProveOptions, WitnessTrace};

/// A zero-knowledge proof backend.
///
/// Implementations must fail fast in [`execute`](Self::execute) when the
/// input variant does not match the circuit's declared ABI; circuit variants
/// are not interchangeable, and a mismatch must never produce a silently
/// invalid proof.
#[async_trait]
pub trait ProofBackend: Send + Sync {
    /// Executes the circuit against an input map, producing the satisfying
    /// assignment.
    ///
    /// Deterministic. Fails with [`ExecutionError::UnsatisfiedConstraint`]
    /// when the inputs do not satisfy the circuit's arithmetic constraints,
    /// which is the expected rejection path for invalid ballots.
    async fn execute(
        &self,
        circuit: &CircuitArtifact,
        inputs: &CircuitInputs,
    ) -> Result<WitnessTrace, ExecutionError>;

    /// Generates a proof over a witness trace.
    ///
    /// The hash scheme in `opts` selects the public-input hashing convention
    /// and must match what the ledger-side verifier expects; a mismatched
    /// scheme yields a proof that is internally valid but unusable on-chain.
    async fn prove(
        &self,
        circuit: &CircuitArtifact,
        trace: &WitnessTrace,
        opts: &ProveOptions,
    ) -> Result<ProofArtifact, ProofError>;

    /// Verifies a proof independently of the trace it came from.
    ///
    /// Returns `Ok(false)` for a well-formed proof that does not verify;
    /// errors are reserved for backend faults.
    async fn verify(&self, proof: &ProofArtifact) -> Result<bool, ProofError>;
}
