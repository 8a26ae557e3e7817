//! Core error types for the Privote voting stack.
//!
//! The taxonomy deliberately separates "this ballot was invalid"
//! (`ExecutionError`) from "the system could not complete the attempt"
//! (`ProofError` and friends), and every failure carries enough context to
//! tell the two apart. No stage swallows an error to produce a default
//! outcome.

use crate::app::VoteStage;
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors rejected before any external call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// No active account or session; the attempt aborts immediately.
    #[error("No active account for this session")]
    NoActiveAccount,
    /// A proposal field failed validation.
    #[error("Malformed input: {0}")]
    MalformedField(String),
}

impl ErrorCode for InputError {
    fn code(&self) -> &'static str {
        match self {
            Self::NoActiveAccount => "INPUT_NO_ACTIVE_ACCOUNT",
            Self::MalformedField(_) => "INPUT_MALFORMED_FIELD",
        }
    }
}

/// Errors from the wallet signing seam.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// The user rejected or cancelled the signing request.
    #[error("Signing request rejected by the user")]
    Rejected,
    /// No wallet is available to serve the signing request.
    #[error("No wallet available")]
    WalletUnavailable,
    /// The wallet failed for a reason other than user rejection.
    #[error("Wallet signing failed: {0}")]
    Backend(String),
}

impl ErrorCode for SigningError {
    fn code(&self) -> &'static str {
        match self {
            Self::Rejected => "SIGNING_REJECTED",
            Self::WalletUnavailable => "SIGNING_WALLET_UNAVAILABLE",
            Self::Backend(_) => "SIGNING_BACKEND_ERROR",
        }
    }
}

/// Errors from cryptographic credential recovery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature bytes were not a well-formed 65-byte recoverable
    /// signature.
    #[error("Malformed signature: {0}")]
    MalformedSignature(String),
    /// Public-key recovery was mathematically inconsistent with the digest.
    #[error("Public key recovery failed: {0}")]
    RecoveryFailed(String),
    /// A recovered or supplied key had an unexpected encoding.
    #[error("Malformed public key: {0}")]
    MalformedKey(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::MalformedSignature(_) => "CRYPTO_MALFORMED_SIGNATURE",
            Self::RecoveryFailed(_) => "CRYPTO_RECOVERY_FAILED",
            Self::MalformedKey(_) => "CRYPTO_MALFORMED_KEY",
        }
    }
}

/// Errors from executing a circuit against a witness.
///
/// `UnsatisfiedConstraint` is the expected rejection path for invalid
/// ballots (forged signatures, mismatched messages) and must not be treated
/// as a system fault.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The input variant does not match the circuit's declared ABI.
    #[error("Witness shape does not match circuit ABI: expected {expected}, got {got}")]
    AbiMismatch {
        /// The circuit's declared input kind.
        expected: String,
        /// The kind of the supplied input map.
        got: String,
    },
    /// The witness does not satisfy the circuit's arithmetic constraints.
    #[error("Circuit constraints unsatisfied: {0}")]
    UnsatisfiedConstraint(String),
    /// An input field had the wrong width or encoding.
    #[error("Malformed witness: {0}")]
    MalformedWitness(String),
}

impl ErrorCode for ExecutionError {
    fn code(&self) -> &'static str {
        match self {
            Self::AbiMismatch { .. } => "EXECUTION_ABI_MISMATCH",
            Self::UnsatisfiedConstraint(_) => "EXECUTION_UNSATISFIED_CONSTRAINT",
            Self::MalformedWitness(_) => "EXECUTION_MALFORMED_WITNESS",
        }
    }
}

/// Errors from the proof backend unrelated to input correctness.
///
/// These are reported as retryable: the witness may well be valid and a
/// later attempt can succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofError {
    /// Proof generation failed inside the backend.
    #[error("Proof generation failed: {0}")]
    GenerationFailed(String),
    /// The proof artifact could not be decoded for verification.
    #[error("Malformed proof artifact: {0}")]
    MalformedProof(String),
    /// The backend does not know the circuit the proof claims to be for.
    #[error("Unknown circuit: {0}")]
    UnknownCircuit(String),
}

impl ErrorCode for ProofError {
    fn code(&self) -> &'static str {
        match self {
            Self::GenerationFailed(_) => "PROOF_GENERATION_FAILED",
            Self::MalformedProof(_) => "PROOF_MALFORMED",
            Self::UnknownCircuit(_) => "PROOF_UNKNOWN_CIRCUIT",
        }
    }
}

/// Errors surfaced by the ledger.
///
/// Ledger rejections are authoritative and surfaced verbatim; they are never
/// retried automatically, since retrying a duplicate-vote rejection is
/// guaranteed to fail again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A proposal with this id already exists.
    #[error("Proposal {0} already exists")]
    ProposalExists(u64),
    /// The requested proposal does not exist.
    #[error("Proposal {0} not found")]
    ProposalNotFound(u64),
    /// `end_date` was not strictly after `start_date`.
    #[error("Invalid voting window: end date {end} must be after start date {start}")]
    InvalidWindow {
        /// The supplied start date.
        start: u64,
        /// The supplied end date.
        end: u64,
    },
    /// A vote with this `(proposal_nonce, voter, voter_nonce)` triple was
    /// already recorded.
    #[error("Duplicate vote: proposal nonce {proposal_nonce}, voter {voter}, voter nonce {voter_nonce}")]
    DuplicateVote {
        /// The proposal nonce of the rejected vote.
        proposal_nonce: u64,
        /// The submitting account.
        voter: crate::app::AccountId,
        /// The per-voter nonce of the rejected vote.
        voter_nonce: u64,
    },
    /// The proposal is not in its `Active` phase.
    #[error("Proposal {0} is not active")]
    ProposalNotActive(u64),
    /// The caller is not the proposal's creator.
    #[error("Account {caller} is not the creator of proposal {id}")]
    NotCreator {
        /// The rejected caller.
        caller: crate::app::AccountId,
        /// The proposal id.
        id: u64,
    },
    /// The proposal was already finished.
    #[error("Proposal {0} is already finished")]
    AlreadyFinished(u64),
    /// A proposal field failed ledger-side validation.
    #[error("Invalid proposal: {0}")]
    Invalid(String),
    /// The ledger could not be reached or failed internally.
    #[error("Ledger transport error: {0}")]
    Transport(String),
}

impl ErrorCode for LedgerError {
    fn code(&self) -> &'static str {
        match self {
            Self::ProposalExists(_) => "LEDGER_PROPOSAL_EXISTS",
            Self::ProposalNotFound(_) => "LEDGER_PROPOSAL_NOT_FOUND",
            Self::InvalidWindow { .. } => "LEDGER_INVALID_WINDOW",
            Self::DuplicateVote { .. } => "LEDGER_DUPLICATE_VOTE",
            Self::ProposalNotActive(_) => "LEDGER_PROPOSAL_NOT_ACTIVE",
            Self::NotCreator { .. } => "LEDGER_NOT_CREATOR",
            Self::AlreadyFinished(_) => "LEDGER_ALREADY_FINISHED",
            Self::Invalid(_) => "LEDGER_INVALID_PROPOSAL",
            Self::Transport(_) => "LEDGER_TRANSPORT_ERROR",
        }
    }
}

/// The reason a vote attempt aborted, by concern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoteErrorKind {
    /// Rejected before any external call.
    #[error(transparent)]
    Input(#[from] InputError),
    /// The wallet signing seam failed.
    #[error(transparent)]
    Signing(#[from] SigningError),
    /// Credential recovery failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    /// The witness did not satisfy the circuit.
    #[error(transparent)]
    Execution(#[from] ExecutionError),
    /// The proof backend failed.
    #[error(transparent)]
    Proof(#[from] ProofError),
    /// The generated proof failed the self-check; the vote was never
    /// submitted.
    #[error("Self-verification failed: the generated proof did not verify")]
    SelfVerifyFailed,
    /// The ledger rejected the vote.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl ErrorCode for VoteErrorKind {
    fn code(&self) -> &'static str {
        match self {
            Self::Input(e) => e.code(),
            Self::Signing(e) => e.code(),
            Self::Crypto(e) => e.code(),
            Self::Execution(e) => e.code(),
            Self::Proof(e) => e.code(),
            Self::SelfVerifyFailed => "PROOF_SELF_VERIFY_FAILED",
            Self::Ledger(e) => e.code(),
        }
    }
}

/// A vote-attempt failure: which stage aborted the pipeline, and why.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Vote attempt aborted at stage '{stage}': {kind}")]
pub struct VoteError {
    /// The stage at which the attempt aborted.
    pub stage: VoteStage,
    /// The underlying failure.
    pub kind: VoteErrorKind,
}

impl VoteError {
    /// Attaches stage context to a failure.
    pub fn at(stage: VoteStage, kind: impl Into<VoteErrorKind>) -> Self {
        Self {
            stage,
            kind: kind.into(),
        }
    }

    /// Whether retrying the same attempt could plausibly succeed.
    ///
    /// Only backend faults are retryable; ballot-invalid and ledger
    /// rejections are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, VoteErrorKind::Proof(_))
    }
}

impl ErrorCode for VoteError {
    fn code(&self) -> &'static str {
        self.kind.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_context_is_reported() {
        let err = VoteError::at(VoteStage::SelfVerifying, VoteErrorKind::SelfVerifyFailed);
        let rendered = err.to_string();
        assert!(rendered.contains("self-verifying"));
        assert!(rendered.contains("did not verify"));
    }

    #[test]
    fn only_proof_errors_are_retryable() {
        let proof = VoteError::at(
            VoteStage::Proving,
            ProofError::GenerationFailed("backend oom".into()),
        );
        assert!(proof.is_retryable());

        let dup = VoteError::at(
            VoteStage::Submitting,
            LedgerError::DuplicateVote {
                proposal_nonce: 1,
                voter: crate::app::AccountId::default(),
                voter_nonce: 1,
            },
        );
        assert!(!dup.is_retryable());
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(InputError::NoActiveAccount.code(), "INPUT_NO_ACTIVE_ACCOUNT");
        assert_eq!(
            ExecutionError::UnsatisfiedConstraint(String::new()).code(),
            "EXECUTION_UNSATISFIED_CONSTRAINT"
        );
        assert_eq!(
            VoteErrorKind::SelfVerifyFailed.code(),
            "PROOF_SELF_VERIFY_FAILED"
        );
    }
}
