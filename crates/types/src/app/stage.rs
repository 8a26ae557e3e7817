//! The vote-attempt pipeline stages.
//!
//! A single vote attempt moves through these stages strictly in order; any
//! stage failure transitions the attempt to `Aborted` and no later stage
//! runs. `Submitting` is only ever reached after `SelfVerifying` passed.

use serde::{Deserialize, Serialize};

/// A stage of the vote-casting pipeline.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum VoteStage {
    /// No attempt in flight.
    Idle,
    /// Requesting a signature and recovering the credential from it.
    Recovering,
    /// Assembling the circuit input map from the credential.
    BuildingWitness,
    /// Executing the circuit and generating the proof.
    Proving,
    /// Verifying the freshly generated proof before any ledger write.
    SelfVerifying,
    /// Dispatching the vote to the ledger.
    Submitting,
    /// The ledger accepted the vote.
    Committed,
    /// The attempt stopped before commitment.
    Aborted,
}

impl VoteStage {
    /// Returns the stable name used in stage logs and error context.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recovering => "recovering",
            Self::BuildingWitness => "building-witness",
            Self::Proving => "proving",
            Self::SelfVerifying => "self-verifying",
            Self::Submitting => "submitting",
            Self::Committed => "committed",
            Self::Aborted => "aborted",
        }
    }
}

impl core::fmt::Display for VoteStage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
