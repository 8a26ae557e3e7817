//! Core application-level data structures for proposals, votes, and identity.

/// Data structures for transient per-attempt ballot material.
pub mod ballot;
/// Data structures for on-ledger identity, including the canonical `AccountId`.
pub mod identity;
/// Data structures for proposals and their lifecycle.
pub mod proposal;
/// The stages of the vote-casting pipeline.
pub mod stage;

pub use ballot::{Credential, Vote, VoteMessage};
pub use identity::AccountId;
pub use proposal::{Proposal, ProposalPhase, VotingSystem};
pub use stage::VoteStage;
