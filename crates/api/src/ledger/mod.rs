//! The authoritative proposal/vote store.
//!
//! The ledger is the sole arbiter of vote acceptance and proposal lifecycle.
//! Clients never cache authoritative state beyond a display copy; reads go
//! through this trait and change notifications arrive on a broadcast
//! channel.

use async_trait::async_trait;
use privote_types::app::{AccountId, Proposal, Vote, VotingSystem};
use privote_types::error::LedgerError;
use tokio::sync::broadcast;

/// Parameters for creating a proposal.
#[derive(Clone, Debug)]
pub struct CreateProposal {
    /// Caller-assigned unique identifier.
    pub id: u64,
    /// The creating account; the only account allowed to finish the
    /// proposal.
    pub creator: AccountId,
    /// Human-readable description.
    pub description: String,
    /// The tallying rule.
    pub voting_system: VotingSystem,
    /// Unix timestamp at which voting opens.
    pub start_date: u64,
    /// Unix timestamp at which voting closes; must be after `start_date`.
    pub end_date: u64,
}

/// A change notification emitted by the ledger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A proposal was inserted.
    ProposalCreated {
        /// The new proposal's id.
        id: u64,
        /// The creating account.
        creator: AccountId,
    },
    /// A vote was accepted and recorded.
    VoteCast {
        /// The submitting account.
        voter: AccountId,
        /// The proposal nonce the vote was recorded under.
        proposal_nonce: u64,
        /// The ballot value.
        value: bool,
    },
    /// A proposal transitioned to `Finished`.
    ProposalFinished {
        /// The finished proposal's id.
        id: u64,
        /// The fixed result.
        result: i64,
    },
}

/// The transactional proposal/vote state machine.
///
/// Writes are atomic: a rejected operation leaves no partial state behind.
#[async_trait]
pub trait ProposalLedger: Send + Sync {
    /// Inserts a new proposal.
    ///
    /// Fails if the id already exists or `end_date <= start_date`.
    async fn create_proposal(&self, params: CreateProposal) -> Result<(), LedgerError>;

    /// Records a vote.
    ///
    /// Fails if the `(proposal_nonce, voter, voter_nonce)` triple was already
    /// recorded, or if the proposal is not in its `Active` phase. The
    /// duplicate check runs before anything is written.
    async fn vote(&self, vote: Vote) -> Result<(), LedgerError>;

    /// Marks a proposal finished and fixes its result. Creator-only; fails if
    /// already finished.
    async fn finish_proposal(
        &self,
        id: u64,
        caller: AccountId,
        result: i64,
    ) -> Result<(), LedgerError>;

    /// Returns all proposals. Pure read.
    async fn proposals(&self) -> Result<Vec<Proposal>, LedgerError>;

    /// Returns a single proposal. Pure read.
    async fn proposal(&self, id: u64) -> Result<Proposal, LedgerError>;

    /// Returns the votes recorded under a proposal nonce. Pure read.
    async fn proposal_votes(&self, proposal_nonce: u64) -> Result<Vec<Vote>, LedgerError>;

    /// Membership check on the duplicate-vote table. Pure read.
    async fn has_voted(
        &self,
        proposal_nonce: u64,
        voter: AccountId,
        voter_nonce: u64,
    ) -> Result<bool, LedgerError>;

    /// Subscribes to change notifications.
    fn subscribe(&self) -> broadcast::Receiver<LedgerEvent>;
}
