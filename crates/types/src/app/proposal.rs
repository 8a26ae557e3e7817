//! Proposal records and their lifecycle.
//!
//! A proposal is created once, accumulates votes while `Active`, and is
//! eventually finished by its creator, which fixes the result permanently.
//! `finished` is monotonic: there is no transition out of `Finished`.

use serde::{Deserialize, Serialize};

use super::identity::AccountId;

/// The tallying rule a proposal is evaluated under.
///
/// The numeric wire values are part of the ledger ABI and must not change.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum VotingSystem {
    /// More than half of the cast votes decide.
    SimpleMajority = 1,
    /// A two-thirds share of the cast votes decides.
    Supermajority = 2,
    /// Every cast vote must agree.
    Unanimous = 3,
}

impl VotingSystem {
    /// Decodes a voting system from its wire value.
    pub fn from_wire(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::SimpleMajority),
            2 => Some(Self::Supermajority),
            3 => Some(Self::Unanimous),
            _ => None,
        }
    }
}

/// A proposal recorded on the ledger.
///
/// Identity is the caller-assigned `id`, immutable once created. Only
/// `finished` and `result` ever change after creation, and only through
/// `finish_proposal`.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
pub struct Proposal {
    /// Unique, caller-assigned, non-negative identifier.
    pub id: u64,
    /// The account that created the proposal; the only account allowed to
    /// finish it.
    pub creator: AccountId,
    /// Human-readable description.
    pub description: String,
    /// The tallying rule for this proposal.
    pub voting_system: VotingSystem,
    /// Unix timestamp at which voting opens.
    pub start_date: u64,
    /// Unix timestamp at which voting closes. Strictly greater than
    /// `start_date`.
    pub end_date: u64,
    /// Whether the proposal has been finished. Monotonic false -> true.
    pub finished: bool,
    /// The fixed outcome. Meaningful only when `finished` is true.
    pub result: i64,
}

impl Proposal {
    /// Derives the lifecycle phase at the given Unix timestamp.
    ///
    /// The phase is never stored; it is a pure function of the record and the
    /// clock, so `Active -> Ended` needs no ledger write.
    pub fn phase_at(&self, now: u64) -> ProposalPhase {
        if self.finished {
            ProposalPhase::Finished
        } else if now >= self.end_date {
            ProposalPhase::Ended
        } else {
            ProposalPhase::Active
        }
    }
}

/// The derived lifecycle phase of a proposal.
///
/// Transitions are one-way: `Active -> Ended -> Finished`, with `Finished`
/// terminal.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProposalPhase {
    /// Voting is open: `now < end_date` and the proposal is not finished.
    Active,
    /// Voting has closed but the creator has not finished the proposal.
    Ended,
    /// The creator finished the proposal and the result is fixed.
    Finished,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal(start: u64, end: u64) -> Proposal {
        Proposal {
            id: 1,
            creator: AccountId::default(),
            description: "test".into(),
            voting_system: VotingSystem::SimpleMajority,
            start_date: start,
            end_date: end,
            finished: false,
            result: 0,
        }
    }

    #[test]
    fn phase_follows_clock() {
        let p = proposal(100, 200);
        assert_eq!(p.phase_at(150), ProposalPhase::Active);
        assert_eq!(p.phase_at(200), ProposalPhase::Ended);
        assert_eq!(p.phase_at(500), ProposalPhase::Ended);
    }

    #[test]
    fn finished_is_terminal_regardless_of_clock() {
        let mut p = proposal(100, 200);
        p.finished = true;
        assert_eq!(p.phase_at(150), ProposalPhase::Finished);
        assert_eq!(p.phase_at(500), ProposalPhase::Finished);
    }

    #[test]
    fn proposal_serde_round_trips() {
        let p = proposal(100, 200);
        let json = serde_json::to_string(&p).unwrap();
        let back: Proposal = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }

    #[test]
    fn voting_system_wire_values_are_stable() {
        assert_eq!(VotingSystem::from_wire(1), Some(VotingSystem::SimpleMajority));
        assert_eq!(VotingSystem::from_wire(2), Some(VotingSystem::Supermajority));
        assert_eq!(VotingSystem::from_wire(3), Some(VotingSystem::Unanimous));
        assert_eq!(VotingSystem::from_wire(0), None);
    }
}
