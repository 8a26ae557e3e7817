//! The in-memory ledger.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use privote_api::ledger::{CreateProposal, LedgerEvent, ProposalLedger};
use privote_api::time::Clock;
use privote_types::app::{AccountId, Proposal, ProposalPhase, Vote};
use privote_types::error::LedgerError;
use privote_types::MAX_DESCRIPTION_LEN;

/// Lagging subscribers drop events rather than block writers.
const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Default)]
struct LedgerState {
    /// Proposal ids in insertion order; a proposal's nonce is its index here.
    order: Vec<u64>,
    proposals: HashMap<u64, Proposal>,
    /// Accepted votes, keyed by proposal nonce.
    votes: HashMap<u64, Vec<Vote>>,
    /// The duplicate-vote table.
    cast: HashSet<(u64, AccountId, u64)>,
}

/// A [`ProposalLedger`] held entirely in process memory.
///
/// All writes go through a single [`RwLock`], so every operation observes and
/// produces a consistent snapshot. Phase checks use the injected clock.
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<LedgerEvent>,
}

impl InMemoryLedger {
    /// Creates an empty ledger driven by the given clock.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: RwLock::new(LedgerState::default()),
            clock,
            events,
        }
    }
}

#[async_trait]
impl ProposalLedger for InMemoryLedger {
    async fn create_proposal(&self, params: CreateProposal) -> Result<(), LedgerError> {
        if params.end_date <= params.start_date {
            return Err(LedgerError::InvalidWindow {
                start: params.start_date,
                end: params.end_date,
            });
        }
        if params.description.len() > MAX_DESCRIPTION_LEN {
            return Err(LedgerError::Invalid(format!(
                "description exceeds {MAX_DESCRIPTION_LEN} bytes"
            )));
        }

        let mut state = self.state.write().await;
        if state.proposals.contains_key(&params.id) {
            return Err(LedgerError::ProposalExists(params.id));
        }

        let proposal = Proposal {
            id: params.id,
            creator: params.creator,
            description: params.description,
            voting_system: params.voting_system,
            start_date: params.start_date,
            end_date: params.end_date,
            finished: false,
            result: 0,
        };
        state.order.push(params.id);
        state.proposals.insert(params.id, proposal);
        drop(state);

        log::info!("proposal {} created by {}", params.id, params.creator);
        let _ = self.events.send(LedgerEvent::ProposalCreated {
            id: params.id,
            creator: params.creator,
        });
        Ok(())
    }

    async fn vote(&self, vote: Vote) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;

        let id = *state
            .order
            .get(usize::try_from(vote.proposal_nonce).unwrap_or(usize::MAX))
            .ok_or(LedgerError::ProposalNotFound(vote.proposal_nonce))?;

        let key = (vote.proposal_nonce, vote.voter, vote.voter_nonce);
        if state.cast.contains(&key) {
            return Err(LedgerError::DuplicateVote {
                proposal_nonce: vote.proposal_nonce,
                voter: vote.voter,
                voter_nonce: vote.voter_nonce,
            });
        }

        let proposal = state
            .proposals
            .get(&id)
            .ok_or(LedgerError::ProposalNotFound(id))?;
        if proposal.phase_at(self.clock.now_unix()) != ProposalPhase::Active {
            return Err(LedgerError::ProposalNotActive(id));
        }

        state.cast.insert(key);
        state.votes.entry(vote.proposal_nonce).or_default().push(vote);
        drop(state);

        log::info!(
            "vote recorded: proposal nonce {}, voter {}",
            vote.proposal_nonce,
            vote.voter
        );
        let _ = self.events.send(LedgerEvent::VoteCast {
            voter: vote.voter,
            proposal_nonce: vote.proposal_nonce,
            value: vote.value,
        });
        Ok(())
    }

    async fn finish_proposal(
        &self,
        id: u64,
        caller: AccountId,
        result: i64,
    ) -> Result<(), LedgerError> {
        let mut state = self.state.write().await;
        let proposal = state
            .proposals
            .get_mut(&id)
            .ok_or(LedgerError::ProposalNotFound(id))?;
        if proposal.creator != caller {
            return Err(LedgerError::NotCreator { caller, id });
        }
        if proposal.finished {
            return Err(LedgerError::AlreadyFinished(id));
        }

        proposal.finished = true;
        proposal.result = result;
        drop(state);

        log::info!("proposal {id} finished with result {result}");
        let _ = self
            .events
            .send(LedgerEvent::ProposalFinished { id, result });
        Ok(())
    }

    /// Returns proposals in insertion order; a proposal's nonce is its
    /// position in the returned list.
    async fn proposals(&self) -> Result<Vec<Proposal>, LedgerError> {
        let state = self.state.read().await;
        Ok(state
            .order
            .iter()
            .filter_map(|id| state.proposals.get(id).cloned())
            .collect())
    }

    async fn proposal(&self, id: u64) -> Result<Proposal, LedgerError> {
        let state = self.state.read().await;
        state
            .proposals
            .get(&id)
            .cloned()
            .ok_or(LedgerError::ProposalNotFound(id))
    }

    async fn proposal_votes(&self, proposal_nonce: u64) -> Result<Vec<Vote>, LedgerError> {
        let state = self.state.read().await;
        Ok(state.votes.get(&proposal_nonce).cloned().unwrap_or_default())
    }

    async fn has_voted(
        &self,
        proposal_nonce: u64,
        voter: AccountId,
        voter_nonce: u64,
    ) -> Result<bool, LedgerError> {
        let state = self.state.read().await;
        Ok(state.cast.contains(&(proposal_nonce, voter, voter_nonce)))
    }

    fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use privote_api::time::ManualClock;

    fn account(byte: u8) -> AccountId {
        AccountId([byte; 20])
    }

    fn create(id: u64, creator: AccountId) -> CreateProposal {
        CreateProposal {
            id,
            creator,
            description: "raise the quorum".into(),
            voting_system: privote_types::app::VotingSystem::SimpleMajority,
            start_date: 100,
            end_date: 200,
        }
    }

    fn vote(proposal_nonce: u64, voter: AccountId, voter_nonce: u64) -> Vote {
        Vote {
            voter,
            timestamp: 150,
            proposal_nonce,
            voter_nonce,
            value: true,
        }
    }

    fn ledger_at(now: u64) -> (Arc<ManualClock>, InMemoryLedger) {
        let clock = Arc::new(ManualClock::at(now));
        let ledger = InMemoryLedger::new(clock.clone());
        (clock, ledger)
    }

    #[tokio::test]
    async fn create_and_read_back_in_insertion_order() {
        let (_, ledger) = ledger_at(150);
        ledger.create_proposal(create(7, account(1))).await.unwrap();
        ledger.create_proposal(create(3, account(2))).await.unwrap();

        let all = ledger.proposals().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, 7);
        assert_eq!(all[1].id, 3);
        assert_eq!(ledger.proposal(3).await.unwrap().creator, account(2));
    }

    #[tokio::test]
    async fn create_rejects_invalid_input() {
        let (_, ledger) = ledger_at(150);

        let mut bad_window = create(1, account(1));
        bad_window.end_date = bad_window.start_date;
        assert!(matches!(
            ledger.create_proposal(bad_window).await.unwrap_err(),
            LedgerError::InvalidWindow { .. }
        ));

        let mut oversized = create(1, account(1));
        oversized.description = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(matches!(
            ledger.create_proposal(oversized).await.unwrap_err(),
            LedgerError::Invalid(_)
        ));

        ledger.create_proposal(create(1, account(1))).await.unwrap();
        assert!(matches!(
            ledger.create_proposal(create(1, account(2))).await.unwrap_err(),
            LedgerError::ProposalExists(1)
        ));
    }

    #[tokio::test]
    async fn vote_is_recorded_once_per_triple() {
        let (_, ledger) = ledger_at(150);
        ledger.create_proposal(create(9, account(1))).await.unwrap();

        ledger.vote(vote(0, account(5), 1)).await.unwrap();
        assert!(ledger.has_voted(0, account(5), 1).await.unwrap());

        let err = ledger.vote(vote(0, account(5), 1)).await.unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateVote { .. }));

        // A fresh voter nonce is a distinct triple.
        ledger.vote(vote(0, account(5), 2)).await.unwrap();
        assert_eq!(ledger.proposal_votes(0).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn vote_rejects_unknown_proposal_nonce() {
        let (_, ledger) = ledger_at(150);
        let err = ledger.vote(vote(0, account(5), 1)).await.unwrap_err();
        assert!(matches!(err, LedgerError::ProposalNotFound(0)));
    }

    #[tokio::test]
    async fn vote_rejects_outside_active_phase() {
        let (clock, ledger) = ledger_at(150);
        ledger.create_proposal(create(9, account(1))).await.unwrap();

        clock.set(200);
        let err = ledger.vote(vote(0, account(5), 1)).await.unwrap_err();
        assert!(matches!(err, LedgerError::ProposalNotActive(9)));
    }

    #[tokio::test]
    async fn finish_is_creator_only_and_terminal() {
        let (clock, ledger) = ledger_at(150);
        ledger.create_proposal(create(9, account(1))).await.unwrap();

        let err = ledger.finish_proposal(9, account(2), 4).await.unwrap_err();
        assert!(matches!(err, LedgerError::NotCreator { .. }));

        // The creator can finish once voting has closed.
        clock.set(250);
        ledger.finish_proposal(9, account(1), 4).await.unwrap();
        let proposal = ledger.proposal(9).await.unwrap();
        assert!(proposal.finished);
        assert_eq!(proposal.result, 4);

        assert!(matches!(
            ledger.finish_proposal(9, account(1), 4).await.unwrap_err(),
            LedgerError::AlreadyFinished(9)
        ));

        // Finished proposals accept no further votes.
        let err = ledger.vote(vote(0, account(5), 1)).await.unwrap_err();
        assert!(matches!(err, LedgerError::ProposalNotActive(9)));
    }

    #[tokio::test]
    async fn events_are_broadcast_in_order() {
        let (_, ledger) = ledger_at(150);
        let mut events = ledger.subscribe();

        ledger.create_proposal(create(9, account(1))).await.unwrap();
        ledger.vote(vote(0, account(5), 1)).await.unwrap();
        ledger.finish_proposal(9, account(1), 1).await.unwrap();

        assert_eq!(
            events.recv().await.unwrap(),
            LedgerEvent::ProposalCreated {
                id: 9,
                creator: account(1)
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            LedgerEvent::VoteCast {
                voter: account(5),
                proposal_nonce: 0,
                value: true
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            LedgerEvent::ProposalFinished { id: 9, result: 1 }
        );
    }
}
