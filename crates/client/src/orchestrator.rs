//! The vote-casting pipeline.

use std::sync::Arc;

use tokio::sync::Mutex;

use privote_api::ledger::ProposalLedger;
use privote_api::time::Clock;
use privote_api::wallet::WalletSigner;
use privote_api::zk::ProofBackend;
use privote_crypto::{address_from_credential, recover_credential};
use privote_types::app::{AccountId, ProposalPhase, Vote, VoteMessage, VoteStage};
use privote_types::error::{
    CryptoError, ExecutionError, InputError, LedgerError, VoteError, VoteErrorKind,
};
use zk_types::{CircuitArtifact, ProofArtifact, ProveOptions};

use crate::config::ClientConfig;
use crate::witness;

/// Proof that a vote attempt ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteReceipt {
    /// The proposal voted on.
    pub proposal_id: u64,
    /// The vote as dispatched to the ledger.
    pub vote: Vote,
    /// The self-verified proof submitted alongside the vote.
    pub proof: ProofArtifact,
    /// The stages the attempt passed through, ending in `Committed`.
    pub stages: Vec<VoteStage>,
}

struct ActiveAccount {
    wallet: Arc<dyn WalletSigner>,
    address: AccountId,
    /// Starts at 1; advances after every dispatch, accepted or not.
    next_voter_nonce: u64,
}

/// Drives a vote attempt through the full pipeline.
///
/// Attempts are not mutually excluded: the account lock is only taken for
/// short nonce reads, never across a signing prompt or a proving call, so
/// concurrent attempts (and account queries) make progress independently.
/// When attempts race onto the same nonce, the ledger's triple-keyed
/// acceptance check is the arbiter.
pub struct VotingOrchestrator {
    backend: Arc<dyn ProofBackend>,
    ledger: Arc<dyn ProposalLedger>,
    clock: Arc<dyn Clock>,
    circuit: CircuitArtifact,
    config: ClientConfig,
    account: Mutex<Option<ActiveAccount>>,
}

impl VotingOrchestrator {
    /// Creates an orchestrator with no connected account.
    pub fn new(
        backend: Arc<dyn ProofBackend>,
        ledger: Arc<dyn ProposalLedger>,
        clock: Arc<dyn Clock>,
        circuit: CircuitArtifact,
        config: ClientConfig,
    ) -> Self {
        Self {
            backend,
            ledger,
            clock,
            circuit,
            config,
            account: Mutex::new(None),
        }
    }

    /// Connects a signing account. Resets the voter nonce to 1.
    pub async fn connect(&self, wallet: Arc<dyn WalletSigner>, address: AccountId) {
        let mut guard = self.account.lock().await;
        *guard = Some(ActiveAccount {
            wallet,
            address,
            next_voter_nonce: 1,
        });
        log::info!("account {address} connected");
    }

    /// Disconnects the current account, if any.
    pub async fn disconnect(&self) {
        let mut guard = self.account.lock().await;
        if let Some(account) = guard.take() {
            log::info!("account {} disconnected", account.address);
        }
    }

    /// The voter nonce the next dispatch will carry, if an account is
    /// connected.
    pub async fn next_voter_nonce(&self) -> Option<u64> {
        self.account.lock().await.as_ref().map(|a| a.next_voter_nonce)
    }

    /// Runs one complete vote attempt.
    ///
    /// Stages run strictly in order; the first failure aborts the attempt
    /// with the stage recorded on the error. The ledger is only contacted
    /// after the freshly generated proof verified locally.
    pub async fn cast_vote(
        &self,
        proposal_id: u64,
        is_upvote: bool,
    ) -> Result<VoteReceipt, VoteError> {
        let (wallet, address) = {
            let guard = self.account.lock().await;
            let account = guard
                .as_ref()
                .ok_or_else(|| VoteError::at(VoteStage::Idle, InputError::NoActiveAccount))?;
            (account.wallet.clone(), account.address)
        };
        let mut stages = vec![VoteStage::Idle];

        // Resolve the proposal and its ledger nonce before doing any work.
        let proposals = self
            .ledger
            .proposals()
            .await
            .map_err(|e| VoteError::at(VoteStage::Idle, e))?;
        let (proposal_nonce, proposal) = proposals
            .iter()
            .enumerate()
            .find(|(_, p)| p.id == proposal_id)
            .map(|(nonce, p)| (nonce as u64, p.clone()))
            .ok_or_else(|| {
                VoteError::at(VoteStage::Idle, LedgerError::ProposalNotFound(proposal_id))
            })?;
        if proposal.phase_at(self.clock.now_unix()) != ProposalPhase::Active {
            return Err(VoteError::at(
                VoteStage::Idle,
                LedgerError::ProposalNotActive(proposal_id),
            ));
        }

        enter(&mut stages, VoteStage::Recovering);
        let message = VoteMessage {
            timestamp: 0,
            proposal_id,
            voter: address,
            voter_id: 0,
            is_upvote,
        };
        let text = message.canonical_text();
        let signature = wallet
            .sign_message(&text)
            .await
            .map_err(|e| VoteError::at(VoteStage::Recovering, e))?;
        let credential = recover_credential(&text, &signature)
            .map_err(|e| VoteError::at(VoteStage::Recovering, e))?;
        if address_from_credential(&credential) != address {
            return Err(VoteError::at(
                VoteStage::Recovering,
                CryptoError::RecoveryFailed(
                    "recovered key does not belong to the connected account".into(),
                ),
            ));
        }

        enter(&mut stages, VoteStage::BuildingWitness);
        let inputs = witness::build_signed_ballot(&credential, is_upvote).map_err(|e| {
            VoteError::at(
                VoteStage::BuildingWitness,
                ExecutionError::MalformedWitness(e.to_string()),
            )
        })?;

        enter(&mut stages, VoteStage::Proving);
        let trace = self
            .backend
            .execute(&self.circuit, &inputs)
            .await
            .map_err(|e| VoteError::at(VoteStage::Proving, e))?;
        let opts = ProveOptions {
            hash_scheme: self.config.hash_scheme,
        };
        let proof = self
            .backend
            .prove(&self.circuit, &trace, &opts)
            .await
            .map_err(|e| VoteError::at(VoteStage::Proving, e))?;

        enter(&mut stages, VoteStage::SelfVerifying);
        let valid = self
            .backend
            .verify(&proof)
            .await
            .map_err(|e| VoteError::at(VoteStage::SelfVerifying, e))?;
        if !valid {
            return Err(VoteError::at(
                VoteStage::SelfVerifying,
                VoteErrorKind::SelfVerifyFailed,
            ));
        }

        enter(&mut stages, VoteStage::Submitting);
        let voter_nonce = {
            let guard = self.account.lock().await;
            guard
                .as_ref()
                .filter(|a| a.address == address)
                .map(|a| a.next_voter_nonce)
                .ok_or_else(|| {
                    VoteError::at(VoteStage::Submitting, InputError::NoActiveAccount)
                })?
        };
        let vote = Vote {
            voter: address,
            timestamp: self.clock.now_unix(),
            proposal_nonce,
            voter_nonce,
            value: is_upvote,
        };
        let dispatch = self.ledger.vote(vote).await;
        // The nonce is burned by the dispatch itself, not by acceptance.
        {
            let mut guard = self.account.lock().await;
            if let Some(account) = guard.as_mut().filter(|a| a.address == address) {
                account.next_voter_nonce += 1;
            }
        }
        dispatch.map_err(|e| VoteError::at(VoteStage::Submitting, e))?;

        enter(&mut stages, VoteStage::Committed);
        log::info!(
            "vote committed: proposal {proposal_id}, nonce {proposal_nonce}, voter nonce {voter_nonce}"
        );
        Ok(VoteReceipt {
            proposal_id,
            vote,
            proof,
            stages,
        })
    }
}

fn enter(stages: &mut Vec<VoteStage>, stage: VoteStage) {
    log::debug!("vote attempt entering stage {stage}");
    stages.push(stage);
}
