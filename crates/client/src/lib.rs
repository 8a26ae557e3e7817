#![forbid(unsafe_code)]

//! # Privote client
//!
//! The voter-side half of the protocol: [`VotingOrchestrator`] drives a
//! single vote attempt through signing, credential recovery, witness
//! assembly, proving, self-verification, and ledger dispatch, and
//! [`ProposalWatcher`] keeps a display copy of the proposal list fresh.
//!
//! The orchestrator never sends credential or witness material anywhere:
//! only the proof artifact and the public vote record leave the process.

mod config;
mod orchestrator;
mod watch;
pub mod witness;

pub use config::ClientConfig;
pub use orchestrator::{VoteReceipt, VotingOrchestrator};
pub use watch::ProposalWatcher;
