#![forbid(unsafe_code)]

//! # Privote ledger
//!
//! The authoritative proposal/vote store. The reference implementation here
//! keeps all state in process memory behind an async lock; a deployment
//! against a remote contract would implement the same [`ProposalLedger`]
//! trait over its transport.
//!
//! [`ProposalLedger`]: privote_api::ledger::ProposalLedger

mod memory;

pub use memory::InMemoryLedger;
