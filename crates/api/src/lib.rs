//! # Privote API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # Privote API
//!
//! Core traits for the vote-casting protocol. This crate defines the stable
//! contract between the orchestrator and its external collaborators: the
//! wallet signer, the proof backend, the proposal ledger, and the clock.

/// Re-exports all core error types from the central `privote-types` crate.
pub mod error;
/// The authoritative proposal/vote store and its change notifications.
pub mod ledger;
/// Clock injection for testable proposal lifecycles.
pub mod time;
/// The wallet signing seam.
pub mod wallet;
/// The proof backend seam.
pub mod zk;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::error::{
        CryptoError, ErrorCode, ExecutionError, InputError, LedgerError, ProofError,
        SigningError, VoteError, VoteErrorKind,
    };
    pub use crate::ledger::{LedgerEvent, ProposalLedger};
    pub use crate::time::Clock;
    pub use crate::wallet::WalletSigner;
    pub use crate::zk::ProofBackend;
}
