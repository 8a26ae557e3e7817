#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Privote Types
//!
//! This crate is the foundational library for the Privote voting stack,
//! containing all core data structures and error types.
//!
//! ## Architectural Role
//!
//! As the base crate, `privote-types` has minimal dependencies and is itself a
//! dependency for almost every other crate in the workspace. This structure
//! prevents circular dependencies and provides a stable, canonical definition
//! for shared types like `Proposal`, `Vote`, `AccountId`, and the error
//! taxonomy of the vote-casting protocol.

/// The maximum length in bytes for a proposal description.
pub const MAX_DESCRIPTION_LEN: usize = 1024; // 1 KiB

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::VoteError> = std::result::Result<T, E>;

/// Core application-level data structures like `Proposal`, `Vote`, and `AccountId`.
pub mod app;
/// A unified set of all error types used across the workspace.
pub mod error;
