// Re-export all core error types from the central types crate.
pub use privote_types::error::{
    CryptoError, ErrorCode, ExecutionError, InputError, LedgerError, ProofError, SigningError,
    VoteError, VoteErrorKind,
};
pub use privote_types::Result;
