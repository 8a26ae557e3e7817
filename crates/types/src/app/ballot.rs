//! Votes as recorded by the ledger, the canonical vote message, and the
//! transient credential material a vote attempt derives from a signature.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::identity::AccountId;

/// A vote as accepted and recorded by the ledger.
///
/// Immutable once accepted. The ledger enforces that at most one vote exists
/// for a given `(proposal_nonce, voter, voter_nonce)` triple.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Vote {
    /// The submitting account.
    pub voter: AccountId,
    /// Unix timestamp supplied by the client at submission.
    pub timestamp: u64,
    /// The ledger-side proposal sequence the vote belongs to.
    pub proposal_nonce: u64,
    /// Per-voter, client-incremented counter starting at 1.
    pub voter_nonce: u64,
    /// The ballot value: true for an upvote.
    pub value: bool,
}

/// The message a voter signs to derive a credential.
///
/// The canonical text form is a comma-joined tuple with fixed field order:
/// `timestamp,proposal_id,voter,voter_id,is_upvote`. Any change to the order
/// or the delimiter is a breaking protocol change, since the circuit proves a
/// statement over the keccak digest of exactly this encoding.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VoteMessage {
    /// Unix timestamp of the attempt. The deployed protocol currently pins
    /// this to 0.
    pub timestamp: u64,
    /// The proposal being voted on.
    pub proposal_id: u64,
    /// The claimed voter account.
    pub voter: AccountId,
    /// Application-level voter identifier. The deployed protocol currently
    /// pins this to 0.
    pub voter_id: u64,
    /// The ballot value.
    pub is_upvote: bool,
}

impl VoteMessage {
    /// Renders the canonical, sign-ready text form.
    pub fn canonical_text(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.timestamp, self.proposal_id, self.voter, self.voter_id, self.is_upvote
        )
    }
}

impl core::fmt::Display for VoteMessage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.canonical_text())
    }
}

/// Transient, per-attempt credential material recovered from a signature.
///
/// Generated fresh for every vote attempt and discarded immediately after
/// proof generation, whether it succeeds or fails. The contents are zeroized
/// on drop and the `Debug` impl is redacted: a durable log line pairing this
/// material with a ballot value would break voter privacy.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Credential {
    /// X coordinate of the recovered uncompressed public key.
    pub public_key_x: [u8; 32],
    /// Y coordinate of the recovered uncompressed public key.
    pub public_key_y: [u8; 32],
    /// Keccak-256 digest of the canonical vote message.
    pub digest: [u8; 32],
    /// The signature with the recovery byte discarded.
    pub signature: [u8; 64],
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Credential").finish_non_exhaustive()
    }
}
