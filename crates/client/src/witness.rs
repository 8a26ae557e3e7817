//! Witness assembly.
//!
//! Maps a recovered credential onto the signed-ballot circuit ABI. The
//! credential's digest is disclosed as the public `message_hash`; the key
//! coordinates and signature stay private to the circuit.

use privote_types::app::Credential;
use zk_types::{CircuitInputs, WitnessShapeError};

/// Builds the signed-ballot input map from a recovered credential.
pub fn build_signed_ballot(
    credential: &Credential,
    is_upvote: bool,
) -> Result<CircuitInputs, WitnessShapeError> {
    CircuitInputs::signed_ballot(
        &credential.public_key_x,
        &credential.public_key_y,
        is_upvote,
        &credential.digest,
        &credential.signature,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use zk_types::CircuitKind;

    #[test]
    fn witness_carries_the_ballot_value() {
        let credential = Credential {
            public_key_x: [1u8; 32],
            public_key_y: [2u8; 32],
            digest: [3u8; 32],
            signature: [4u8; 64],
        };
        let inputs = build_signed_ballot(&credential, true).unwrap();
        assert_eq!(inputs.kind(), CircuitKind::SignedBallot);
        match inputs {
            CircuitInputs::SignedBallot {
                is_upvote,
                message_hash,
                ..
            } => {
                assert!(is_upvote);
                assert_eq!(message_hash, [3u8; 32]);
            }
            _ => unreachable!(),
        }
    }
}
