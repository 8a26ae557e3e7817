//! Keccak-256 helpers.

use sha3::{Digest, Keccak256};

/// Keccak-256 digest of the canonical vote message text.
///
/// This is the one-way hash fixed by the protocol: the circuit proves a
/// statement over exactly this digest, so the hash function cannot change
/// without a breaking protocol change.
pub fn keccak_digest(message: &str) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(message.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_matches_known_vector() {
        // Keccak-256 of the empty string.
        assert_eq!(
            hex::encode(keccak_digest("")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn digest_is_deterministic_and_message_sensitive() {
        let a = keccak_digest("0,1,0xabc,0,true");
        let b = keccak_digest("0,1,0xabc,0,false");
        assert_eq!(a, keccak_digest("0,1,0xabc,0,true"));
        assert_ne!(a, b);
    }
}
