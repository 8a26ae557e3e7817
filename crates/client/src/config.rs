use std::time::Duration;

use zk_types::HashScheme;

/// Client-side tunables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// How often the proposal watcher polls the ledger.
    pub refresh_interval: Duration,
    /// The hashing convention to request proofs under. Defaults to keccak,
    /// which EVM-style ledger verifiers expect.
    pub hash_scheme: HashScheme,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(10),
            hash_scheme: HashScheme::Keccak,
        }
    }
}
