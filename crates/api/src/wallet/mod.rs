//! The wallet signing seam.

use async_trait::async_trait;
use privote_types::error::SigningError;

/// An external wallet capable of signing an arbitrary text message.
///
/// Invoked exactly once per vote attempt. The operation is long-latency
/// (typically a user interaction) and may be rejected by the user, which must
/// surface as a recoverable [`SigningError`], never a crash.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    /// Signs `message` and returns a 65-byte recoverable signature
    /// (`r || s || v`).
    async fn sign_message(&self, message: &str) -> Result<Vec<u8>, SigningError>;
}
