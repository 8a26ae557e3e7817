//! Clock injection.
//!
//! Proposal phases are a function of wall-clock time; injecting the clock
//! keeps lifecycle transitions testable without sleeping.

use std::time::{SystemTime, UNIX_EPOCH};

/// A source of Unix timestamps.
pub trait Clock: Send + Sync {
    /// The current Unix timestamp in seconds.
    fn now_unix(&self) -> u64;
}

/// The production clock, backed by [`SystemTime`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        // A system clock before the epoch is a host misconfiguration; treat
        // it as time zero rather than panicking.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to. Used to drive proposal lifecycle
/// transitions deterministically in tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: std::sync::atomic::AtomicU64,
}

impl ManualClock {
    /// Creates a clock fixed at the given Unix timestamp.
    pub fn at(now: u64) -> Self {
        Self {
            now: std::sync::atomic::AtomicU64::new(now),
        }
    }

    /// Moves the clock to the given Unix timestamp.
    pub fn set(&self, now: u64) {
        self.now.store(now, std::sync::atomic::Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_unix(&self) -> u64 {
        self.now.load(std::sync::atomic::Ordering::SeqCst)
    }
}
