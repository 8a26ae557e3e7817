//! Background proposal refresh.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use privote_api::ledger::ProposalLedger;
use privote_types::app::Proposal;

use crate::config::ClientConfig;

/// Polls the ledger on an interval and publishes proposal snapshots.
///
/// Snapshots are display copies only; the ledger stays authoritative.
/// Subscribers are only woken when the list actually changed. The poll task
/// stops when the watcher is dropped.
pub struct ProposalWatcher {
    snapshots: watch::Receiver<Vec<Proposal>>,
    task: JoinHandle<()>,
}

impl ProposalWatcher {
    /// Spawns the poll task, polling at the configured refresh interval.
    /// The first refresh happens immediately.
    pub fn spawn(ledger: Arc<dyn ProposalLedger>, config: &ClientConfig) -> Self {
        let refresh_interval = config.refresh_interval;
        let (tx, snapshots) = watch::channel(Vec::new());
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(refresh_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match ledger.proposals().await {
                    Ok(list) => {
                        tx.send_if_modified(|current| {
                            if *current == list {
                                false
                            } else {
                                *current = list;
                                true
                            }
                        });
                    }
                    Err(e) => log::warn!("proposal refresh failed: {e}"),
                }
            }
        });
        Self { snapshots, task }
    }

    /// A receiver for proposal snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Proposal>> {
        self.snapshots.clone()
    }

    /// The latest snapshot.
    pub fn latest(&self) -> Vec<Proposal> {
        self.snapshots.borrow().clone()
    }

    /// Stops the poll task.
    pub fn stop(self) {
        self.task.abort();
    }
}

impl Drop for ProposalWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
