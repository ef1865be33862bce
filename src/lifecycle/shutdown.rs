//! Shutdown coordination for the exporter.
//!
//! One `Shutdown` is created by `lifecycle::run`. The signal listener holds a
//! clone and triggers it on SIGINT/SIGTERM; `Exporter::serve` triggers it
//! itself when the HTTP server stops or when a faulted poller must take the
//! process down. Two receivers are handed out per run:
//!
//! ```text
//! poll loop   : select! { sleep(interval), recv() }  → leaves its sleep
//! HTTP server : with_graceful_shutdown(recv())       → drains open scrapes
//! ```

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Consumers treat any outcome of `recv` as the signal: a value, a closed
/// channel (every `Shutdown` dropped), or `Lagged` after repeated triggers.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe to the shutdown signal.
    ///
    /// Receivers created after `trigger` do not see it.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Trigger the shutdown signal.
    ///
    /// A signal arriving while `serve` is already winding down triggers again.
    /// With a capacity of one, a receiver that has not read yet then sees
    /// `Err(Lagged)` instead of `Ok(())`; it still wakes.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of tasks still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
