//! Supervision of the poll loop task.
//!
//! # States
//! ```text
//! Running → Stopped: loop returned after a shutdown signal
//! Running → Faulted: loop panicked; registry keeps its last values
//! ```

use serde::Serialize;
use std::any::Any;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::observability::metrics;
use crate::poller::Poller;
use crate::probe::StatusProbe;

/// Lifecycle state of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollerState {
    Running,
    Stopped,
    Faulted,
}

impl PollerState {
    pub fn is_running(self) -> bool {
        self == PollerState::Running
    }
}

/// Owner-side handle on a supervised poll loop.
pub struct PollerHandle {
    state: watch::Receiver<PollerState>,
    supervisor: JoinHandle<()>,
}

impl PollerHandle {
    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<PollerState> {
        self.state.clone()
    }

    /// Wait until the loop is no longer running and return how it ended.
    pub async fn wait_until_done(&mut self) -> PollerState {
        let ended = match self.state.wait_for(|state| !state.is_running()).await {
            Ok(state) => Some(*state),
            Err(_) => None,
        };
        ended.unwrap_or_else(|| *self.state.borrow())
    }

    /// Wait for the supervisor task itself to finish.
    pub async fn join(self) {
        if let Err(e) = self.supervisor.await {
            tracing::error!(error = %e, "Poll loop supervisor failed");
        }
    }
}

/// Spawn the poll loop and a supervisor that reports how it ends.
pub fn spawn_supervised<P: StatusProbe>(
    poller: Poller<P>,
    shutdown: broadcast::Receiver<()>,
) -> PollerHandle {
    let (tx, rx) = watch::channel(PollerState::Running);
    metrics::record_poller_up(true);

    let worker = tokio::spawn(poller.run(shutdown));

    let supervisor = tokio::spawn(async move {
        let state = match worker.await {
            Ok(()) => {
                tracing::info!("Poll loop stopped");
                PollerState::Stopped
            }
            Err(e) if e.is_panic() => {
                let message = panic_message(e.into_panic());
                tracing::error!(
                    panic = %message,
                    "Poll loop panicked, service metrics are frozen at their last values"
                );
                PollerState::Faulted
            }
            Err(e) => {
                tracing::warn!(error = %e, "Poll loop cancelled");
                PollerState::Stopped
            }
        };

        metrics::record_poller_up(false);
        tx.send_replace(state);
    });

    PollerHandle { state: rx, supervisor }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
