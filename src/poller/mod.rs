//! Poll-and-publish subsystem.
//!
//! # Data Flow
//! ```text
//! Every interval (poll_loop.rs):
//!     for service in configured order
//!         → StatusProbe::probe(service)
//!         → Ok: ServiceRegistry::set(service, status)
//!         → Err: log, count, keep last-known value
//!     sleep(interval) or shutdown
//!
//! Supervision (supervisor.rs):
//!     spawn poll loop → await its JoinHandle
//!     → publish PollerState (running / stopped / faulted)
//! ```
//!
//! # Design Decisions
//! - Services are probed sequentially; one failure never skips the others
//! - No retries inside a cycle; the next cycle is the retry
//! - A panicking loop freezes metrics but is visible through PollerState

pub mod poll_loop;
pub mod supervisor;

pub use poll_loop::{CycleReport, Poller};
pub use supervisor::{spawn_supervised, PollerHandle, PollerState};
