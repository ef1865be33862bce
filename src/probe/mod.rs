//! Service status probing subsystem.
//!
//! # Data Flow
//! ```text
//! Poll loop asks for one service:
//!     → command.rs (spawn `<command> <args..> <service>`, bounded by timeout)
//!     → status.rs (trimmed stdout → ServiceStatus)
//!     → Ok(ServiceStatus) or Err(ProbeError)
//! ```
//!
//! # Design Decisions
//! - One short-lived child process per probe, no caching
//! - Unrecognized output is an error, never a sentinel status
//! - The probe never validates service names; the external tool does
//! - `StatusProbe` is a trait so the poll loop can be driven without systemd

pub mod command;
pub mod status;

use std::future::Future;

pub use command::{CommandProbe, ProbeError};
pub use status::ServiceStatus;

/// Something that can report the activation state of a named service.
pub trait StatusProbe: Send + Sync + 'static {
    /// Query the current state of `service`.
    fn probe(&self, service: &str) -> impl Future<Output = Result<ServiceStatus, ProbeError>> + Send;
}
