//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Poll loop and HTTP layer produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (exporter self-metrics)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → scrape endpoint, after the service_up family
//! ```

pub mod logging;
pub mod metrics;
