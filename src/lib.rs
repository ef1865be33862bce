//! Prometheus exporter for service activation state.
//!
//! A background poll loop asks an external query (by default
//! `systemctl is-active <unit>`) for the state of every configured service
//! and stores the answer in a shared registry. Every scrape of the metrics
//! endpoint renders that registry as the `service_up` gauge:
//! 0 inactive, 1 active, 2 unknown.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod poller;
pub mod probe;
pub mod registry;

pub use config::schema::ExporterConfig;
pub use error::ExporterError;
pub use http::ExporterServer;
pub use lifecycle::{Exporter, Shutdown};
pub use probe::{CommandProbe, ServiceStatus, StatusProbe};
pub use registry::ServiceRegistry;
