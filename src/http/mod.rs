//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs
//!         metrics path → registry snapshot → render.rs → Prometheus text
//!         /healthz     → poller state → JSON
//!         /            → landing page
//! ```

pub mod handlers;
pub mod render;
pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, ExporterServer, HEALTH_PATH};
