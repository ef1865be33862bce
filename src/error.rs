//! Top-level error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::net::ListenerError;

/// Fatal errors that end the exporter process.
#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("HTTP server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("poll loop faulted")]
    PollerFaulted,
}
