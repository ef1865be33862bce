//! TCP listener setup.
//!
//! # Responsibilities
//! - Resolve the configured listen address (`:port` means all interfaces)
//! - Bind the scrape listener
//!
//! # Design Decisions
//! - A bind failure is fatal for the process; callers surface it unchanged

use std::net::{SocketAddr, ToSocketAddrs};
use thiserror::Error;
use tokio::net::TcpListener;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listen address could not be resolved.
    #[error("Invalid listen address {address:?}: {source}")]
    Address {
        address: String,
        #[source]
        source: std::io::Error,
    },
    /// Failed to bind to address.
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Resolve a listen address.
///
/// Accepts `host:port`, `ip:port` and the bare `:port` form, which binds
/// every IPv4 interface.
pub fn resolve_listen_address(address: &str) -> Result<SocketAddr, std::io::Error> {
    let address = address.trim();
    let normalized = if address.starts_with(':') {
        format!("0.0.0.0{}", address)
    } else {
        address.to_string()
    };

    normalized.to_socket_addrs()?.next().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::AddrNotAvailable,
            "address resolved to nothing",
        )
    })
}

/// Bind the scrape listener.
pub async fn bind(address: &str) -> Result<TcpListener, ListenerError> {
    let addr = resolve_listen_address(address).map_err(|source| ListenerError::Address {
        address: address.to_string(),
        source,
    })?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ListenerError::Bind { address: addr, source })?;

    tracing::info!(
        address = %listener.local_addr().unwrap_or(addr),
        "Listener bound"
    );

    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_only_address() {
        let addr = resolve_listen_address(":9199").unwrap();
        assert_eq!(addr, "0.0.0.0:9199".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_full_address() {
        let addr = resolve_listen_address("127.0.0.1:9300").unwrap();
        assert_eq!(addr, "127.0.0.1:9300".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_invalid_address() {
        assert!(resolve_listen_address("9199").is_err());
        assert!(resolve_listen_address("127.0.0.1:notaport").is_err());
    }

    #[tokio::test]
    async fn test_bind_conflict_is_bind_error() {
        let first = bind("127.0.0.1:0").await.unwrap();
        let taken = first.local_addr().unwrap().to_string();

        match bind(&taken).await {
            Err(ListenerError::Bind { address, .. }) => assert_eq!(address.to_string(), taken),
            other => panic!("expected bind error, got {:?}", other.map(|_| ())),
        }
    }
}
