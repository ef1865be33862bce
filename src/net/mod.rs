//! Network layer.
//!
//! # Data Flow
//! ```text
//! listen_address from config
//!     → listener.rs (resolve, bind)
//!     → TcpListener handed to http::ExporterServer
//! ```

pub mod listener;

pub use listener::{bind, resolve_listen_address, ListenerError};
