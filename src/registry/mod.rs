//! Service status registry.
//!
//! # Data Flow
//! ```text
//! Poll loop (writer)
//!     → ServiceRegistry::set(name, status)
//!
//! Scrape handler (reader, any number concurrently)
//!     → ServiceRegistry::snapshot()
//!     → rendered as `service_up{service="..."}`
//! ```
//!
//! # Design Decisions
//! - Injected into both sides as a cheap clone (shared `Arc` inside)
//! - Per-shard locking from DashMap: a read sees either the old or new status
//! - Entries are created on first successful probe and never removed

pub mod store;

pub use store::ServiceRegistry;
