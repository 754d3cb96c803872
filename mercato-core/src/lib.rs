//! mercato-core
//!
//! Core traits and utilities shared across the mercato ecosystem.
//!
//! - `connector`: the `MercatoConnector` trait and capability provider traits.
//! - `cache`: the per-(entity kind, ticker) record cache with incremental
//!   merge, deduplication, and range-bounded reads.
//! - `dates`: best-effort date normalization.
//!
//! Async runtime (Tokio)
//! ---------------------
//! Provider traits are `async` and the cache's fetch gate is built on
//! `tokio::sync::Mutex`, so code using this crate must run under a Tokio 1.x
//! runtime.
#![warn(missing_docs)]

/// Per-ticker record cache: merge, dedup, range filter, fetch gate.
pub mod cache;
/// Connector capability traits and the primary `MercatoConnector` interface.
pub mod connector;
/// Date normalization helpers.
pub mod dates;
pub mod types;

pub use cache::{Cache, CacheRecord, RecordStore, SortOrder, range_filtered};
pub use connector::MercatoConnector;
pub use dates::normalize_date;
pub use types::*;
