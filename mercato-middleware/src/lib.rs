//! mercato-middleware
//!
//! Wrappers that compose behavior around a raw connector. The only middleware
//! today is the record cache: it keeps per-ticker collections of normalized
//! records and answers range-bounded reads without touching the network when
//! the cached view is non-empty.
#![warn(missing_docs)]

mod builder;
mod cache;

pub use builder::ConnectorBuilder;
pub use cache::CachingConnector;
