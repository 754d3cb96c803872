//! Mercato routes financial data requests across interchangeable providers.
//!
//! Overview
//! - A [`Registry`] owns one lazily-built connector singleton per provider,
//!   each wrapped with the shared record cache, and resolves which provider
//!   is the default.
//! - A [`Mercato`] dispatcher calls the default provider and, on any failure,
//!   retries each remaining provider once before settling on the operation's
//!   empty value. Errors never cross the dispatcher boundary: an analysis
//!   pipeline must not crash because one ticker's data is unavailable, so
//!   callers treat an empty result as "no data".
//! - Records come back filtered to the requested window, deduplicated, and
//!   sorted: prices ascending (chronological, for charting and indicators),
//!   everything else newest first.
//!
//! Fetching prices with automatic failover:
//! ```rust,ignore
//! use mercato::{Mercato, Registry};
//!
//! let mercato = Mercato::new(Registry::from_env());
//! let bars = mercato.get_prices("AAPL", "2024-01-01", "2024-06-30").await;
//! let cap = mercato.get_market_cap("AAPL", "2024-06-30").await;
//! ```
//!
//! Pinning a provider at runtime:
//! ```rust,ignore
//! use mercato::{Mercato, ProviderKey, Registry};
//!
//! let registry = Registry::from_env();
//! registry.set_default_provider(ProviderKey::Finnhub);
//! let mercato = Mercato::new(registry);
//! ```
#![warn(missing_docs)]

mod dispatcher;
mod registry;

pub use dispatcher::Mercato;
pub use registry::Registry;

// Re-export core types for convenience
pub use mercato_core::{
    Capability,
    CompanyNews,
    FinancialMetrics,
    InsiderTrade,
    LineItem,
    MercatoError,
    Period,
    Price,
    ProviderKey,
    RegistryConfig,

    MercatoConnector,
};
