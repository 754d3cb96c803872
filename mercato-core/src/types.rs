//! Re-export of foundational types from `mercato-types`.
// Consolidated re-exports so downstream crates can depend on `mercato-core` only

pub use mercato_types::{Capability, MercatoError, ProviderKey, RegistryConfig};

pub use mercato_types::records::{
    CompanyNews, FinancialMetrics, InsiderTrade, LineItem, Period, Price,
};
