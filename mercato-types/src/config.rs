//! Configuration consumed by the provider registry.

use serde::{Deserialize, Serialize};

use crate::ProviderKey;

/// Inputs the registry needs to build and select providers.
///
/// A missing credential makes the corresponding provider unavailable for
/// selection; it never fails process startup. Resolution of the effective
/// default happens in the registry, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Explicit default provider override. Highest precedence.
    pub default_provider: Option<ProviderKey>,
    /// Credential for financialdatasets.ai. Optional: free tickers work
    /// without one.
    pub findata_api_key: Option<String>,
    /// Credential for finnhub.io. Required to construct that connector.
    pub finnhub_api_key: Option<String>,
    /// Override for the financialdatasets.ai base URL. Tests point this at a
    /// local mock server.
    pub findata_base_url: Option<String>,
    /// Override for the finnhub.io base URL.
    pub finnhub_base_url: Option<String>,
}

impl RegistryConfig {
    /// Whether a credential for `key` is present.
    #[must_use]
    pub fn has_credential(&self, key: ProviderKey) -> bool {
        match key {
            ProviderKey::FinancialDatasets => self.findata_api_key.is_some(),
            ProviderKey::Finnhub => self.finnhub_api_key.is_some(),
        }
    }
}
