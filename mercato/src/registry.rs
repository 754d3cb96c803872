use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mercato_core::cache::Cache;
use mercato_core::{MercatoConnector, MercatoError, ProviderKey, RegistryConfig};
use mercato_findata::FindataConnector;
use mercato_finnhub::FinnhubConnector;
use mercato_middleware::ConnectorBuilder;

/// Single source of truth for "which connector backs which provider".
///
/// Explicit, constructible state: build one at process start and thread it
/// through the dispatcher instead of mutating hidden globals. Connectors are
/// built lazily on first request, wrapped with the shared record cache, and
/// cached for the process lifetime.
pub struct Registry {
    cfg: RegistryConfig,
    default_override: Mutex<Option<ProviderKey>>,
    connectors: Mutex<HashMap<ProviderKey, Arc<dyn MercatoConnector>>>,
    cache: Arc<Cache>,
}

impl Registry {
    /// Registry over an explicit configuration.
    #[must_use]
    pub fn new(cfg: RegistryConfig) -> Self {
        Self {
            cfg,
            default_override: Mutex::new(None),
            connectors: Mutex::new(HashMap::new()),
            cache: Arc::new(Cache::new()),
        }
    }

    /// Registry configured from the process environment.
    ///
    /// Reads `MERCATO_PROVIDER`, `FINANCIAL_DATASETS_API_KEY`, and
    /// `FINNHUB_API_KEY`. A missing credential leaves that provider
    /// unavailable; an unrecognized provider name is logged and ignored so a
    /// typo in the environment cannot take the process down.
    #[must_use]
    pub fn from_env() -> Self {
        let default_provider = std::env::var("MERCATO_PROVIDER")
            .ok()
            .filter(|v| !v.is_empty())
            .and_then(|v| match v.parse::<ProviderKey>() {
                Ok(key) => Some(key),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring MERCATO_PROVIDER");
                    None
                }
            });
        Self::new(RegistryConfig {
            default_provider,
            findata_api_key: std::env::var("FINANCIAL_DATASETS_API_KEY").ok(),
            finnhub_api_key: std::env::var("FINNHUB_API_KEY").ok(),
            findata_base_url: None,
            finnhub_base_url: None,
        })
    }

    /// The record cache shared by every connector this registry builds.
    #[must_use]
    pub fn cache(&self) -> Arc<Cache> {
        Arc::clone(&self.cache)
    }

    /// Resolve the effective default provider.
    ///
    /// Precedence: runtime override, then the configured default, then the
    /// first provider with a credential present (scanned in
    /// [`ProviderKey::ALL`] order), then financialdatasets.ai, which serves
    /// free tickers without a credential.
    #[must_use]
    pub fn default_key(&self) -> ProviderKey {
        if let Some(key) = *self.default_override.lock().expect("registry mutex poisoned") {
            return key;
        }
        if let Some(key) = self.cfg.default_provider {
            return key;
        }
        ProviderKey::ALL
            .iter()
            .copied()
            .find(|k| self.cfg.has_credential(*k))
            .unwrap_or(ProviderKey::FinancialDatasets)
    }

    /// Override the resolved default for the remainder of the process.
    pub fn set_default_provider(&self, key: ProviderKey) {
        *self.default_override.lock().expect("registry mutex poisoned") = Some(key);
    }

    /// Every known provider except `primary`, in fixed order. This is the
    /// dispatcher's failover sequence; with two providers it is simply "the
    /// other one".
    #[must_use]
    pub fn fallback_order(&self, primary: ProviderKey) -> Vec<ProviderKey> {
        ProviderKey::ALL
            .iter()
            .copied()
            .filter(|k| *k != primary)
            .collect()
    }

    /// The connector singleton for `key`, or for the resolved default when
    /// `key` is `None`.
    ///
    /// # Errors
    /// Returns a configuration error when the connector cannot be
    /// constructed (e.g. finnhub without a credential).
    pub fn connector(
        &self,
        key: Option<ProviderKey>,
    ) -> Result<Arc<dyn MercatoConnector>, MercatoError> {
        let key = key.unwrap_or_else(|| self.default_key());
        let mut connectors = self.connectors.lock().expect("registry mutex poisoned");
        if let Some(existing) = connectors.get(&key) {
            return Ok(Arc::clone(existing));
        }
        let raw = self.build_raw(key)?;
        let wrapped = ConnectorBuilder::new(raw)
            .with_cache(Arc::clone(&self.cache))
            .build();
        connectors.insert(key, Arc::clone(&wrapped));
        Ok(wrapped)
    }

    fn build_raw(&self, key: ProviderKey) -> Result<Arc<dyn MercatoConnector>, MercatoError> {
        match key {
            ProviderKey::FinancialDatasets => {
                let mut builder = FindataConnector::builder();
                if let Some(k) = &self.cfg.findata_api_key {
                    builder = builder.api_key(k);
                }
                if let Some(url) = &self.cfg.findata_base_url {
                    builder = builder.base_url(url);
                }
                Ok(Arc::new(builder.build()))
            }
            ProviderKey::Finnhub => {
                let mut builder = FinnhubConnector::builder();
                if let Some(k) = &self.cfg.finnhub_api_key {
                    builder = builder.api_key(k);
                }
                if let Some(url) = &self.cfg.finnhub_base_url {
                    builder = builder.base_url(url);
                }
                Ok(Arc::new(builder.build()?))
            }
        }
    }
}
