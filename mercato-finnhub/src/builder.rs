use mercato_core::MercatoError;

use crate::{DEFAULT_BASE_URL, FinnhubConnector};

/// Builder for [`FinnhubConnector`].
pub struct FinnhubBuilder {
    api_key: Option<String>,
    base_url: String,
}

impl Default for FinnhubBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FinnhubBuilder {
    /// Builder with the production base URL and no credential.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Authenticate requests with `key`. Mandatory.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Point the connector at a different host. Used by tests against a local
    /// mock server.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Build the connector.
    ///
    /// # Errors
    /// Returns a configuration error when no API key was provided: every
    /// finnhub endpoint rejects unauthenticated requests, so construction
    /// fails fast instead of failing on first use.
    pub fn build(self) -> Result<FinnhubConnector, MercatoError> {
        let Some(api_key) = self.api_key else {
            return Err(MercatoError::Config(
                "finnhub API key is not set".to_string(),
            ));
        };
        Ok(FinnhubConnector::new(self.base_url, api_key))
    }
}
