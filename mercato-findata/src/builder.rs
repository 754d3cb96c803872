use crate::{DEFAULT_BASE_URL, FindataConnector};

/// Builder for [`FindataConnector`].
///
/// The API key is optional: financialdatasets.ai serves a set of free tickers
/// without a credential, which is what makes this connector the registry's
/// last-resort default.
pub struct FindataBuilder {
    api_key: Option<String>,
    base_url: String,
}

impl Default for FindataBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FindataBuilder {
    /// Builder with the production base URL and no credential.
    #[must_use]
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Authenticate requests with `key`.
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
    #[must_use]
    pub fn build(self) -> FindataConnector {
        FindataConnector::new(self.base_url, self.api_key)
    }
}
