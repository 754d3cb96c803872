use std::sync::Arc;

use mercato_core::cache::Cache;
use mercato_core::connector::MercatoConnector;

use crate::CachingConnector;

/// Composes middleware around a raw connector.
///
/// Today the only layer is the record cache; the builder keeps the
/// composition point in one place so provider crates and the registry build
/// their stacks the same way.
pub struct ConnectorBuilder {
    raw: Arc<dyn MercatoConnector>,
    cache: Option<Arc<Cache>>,
}

impl ConnectorBuilder {
    /// Start from an unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn MercatoConnector>) -> Self {
        Self { raw, cache: None }
    }

    /// Back the connector with a shared record cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build the composed connector stack.
    #[must_use]
    pub fn build(self) -> Arc<dyn MercatoConnector> {
        match self.cache {
            Some(cache) => Arc::new(CachingConnector::new(self.raw, cache)),
            None => self.raw,
        }
    }
}
