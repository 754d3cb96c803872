use thiserror::Error;

/// Unified error type for the mercato workspace.
///
/// Connectors return these; only the failover dispatcher decides what a
/// caller ultimately sees. Configuration problems surface at construction
/// time and are never retried; fetch and normalization problems trigger a
/// single fallback attempt.
#[derive(Debug, Error)]
pub enum MercatoError {
    /// Missing credential, or a provider that cannot be resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// Non-success network response or transport failure during a single
    /// provider call.
    #[error("{connector} fetch failed: {msg}")]
    Fetch {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A required field was missing or unparsable while converting a
    /// provider payload into canonical records.
    #[error("{connector} returned malformed data: {msg}")]
    Normalization {
        /// Connector name whose payload was malformed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The requested capability is not implemented by the target connector.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested.
        capability: &'static str,
    },
}

impl MercatoError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub const fn unsupported(cap: &'static str) -> Self {
        Self::Unsupported { capability: cap }
    }

    /// Helper: build a `Fetch` error with the connector name and message.
    pub fn fetch(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Normalization` error with the connector name and message.
    pub fn normalization(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Normalization {
            connector: connector.into(),
            msg: msg.into(),
        }
    }
}
