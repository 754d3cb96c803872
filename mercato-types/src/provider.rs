use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MercatoError;

/// Identifier for a supported data provider.
///
/// Used by the registry to build and look up connector singletons and by the
/// dispatcher to pick a fallback. Parsing an unknown identifier is a
/// configuration error, not a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKey {
    /// financialdatasets.ai. Works without a credential for free tickers.
    FinancialDatasets,
    /// finnhub.io. Requires an API key.
    Finnhub,
}

impl ProviderKey {
    /// Every supported provider, in fixed priority order.
    ///
    /// The order doubles as the credential scan order when resolving a
    /// default provider.
    pub const ALL: &'static [Self] = &[Self::Finnhub, Self::FinancialDatasets];

    /// Stable identifier used in configuration and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FinancialDatasets => "financial_datasets",
            Self::Finnhub => "finnhub",
        }
    }
}

impl fmt::Display for ProviderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKey {
    type Err = MercatoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "financial_datasets" => Ok(Self::FinancialDatasets),
            "finnhub" => Ok(Self::Finnhub),
            other => Err(MercatoError::Config(format!(
                "unsupported provider: {other}"
            ))),
        }
    }
}
