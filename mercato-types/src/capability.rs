use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and telemetry.
///
/// These map one-to-one with dispatcher operations and allow consistent
/// Display formatting and match-exhaustive handling when adding new
/// capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Daily OHLCV price bars.
    Prices,
    /// Valuation and quality ratio rows.
    FinancialMetrics,
    /// Named statement line items.
    LineItems,
    /// Reported insider transactions.
    InsiderTrades,
    /// Company news articles.
    CompanyNews,
    /// Point-in-time market capitalization.
    MarketCap,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prices => "prices",
            Self::FinancialMetrics => "financial-metrics",
            Self::LineItems => "line-items",
            Self::InsiderTrades => "insider-trades",
            Self::CompanyNews => "company-news",
            Self::MarketCap => "market-cap",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
