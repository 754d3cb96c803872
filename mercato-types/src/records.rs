//! Immutable value objects produced by provider normalization.
//!
//! Every record is flat, keyed by `ticker` plus a temporal field. Temporal
//! fields are ISO `YYYY-MM-DD` strings so inclusive range checks stay plain
//! lexicographic comparisons, matching the wire format of every supported
//! provider.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::MercatoError;

/// Reporting period granularity for fundamentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    /// Trailing twelve months.
    #[default]
    Ttm,
    /// Annual filings.
    Annual,
    /// Quarterly filings.
    Quarterly,
}

impl Period {
    /// Stable lowercase identifier used in query strings and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ttm => "ttm",
            Self::Annual => "annual",
            Self::Quarterly => "quarterly",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = MercatoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ttm" => Ok(Self::Ttm),
            "annual" => Ok(Self::Annual),
            "quarterly" => Ok(Self::Quarterly),
            other => Err(MercatoError::Config(format!(
                "unknown reporting period: {other}"
            ))),
        }
    }
}

/// One daily OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Ticker symbol the bar belongs to.
    pub ticker: String,
    /// Trading day, `YYYY-MM-DD`.
    pub time: String,
    /// Opening price.
    pub open: f64,
    /// Intraday high.
    pub high: f64,
    /// Intraday low.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Shares traded.
    pub volume: u64,
}

/// One row of valuation and quality ratios for a reporting period.
///
/// Every ratio is optional; providers differ widely in coverage and a missing
/// field is data absence, not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FinancialMetrics {
    /// Ticker symbol.
    pub ticker: String,
    /// Period end date, `YYYY-MM-DD`.
    pub report_period: String,
    /// Granularity of the row.
    pub period: Period,
    /// Market capitalization in reporting currency.
    pub market_cap: Option<f64>,
    /// Enterprise value.
    pub enterprise_value: Option<f64>,
    /// Price to earnings.
    pub price_to_earnings: Option<f64>,
    /// Price to book.
    pub price_to_book: Option<f64>,
    /// Price to sales.
    pub price_to_sales: Option<f64>,
    /// EV / revenue.
    pub enterprise_value_to_revenue: Option<f64>,
    /// EV / EBITDA.
    pub enterprise_value_to_ebitda: Option<f64>,
    /// Gross margin.
    pub gross_margin: Option<f64>,
    /// Operating margin.
    pub operating_margin: Option<f64>,
    /// Net margin.
    pub net_margin: Option<f64>,
    /// Return on equity.
    pub return_on_equity: Option<f64>,
    /// Return on assets.
    pub return_on_assets: Option<f64>,
    /// Total debt / total equity.
    pub debt_to_equity: Option<f64>,
    /// Current ratio.
    pub current_ratio: Option<f64>,
    /// Quick ratio.
    pub quick_ratio: Option<f64>,
    /// Interest coverage.
    pub interest_coverage: Option<f64>,
    /// Indicated annual dividend yield.
    pub dividend_yield: Option<f64>,
    /// Payout ratio.
    pub payout_ratio: Option<f64>,
    /// Basic earnings per share.
    pub earnings_per_share: Option<f64>,
    /// Year-over-year revenue growth.
    pub revenue_growth: Option<f64>,
}

/// One named statement line item for a reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Ticker symbol.
    pub ticker: String,
    /// Canonical line item name (e.g. `net_income`).
    pub name: String,
    /// Reported value; `None` when the filing omits it.
    pub value: Option<f64>,
    /// Period end date, `YYYY-MM-DD`.
    pub report_period: String,
    /// Granularity of the row.
    pub period: Period,
}

/// One reported insider transaction.
///
/// `transaction_date` may be absent in some filings; `filing_date` is always
/// present and serves as the temporal fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsiderTrade {
    /// Ticker symbol.
    pub ticker: String,
    /// SEC filing date, `YYYY-MM-DD`.
    pub filing_date: String,
    /// Trade execution date when disclosed.
    pub transaction_date: Option<String>,
    /// Reporting insider.
    pub insider_name: Option<String>,
    /// Insider's role at the company.
    pub title: Option<String>,
    /// Provider-reported transaction code (e.g. `P`, `S`).
    pub transaction_type: Option<String>,
    /// Shares transacted; sign follows the provider's convention.
    pub shares: Option<f64>,
    /// Execution price per share.
    pub price: Option<f64>,
    /// Total transaction value.
    pub value: Option<f64>,
}

impl InsiderTrade {
    /// Temporal key for range filtering: the transaction date when present,
    /// otherwise the filing date.
    #[must_use]
    pub fn effective_date(&self) -> &str {
        self.transaction_date
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(&self.filing_date)
    }
}

/// One news article about a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyNews {
    /// Ticker symbol.
    pub ticker: String,
    /// Publication date, `YYYY-MM-DD`. Many articles can share a date.
    pub date: String,
    /// Headline.
    pub headline: String,
    /// Article summary; may be empty.
    pub summary: String,
    /// Publisher name.
    pub source: String,
    /// Canonical article URL.
    pub url: String,
}
