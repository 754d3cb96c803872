use async_trait::async_trait;

use crate::MercatoError;
use mercato_types::{CompanyNews, FinancialMetrics, InsiderTrade, LineItem, Period, Price};

/// Focused role trait for connectors that provide daily OHLCV bars.
#[async_trait]
pub trait PricesProvider: Send + Sync {
    /// Fetch bars for `ticker` with `start_date <= time <= end_date`
    /// (inclusive, `YYYY-MM-DD`), sorted ascending by trading day.
    async fn prices(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Price>, MercatoError>;
}

/// Focused role trait for connectors that provide financial metric rows.
#[async_trait]
pub trait FinancialMetricsProvider: Send + Sync {
    /// Fetch up to `limit` metric rows with `report_period <= end_date`,
    /// sorted descending by report period.
    async fn financial_metrics(
        &self,
        ticker: &str,
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Result<Vec<FinancialMetrics>, MercatoError>;
}

/// Focused role trait for connectors that can resolve named line items.
///
/// Each connector owns a static table mapping canonical line item names to
/// its native field names. Requested names absent from the table or from the
/// payload are skipped, never an error; providers drift and callers prefer a
/// partial answer over none.
#[async_trait]
pub trait LineItemsProvider: Send + Sync {
    /// Fetch the requested line items across up to `limit` reporting periods
    /// ending at or before `end_date`.
    async fn line_items(
        &self,
        ticker: &str,
        names: &[String],
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Result<Vec<LineItem>, MercatoError>;
}

/// Focused role trait for connectors that provide insider transactions.
#[async_trait]
pub trait InsiderTradesProvider: Send + Sync {
    /// Fetch up to `limit` trades whose effective date falls within
    /// `[start_date, end_date]`; `start_date` `None` means unbounded below.
    /// Sorted descending by effective date.
    async fn insider_trades(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Result<Vec<InsiderTrade>, MercatoError>;
}

/// Focused role trait for connectors that provide company news.
#[async_trait]
pub trait CompanyNewsProvider: Send + Sync {
    /// Fetch up to `limit` articles dated within `[start_date, end_date]`;
    /// `start_date` `None` means a provider-chosen default window. Sorted
    /// descending by date.
    async fn company_news(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Result<Vec<CompanyNews>, MercatoError>;
}

/// Focused role trait for connectors that provide market capitalization.
#[async_trait]
pub trait MarketCapProvider: Send + Sync {
    /// Fetch the market cap snapshot for `ticker`. Providers without
    /// historical support may ignore `end_date`. `Ok(None)` means the
    /// provider answered but has no figure.
    async fn market_cap(&self, ticker: &str, end_date: &str)
    -> Result<Option<f64>, MercatoError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
#[async_trait]
pub trait MercatoConnector: Send + Sync {
    /// A stable identifier for registry lookups (e.g., "mercato-findata").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise price history capability by returning a usable trait object
    /// reference when supported.
    fn as_prices_provider(&self) -> Option<&dyn PricesProvider> {
        None
    }

    /// If implemented, returns a trait object for financial metrics.
    fn as_financial_metrics_provider(&self) -> Option<&dyn FinancialMetricsProvider> {
        None
    }

    /// If implemented, returns a trait object for line item search.
    fn as_line_items_provider(&self) -> Option<&dyn LineItemsProvider> {
        None
    }

    /// If implemented, returns a trait object for insider trades.
    fn as_insider_trades_provider(&self) -> Option<&dyn InsiderTradesProvider> {
        None
    }

    /// If implemented, returns a trait object for company news.
    fn as_company_news_provider(&self) -> Option<&dyn CompanyNewsProvider> {
        None
    }

    /// If implemented, returns a trait object for market capitalization.
    fn as_market_cap_provider(&self) -> Option<&dyn MarketCapProvider> {
        None
    }
}
