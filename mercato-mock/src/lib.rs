use async_trait::async_trait;

use mercato_core::connector::{
    CompanyNewsProvider, FinancialMetricsProvider, InsiderTradesProvider, LineItemsProvider,
    MarketCapProvider, MercatoConnector, PricesProvider,
};
use mercato_core::{
    CompanyNews, FinancialMetrics, InsiderTrade, LineItem, MercatoError, Period, Price,
};

mod fixtures;

/// Mock connector for CI-safe tests and examples. Provides deterministic data
/// from generated fixtures.
///
/// The symbol `FAIL` forces a fetch error from every operation, which lets
/// dispatcher tests drive the failover path without a network.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn maybe_fail(ticker: &str, capability: &'static str) -> Result<(), MercatoError> {
        if ticker == "FAIL" {
            return Err(MercatoError::fetch(
                "mercato-mock",
                format!("forced failure: {capability}"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl MercatoConnector for MockConnector {
    fn name(&self) -> &'static str {
        "mercato-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_prices_provider(&self) -> Option<&dyn PricesProvider> {
        Some(self as &dyn PricesProvider)
    }
    fn as_financial_metrics_provider(&self) -> Option<&dyn FinancialMetricsProvider> {
        Some(self as &dyn FinancialMetricsProvider)
    }
    fn as_line_items_provider(&self) -> Option<&dyn LineItemsProvider> {
        Some(self as &dyn LineItemsProvider)
    }
    fn as_insider_trades_provider(&self) -> Option<&dyn InsiderTradesProvider> {
        Some(self as &dyn InsiderTradesProvider)
    }
    fn as_company_news_provider(&self) -> Option<&dyn CompanyNewsProvider> {
        Some(self as &dyn CompanyNewsProvider)
    }
    fn as_market_cap_provider(&self) -> Option<&dyn MarketCapProvider> {
        Some(self as &dyn MarketCapProvider)
    }
}

#[async_trait]
impl PricesProvider for MockConnector {
    async fn prices(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Price>, MercatoError> {
        Self::maybe_fail(ticker, "prices")?;
        Ok(fixtures::prices::daily_bars(ticker, start_date, end_date))
    }
}

#[async_trait]
impl FinancialMetricsProvider for MockConnector {
    async fn financial_metrics(
        &self,
        ticker: &str,
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Result<Vec<FinancialMetrics>, MercatoError> {
        Self::maybe_fail(ticker, "financial-metrics")?;
        Ok(fixtures::fundamentals::metrics(ticker, end_date, period, limit))
    }
}

#[async_trait]
impl LineItemsProvider for MockConnector {
    async fn line_items(
        &self,
        ticker: &str,
        names: &[String],
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Result<Vec<LineItem>, MercatoError> {
        Self::maybe_fail(ticker, "line-items")?;
        Ok(fixtures::fundamentals::line_items(
            ticker, names, end_date, period, limit,
        ))
    }
}

#[async_trait]
impl InsiderTradesProvider for MockConnector {
    async fn insider_trades(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Result<Vec<InsiderTrade>, MercatoError> {
        Self::maybe_fail(ticker, "insider-trades")?;
        Ok(fixtures::activity::insider_trades(
            ticker, end_date, start_date, limit,
        ))
    }
}

#[async_trait]
impl CompanyNewsProvider for MockConnector {
    async fn company_news(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Result<Vec<CompanyNews>, MercatoError> {
        Self::maybe_fail(ticker, "company-news")?;
        Ok(fixtures::activity::company_news(
            ticker, end_date, start_date, limit,
        ))
    }
}

#[async_trait]
impl MarketCapProvider for MockConnector {
    async fn market_cap(
        &self,
        ticker: &str,
        _end_date: &str,
    ) -> Result<Option<f64>, MercatoError> {
        Self::maybe_fail(ticker, "market-cap")?;
        Ok(fixtures::fundamentals::market_cap(ticker))
    }
}
