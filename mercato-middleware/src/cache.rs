use std::sync::Arc;

use async_trait::async_trait;

use mercato_core::cache::{Cache, range_filtered};
use mercato_core::connector::{
    CompanyNewsProvider, FinancialMetricsProvider, InsiderTradesProvider, LineItemsProvider,
    MarketCapProvider, MercatoConnector, PricesProvider,
};
use mercato_core::{
    Capability, CompanyNews, FinancialMetrics, InsiderTrade, LineItem, MercatoError, Period, Price,
};

/// Connector wrapper that serves range-bounded reads from the shared record
/// cache and only delegates to the inner connector when the cached view is
/// empty.
///
/// Cache-hit rule: any non-empty filtered view counts as a hit, even when
/// the cached records do not cover the whole requested range. A partially
/// covered range is served without re-fetching the gap. Fetches for the same
/// `(capability, ticker)` key are serialized through the cache's fetch gate,
/// so a concurrent second request blocks and reuses the first one's merged
/// result.
pub struct CachingConnector {
    inner: Arc<dyn MercatoConnector>,
    cache: Arc<Cache>,
}

impl CachingConnector {
    /// Wrap `inner`, backing it with `cache`.
    #[must_use]
    pub fn new(inner: Arc<dyn MercatoConnector>, cache: Arc<Cache>) -> Self {
        Self { inner, cache }
    }

    fn hit(&self, capability: Capability, ticker: &str, records: usize) {
        tracing::debug!(
            connector = self.inner.name(),
            %capability,
            ticker,
            records,
            "serving from cache"
        );
    }
}

#[async_trait]
impl MercatoConnector for CachingConnector {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    fn as_prices_provider(&self) -> Option<&dyn PricesProvider> {
        if self.inner.as_prices_provider().is_some() {
            Some(self as &dyn PricesProvider)
        } else {
            None
        }
    }

    fn as_financial_metrics_provider(&self) -> Option<&dyn FinancialMetricsProvider> {
        if self.inner.as_financial_metrics_provider().is_some() {
            Some(self as &dyn FinancialMetricsProvider)
        } else {
            None
        }
    }

    fn as_line_items_provider(&self) -> Option<&dyn LineItemsProvider> {
        if self.inner.as_line_items_provider().is_some() {
            Some(self as &dyn LineItemsProvider)
        } else {
            None
        }
    }

    fn as_insider_trades_provider(&self) -> Option<&dyn InsiderTradesProvider> {
        if self.inner.as_insider_trades_provider().is_some() {
            Some(self as &dyn InsiderTradesProvider)
        } else {
            None
        }
    }

    fn as_company_news_provider(&self) -> Option<&dyn CompanyNewsProvider> {
        if self.inner.as_company_news_provider().is_some() {
            Some(self as &dyn CompanyNewsProvider)
        } else {
            None
        }
    }

    fn as_market_cap_provider(&self) -> Option<&dyn MarketCapProvider> {
        if self.inner.as_market_cap_provider().is_some() {
            Some(self as &dyn MarketCapProvider)
        } else {
            None
        }
    }
}

fn metrics_view(
    cached: Vec<FinancialMetrics>,
    end_date: &str,
    limit: usize,
) -> Vec<FinancialMetrics> {
    let mut view = range_filtered(cached, None, end_date);
    view.truncate(limit);
    view
}

fn line_items_view(
    cached: Vec<LineItem>,
    names: &[String],
    end_date: &str,
    limit: usize,
) -> Vec<LineItem> {
    let filtered: Vec<LineItem> = range_filtered(cached, None, end_date)
        .into_iter()
        .filter(|item| names.contains(&item.name))
        .collect();

    // `limit` counts reporting periods, not rows; the store keeps rows sorted
    // newest-period first, so cut once `limit` distinct periods have passed.
    let mut periods: Vec<String> = Vec::new();
    let mut view = Vec::new();
    for item in filtered {
        if !periods.contains(&item.report_period) {
            if periods.len() == limit {
                break;
            }
            periods.push(item.report_period.clone());
        }
        view.push(item);
    }
    view
}

fn windowed_view<T: mercato_core::CacheRecord>(
    cached: Vec<T>,
    start_date: Option<&str>,
    end_date: &str,
    limit: usize,
) -> Vec<T> {
    let mut view = range_filtered(cached, start_date, end_date);
    view.truncate(limit);
    view
}

#[async_trait]
impl PricesProvider for CachingConnector {
    async fn prices(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Price>, MercatoError> {
        let view = range_filtered(self.cache.prices.get(ticker), Some(start_date), end_date);
        if !view.is_empty() {
            self.hit(Capability::Prices, ticker, view.len());
            return Ok(view);
        }

        let _gate = self.cache.fetch_gate(Capability::Prices, ticker).await;
        let view = range_filtered(self.cache.prices.get(ticker), Some(start_date), end_date);
        if !view.is_empty() {
            self.hit(Capability::Prices, ticker, view.len());
            return Ok(view);
        }

        let inner = self
            .inner
            .as_prices_provider()
            .ok_or_else(|| MercatoError::unsupported("prices"))?;
        let fetched = inner.prices(ticker, start_date, end_date).await?;
        self.cache.prices.merge(ticker, fetched);
        Ok(range_filtered(
            self.cache.prices.get(ticker),
            Some(start_date),
            end_date,
        ))
    }
}

#[async_trait]
impl FinancialMetricsProvider for CachingConnector {
    async fn financial_metrics(
        &self,
        ticker: &str,
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Result<Vec<FinancialMetrics>, MercatoError> {
        let view = metrics_view(self.cache.financial_metrics.get(ticker), end_date, limit);
        if !view.is_empty() {
            self.hit(Capability::FinancialMetrics, ticker, view.len());
            return Ok(view);
        }

        let _gate = self
            .cache
            .fetch_gate(Capability::FinancialMetrics, ticker)
            .await;
        let view = metrics_view(self.cache.financial_metrics.get(ticker), end_date, limit);
        if !view.is_empty() {
            self.hit(Capability::FinancialMetrics, ticker, view.len());
            return Ok(view);
        }

        let inner = self
            .inner
            .as_financial_metrics_provider()
            .ok_or_else(|| MercatoError::unsupported("financial-metrics"))?;
        let fetched = inner
            .financial_metrics(ticker, end_date, period, limit)
            .await?;
        self.cache.financial_metrics.merge(ticker, fetched);
        Ok(metrics_view(
            self.cache.financial_metrics.get(ticker),
            end_date,
            limit,
        ))
    }
}

#[async_trait]
impl LineItemsProvider for CachingConnector {
    async fn line_items(
        &self,
        ticker: &str,
        names: &[String],
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Result<Vec<LineItem>, MercatoError> {
        let view = line_items_view(self.cache.line_items.get(ticker), names, end_date, limit);
        if !view.is_empty() {
            self.hit(Capability::LineItems, ticker, view.len());
            return Ok(view);
        }

        let _gate = self.cache.fetch_gate(Capability::LineItems, ticker).await;
        let view = line_items_view(self.cache.line_items.get(ticker), names, end_date, limit);
        if !view.is_empty() {
            self.hit(Capability::LineItems, ticker, view.len());
            return Ok(view);
        }

        let inner = self
            .inner
            .as_line_items_provider()
            .ok_or_else(|| MercatoError::unsupported("line-items"))?;
        let fetched = inner
            .line_items(ticker, names, end_date, period, limit)
            .await?;
        self.cache.line_items.merge(ticker, fetched);
        Ok(line_items_view(
            self.cache.line_items.get(ticker),
            names,
            end_date,
            limit,
        ))
    }
}

#[async_trait]
impl InsiderTradesProvider for CachingConnector {
    async fn insider_trades(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Result<Vec<InsiderTrade>, MercatoError> {
        let view = windowed_view(
            self.cache.insider_trades.get(ticker),
            start_date,
            end_date,
            limit,
        );
        if !view.is_empty() {
            self.hit(Capability::InsiderTrades, ticker, view.len());
            return Ok(view);
        }

        let _gate = self
            .cache
            .fetch_gate(Capability::InsiderTrades, ticker)
            .await;
        let view = windowed_view(
            self.cache.insider_trades.get(ticker),
            start_date,
            end_date,
            limit,
        );
        if !view.is_empty() {
            self.hit(Capability::InsiderTrades, ticker, view.len());
            return Ok(view);
        }

        let inner = self
            .inner
            .as_insider_trades_provider()
            .ok_or_else(|| MercatoError::unsupported("insider-trades"))?;
        let fetched = inner
            .insider_trades(ticker, end_date, start_date, limit)
            .await?;
        self.cache.insider_trades.merge(ticker, fetched);
        Ok(windowed_view(
            self.cache.insider_trades.get(ticker),
            start_date,
            end_date,
            limit,
        ))
    }
}

#[async_trait]
impl CompanyNewsProvider for CachingConnector {
    async fn company_news(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Result<Vec<CompanyNews>, MercatoError> {
        let view = windowed_view(
            self.cache.company_news.get(ticker),
            start_date,
            end_date,
            limit,
        );
        if !view.is_empty() {
            self.hit(Capability::CompanyNews, ticker, view.len());
            return Ok(view);
        }

        let _gate = self.cache.fetch_gate(Capability::CompanyNews, ticker).await;
        let view = windowed_view(
            self.cache.company_news.get(ticker),
            start_date,
            end_date,
            limit,
        );
        if !view.is_empty() {
            self.hit(Capability::CompanyNews, ticker, view.len());
            return Ok(view);
        }

        let inner = self
            .inner
            .as_company_news_provider()
            .ok_or_else(|| MercatoError::unsupported("company-news"))?;
        let fetched = inner
            .company_news(ticker, end_date, start_date, limit)
            .await?;
        self.cache.company_news.merge(ticker, fetched);
        Ok(windowed_view(
            self.cache.company_news.get(ticker),
            start_date,
            end_date,
            limit,
        ))
    }
}

#[async_trait]
impl MarketCapProvider for CachingConnector {
    // Market cap is a point-in-time snapshot with no range key; it always
    // goes to the network.
    async fn market_cap(
        &self,
        ticker: &str,
        end_date: &str,
    ) -> Result<Option<f64>, MercatoError> {
        let inner = self
            .inner
            .as_market_cap_provider()
            .ok_or_else(|| MercatoError::unsupported("market-cap"))?;
        inner.market_cap(ticker, end_date).await
    }
}
