use std::future::Future;
use std::sync::Arc;

use mercato_core::connector::{
    CompanyNewsProvider, FinancialMetricsProvider, InsiderTradesProvider, LineItemsProvider,
    MarketCapProvider, PricesProvider,
};
use mercato_core::{
    Capability, CompanyNews, FinancialMetrics, InsiderTrade, LineItem, MercatoConnector,
    MercatoError, Period, Price,
};

use crate::Registry;

/// Failover dispatcher: the façade callers hold.
///
/// Every operation runs the same two-phase state machine. The primary
/// provider (the registry's resolved default) is attempted first; on any
/// failure each remaining provider is attempted once, in registry fallback
/// order; when every attempt fails the operation's empty value is returned.
/// Both failure transitions are logged, never thrown: no error crosses this
/// boundary under non-configuration failure modes.
pub struct Mercato {
    registry: Registry,
}

impl Mercato {
    /// Dispatcher over an explicit registry.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Dispatcher over a registry configured from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Registry::from_env())
    }

    /// The registry backing this dispatcher.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    async fn attempt<T, F, Fut>(&self, key: mercato_core::ProviderKey, call: &F) -> Result<T, MercatoError>
    where
        F: Fn(Arc<dyn MercatoConnector>) -> Fut,
        Fut: Future<Output = Result<T, MercatoError>>,
    {
        let connector = self.registry.connector(Some(key))?;
        call(connector).await
    }

    async fn dispatch<T, F, Fut>(&self, capability: Capability, call: F) -> Result<T, MercatoError>
    where
        F: Fn(Arc<dyn MercatoConnector>) -> Fut,
        Fut: Future<Output = Result<T, MercatoError>>,
    {
        let primary = self.registry.default_key();
        let mut failed = primary;
        let mut err = match self.attempt(primary, &call).await {
            Ok(v) => return Ok(v),
            Err(e) => e,
        };

        for fallback in self.registry.fallback_order(primary) {
            tracing::warn!(
                %capability,
                provider = %failed,
                fallback = %fallback,
                error = %err,
                "provider call failed, failing over"
            );
            match self.attempt(fallback, &call).await {
                Ok(v) => return Ok(v),
                Err(e) => {
                    err = e;
                    failed = fallback;
                }
            }
        }
        Err(err)
    }

    async fn dispatch_or_default<T, F, Fut>(
        &self,
        capability: Capability,
        ticker: &str,
        call: F,
    ) -> T
    where
        T: Default,
        F: Fn(Arc<dyn MercatoConnector>) -> Fut,
        Fut: Future<Output = Result<T, MercatoError>>,
    {
        match self.dispatch(capability, call).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(
                    %capability,
                    ticker,
                    error = %e,
                    "all providers failed, returning empty result"
                );
                T::default()
            }
        }
    }

    /// Fetch daily price bars for `[start_date, end_date]`, ascending.
    ///
    /// Returns an empty series when every provider fails.
    pub async fn get_prices(&self, ticker: &str, start_date: &str, end_date: &str) -> Vec<Price> {
        self.dispatch_or_default(Capability::Prices, ticker, |c| {
            let ticker = ticker.to_string();
            let start_date = start_date.to_string();
            let end_date = end_date.to_string();
            async move {
                let Some(p) = c.as_prices_provider() else {
                    return Err(MercatoError::unsupported("prices"));
                };
                p.prices(&ticker, &start_date, &end_date).await
            }
        })
        .await
    }

    /// Fetch up to `limit` financial metric rows with
    /// `report_period <= end_date`, newest first.
    ///
    /// Returns an empty list when every provider fails.
    pub async fn get_financial_metrics(
        &self,
        ticker: &str,
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Vec<FinancialMetrics> {
        self.dispatch_or_default(Capability::FinancialMetrics, ticker, |c| {
            let ticker = ticker.to_string();
            let end_date = end_date.to_string();
            async move {
                let Some(p) = c.as_financial_metrics_provider() else {
                    return Err(MercatoError::unsupported("financial-metrics"));
                };
                p.financial_metrics(&ticker, &end_date, period, limit).await
            }
        })
        .await
    }

    /// Resolve named line items across up to `limit` reporting periods.
    ///
    /// Names a provider cannot map are skipped silently; an empty list means
    /// either total failure or no resolvable names.
    pub async fn search_line_items(
        &self,
        ticker: &str,
        names: &[String],
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Vec<LineItem> {
        self.dispatch_or_default(Capability::LineItems, ticker, |c| {
            let ticker = ticker.to_string();
            let names = names.to_vec();
            let end_date = end_date.to_string();
            async move {
                let Some(p) = c.as_line_items_provider() else {
                    return Err(MercatoError::unsupported("line-items"));
                };
                p.line_items(&ticker, &names, &end_date, period, limit).await
            }
        })
        .await
    }

    /// Fetch up to `limit` insider trades effective within
    /// `[start_date, end_date]`, newest first.
    ///
    /// Returns an empty list when every provider fails.
    pub async fn get_insider_trades(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Vec<InsiderTrade> {
        self.dispatch_or_default(Capability::InsiderTrades, ticker, |c| {
            let ticker = ticker.to_string();
            let end_date = end_date.to_string();
            let start_date = start_date.map(str::to_string);
            async move {
                let Some(p) = c.as_insider_trades_provider() else {
                    return Err(MercatoError::unsupported("insider-trades"));
                };
                p.insider_trades(&ticker, &end_date, start_date.as_deref(), limit)
                    .await
            }
        })
        .await
    }

    /// Fetch up to `limit` news articles dated within
    /// `[start_date, end_date]`, newest first.
    ///
    /// Returns an empty list when every provider fails.
    pub async fn get_company_news(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Vec<CompanyNews> {
        self.dispatch_or_default(Capability::CompanyNews, ticker, |c| {
            let ticker = ticker.to_string();
            let end_date = end_date.to_string();
            let start_date = start_date.map(str::to_string);
            async move {
                let Some(p) = c.as_company_news_provider() else {
                    return Err(MercatoError::unsupported("company-news"));
                };
                p.company_news(&ticker, &end_date, start_date.as_deref(), limit)
                    .await
            }
        })
        .await
    }

    /// Fetch the market cap snapshot for `ticker`.
    ///
    /// `None` means no provider could supply a figure, whether through
    /// failure or genuine absence.
    pub async fn get_market_cap(&self, ticker: &str, end_date: &str) -> Option<f64> {
        self.dispatch_or_default(Capability::MarketCap, ticker, |c| {
            let ticker = ticker.to_string();
            let end_date = end_date.to_string();
            async move {
                let Some(p) = c.as_market_cap_provider() else {
                    return Err(MercatoError::unsupported("market-cap"));
                };
                p.market_cap(&ticker, &end_date).await
            }
        })
        .await
    }
}
