//! mercato-findata
//!
//! financialdatasets.ai connector. The canonical record shapes in
//! `mercato-types` were modeled on this provider, so field translation is
//! mostly a straight rename; the interesting parts are the dynamic line-item
//! payload and the optional credential (free tickers work without one, which
//! makes this the designated no-credential fallback provider).
#![warn(missing_docs)]

mod builder;
mod payload;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use mercato_core::connector::{
    CompanyNewsProvider, FinancialMetricsProvider, InsiderTradesProvider, LineItemsProvider,
    MarketCapProvider, MercatoConnector, PricesProvider,
};
use mercato_core::{
    CompanyNews, FinancialMetrics, InsiderTrade, LineItem, MercatoError, Period, Price,
};

pub use builder::FindataBuilder;

pub(crate) const NAME: &str = "mercato-findata";
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.financialdatasets.ai";

/// Connector backed by the financialdatasets.ai REST API.
pub struct FindataConnector {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl FindataConnector {
    /// Start building a connector.
    #[must_use]
    pub fn builder() -> FindataBuilder {
        FindataBuilder::new()
    }

    pub(crate) fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, format!("{}{path}", self.base_url));
        if let Some(key) = &self.api_key {
            req = req.header("X-API-KEY", key);
        }
        req
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, MercatoError> {
        let resp = req
            .send()
            .await
            .map_err(|e| MercatoError::fetch(NAME, e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MercatoError::fetch(NAME, format!("{status}: {body}")));
        }
        resp.json::<T>()
            .await
            .map_err(|e| MercatoError::normalization(NAME, e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MercatoError> {
        self.execute(self.request(reqwest::Method::GET, path).query(query))
            .await
    }
}

#[async_trait]
impl MercatoConnector for FindataConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Financial Datasets"
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
impl PricesProvider for FindataConnector {
    async fn prices(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Price>, MercatoError> {
        let envelope: payload::PricesEnvelope = self
            .get_json(
                "/prices/",
                &[
                    ("ticker", ticker),
                    ("interval", "day"),
                    ("interval_multiplier", "1"),
                    ("start_date", start_date),
                    ("end_date", end_date),
                ],
            )
            .await?;
        Ok(envelope.into_records(ticker))
    }
}

#[async_trait]
impl FinancialMetricsProvider for FindataConnector {
    async fn financial_metrics(
        &self,
        ticker: &str,
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Result<Vec<FinancialMetrics>, MercatoError> {
        let limit = limit.to_string();
        let envelope: payload::MetricsEnvelope = self
            .get_json(
                "/financial-metrics/",
                &[
                    ("ticker", ticker),
                    ("report_period_lte", end_date),
                    ("period", period.as_str()),
                    ("limit", &limit),
                ],
            )
            .await?;
        Ok(envelope.into_records(ticker, period))
    }
}

#[async_trait]
impl LineItemsProvider for FindataConnector {
    async fn line_items(
        &self,
        ticker: &str,
        names: &[String],
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Result<Vec<LineItem>, MercatoError> {
        let body = serde_json::json!({
            "tickers": [ticker],
            "line_items": names,
            "end_date": end_date,
            "period": period.as_str(),
            "limit": limit,
        });
        let envelope: payload::LineItemsEnvelope = self
            .execute(
                self.request(reqwest::Method::POST, "/financials/search/line-items")
                    .json(&body),
            )
            .await?;
        Ok(envelope.into_records(ticker, names, period))
    }
}

#[async_trait]
impl InsiderTradesProvider for FindataConnector {
    async fn insider_trades(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Result<Vec<InsiderTrade>, MercatoError> {
        let limit_s = limit.to_string();
        let mut query = vec![
            ("ticker", ticker),
            ("filing_date_lte", end_date),
            ("limit", limit_s.as_str()),
        ];
        if let Some(start) = start_date {
            query.push(("filing_date_gte", start));
        }
        let envelope: payload::InsiderTradesEnvelope =
            self.get_json("/insider-trades/", &query).await?;
        Ok(envelope.into_records(ticker, limit))
    }
}

#[async_trait]
impl CompanyNewsProvider for FindataConnector {
    async fn company_news(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Result<Vec<CompanyNews>, MercatoError> {
        let limit_s = limit.to_string();
        let mut query = vec![
            ("ticker", ticker),
            ("end_date", end_date),
            ("limit", limit_s.as_str()),
        ];
        if let Some(start) = start_date {
            query.push(("start_date", start));
        }
        let envelope: payload::NewsEnvelope = self.get_json("/news/", &query).await?;
        Ok(envelope.into_records(ticker, limit))
    }
}

#[async_trait]
impl MarketCapProvider for FindataConnector {
    async fn market_cap(
        &self,
        ticker: &str,
        _end_date: &str,
    ) -> Result<Option<f64>, MercatoError> {
        let envelope: payload::CompanyFactsEnvelope = self
            .get_json("/company/facts", &[("ticker", ticker)])
            .await?;
        Ok(envelope.company_facts.and_then(|f| f.market_cap))
    }
}
