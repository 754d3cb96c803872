//! mercato-finnhub
//!
//! finnhub.io connector. Unlike financialdatasets.ai, finnhub's field names
//! diverge substantially from the canonical record shapes, so this crate
//! carries the larger translation tables: camelCase metric keys, unix-second
//! candle arrays, and a statement endpoint that has no native line-item
//! search. A credential is mandatory; `build()` fails fast without one.
#![warn(missing_docs)]

mod builder;
mod payload;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::de::DeserializeOwned;

use mercato_core::connector::{
    CompanyNewsProvider, FinancialMetricsProvider, InsiderTradesProvider, LineItemsProvider,
    MarketCapProvider, MercatoConnector, PricesProvider,
};
use mercato_core::{
    CompanyNews, FinancialMetrics, InsiderTrade, LineItem, MercatoError, Period, Price,
    range_filtered,
};

pub use builder::FinnhubBuilder;

pub(crate) const NAME: &str = "mercato-finnhub";
pub(crate) const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";

/// Connector backed by the finnhub.io REST API.
#[derive(Debug)]
pub struct FinnhubConnector {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

fn parse_day(label: &str, raw: &str) -> Result<NaiveDate, MercatoError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| MercatoError::fetch(NAME, format!("invalid {label}: {raw}")))
}

impl FinnhubConnector {
    /// Start building a connector.
    #[must_use]
    pub fn builder() -> FinnhubBuilder {
        FinnhubBuilder::new()
    }

    pub(crate) fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MercatoError> {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .header("X-Finnhub-Token", &self.api_key)
            .query(query)
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
}

#[async_trait]
impl MercatoConnector for FinnhubConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Finnhub"
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
impl PricesProvider for FinnhubConnector {
    async fn prices(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Price>, MercatoError> {
        let start = parse_day("start_date", start_date)?
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp();
        // One extra day so bars stamped on end_date itself are included.
        let end = parse_day("end_date", end_date)?
            .and_time(NaiveTime::MIN)
            .and_utc()
            .timestamp()
            + 86_400;

        let from = start.to_string();
        let to = end.to_string();
        let envelope: payload::CandleEnvelope = self
            .get_json(
                "/stock/candle",
                &[
                    ("symbol", ticker),
                    ("resolution", "D"),
                    ("from", &from),
                    ("to", &to),
                ],
            )
            .await?;
        envelope.into_records(ticker)
    }
}

#[async_trait]
impl FinancialMetricsProvider for FinnhubConnector {
    async fn financial_metrics(
        &self,
        ticker: &str,
        end_date: &str,
        period: Period,
        _limit: usize,
    ) -> Result<Vec<FinancialMetrics>, MercatoError> {
        // finnhub exposes one current snapshot, not a per-period history, so
        // the result is always a single row regardless of `limit`.
        let metrics: payload::MetricEnvelope = self
            .get_json("/stock/metric", &[("symbol", ticker), ("metric", "all")])
            .await?;
        let ratios: payload::RatiosEnvelope = self
            .get_json("/stock/financial-ratios", &[("symbol", ticker)])
            .await?;

        let report_period = ratios
            .latest_period()
            .unwrap_or_else(|| end_date.to_string());
        Ok(vec![metrics.into_record(ticker, report_period, period)])
    }
}

#[async_trait]
impl LineItemsProvider for FinnhubConnector {
    async fn line_items(
        &self,
        ticker: &str,
        names: &[String],
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Result<Vec<LineItem>, MercatoError> {
        let envelope: payload::FinancialsEnvelope = self
            .get_json(
                "/stock/financials",
                &[("symbol", ticker), ("statement", "all"), ("freq", "annual")],
            )
            .await?;
        Ok(envelope.into_records(ticker, names, end_date, period, limit))
    }
}

#[async_trait]
impl InsiderTradesProvider for FinnhubConnector {
    async fn insider_trades(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Result<Vec<InsiderTrade>, MercatoError> {
        // The endpoint has no date parameters; the window is applied here.
        let envelope: payload::InsiderEnvelope = self
            .get_json("/stock/insider-transactions", &[("symbol", ticker)])
            .await?;
        let mut trades = range_filtered(envelope.into_records(ticker), start_date, end_date);
        trades.truncate(limit);
        Ok(trades)
    }
}

#[async_trait]
impl CompanyNewsProvider for FinnhubConnector {
    async fn company_news(
        &self,
        ticker: &str,
        end_date: &str,
        start_date: Option<&str>,
        limit: usize,
    ) -> Result<Vec<CompanyNews>, MercatoError> {
        let from = match start_date {
            Some(s) => s.to_string(),
            None => (parse_day("end_date", end_date)? - Duration::days(30))
                .format("%Y-%m-%d")
                .to_string(),
        };

        let articles: Vec<payload::NewsRow> = self
            .get_json(
                "/company-news",
                &[("symbol", ticker), ("from", &from), ("to", end_date)],
            )
            .await?;
        Ok(payload::news_records(articles, ticker, limit))
    }
}

#[async_trait]
impl MarketCapProvider for FinnhubConnector {
    // finnhub has no historical market cap; `end_date` is ignored and the
    // profile snapshot is returned.
    async fn market_cap(
        &self,
        ticker: &str,
        _end_date: &str,
    ) -> Result<Option<f64>, MercatoError> {
        let profile: payload::ProfileEnvelope = self
            .get_json("/stock/profile2", &[("symbol", ticker)])
            .await?;
        // Reported in millions.
        Ok(profile.market_capitalization.map(|m| m * 1_000_000.0))
    }
}
