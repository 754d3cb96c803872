//! Wire shapes for financialdatasets.ai responses and their translation into
//! canonical records.

use serde::Deserialize;

use mercato_core::normalize_date;
use mercato_core::{CompanyNews, FinancialMetrics, InsiderTrade, LineItem, Period, Price};

use crate::NAME;

/// Provider timestamps arrive either as plain dates or RFC 3339 datetimes;
/// only the date part is meaningful for daily records.
fn day(raw: &str) -> String {
    normalize_date(raw.split('T').next().unwrap_or(raw))
}

#[derive(Deserialize)]
pub(crate) struct PricesEnvelope {
    #[serde(default)]
    prices: Vec<PriceRow>,
}

#[derive(Deserialize)]
struct PriceRow {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl PricesEnvelope {
    pub(crate) fn into_records(self, ticker: &str) -> Vec<Price> {
        self.prices
            .into_iter()
            .map(|row| Price {
                ticker: ticker.to_string(),
                time: day(&row.time),
                open: row.open,
                high: row.high,
                low: row.low,
                close: row.close,
                volume: row.volume.max(0.0) as u64,
            })
            .collect()
    }
}

#[derive(Deserialize)]
pub(crate) struct MetricsEnvelope {
    #[serde(default)]
    financial_metrics: Vec<MetricsRow>,
}

/// Ratio row. Serde renames are the provider-field translation table; the
/// canonical names were modeled on this provider so most entries differ only
/// by a `_ratio` suffix.
#[derive(Deserialize)]
struct MetricsRow {
    report_period: String,
    market_cap: Option<f64>,
    enterprise_value: Option<f64>,
    #[serde(rename = "price_to_earnings_ratio")]
    price_to_earnings: Option<f64>,
    #[serde(rename = "price_to_book_ratio")]
    price_to_book: Option<f64>,
    #[serde(rename = "price_to_sales_ratio")]
    price_to_sales: Option<f64>,
    #[serde(rename = "ev_to_revenue_ratio")]
    enterprise_value_to_revenue: Option<f64>,
    #[serde(rename = "ev_to_ebitda_ratio")]
    enterprise_value_to_ebitda: Option<f64>,
    gross_margin: Option<f64>,
    operating_margin: Option<f64>,
    net_margin: Option<f64>,
    return_on_equity: Option<f64>,
    return_on_assets: Option<f64>,
    debt_to_equity: Option<f64>,
    current_ratio: Option<f64>,
    quick_ratio: Option<f64>,
    interest_coverage: Option<f64>,
    dividend_yield: Option<f64>,
    payout_ratio: Option<f64>,
    earnings_per_share: Option<f64>,
    revenue_growth: Option<f64>,
}

impl MetricsEnvelope {
    pub(crate) fn into_records(self, ticker: &str, period: Period) -> Vec<FinancialMetrics> {
        self.financial_metrics
            .into_iter()
            .map(|row| FinancialMetrics {
                ticker: ticker.to_string(),
                report_period: day(&row.report_period),
                period,
                market_cap: row.market_cap,
                enterprise_value: row.enterprise_value,
                price_to_earnings: row.price_to_earnings,
                price_to_book: row.price_to_book,
                price_to_sales: row.price_to_sales,
                enterprise_value_to_revenue: row.enterprise_value_to_revenue,
                enterprise_value_to_ebitda: row.enterprise_value_to_ebitda,
                gross_margin: row.gross_margin,
                operating_margin: row.operating_margin,
                net_margin: row.net_margin,
                return_on_equity: row.return_on_equity,
                return_on_assets: row.return_on_assets,
                debt_to_equity: row.debt_to_equity,
                current_ratio: row.current_ratio,
                quick_ratio: row.quick_ratio,
                interest_coverage: row.interest_coverage,
                dividend_yield: row.dividend_yield,
                payout_ratio: row.payout_ratio,
                earnings_per_share: row.earnings_per_share,
                revenue_growth: row.revenue_growth,
            })
            .collect()
    }
}

#[derive(Deserialize)]
pub(crate) struct LineItemsEnvelope {
    #[serde(default)]
    search_results: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl LineItemsEnvelope {
    /// Search results are dynamic objects keyed by the requested names plus
    /// `report_period`/`period` metadata. A requested name missing from a row
    /// is skipped, not an error: providers drift and callers prefer a partial
    /// answer.
    pub(crate) fn into_records(
        self,
        ticker: &str,
        names: &[String],
        period: Period,
    ) -> Vec<LineItem> {
        let mut items = Vec::new();
        for row in &self.search_results {
            let Some(report_period) = row.get("report_period").and_then(|v| v.as_str()) else {
                tracing::debug!(connector = NAME, "search result without report_period, skipping");
                continue;
            };
            for name in names {
                let Some(value) = row.get(name.as_str()) else {
                    tracing::debug!(connector = NAME, line_item = %name, "line item absent, skipping");
                    continue;
                };
                items.push(LineItem {
                    ticker: ticker.to_string(),
                    name: name.clone(),
                    value: value.as_f64(),
                    report_period: day(report_period),
                    period,
                });
            }
        }
        items
    }
}

#[derive(Deserialize)]
pub(crate) struct InsiderTradesEnvelope {
    #[serde(default)]
    insider_trades: Vec<InsiderTradeRow>,
}

#[derive(Deserialize)]
struct InsiderTradeRow {
    filing_date: String,
    transaction_date: Option<String>,
    #[serde(rename = "name")]
    insider_name: Option<String>,
    title: Option<String>,
    #[serde(rename = "transaction_code")]
    transaction_type: Option<String>,
    #[serde(rename = "transaction_shares")]
    shares: Option<f64>,
    #[serde(rename = "transaction_price_per_share")]
    price: Option<f64>,
    #[serde(rename = "transaction_value")]
    value: Option<f64>,
}

impl InsiderTradesEnvelope {
    pub(crate) fn into_records(self, ticker: &str, limit: usize) -> Vec<InsiderTrade> {
        let mut trades: Vec<InsiderTrade> = self
            .insider_trades
            .into_iter()
            .map(|row| InsiderTrade {
                ticker: ticker.to_string(),
                filing_date: day(&row.filing_date),
                transaction_date: row.transaction_date.as_deref().map(day),
                insider_name: row.insider_name,
                title: row.title,
                transaction_type: row.transaction_type,
                shares: row.shares,
                price: row.price,
                value: row.value,
            })
            .collect();
        trades.sort_by(|a, b| b.effective_date().cmp(a.effective_date()));
        trades.truncate(limit);
        trades
    }
}

#[derive(Deserialize)]
pub(crate) struct NewsEnvelope {
    #[serde(default)]
    news: Vec<NewsRow>,
}

#[derive(Deserialize)]
struct NewsRow {
    date: String,
    #[serde(rename = "title")]
    headline: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    source: String,
    url: String,
}

impl NewsEnvelope {
    pub(crate) fn into_records(self, ticker: &str, limit: usize) -> Vec<CompanyNews> {
        let mut articles: Vec<CompanyNews> = self
            .news
            .into_iter()
            .map(|row| CompanyNews {
                ticker: ticker.to_string(),
                date: day(&row.date),
                headline: row.headline,
                summary: row.summary,
                source: row.source,
                url: row.url,
            })
            .collect();
        articles.sort_by(|a, b| b.date.cmp(&a.date));
        articles.truncate(limit);
        articles
    }
}

#[derive(Deserialize)]
pub(crate) struct CompanyFactsEnvelope {
    pub(crate) company_facts: Option<CompanyFacts>,
}

#[derive(Deserialize)]
pub(crate) struct CompanyFacts {
    pub(crate) market_cap: Option<f64>,
}
