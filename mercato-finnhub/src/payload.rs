//! Wire shapes for finnhub.io responses and their translation into canonical
//! records.

use chrono::DateTime;
use serde::Deserialize;

use mercato_core::{CompanyNews, FinancialMetrics, InsiderTrade, LineItem, Period, Price};

use crate::NAME;

/// Column-oriented daily candles, unix seconds.
#[derive(Deserialize)]
pub(crate) struct CandleEnvelope {
    #[serde(rename = "s")]
    status: String,
    #[serde(rename = "t", default)]
    times: Vec<i64>,
    #[serde(rename = "o", default)]
    opens: Vec<f64>,
    #[serde(rename = "h", default)]
    highs: Vec<f64>,
    #[serde(rename = "l", default)]
    lows: Vec<f64>,
    #[serde(rename = "c", default)]
    closes: Vec<f64>,
    #[serde(rename = "v", default)]
    volumes: Vec<f64>,
}

impl CandleEnvelope {
    pub(crate) fn into_records(self, ticker: &str) -> Result<Vec<Price>, mercato_core::MercatoError> {
        if self.status == "no_data" {
            return Ok(Vec::new());
        }
        let n = self.times.len();
        if [&self.opens, &self.highs, &self.lows, &self.closes, &self.volumes]
            .iter()
            .any(|col| col.len() != n)
        {
            return Err(mercato_core::MercatoError::normalization(
                NAME,
                "candle columns have mismatched lengths",
            ));
        }

        let mut bars = Vec::with_capacity(n);
        for i in 0..n {
            let Some(day) = DateTime::from_timestamp(self.times[i], 0) else {
                tracing::debug!(connector = NAME, ts = self.times[i], "unrepresentable candle timestamp, skipping");
                continue;
            };
            bars.push(Price {
                ticker: ticker.to_string(),
                time: day.format("%Y-%m-%d").to_string(),
                open: self.opens[i],
                high: self.highs[i],
                low: self.lows[i],
                close: self.closes[i],
                volume: self.volumes[i].max(0.0) as u64,
            });
        }
        Ok(bars)
    }
}

/// `metric=all` snapshot. The serde renames are the finnhub-to-canonical
/// translation table.
#[derive(Deserialize, Default)]
pub(crate) struct MetricEnvelope {
    #[serde(default)]
    metric: MetricFields,
}

#[derive(Deserialize, Default)]
pub(crate) struct MetricFields {
    #[serde(rename = "marketCapitalization")]
    market_cap: Option<f64>,
    #[serde(rename = "enterpriseValue")]
    enterprise_value: Option<f64>,
    #[serde(rename = "peBasicExclExtraTTM")]
    price_to_earnings: Option<f64>,
    #[serde(rename = "pbQuarterly")]
    price_to_book: Option<f64>,
    #[serde(rename = "psTTM")]
    price_to_sales: Option<f64>,
    #[serde(rename = "evToRevenue")]
    enterprise_value_to_revenue: Option<f64>,
    #[serde(rename = "evToEBITDA")]
    enterprise_value_to_ebitda: Option<f64>,
    #[serde(rename = "grossMarginTTM")]
    gross_margin: Option<f64>,
    #[serde(rename = "operatingMarginTTM")]
    operating_margin: Option<f64>,
    #[serde(rename = "netMarginTTM")]
    net_margin: Option<f64>,
    #[serde(rename = "roeTTM")]
    return_on_equity: Option<f64>,
    #[serde(rename = "roaTTM")]
    return_on_assets: Option<f64>,
    #[serde(rename = "totalDebt/totalEquityQuarterly")]
    debt_to_equity: Option<f64>,
    #[serde(rename = "currentRatioQuarterly")]
    current_ratio: Option<f64>,
    #[serde(rename = "quickRatioQuarterly")]
    quick_ratio: Option<f64>,
    #[serde(rename = "interestCoverage")]
    interest_coverage: Option<f64>,
    #[serde(rename = "dividendYieldIndicatedAnnual")]
    dividend_yield: Option<f64>,
    #[serde(rename = "payoutRatioTTM")]
    payout_ratio: Option<f64>,
    #[serde(rename = "epsBasicExclExtraItemsTTM")]
    earnings_per_share: Option<f64>,
    #[serde(rename = "revenueGrowthTTMYoy")]
    revenue_growth: Option<f64>,
}

impl MetricEnvelope {
    pub(crate) fn into_record(
        self,
        ticker: &str,
        report_period: String,
        period: Period,
    ) -> FinancialMetrics {
        let m = self.metric;
        FinancialMetrics {
            ticker: ticker.to_string(),
            report_period,
            period,
            market_cap: m.market_cap,
            enterprise_value: m.enterprise_value,
            price_to_earnings: m.price_to_earnings,
            price_to_book: m.price_to_book,
            price_to_sales: m.price_to_sales,
            enterprise_value_to_revenue: m.enterprise_value_to_revenue,
            enterprise_value_to_ebitda: m.enterprise_value_to_ebitda,
            gross_margin: m.gross_margin,
            operating_margin: m.operating_margin,
            net_margin: m.net_margin,
            return_on_equity: m.return_on_equity,
            return_on_assets: m.return_on_assets,
            debt_to_equity: m.debt_to_equity,
            current_ratio: m.current_ratio,
            quick_ratio: m.quick_ratio,
            interest_coverage: m.interest_coverage,
            dividend_yield: m.dividend_yield,
            payout_ratio: m.payout_ratio,
            earnings_per_share: m.earnings_per_share,
            revenue_growth: m.revenue_growth,
        }
    }
}

#[derive(Deserialize, Default)]
pub(crate) struct RatiosEnvelope {
    series: Option<RatioSeries>,
}

#[derive(Deserialize)]
struct RatioSeries {
    annual: Option<serde_json::Map<String, serde_json::Value>>,
}

impl RatiosEnvelope {
    /// The period of the newest annual ratio observation, when the series is
    /// populated. Observations arrive oldest-first per ratio.
    pub(crate) fn latest_period(&self) -> Option<String> {
        let annual = self.series.as_ref()?.annual.as_ref()?;
        let observations = annual.values().next()?.as_array()?;
        let latest = observations.last()?;
        latest
            .get("period")
            .and_then(|p| p.as_str())
            .map(str::to_string)
    }
}

/// Canonical line item name → finnhub statement field.
///
/// finnhub has no native line-item search; the annual statements endpoint is
/// probed with this table instead. Names outside the table are skipped.
const LINE_ITEM_FIELDS: &[(&str, &str)] = &[
    ("capital_expenditure", "capitalExpenditures"),
    ("depreciation_and_amortization", "depreciationAndAmortization"),
    ("net_income", "netIncome"),
    ("outstanding_shares", "outstandingShares"),
    ("total_assets", "totalAssets"),
    ("total_liabilities", "totalLiabilities"),
    ("dividends_and_other_cash_distributions", "dividendsPaid"),
    ("issuance_or_purchase_of_equity_shares", "issuanceOfCapitalStock"),
];

fn provider_field(name: &str) -> Option<&'static str> {
    LINE_ITEM_FIELDS
        .iter()
        .find(|(canonical, _)| *canonical == name)
        .map(|(_, field)| *field)
}

#[derive(Deserialize)]
pub(crate) struct FinancialsEnvelope {
    #[serde(default)]
    financials: Vec<serde_json::Map<String, serde_json::Value>>,
}

impl FinancialsEnvelope {
    pub(crate) fn into_records(
        self,
        ticker: &str,
        names: &[String],
        end_date: &str,
        period: Period,
        limit: usize,
    ) -> Vec<LineItem> {
        let end_year: i64 = end_date
            .split('-')
            .next()
            .and_then(|y| y.parse().ok())
            .unwrap_or(i64::MAX);

        let mut statements: Vec<(i64, serde_json::Map<String, serde_json::Value>)> = self
            .financials
            .into_iter()
            .filter_map(|s| {
                let year = s.get("year").and_then(serde_json::Value::as_i64)?;
                (year <= end_year).then_some((year, s))
            })
            .collect();
        statements.sort_by_key(|(year, _)| std::cmp::Reverse(*year));
        statements.truncate(limit);

        let mut items = Vec::new();
        for (year, statement) in &statements {
            for name in names {
                let Some(field) = provider_field(name) else {
                    tracing::debug!(connector = NAME, line_item = %name, "no finnhub mapping, skipping");
                    continue;
                };
                let Some(value) = statement.get(field) else {
                    tracing::debug!(connector = NAME, line_item = %name, year = *year, "field absent from statement, skipping");
                    continue;
                };
                items.push(LineItem {
                    ticker: ticker.to_string(),
                    name: name.clone(),
                    value: value.as_f64(),
                    // Annual statements are assumed to close the calendar year.
                    report_period: format!("{year}-12-31"),
                    period,
                });
            }
        }
        items
    }
}

#[derive(Deserialize)]
pub(crate) struct InsiderEnvelope {
    #[serde(default)]
    data: Vec<InsiderRow>,
}

#[derive(Deserialize)]
struct InsiderRow {
    #[serde(rename = "filingDate", default)]
    filing_date: String,
    #[serde(rename = "transactionDate")]
    transaction_date: Option<String>,
    name: Option<String>,
    #[serde(rename = "officerTitle")]
    title: Option<String>,
    #[serde(rename = "transactionCode")]
    transaction_type: Option<String>,
    #[serde(rename = "share")]
    shares: Option<f64>,
    #[serde(rename = "transactionPrice")]
    price: Option<f64>,
    value: Option<f64>,
}

impl InsiderEnvelope {
    pub(crate) fn into_records(self, ticker: &str) -> Vec<InsiderTrade> {
        let mut trades: Vec<InsiderTrade> = self
            .data
            .into_iter()
            .map(|row| InsiderTrade {
                ticker: ticker.to_string(),
                filing_date: row.filing_date,
                transaction_date: row.transaction_date.filter(|d| !d.is_empty()),
                insider_name: row.name,
                title: row.title,
                transaction_type: row.transaction_type,
                shares: row.shares,
                price: row.price,
                value: row.value,
            })
            .collect();
        trades.sort_by(|a, b| b.effective_date().cmp(a.effective_date()));
        trades
    }
}

#[derive(Deserialize)]
pub(crate) struct NewsRow {
    #[serde(rename = "datetime", default)]
    timestamp: i64,
    #[serde(default)]
    headline: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    url: String,
}

pub(crate) fn news_records(rows: Vec<NewsRow>, ticker: &str, limit: usize) -> Vec<CompanyNews> {
    let mut articles: Vec<CompanyNews> = rows
        .into_iter()
        .filter_map(|row| {
            let Some(day) = DateTime::from_timestamp(row.timestamp, 0) else {
                tracing::debug!(connector = NAME, ts = row.timestamp, "unrepresentable article timestamp, skipping");
                return None;
            };
            Some(CompanyNews {
                ticker: ticker.to_string(),
                date: day.format("%Y-%m-%d").to_string(),
                headline: row.headline,
                summary: row.summary,
                source: row.source,
                url: row.url,
            })
        })
        .collect();
    articles.sort_by(|a, b| b.date.cmp(&a.date));
    articles.truncate(limit);
    articles
}

#[derive(Deserialize)]
pub(crate) struct ProfileEnvelope {
    #[serde(rename = "marketCapitalization")]
    pub(crate) market_capitalization: Option<f64>,
}
