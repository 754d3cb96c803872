use mercato_core::{FinancialMetrics, LineItem, Period};

use super::seed;

/// Fiscal year ends the fixtures know about, newest first.
const REPORT_PERIODS: &[&str] = &[
    "2024-12-31",
    "2023-12-31",
    "2022-12-31",
    "2021-12-31",
    "2020-12-31",
];

#[must_use]
pub fn metrics(ticker: &str, end_date: &str, period: Period, limit: usize) -> Vec<FinancialMetrics> {
    let s = seed(ticker) as f64;
    REPORT_PERIODS
        .iter()
        .filter(|p| **p <= end_date)
        .take(limit)
        .enumerate()
        .map(|(i, report_period)| FinancialMetrics {
            ticker: ticker.to_string(),
            report_period: (*report_period).to_string(),
            period,
            market_cap: Some(1.0e9 + s * 1.0e6),
            price_to_earnings: Some(18.0 + i as f64),
            price_to_book: Some(4.0),
            net_margin: Some(0.21),
            return_on_equity: Some(0.30 - i as f64 * 0.01),
            debt_to_equity: Some(1.4),
            current_ratio: Some(1.1),
            earnings_per_share: Some(6.0 - i as f64 * 0.2),
            ..FinancialMetrics::default()
        })
        .collect()
}

/// Line item names the mock can answer; anything else is skipped, matching
/// the silent-skip policy of real connectors.
const KNOWN_ITEMS: &[&str] = &[
    "net_income",
    "total_assets",
    "total_liabilities",
    "capital_expenditure",
    "outstanding_shares",
];

#[must_use]
pub fn line_items(
    ticker: &str,
    names: &[String],
    end_date: &str,
    period: Period,
    limit: usize,
) -> Vec<LineItem> {
    let s = seed(ticker) as f64;
    let mut out = Vec::new();
    for report_period in REPORT_PERIODS
        .iter()
        .filter(|p| **p <= end_date)
        .take(limit)
    {
        for name in names {
            if !KNOWN_ITEMS.contains(&name.as_str()) {
                continue;
            }
            out.push(LineItem {
                ticker: ticker.to_string(),
                name: name.clone(),
                value: Some(s + name.len() as f64 * 1.0e6),
                report_period: (*report_period).to_string(),
                period,
            });
        }
    }
    out
}

#[must_use]
pub fn market_cap(ticker: &str) -> Option<f64> {
    if ticker == "UNLISTED" {
        return None;
    }
    Some(1.0e9 + seed(ticker) as f64 * 1.0e6)
}
