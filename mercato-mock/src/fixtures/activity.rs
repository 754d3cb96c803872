use chrono::{Duration, NaiveDate};

use mercato_core::{CompanyNews, InsiderTrade};

use super::seed;

fn window(end_date: &str, start_date: Option<&str>) -> Option<(NaiveDate, NaiveDate)> {
    let end = NaiveDate::parse_from_str(end_date, "%Y-%m-%d").ok()?;
    let start = match start_date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?,
        None => end - Duration::days(30),
    };
    (start <= end).then_some((start, end))
}

/// One trade per week inside the window, newest first.
#[must_use]
pub fn insider_trades(
    ticker: &str,
    end_date: &str,
    start_date: Option<&str>,
    limit: usize,
) -> Vec<InsiderTrade> {
    let Some((start, end)) = window(end_date, start_date) else {
        return Vec::new();
    };
    let shares = 100.0 + (seed(ticker) % 900) as f64;

    let mut trades = Vec::new();
    let mut day = end;
    while day >= start && trades.len() < limit {
        trades.push(InsiderTrade {
            ticker: ticker.to_string(),
            filing_date: (day + Duration::days(2)).format("%Y-%m-%d").to_string(),
            transaction_date: Some(day.format("%Y-%m-%d").to_string()),
            insider_name: Some("J. Appleseed".to_string()),
            title: Some("Director".to_string()),
            transaction_type: Some("S".to_string()),
            shares: Some(shares),
            price: Some(180.0),
            value: Some(shares * 180.0),
        });
        day -= Duration::days(7);
    }
    trades
}

/// Two articles per day inside the window, newest first, distinct URLs.
#[must_use]
pub fn company_news(
    ticker: &str,
    end_date: &str,
    start_date: Option<&str>,
    limit: usize,
) -> Vec<CompanyNews> {
    let Some((start, end)) = window(end_date, start_date) else {
        return Vec::new();
    };

    let mut articles = Vec::new();
    let mut day = end;
    'outer: while day >= start {
        for slot in 0..2 {
            if articles.len() >= limit {
                break 'outer;
            }
            let date = day.format("%Y-%m-%d").to_string();
            articles.push(CompanyNews {
                ticker: ticker.to_string(),
                date: date.clone(),
                headline: format!("{ticker} headline {date}/{slot}"),
                summary: "fixture article".to_string(),
                source: "MockWire".to_string(),
                url: format!("https://news.example/{ticker}/{date}/{slot}"),
            });
        }
        day -= Duration::days(1);
    }
    articles
}
