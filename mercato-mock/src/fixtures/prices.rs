use chrono::{Datelike, Duration, NaiveDate};

use mercato_core::Price;

use super::seed;

/// One bar per calendar day in `[start_date, end_date]`, deterministic per
/// ticker and day. Unparsable bounds yield an empty series, mirroring a
/// provider that has no data for a bogus window.
#[must_use]
pub fn daily_bars(ticker: &str, start_date: &str, end_date: &str) -> Vec<Price> {
    let (Ok(start), Ok(end)) = (
        NaiveDate::parse_from_str(start_date, "%Y-%m-%d"),
        NaiveDate::parse_from_str(end_date, "%Y-%m-%d"),
    ) else {
        return Vec::new();
    };

    let base = 100.0 + (seed(ticker) % 400) as f64;
    let mut bars = Vec::new();
    let mut day = start;
    while day <= end {
        let wobble = (day.ordinal() % 17) as f64;
        let close = base + wobble;
        bars.push(Price {
            ticker: ticker.to_string(),
            time: day.format("%Y-%m-%d").to_string(),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.5,
            close,
            volume: 1_000_000 + u64::from(day.ordinal()) * 1_000,
        });
        day += Duration::days(1);
    }
    bars
}

#[cfg(test)]
mod tests {
    use super::daily_bars;

    #[test]
    fn generates_one_bar_per_day_inclusive() {
        let bars = daily_bars("AAPL", "2024-01-01", "2024-01-05");
        assert_eq!(bars.len(), 5);
        assert_eq!(bars[0].time, "2024-01-01");
        assert_eq!(bars[4].time, "2024-01-05");
    }

    #[test]
    fn is_deterministic_per_ticker() {
        assert_eq!(
            daily_bars("AAPL", "2024-01-01", "2024-01-03"),
            daily_bars("AAPL", "2024-01-01", "2024-01-03"),
        );
        assert_ne!(
            daily_bars("AAPL", "2024-01-01", "2024-01-03")[0].close,
            daily_bars("MSFT", "2024-01-01", "2024-01-03")[0].close,
        );
    }
}
