pub mod activity;
pub mod fundamentals;
pub mod prices;

/// Deterministic per-ticker seed so different symbols get different data.
pub(crate) fn seed(ticker: &str) -> u64 {
    ticker.bytes().fold(7u64, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(u64::from(b))
    })
}
