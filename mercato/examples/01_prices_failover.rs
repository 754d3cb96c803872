use mercato::{Mercato, Period};

#[tokio::main]
async fn main() {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,mercato=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();

    // Provider selection and credentials come from MERCATO_PROVIDER,
    // FINANCIAL_DATASETS_API_KEY, and FINNHUB_API_KEY. Without any of them
    // the registry falls back to financialdatasets.ai free tickers.
    let mercato = Mercato::from_env();

    println!("Fetching AAPL bars...");
    let bars = mercato.get_prices("AAPL", "2024-01-01", "2024-03-31").await;
    println!("{} bars", bars.len());
    if let (Some(first), Some(last)) = (bars.first(), bars.last()) {
        println!("  {} close {:.2}", first.time, first.close);
        println!("  {} close {:.2}", last.time, last.close);
    }

    // A second call over the same window is served from the record cache.
    let again = mercato.get_prices("AAPL", "2024-01-01", "2024-03-31").await;
    println!("{} bars (cached)", again.len());

    let metrics = mercato
        .get_financial_metrics("AAPL", "2024-03-31", Period::Ttm, 5)
        .await;
    println!("{} metric rows", metrics.len());

    match mercato.get_market_cap("AAPL", "2024-03-31").await {
        Some(cap) => println!("market cap: {cap:.0}"),
        None => println!("market cap unavailable"),
    }
}
