use httpmock::prelude::*;
use serde_json::json;

use mercato::{Mercato, ProviderKey, Registry, RegistryConfig};

fn mercato_with(finnhub: &MockServer, findata: &MockServer) -> Mercato {
    Mercato::new(Registry::new(RegistryConfig {
        default_provider: Some(ProviderKey::Finnhub),
        finnhub_api_key: Some("t0ken".into()),
        findata_api_key: None,
        finnhub_base_url: Some(finnhub.base_url()),
        findata_base_url: Some(findata.base_url()),
    }))
}

fn findata_prices_body() -> serde_json::Value {
    json!({
        "prices": [
            {"time": "2024-01-02", "open": 185.0, "high": 186.5,
             "low": 184.2, "close": 186.0, "volume": 48201500.0},
            {"time": "2024-01-03", "open": 186.0, "high": 187.0,
             "low": 185.0, "close": 186.8, "volume": 39110000.0}
        ]
    })
}

#[tokio::test]
async fn failing_primary_falls_over_to_the_other_provider_once() {
    let finnhub = MockServer::start_async().await;
    let findata = MockServer::start_async().await;

    let broken = finnhub
        .mock_async(|when, then| {
            when.method(GET).path("/stock/candle");
            then.status(500).body("internal error");
        })
        .await;
    let healthy = findata
        .mock_async(|when, then| {
            when.method(GET).path("/prices/");
            then.status(200).json_body(findata_prices_body());
        })
        .await;

    let mercato = mercato_with(&finnhub, &findata);
    let bars = mercato.get_prices("AAPL", "2024-01-01", "2024-01-03").await;

    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].time, "2024-01-02");
    broken.assert_hits_async(1).await;
    healthy.assert_hits_async(1).await;
}

#[tokio::test]
async fn healthy_primary_never_touches_the_fallback() {
    let finnhub = MockServer::start_async().await;
    let findata = MockServer::start_async().await;

    finnhub
        .mock_async(|when, then| {
            when.method(GET).path("/stock/candle");
            then.status(200).json_body(json!({
                "s": "ok",
                "t": [1704153600],
                "o": [185.0], "h": [186.5], "l": [184.2], "c": [186.0], "v": [1000.0]
            }));
        })
        .await;
    let fallback = findata
        .mock_async(|when, then| {
            when.method(GET).path("/prices/");
            then.status(200).json_body(findata_prices_body());
        })
        .await;

    let mercato = mercato_with(&finnhub, &findata);
    let bars = mercato.get_prices("AAPL", "2024-01-01", "2024-01-03").await;

    assert_eq!(bars.len(), 1);
    fallback.assert_hits_async(0).await;
}

#[tokio::test]
async fn total_failure_yields_empty_not_error() {
    let finnhub = MockServer::start_async().await;
    let findata = MockServer::start_async().await;

    for server in [&finnhub, &findata] {
        server
            .mock_async(|when, then| {
                when.any_request();
                then.status(503).body("down");
            })
            .await;
    }

    let mercato = mercato_with(&finnhub, &findata);

    let bars = mercato.get_prices("AAPL", "2024-01-01", "2024-01-03").await;
    assert!(bars.is_empty());

    let cap = mercato.get_market_cap("AAPL", "2024-01-03").await;
    assert_eq!(cap, None);
}

#[tokio::test]
async fn unavailable_fallback_still_yields_empty() {
    // Primary is findata (no finnhub credential). Its failure falls over to
    // finnhub, whose construction fails with a config error; the dispatcher
    // still settles on the empty value.
    let findata = MockServer::start_async().await;
    findata
        .mock_async(|when, then| {
            when.any_request();
            then.status(500).body("down");
        })
        .await;

    let mercato = Mercato::new(Registry::new(RegistryConfig {
        findata_base_url: Some(findata.base_url()),
        ..RegistryConfig::default()
    }));

    assert_eq!(mercato.registry().default_key(), ProviderKey::FinancialDatasets);
    let news = mercato.get_company_news("AAPL", "2024-03-01", None, 10).await;
    assert!(news.is_empty());
}

#[tokio::test]
async fn covered_ranges_are_served_without_a_second_fetch() {
    let finnhub = MockServer::start_async().await;
    let findata = MockServer::start_async().await;

    let candles = finnhub
        .mock_async(|when, then| {
            when.method(GET).path("/stock/candle");
            then.status(200).json_body(json!({
                "s": "ok",
                "t": [1704153600, 1704240000],
                "o": [185.0, 186.0], "h": [186.5, 187.0],
                "l": [184.2, 185.0], "c": [186.0, 186.8],
                "v": [1000.0, 2000.0]
            }));
        })
        .await;

    let mercato = mercato_with(&finnhub, &findata);
    let first = mercato.get_prices("AAPL", "2024-01-01", "2024-01-03").await;
    let second = mercato.get_prices("AAPL", "2024-01-01", "2024-01-03").await;

    assert_eq!(first, second);
    candles.assert_hits_async(1).await;
}

#[tokio::test]
async fn market_cap_is_refetched_every_call() {
    let finnhub = MockServer::start_async().await;
    let findata = MockServer::start_async().await;

    let profile = finnhub
        .mock_async(|when, then| {
            when.method(GET).path("/stock/profile2");
            then.status(200).json_body(json!({"marketCapitalization": 2950000.0}));
        })
        .await;

    let mercato = mercato_with(&finnhub, &findata);
    assert_eq!(mercato.get_market_cap("AAPL", "2024-01-03").await, Some(2.95e12));
    assert_eq!(mercato.get_market_cap("AAPL", "2024-01-03").await, Some(2.95e12));
    profile.assert_hits_async(2).await;
}
