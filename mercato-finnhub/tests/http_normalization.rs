use httpmock::prelude::*;
use serde_json::json;

use mercato_core::connector::{
    CompanyNewsProvider, FinancialMetricsProvider, InsiderTradesProvider, LineItemsProvider,
    MarketCapProvider, MercatoConnector, PricesProvider,
};
use mercato_core::{MercatoError, Period};
use mercato_finnhub::FinnhubConnector;

fn connector(server: &MockServer) -> FinnhubConnector {
    FinnhubConnector::builder()
        .api_key("t0ken")
        .base_url(server.base_url())
        .build()
        .unwrap()
}

#[test]
fn building_without_a_key_fails_fast() {
    let err = FinnhubConnector::builder().build().unwrap_err();
    assert!(matches!(err, MercatoError::Config(_)));
}

#[tokio::test]
async fn candles_become_daily_bars() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/stock/candle")
                .header("X-Finnhub-Token", "t0ken")
                .query_param("symbol", "AAPL")
                .query_param("resolution", "D");
            then.status(200).json_body(json!({
                "s": "ok",
                // 2024-01-02 and 2024-01-03, midnight UTC
                "t": [1704153600, 1704240000],
                "o": [185.0, 186.0],
                "h": [186.5, 187.0],
                "l": [184.2, 185.0],
                "c": [186.0, 186.8],
                "v": [48201500.0, 39110000.0]
            }));
        })
        .await;

    let c = connector(&server);
    let bars = c
        .as_prices_provider()
        .unwrap()
        .prices("AAPL", "2024-01-01", "2024-01-03")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].time, "2024-01-02");
    assert_eq!(bars[1].close, 186.8);
}

#[tokio::test]
async fn no_data_yields_an_empty_series() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/candle");
            then.status(200).json_body(json!({"s": "no_data"}));
        })
        .await;

    let c = connector(&server);
    let bars = c
        .as_prices_provider()
        .unwrap()
        .prices("AAPL", "2024-01-01", "2024-01-03")
        .await
        .unwrap();
    assert!(bars.is_empty());
}

#[tokio::test]
async fn ragged_candle_columns_are_a_normalization_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/candle");
            then.status(200).json_body(json!({
                "s": "ok",
                "t": [1704153600, 1704240000],
                "o": [185.0],
                "h": [186.5, 187.0],
                "l": [184.2, 185.0],
                "c": [186.0, 186.8],
                "v": [1.0, 2.0]
            }));
        })
        .await;

    let c = connector(&server);
    let err = c
        .as_prices_provider()
        .unwrap()
        .prices("AAPL", "2024-01-01", "2024-01-03")
        .await
        .unwrap_err();
    assert!(matches!(err, MercatoError::Normalization { .. }));
}

#[tokio::test]
async fn metric_keys_are_translated_and_dated_from_ratios() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/metric");
            then.status(200).json_body(json!({
                "metric": {
                    "roeTTM": 1.47,
                    "peBasicExclExtraTTM": 28.4,
                    "totalDebt/totalEquityQuarterly": 1.79,
                    "marketCapitalization": 2950000.0
                }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/financial-ratios");
            then.status(200).json_body(json!({
                "series": {
                    "annual": {
                        "currentRatio": [
                            {"period": "2022-12-31", "v": 0.88},
                            {"period": "2023-12-31", "v": 0.99}
                        ]
                    }
                }
            }));
        })
        .await;

    let c = connector(&server);
    let rows = c
        .as_financial_metrics_provider()
        .unwrap()
        .financial_metrics("AAPL", "2024-06-30", Period::Ttm, 10)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].report_period, "2023-12-31");
    assert_eq!(rows[0].return_on_equity, Some(1.47));
    assert_eq!(rows[0].price_to_earnings, Some(28.4));
    assert_eq!(rows[0].debt_to_equity, Some(1.79));
}

#[tokio::test]
async fn empty_ratio_series_falls_back_to_end_date() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/metric");
            then.status(200).json_body(json!({"metric": {}}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/financial-ratios");
            then.status(200).json_body(json!({}));
        })
        .await;

    let c = connector(&server);
    let rows = c
        .as_financial_metrics_provider()
        .unwrap()
        .financial_metrics("AAPL", "2024-06-30", Period::Ttm, 10)
        .await
        .unwrap();
    assert_eq!(rows[0].report_period, "2024-06-30");
}

#[tokio::test]
async fn line_items_use_the_static_mapping_table() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/stock/financials")
                .query_param("freq", "annual");
            then.status(200).json_body(json!({
                "financials": [
                    {"year": 2023, "netIncome": 96995000000.0, "totalAssets": 352583000000.0},
                    {"year": 2022, "netIncome": 99803000000.0},
                    {"year": 2021, "netIncome": 94680000000.0}
                ]
            }));
        })
        .await;

    let c = connector(&server);
    let names = vec![
        "net_income".to_string(),
        "total_assets".to_string(),
        "unmapped_thing".to_string(),
    ];
    let items = c
        .as_line_items_provider()
        .unwrap()
        .line_items("AAPL", &names, "2023-12-31", Period::Annual, 2)
        .await
        .unwrap();

    // Two statements kept; 2022 lacks totalAssets, unmapped name skipped.
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i.report_period.ends_with("-12-31")));
    assert!(items.iter().any(|i| i.name == "total_assets"));
    assert!(items.iter().all(|i| i.name != "unmapped_thing"));
}

#[tokio::test]
async fn insider_trades_are_windowed_client_side() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/insider-transactions");
            then.status(200).json_body(json!({
                "data": [
                    {"name": "A", "filingDate": "2024-02-02", "transactionDate": "2024-01-30",
                     "share": 100.0, "transactionPrice": 180.0, "transactionCode": "S"},
                    {"name": "B", "filingDate": "2023-11-05", "transactionDate": "2023-11-01",
                     "share": 50.0, "transactionPrice": 170.0, "transactionCode": "P"},
                    {"name": "C", "filingDate": "2024-02-20", "transactionDate": "",
                     "share": 10.0, "transactionPrice": 185.0, "transactionCode": "S"}
                ]
            }));
        })
        .await;

    let c = connector(&server);
    let trades = c
        .as_insider_trades_provider()
        .unwrap()
        .insider_trades("AAPL", "2024-03-01", Some("2024-01-01"), 100)
        .await
        .unwrap();

    // B predates the window; C has an empty transaction date and falls back
    // to its filing date.
    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].insider_name.as_deref(), Some("C"));
    assert_eq!(trades[0].effective_date(), "2024-02-20");
    assert_eq!(trades[1].insider_name.as_deref(), Some("A"));
}

#[tokio::test]
async fn news_defaults_to_a_thirty_day_window() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/company-news")
                .query_param("from", "2024-02-01")
                .query_param("to", "2024-03-02");
            then.status(200).json_body(json!([
                {"datetime": 1709290800, "headline": "h1", "summary": "s1",
                 "source": "wire", "url": "https://n.example/1"},
                {"datetime": 1709204400, "headline": "h2", "summary": "s2",
                 "source": "wire", "url": "https://n.example/2"}
            ]));
        })
        .await;

    let c = connector(&server);
    let news = c
        .as_company_news_provider()
        .unwrap()
        .company_news("AAPL", "2024-03-02", None, 10)
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(news.len(), 2);
    assert!(news[0].date >= news[1].date);
}

#[tokio::test]
async fn market_cap_scales_millions() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/profile2");
            then.status(200)
                .json_body(json!({"marketCapitalization": 2950000.0, "name": "Apple Inc"}));
        })
        .await;

    let c = connector(&server);
    let cap = c
        .as_market_cap_provider()
        .unwrap()
        .market_cap("AAPL", "2024-01-05")
        .await
        .unwrap();
    assert_eq!(cap, Some(2.95e12));
}

#[tokio::test]
async fn server_errors_become_fetch_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/stock/profile2");
            then.status(500).body("boom");
        })
        .await;

    let c = connector(&server);
    let err = c
        .as_market_cap_provider()
        .unwrap()
        .market_cap("AAPL", "2024-01-05")
        .await
        .unwrap_err();
    assert!(matches!(err, MercatoError::Fetch { .. }));
}
