use httpmock::prelude::*;
use serde_json::json;

use mercato_core::connector::{
    FinancialMetricsProvider, InsiderTradesProvider, LineItemsProvider, MarketCapProvider,
    MercatoConnector, PricesProvider,
};
use mercato_core::{MercatoError, Period};
use mercato_findata::FindataConnector;

fn connector(server: &MockServer) -> FindataConnector {
    FindataConnector::builder()
        .api_key("test-key")
        .base_url(server.base_url())
        .build()
}

#[tokio::test]
async fn prices_are_normalized_and_dated() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/prices/")
                .header("X-API-KEY", "test-key")
                .query_param("ticker", "AAPL")
                .query_param("interval", "day")
                .query_param("start_date", "2024-01-01")
                .query_param("end_date", "2024-01-03");
            then.status(200).json_body(json!({
                "prices": [
                    {"time": "2024-01-02T00:00:00Z", "open": 185.0, "high": 186.5,
                     "low": 184.2, "close": 186.0, "volume": 48201500.0},
                    {"time": "2024-01-03", "open": 186.0, "high": 187.0,
                     "low": 185.0, "close": 186.8, "volume": 39110000.0}
                ]
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
    assert_eq!(bars[0].ticker, "AAPL");
    assert_eq!(bars[0].volume, 48_201_500);
}

#[tokio::test]
async fn metrics_fields_are_renamed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/financial-metrics/");
            then.status(200).json_body(json!({
                "financial_metrics": [{
                    "report_period": "2023-12-31",
                    "market_cap": 2.9e12,
                    "price_to_earnings_ratio": 28.4,
                    "ev_to_ebitda_ratio": 21.0,
                    "return_on_equity": 1.47
                }]
            }));
        })
        .await;

    let c = connector(&server);
    let rows = c
        .as_financial_metrics_provider()
        .unwrap()
        .financial_metrics("AAPL", "2024-01-01", Period::Ttm, 10)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].report_period, "2023-12-31");
    assert_eq!(rows[0].price_to_earnings, Some(28.4));
    assert_eq!(rows[0].enterprise_value_to_ebitda, Some(21.0));
    assert_eq!(rows[0].dividend_yield, None);
}

#[tokio::test]
async fn line_item_search_skips_missing_names() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/financials/search/line-items");
            then.status(200).json_body(json!({
                "search_results": [{
                    "ticker": "AAPL",
                    "report_period": "2023-12-31",
                    "period": "annual",
                    "net_income": 96995000000.0
                }]
            }));
        })
        .await;

    let c = connector(&server);
    let names = vec!["net_income".to_string(), "not_a_real_item".to_string()];
    let items = c
        .as_line_items_provider()
        .unwrap()
        .line_items("AAPL", &names, "2024-01-01", Period::Annual, 4)
        .await
        .unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "net_income");
    assert_eq!(items[0].value, Some(96_995_000_000.0));
}

#[tokio::test]
async fn insider_trades_sort_descending_by_effective_date() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/insider-trades/");
            then.status(200).json_body(json!({
                "insider_trades": [
                    {"filing_date": "2024-02-02", "transaction_date": "2024-01-30",
                     "name": "A", "transaction_shares": 100.0},
                    {"filing_date": "2024-02-20", "transaction_date": null,
                     "name": "B", "transaction_shares": -50.0}
                ]
            }));
        })
        .await;

    let c = connector(&server);
    let trades = c
        .as_insider_trades_provider()
        .unwrap()
        .insider_trades("AAPL", "2024-03-01", None, 100)
        .await
        .unwrap();

    assert_eq!(trades.len(), 2);
    // B has no transaction date; its filing date (2024-02-20) wins the sort.
    assert_eq!(trades[0].insider_name.as_deref(), Some("B"));
    assert_eq!(trades[0].effective_date(), "2024-02-20");
}

#[tokio::test]
async fn market_cap_reads_company_facts() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/company/facts")
                .query_param("ticker", "AAPL");
            then.status(200)
                .json_body(json!({"company_facts": {"ticker": "AAPL", "market_cap": 2.95e12}}));
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
async fn non_success_status_is_a_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/prices/");
            then.status(429).body("rate limited");
        })
        .await;

    let c = connector(&server);
    let err = c
        .as_prices_provider()
        .unwrap()
        .prices("AAPL", "2024-01-01", "2024-01-03")
        .await
        .unwrap_err();
    match err {
        MercatoError::Fetch { connector, msg } => {
            assert_eq!(connector, "mercato-findata");
            assert!(msg.contains("429"));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn unparsable_payload_is_a_normalization_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/prices/");
            then.status(200).body("<html>not json</html>");
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
async fn requests_without_a_key_omit_the_header() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/prices/");
            then.status(200).json_body(json!({"prices": []}));
        })
        .await;

    let c = FindataConnector::builder()
        .base_url(server.base_url())
        .build();
    let bars = c
        .as_prices_provider()
        .unwrap()
        .prices("AAPL", "2024-01-01", "2024-01-03")
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(bars.is_empty());
}
