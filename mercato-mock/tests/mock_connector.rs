use mercato_core::connector::{
    FinancialMetricsProvider, LineItemsProvider, MercatoConnector, PricesProvider,
};
use mercato_core::{MercatoError, Period};
use mercato_mock::MockConnector;

#[tokio::test]
async fn advertises_every_capability() {
    let mock = MockConnector::new();
    assert!(mock.as_prices_provider().is_some());
    assert!(mock.as_financial_metrics_provider().is_some());
    assert!(mock.as_line_items_provider().is_some());
    assert!(mock.as_insider_trades_provider().is_some());
    assert!(mock.as_company_news_provider().is_some());
    assert!(mock.as_market_cap_provider().is_some());
}

#[tokio::test]
async fn fail_symbol_forces_fetch_errors() {
    let mock = MockConnector::new();
    let err = mock
        .as_prices_provider()
        .unwrap()
        .prices("FAIL", "2024-01-01", "2024-01-05")
        .await
        .unwrap_err();
    assert!(matches!(err, MercatoError::Fetch { .. }));
}

#[tokio::test]
async fn metrics_respect_end_date_and_limit() {
    let mock = MockConnector::new();
    let rows = mock
        .as_financial_metrics_provider()
        .unwrap()
        .financial_metrics("AAPL", "2023-06-30", Period::Annual, 2)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|m| m.report_period.as_str() <= "2023-06-30"));
}

#[tokio::test]
async fn unknown_line_items_are_skipped() {
    let mock = MockConnector::new();
    let items = mock
        .as_line_items_provider()
        .unwrap()
        .line_items(
            "AAPL",
            &["net_income".to_string(), "made_up_item".to_string()],
            "2024-12-31",
            Period::Annual,
            1,
        )
        .await
        .unwrap();
    assert!(items.iter().all(|i| i.name == "net_income"));
    assert!(!items.is_empty());
}
