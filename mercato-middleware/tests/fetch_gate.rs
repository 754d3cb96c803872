use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use mercato_core::cache::Cache;
use mercato_core::connector::{MercatoConnector, PricesProvider};
use mercato_core::{MercatoError, Price};
use mercato_middleware::ConnectorBuilder;
use mercato_mock::MockConnector;

/// Delays every fetch so concurrent requests overlap deterministically.
struct SlowPricesConnector {
    inner: Arc<dyn MercatoConnector>,
    count: Arc<AtomicUsize>,
}

#[async_trait]
impl MercatoConnector for SlowPricesConnector {
    fn name(&self) -> &'static str {
        "slow"
    }
    fn as_prices_provider(&self) -> Option<&dyn PricesProvider> {
        Some(self as &dyn PricesProvider)
    }
}

#[async_trait]
impl PricesProvider for SlowPricesConnector {
    async fn prices(
        &self,
        ticker: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Vec<Price>, MercatoError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        self.inner
            .as_prices_provider()
            .unwrap()
            .prices(ticker, start_date, end_date)
            .await
    }
}

#[tokio::test]
async fn concurrent_requests_for_one_key_fetch_once() {
    let count = Arc::new(AtomicUsize::new(0));
    let raw: Arc<dyn MercatoConnector> = Arc::new(SlowPricesConnector {
        inner: Arc::new(MockConnector::new()),
        count: count.clone(),
    });
    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(Arc::new(Cache::new()))
        .build();

    let a = {
        let c = wrapped.clone();
        tokio::spawn(async move {
            c.as_prices_provider()
                .unwrap()
                .prices("AAPL", "2024-01-01", "2024-01-05")
                .await
        })
    };
    let b = {
        let c = wrapped.clone();
        tokio::spawn(async move {
            c.as_prices_provider()
                .unwrap()
                .prices("AAPL", "2024-01-01", "2024-01-05")
                .await
        })
    };

    let ra = a.await.unwrap().unwrap();
    let rb = b.await.unwrap().unwrap();
    assert_eq!(ra, rb);
    assert_eq!(
        count.load(Ordering::SeqCst),
        1,
        "second in-flight request must block on the gate and reuse the merge"
    );
}

#[tokio::test]
async fn different_keys_do_not_serialize() {
    let count = Arc::new(AtomicUsize::new(0));
    let raw: Arc<dyn MercatoConnector> = Arc::new(SlowPricesConnector {
        inner: Arc::new(MockConnector::new()),
        count: count.clone(),
    });
    let wrapped = ConnectorBuilder::new(raw)
        .with_cache(Arc::new(Cache::new()))
        .build();

    let a = {
        let c = wrapped.clone();
        tokio::spawn(async move {
            c.as_prices_provider()
                .unwrap()
                .prices("AAPL", "2024-01-01", "2024-01-05")
                .await
        })
    };
    let b = {
        let c = wrapped.clone();
        tokio::spawn(async move {
            c.as_prices_provider()
                .unwrap()
                .prices("MSFT", "2024-01-01", "2024-01-05")
                .await
        })
    };

    assert!(a.await.unwrap().is_ok());
    assert!(b.await.unwrap().is_ok());
    assert_eq!(count.load(Ordering::SeqCst), 2);
}
