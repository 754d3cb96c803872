//! Per-(entity kind, ticker) record cache.
//!
//! The cache is an incremental merge store, not a TTL cache: past financial
//! history never changes, so records are kept indefinitely and correctness is
//! bounded only by the dedup key. Only the current-period `ttm` metrics row
//! can go stale, which callers accept.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;

use mercato_types::{Capability, CompanyNews, FinancialMetrics, InsiderTrade, LineItem, Price};

/// Order a cached collection is kept in, by temporal key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first. Used for prices, which feed charting and indicator code
    /// that walks the series chronologically.
    Ascending,
    /// Newest first. Used for everything else.
    Descending,
}

/// A record the cache knows how to merge, deduplicate, and order.
pub trait CacheRecord: Clone + Send + 'static {
    /// Sort order the cached collection re-establishes after every merge.
    const ORDER: SortOrder;

    /// The field combination that identifies "the same fact". A merge
    /// replaces an existing record with an equal dedup key instead of
    /// appending a duplicate.
    fn dedup_key(&self) -> String;

    /// The `YYYY-MM-DD` key used for ordering and range filtering.
    fn temporal_key(&self) -> &str;
}

impl CacheRecord for Price {
    const ORDER: SortOrder = SortOrder::Ascending;

    fn dedup_key(&self) -> String {
        self.time.clone()
    }

    fn temporal_key(&self) -> &str {
        &self.time
    }
}

impl CacheRecord for FinancialMetrics {
    const ORDER: SortOrder = SortOrder::Descending;

    fn dedup_key(&self) -> String {
        self.report_period.clone()
    }

    fn temporal_key(&self) -> &str {
        &self.report_period
    }
}

impl CacheRecord for LineItem {
    const ORDER: SortOrder = SortOrder::Descending;

    fn dedup_key(&self) -> String {
        format!("{}|{}", self.report_period, self.name)
    }

    fn temporal_key(&self) -> &str {
        &self.report_period
    }
}

impl CacheRecord for InsiderTrade {
    const ORDER: SortOrder = SortOrder::Descending;

    fn dedup_key(&self) -> String {
        format!(
            "{}|{}|{}|{}",
            self.filing_date,
            self.transaction_date.as_deref().unwrap_or(""),
            self.insider_name.as_deref().unwrap_or(""),
            self.shares.unwrap_or(0.0),
        )
    }

    fn temporal_key(&self) -> &str {
        self.effective_date()
    }
}

impl CacheRecord for CompanyNews {
    const ORDER: SortOrder = SortOrder::Descending;

    fn dedup_key(&self) -> String {
        format!("{}|{}", self.date, self.url)
    }

    fn temporal_key(&self) -> &str {
        &self.date
    }
}

/// Ticker-keyed store for one entity kind.
pub struct RecordStore<T> {
    inner: Mutex<HashMap<String, Vec<T>>>,
}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: CacheRecord> RecordStore<T> {
    /// Everything cached for `ticker`, unfiltered; empty when nothing is
    /// cached. Callers cannot distinguish "miss" from "empty" and never need
    /// to.
    #[must_use]
    pub fn get(&self, ticker: &str) -> Vec<T> {
        self.inner
            .lock()
            .expect("cache mutex poisoned")
            .get(ticker)
            .cloned()
            .unwrap_or_default()
    }

    /// Merge `incoming` into the cached collection for `ticker`.
    ///
    /// A record whose dedup key matches an existing one replaces it
    /// (providers may refresh stale fields); everything else is appended.
    /// The kind-specific sort order is re-established afterwards.
    pub fn merge(&self, ticker: &str, incoming: Vec<T>) {
        if incoming.is_empty() {
            return;
        }
        let mut guard = self.inner.lock().expect("cache mutex poisoned");
        let existing = guard.entry(ticker.to_string()).or_default();

        let mut index: HashMap<String, usize> = existing
            .iter()
            .enumerate()
            .map(|(i, r)| (r.dedup_key(), i))
            .collect();

        for record in incoming {
            let key = record.dedup_key();
            match index.get(&key).copied() {
                Some(i) => existing[i] = record,
                None => {
                    index.insert(key, existing.len());
                    existing.push(record);
                }
            }
        }

        match T::ORDER {
            SortOrder::Ascending => {
                existing.sort_by(|a, b| a.temporal_key().cmp(b.temporal_key()));
            }
            SortOrder::Descending => {
                existing.sort_by(|a, b| b.temporal_key().cmp(a.temporal_key()));
            }
        }
    }

    fn clear(&self) {
        self.inner.lock().expect("cache mutex poisoned").clear();
    }
}

/// Keep only records whose temporal key satisfies
/// `start_date <= key <= end_date` (inclusive; `start_date` `None` means
/// unbounded below). Store order is preserved.
#[must_use]
pub fn range_filtered<T: CacheRecord>(
    records: Vec<T>,
    start_date: Option<&str>,
    end_date: &str,
) -> Vec<T> {
    records
        .into_iter()
        .filter(|r| {
            let key = r.temporal_key();
            start_date.is_none_or(|s| key >= s) && key <= end_date
        })
        .collect()
}

/// Process-wide record cache shared by every connector behind the caching
/// middleware: one typed store per cached entity kind, plus the fetch gate.
/// Market cap has no natural range key and is never cached.
#[derive(Default)]
pub struct Cache {
    /// Daily OHLCV bars.
    pub prices: RecordStore<Price>,
    /// Financial metric rows.
    pub financial_metrics: RecordStore<FinancialMetrics>,
    /// Statement line items.
    pub line_items: RecordStore<LineItem>,
    /// Insider transactions.
    pub insider_trades: RecordStore<InsiderTrade>,
    /// News articles.
    pub company_news: RecordStore<CompanyNews>,
    gate: FetchGate,
}

impl Cache {
    /// Fresh, empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize fetches for one `(capability, ticker)` key.
    ///
    /// Holding the returned guard guarantees at most one network fetch is in
    /// flight per key; a concurrent second request blocks here, then
    /// re-checks the cache and reuses the merged result instead of fetching
    /// again.
    pub async fn fetch_gate(&self, capability: Capability, ticker: &str) -> OwnedMutexGuard<()> {
        self.gate.acquire(capability, ticker).await
    }

    /// Drop every cached record for every ticker.
    pub fn clear(&self) {
        self.prices.clear();
        self.financial_metrics.clear();
        self.line_items.clear();
        self.insider_trades.clear();
        self.company_news.clear();
    }
}

#[derive(Default)]
struct FetchGate {
    locks: Mutex<HashMap<(Capability, String), Arc<tokio::sync::Mutex<()>>>>,
}

impl FetchGate {
    async fn acquire(&self, capability: Capability, ticker: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("gate mutex poisoned");
            locks
                .entry((capability, ticker.to_string()))
                .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
