use crate::store::series::OrderedSeries;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ticks::{QuoteRow, QuoteStore, SwapEntry, SwapStore};
use tokio::sync::RwLock;

/// In-memory quote store for testing and short-lived sessions.
///
/// Implements `QuoteStore` over a timestamp-ordered vector behind a Tokio
/// `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryQuoteStore {
    rows: RwLock<OrderedSeries<QuoteRow>>,
}

impl MemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `rows`, in any order.
    pub fn with_rows(rows: Vec<QuoteRow>) -> Self {
        Self {
            rows: RwLock::new(OrderedSeries::from(rows)),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl QuoteStore for MemoryQuoteStore {
    async fn insert(&self, row: QuoteRow) -> Result<()> {
        self.rows.write().await.insert(row);
        Ok(())
    }

    async fn query_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<QuoteRow>> {
        Ok(self.rows.read().await.range(start, end).to_vec())
    }

    async fn delete_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<usize> {
        Ok(self.rows.write().await.remove_range(start, end))
    }

    async fn exists(&self) -> Result<bool> {
        Ok(!self.rows.read().await.is_empty())
    }

    async fn min_timestamp(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.rows.read().await.first_timestamp())
    }

    async fn max_timestamp(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.rows.read().await.last_timestamp())
    }
}

/// In-memory swap store (counterpart of `MemoryQuoteStore`).
#[derive(Debug, Default)]
pub struct MemorySwapStore {
    entries: RwLock<OrderedSeries<SwapEntry>>,
}

impl MemorySwapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<SwapEntry>) -> Self {
        Self {
            entries: RwLock::new(OrderedSeries::from(entries)),
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl SwapStore for MemorySwapStore {
    async fn insert(&self, entry: SwapEntry) -> Result<()> {
        self.entries.write().await.insert(entry);
        Ok(())
    }

    async fn query_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<SwapEntry>> {
        Ok(self.entries.read().await.range(start, end).to_vec())
    }
}
