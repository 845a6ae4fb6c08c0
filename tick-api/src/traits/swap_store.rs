//! Defines the `SwapStore` trait for the swap rate series.
//!
//! Swap entries are written far less often than quotes (one per instrument
//! per bucket) and are never removed together with quote rows.

use crate::model::swap::SwapEntry;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait SwapStore: Send + Sync {
    /// Appends a swap entry.
    async fn insert(&self, entry: SwapEntry) -> Result<()>;

    /// Returns every entry with `start <= timestamp < end`, ascending by
    /// timestamp.
    async fn query_range(&self, start: DateTime<Utc>, end: DateTime<Utc>)
        -> Result<Vec<SwapEntry>>;
}
