//! Defines the `QuoteStore` trait for persisted tick rows.
//!
//! A quote store is an ordered, time-indexed collection of `QuoteRow`s. The
//! tick store only needs range reads, range deletes and the two extremal
//! timestamps, so any backend offering an index on `timestamp` can sit behind
//! this trait (an in-memory series, a file snapshot, a document database).
//!
//! All ranges are half open: `start <= timestamp < end`.

use crate::model::record::QuoteRow;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Appends a row. Rows sharing a timestamp keep their insertion order.
    async fn insert(&self, row: QuoteRow) -> Result<()>;

    /// Returns every row with `start <= timestamp < end`, ascending by
    /// timestamp.
    async fn query_range(&self, start: DateTime<Utc>, end: DateTime<Utc>)
        -> Result<Vec<QuoteRow>>;

    /// Removes every row with `start <= timestamp < end`.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The number of rows removed.
    async fn delete_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<usize>;

    /// Returns true if the store holds at least one row.
    async fn exists(&self) -> Result<bool>;

    /// Timestamp of the oldest row, without loading row values.
    async fn min_timestamp(&self) -> Result<Option<DateTime<Utc>>>;

    /// Timestamp of the newest row, without loading row values.
    async fn max_timestamp(&self) -> Result<Option<DateTime<Utc>>>;
}
