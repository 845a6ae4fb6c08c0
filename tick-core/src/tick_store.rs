//! Range retrieval over the quote and swap backing stores.
//!
//! `TickStore` ties an `InstrumentRegistry` to a quote store and a swap store.
//! Reads pair every persisted row with the swap entries in force at its
//! timestamp; deletes only ever touch quote rows.

use crate::config::StoreConfig;
use crate::swap_window::SwapWindow;
use chrono::{DateTime, Duration, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use ticks::error::Result;
use ticks::{InstrumentRegistry, NullTick, QuoteStore, SwapStore, Tick, TickError, TickRecord};

/// First and last timestamp held by a quote store. Both are `None` when the
/// store is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

pub struct TickStore<Q, S> {
    registry: Arc<InstrumentRegistry>,
    quotes: Q,
    swaps: S,
    swap_bucket: Duration,
}

impl<Q: QuoteStore, S: SwapStore> TickStore<Q, S> {
    /// Creates a new TickStore.
    ///
    /// # Arguments
    ///
    /// * `registry` - The registry records are encoded against.
    /// * `quotes` - The quote backing store.
    /// * `swaps` - The swap backing store.
    /// * `config` - Supplies the swap bucket width used by [`TickStore::save`].
    ///
    /// # Returns
    ///
    /// A new `TickStore`.
    pub fn new(registry: Arc<InstrumentRegistry>, quotes: Q, swaps: S, config: &StoreConfig) -> Self {
        Self {
            registry,
            quotes,
            swaps,
            swap_bucket: config.swap_bucket(),
        }
    }

    pub fn registry(&self) -> &Arc<InstrumentRegistry> {
        &self.registry
    }

    /// Direct access to the quote backing store, for inspection and for
    /// writing rows that bypass [`TickStore::save`].
    pub fn quotes(&self) -> &Q {
        &self.quotes
    }

    /// Direct access to the swap backing store, for inspection.
    pub fn swaps(&self) -> &S {
        &self.swaps
    }

    /// Fetches every tick with `start <= timestamp < end`, oldest first.
    ///
    /// The swap window and the quote rows are requested concurrently. Each
    /// record carries the swaps in force at its own timestamp. Either the
    /// whole sequence is returned or the first store error is.
    pub async fn fetch(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<TickRecord>> {
        self.fetch_with_swaps_from(start, end, start).await
    }

    // Quotes come from `[start, end)`, swaps from `[swaps_start, end)`.
    async fn fetch_with_swaps_from(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        swaps_start: DateTime<Utc>,
    ) -> Result<Vec<TickRecord>> {
        let (window, rows) = futures::try_join!(
            SwapWindow::load(&self.swaps, swaps_start, end),
            self.quotes.query_range(start, end)
        )?;
        debug!("Fetched {} rows for [{}, {})", rows.len(), start, end);

        Ok(rows
            .into_iter()
            .map(|row| {
                let mut record = TickRecord::from_row(row);
                record.attach_swaps(window.swaps_applicable_at(record.timestamp()));
                record
            })
            .collect())
    }

    /// Returns the tick stored at exactly `timestamp`, or a null tick if
    /// there is none. When several rows share the timestamp the first stored
    /// wins.
    ///
    /// Swaps are read from the start of the swap bucket holding `timestamp`,
    /// so the tick carries the bucket's swap just as it does through
    /// [`TickStore::fetch`].
    pub async fn tick_at(&self, timestamp: DateTime<Utc>) -> Result<Tick> {
        let swaps_start = self.bucket_start(timestamp)?;
        let records = self
            .fetch_with_swaps_from(timestamp, timestamp + Duration::nanoseconds(1), swaps_start)
            .await?;
        Ok(match records.into_iter().next() {
            Some(record) => Tick::Record(record),
            None => Tick::Null(NullTick::new(timestamp)),
        })
    }

    /// Returns the oldest and newest stored timestamps.
    pub async fn extent(&self) -> Result<Extent> {
        if !self.quotes.exists().await? {
            return Ok(Extent::default());
        }
        Ok(Extent {
            start: self.quotes.min_timestamp().await?,
            end: self.quotes.max_timestamp().await?,
        })
    }

    /// Deletes every quote row with `start <= timestamp < end`. Swap entries
    /// are kept.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The number of rows removed.
    pub async fn delete(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<usize> {
        let removed = self.quotes.delete_range(start, end).await?;
        info!("Deleted {} ticks in [{}, {})", removed, start, end);
        Ok(removed)
    }

    /// Persists a freshly encoded record.
    ///
    /// The quote row is always written. A record's swap entry is written only
    /// if its instrument has no entry yet in the swap bucket containing the
    /// record's timestamp.
    pub async fn save(&self, record: &TickRecord) -> Result<()> {
        record.persist(&self.quotes).await?;

        if record.swaps().is_empty() {
            return Ok(());
        }
        let bucket_start = self.bucket_start(record.timestamp())?;
        let existing: HashSet<_> = self
            .swaps
            .query_range(bucket_start, bucket_start + self.swap_bucket)
            .await?
            .into_iter()
            .map(|entry| entry.instrument_id)
            .collect();

        let mut missing: Vec<_> = record
            .swaps()
            .values()
            .filter(|entry| !existing.contains(&entry.instrument_id))
            .copied()
            .collect();
        missing.sort_by_key(|entry| entry.instrument_id);
        for entry in missing {
            debug!(
                "Recording swap for instrument {} at {}",
                entry.instrument_id, entry.timestamp
            );
            self.swaps.insert(entry).await?;
        }
        Ok(())
    }

    fn bucket_start(&self, timestamp: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let width = self.swap_bucket.num_seconds().max(1);
        let secs = timestamp.timestamp();
        DateTime::from_timestamp(secs - secs.rem_euclid(width), 0).ok_or_else(|| {
            TickError::InvalidArgument(format!("timestamp out of range: {}", timestamp))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryQuoteStore, MemorySwapStore};
    use ticks::{Quote, SwapEntry};

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn store_with_bucket(secs: i64) -> TickStore<MemoryQuoteStore, MemorySwapStore> {
        let config = StoreConfig {
            swap_bucket_secs: secs,
            ..StoreConfig::default()
        };
        TickStore::new(
            Arc::new(InstrumentRegistry::new()),
            MemoryQuoteStore::new(),
            MemorySwapStore::new(),
            &config,
        )
    }

    #[tokio::test]
    async fn test_save_writes_one_swap_per_bucket() -> Result<()> {
        let store = store_with_bucket(100);
        let registry = Arc::clone(store.registry());

        for (secs, buy) in [(100, 0.1), (150, 0.2), (210, 0.3)] {
            let record = TickRecord::encode(
                &registry,
                vec![("USD/JPY", Quote::new(110.0, 110.05, buy, -buy))],
                ts(secs),
            );
            store.save(&record).await?;
        }

        let swaps = store.swaps().query_range(ts(0), ts(1000)).await?;
        assert_eq!(
            swaps,
            vec![
                SwapEntry::new(0, 0.1, -0.1, ts(100)),
                SwapEntry::new(0, 0.3, -0.3, ts(210)),
            ]
        );
        assert_eq!(store.quotes().len().await, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_saved_records_read_back_with_bucketed_swaps() -> Result<()> {
        let store = store_with_bucket(100);
        let registry = Arc::clone(store.registry());

        let first = TickRecord::encode(&registry, vec![("EUR/USD", Quote::new(1.2, 1.21, 0.5, -0.5))], ts(100));
        let second = TickRecord::encode(&registry, vec![("EUR/USD", Quote::new(1.3, 1.31, 0.9, -0.9))], ts(150));
        store.save(&first).await?;
        store.save(&second).await?;

        let fetched = store.fetch(ts(0), ts(1000)).await?;
        // The second tick shares the first one's bucket, so it reads the
        // bucket's swap rather than the figure it was encoded with.
        assert_eq!(
            fetched[1].decode(&registry, "EUR/USD")?,
            Quote::new(1.3, 1.31, 0.5, -0.5)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_tick_at_falls_back_to_null_tick() -> Result<()> {
        let store = store_with_bucket(100);
        let registry = Arc::clone(store.registry());
        let record = TickRecord::encode(&registry, vec![("USD/JPY", Quote::with_prices(110.0, 110.1))], ts(100));
        store.save(&record).await?;

        let hit = store.tick_at(ts(100)).await?;
        assert_eq!(hit.get(&registry, "USD/JPY")?.map(|q| q.bid), Some(110.0));

        let miss = store.tick_at(ts(101)).await?;
        assert!(miss.is_null());
        assert_eq!(miss.timestamp(), ts(101));
        Ok(())
    }

    #[tokio::test]
    async fn test_tick_at_carries_swap_from_earlier_in_bucket() -> Result<()> {
        let store = store_with_bucket(100);
        let registry = Arc::clone(store.registry());

        let first = TickRecord::encode(&registry, vec![("EUR/USD", Quote::new(1.2, 1.21, 0.5, -0.5))], ts(100));
        let second = TickRecord::encode(&registry, vec![("EUR/USD", Quote::new(1.3, 1.31, 0.9, -0.9))], ts(150));
        store.save(&first).await?;
        store.save(&second).await?;

        let expected = Quote::new(1.3, 1.31, 0.5, -0.5);
        let tick = store.tick_at(ts(150)).await?;
        assert_eq!(tick.get(&registry, "EUR/USD")?, Some(expected));

        let fetched = store.fetch(ts(100), ts(200)).await?;
        assert_eq!(fetched[1].decode(&registry, "EUR/USD")?, expected);
        Ok(())
    }

    #[test]
    fn test_bucket_start_floors_to_width() {
        let store = store_with_bucket(60);
        assert_eq!(store.bucket_start(ts(125)).unwrap(), ts(120));
        assert_eq!(store.bucket_start(ts(120)).unwrap(), ts(120));
        assert_eq!(store.bucket_start(ts(-1)).unwrap(), ts(-60));
    }
}
