//! Swap lookups over a bounded time window.
//!
//! A `SwapWindow` is loaded once per fetch and answers "which swap rate was in
//! force for instrument X at instant T": the entry with the greatest timestamp
//! not after T. Only entries inside the window's `[start, end)` take part.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use ticks::{InstrumentId, Quote, RawQuote, SwapEntry, SwapStore};

#[derive(Debug, Clone)]
pub struct SwapWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    /// Per instrument, ascending by timestamp.
    entries: HashMap<InstrumentId, Vec<SwapEntry>>,
}

impl SwapWindow {
    /// Loads every swap entry with `start <= timestamp < end` using a single
    /// range query.
    ///
    /// # Arguments
    ///
    /// * `store` - The swap backing store.
    /// * `start` - Inclusive lower bound.
    /// * `end` - Exclusive upper bound.
    ///
    /// # Returns
    ///
    /// * `Ok(SwapWindow)` indexed per instrument.
    /// * `Err` with the store's error, unchanged.
    pub async fn load<S>(store: &S, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self>
    where
        S: SwapStore + ?Sized,
    {
        let entries = store.query_range(start, end).await?;
        log::debug!(
            "Loaded {} swap entries for [{}, {})",
            entries.len(),
            start,
            end
        );
        Ok(Self::from_entries(start, end, entries))
    }

    /// Builds a window from entries already in hand. Entries outside
    /// `[start, end)` are dropped.
    pub fn from_entries(start: DateTime<Utc>, end: DateTime<Utc>, entries: Vec<SwapEntry>) -> Self {
        let mut grouped: HashMap<InstrumentId, Vec<SwapEntry>> = HashMap::new();
        for entry in entries
            .into_iter()
            .filter(|entry| entry.timestamp >= start && entry.timestamp < end)
        {
            grouped.entry(entry.instrument_id).or_default().push(entry);
        }
        for series in grouped.values_mut() {
            series.sort_by_key(|entry| entry.timestamp);
        }

        Self {
            start,
            end,
            entries: grouped,
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Number of entries held, across all instruments.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns, for every instrument in the window, the entry in force at
    /// `timestamp`. Instruments whose first entry is later are left out.
    pub fn swaps_applicable_at(&self, timestamp: DateTime<Utc>) -> HashMap<InstrumentId, SwapEntry> {
        self.entries
            .iter()
            .filter_map(|(&id, series)| latest_at(series, timestamp).map(|entry| (id, *entry)))
            .collect()
    }

    /// Returns the entry in force for one instrument at `timestamp`.
    pub fn swap_for(&self, instrument_id: InstrumentId, timestamp: DateTime<Utc>) -> Option<SwapEntry> {
        self.entries
            .get(&instrument_id)
            .and_then(|series| latest_at(series, timestamp))
            .copied()
    }

    /// Reconstructs a full quote from an externally supplied bid/ask pair.
    ///
    /// Swap figures are zero when no entry applies at the raw quote's
    /// timestamp.
    pub fn quote_from_raw(&self, instrument_id: InstrumentId, raw: &RawQuote) -> Quote {
        match self.swap_for(instrument_id, raw.timestamp) {
            Some(swap) => Quote::new(raw.bid, raw.ask, swap.buy_swap, swap.sell_swap),
            None => Quote::with_prices(raw.bid, raw.ask),
        }
    }
}

// Binary search for the last entry at or before `timestamp`.
fn latest_at(series: &[SwapEntry], timestamp: DateTime<Utc>) -> Option<&SwapEntry> {
    let after = series.partition_point(|entry| entry.timestamp <= timestamp);
    after.checked_sub(1).map(|i| &series[i])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySwapStore;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    fn window() -> SwapWindow {
        SwapWindow::from_entries(
            ts(0),
            ts(1000),
            vec![
                SwapEntry::new(0, 0.2, -0.2, ts(150)),
                SwapEntry::new(0, 0.1, -0.1, ts(50)),
                SwapEntry::new(1, 0.5, -0.5, ts(120)),
            ],
        )
    }

    #[test]
    fn test_nearest_preceding_entry() {
        let window = window();

        assert_eq!(window.swaps_applicable_at(ts(100))[&0].buy_swap, 0.1);
        assert_eq!(window.swaps_applicable_at(ts(200))[&0].buy_swap, 0.2);
        assert!(!window.swaps_applicable_at(ts(10)).contains_key(&0));
    }

    #[test]
    fn test_exact_timestamp_is_in_force() {
        let window = window();
        assert_eq!(window.swap_for(0, ts(150)).map(|s| s.buy_swap), Some(0.2));
        assert_eq!(window.swap_for(0, ts(149)).map(|s| s.buy_swap), Some(0.1));
    }

    #[test]
    fn test_instruments_are_resolved_independently() {
        let window = window();

        let at_100 = window.swaps_applicable_at(ts(100));
        assert_eq!(at_100.len(), 1);
        assert!(!at_100.contains_key(&1));

        let at_130 = window.swaps_applicable_at(ts(130));
        assert_eq!(at_130.len(), 2);
        assert_eq!(at_130[&1], SwapEntry::new(1, 0.5, -0.5, ts(120)));
        assert_eq!(window.swap_for(2, ts(130)), None);
    }

    #[test]
    fn test_entries_outside_window_are_ignored() {
        let window = SwapWindow::from_entries(
            ts(100),
            ts(200),
            vec![
                SwapEntry::new(0, 0.1, -0.1, ts(50)),
                SwapEntry::new(0, 0.3, -0.3, ts(200)),
            ],
        );

        assert!(window.is_empty());
        assert_eq!(window.swap_for(0, ts(150)), None);
    }

    #[test]
    fn test_quote_from_raw() {
        let window = window();

        let enriched = window.quote_from_raw(0, &RawQuote::new(110.0, 110.05, ts(160)));
        assert_eq!(enriched, Quote::new(110.0, 110.05, 0.2, -0.2));

        let bare = window.quote_from_raw(0, &RawQuote::new(110.0, 110.05, ts(10)));
        assert_eq!(bare, Quote::with_prices(110.0, 110.05));
    }

    #[tokio::test]
    async fn test_load_queries_store_range() -> Result<()> {
        let store = MemorySwapStore::with_entries(vec![
            SwapEntry::new(0, 0.1, -0.1, ts(50)),
            SwapEntry::new(0, 0.2, -0.2, ts(150)),
            SwapEntry::new(0, 0.3, -0.3, ts(300)),
        ]);

        let window = SwapWindow::load(&store, ts(0), ts(300)).await?;
        assert_eq!(window.len(), 2);
        assert_eq!(window.swap_for(0, ts(1000)).map(|s| s.buy_swap), Some(0.2));
        Ok(())
    }
}
