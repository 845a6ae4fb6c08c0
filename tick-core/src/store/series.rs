//! Timestamp-ordered storage shared by the in-process backends.

use chrono::{DateTime, Utc};
use ticks::{QuoteRow, SwapEntry};

pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Timestamped for QuoteRow {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Timestamped for SwapEntry {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// A vector kept sorted by timestamp.
///
/// Items sharing a timestamp keep insertion order, so range reads are stable.
#[derive(Debug, Clone)]
pub struct OrderedSeries<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedSeries<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Timestamped> From<Vec<T>> for OrderedSeries<T> {
    fn from(mut items: Vec<T>) -> Self {
        // Stable, so ties keep the order they were saved in.
        items.sort_by_key(Timestamped::timestamp);
        Self { items }
    }
}

impl<T: Timestamped> OrderedSeries<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts after every item with a timestamp not later than `item`'s.
    pub fn insert(&mut self, item: T) {
        let at = self
            .items
            .partition_point(|existing| existing.timestamp() <= item.timestamp());
        self.items.insert(at, item);
    }

    fn bounds(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> (usize, usize) {
        let lo = self.items.partition_point(|item| item.timestamp() < start);
        let hi = self.items.partition_point(|item| item.timestamp() < end);
        (lo, hi.max(lo))
    }

    /// Items with `start <= timestamp < end`.
    pub fn range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> &[T] {
        let (lo, hi) = self.bounds(start, end);
        &self.items[lo..hi]
    }

    /// Removes items with `start <= timestamp < end` and returns how many
    /// were removed.
    pub fn remove_range(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> usize {
        let (lo, hi) = self.bounds(start, end);
        self.items.drain(lo..hi).count()
    }

    pub fn first_timestamp(&self) -> Option<DateTime<Utc>> {
        self.items.first().map(Timestamped::timestamp)
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.items.last().map(Timestamped::timestamp)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
