//! Packed multi-instrument tick records.
//!
//! A `TickRecord` stores the bid/ask of every quoted instrument in one flat
//! array: instrument `i` occupies offsets `2 * i` (bid) and `2 * i + 1` (ask).
//! The array is only as long as the highest id quoted in that record needs,
//! and slots of instruments that were not quoted stay `None`.

use crate::error::{Result, TickError};
use crate::model::instrument::{Instrument, InstrumentId};
use crate::model::instrument_registry::InstrumentRegistry;
use crate::model::quote::Quote;
use crate::model::swap::SwapEntry;
use crate::traits::quote_store::QuoteStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The persisted form of a tick: packed prices and their timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRow {
    pub values: Vec<Option<f64>>,
    pub timestamp: DateTime<Utc>,
}

impl QuoteRow {
    pub fn new(values: Vec<Option<f64>>, timestamp: DateTime<Utc>) -> Self {
        Self { values, timestamp }
    }
}

/// Bid/ask quotes for a subset of instruments at one instant, with the swap
/// entries that apply to them.
#[derive(Debug, Clone, PartialEq)]
pub struct TickRecord {
    values: Vec<Option<f64>>,
    timestamp: DateTime<Utc>,
    swaps: HashMap<InstrumentId, SwapEntry>,
}

impl TickRecord {
    /// Encodes a set of named quotes into a packed record.
    ///
    /// Unknown names are registered on the way. The swap figures carried by
    /// each quote become that instrument's swap entry, stamped with
    /// `timestamp`.
    ///
    /// # Arguments
    ///
    /// * `registry` - Registry resolving names to slot offsets.
    /// * `quotes` - Instrument name and quote pairs.
    /// * `timestamp` - The instant of the tick.
    ///
    /// # Returns
    ///
    /// A new `TickRecord` whose array covers the highest id quoted.
    pub fn encode<I, S>(registry: &InstrumentRegistry, quotes: I, timestamp: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = (S, Quote)>,
        S: AsRef<str>,
    {
        let mut values = Vec::new();
        let mut swaps = HashMap::new();

        for (name, quote) in quotes {
            let instrument = registry.get_or_create(name.as_ref());
            let id = instrument.get_id();
            if values.len() <= instrument.ask_offset() {
                values.resize(instrument.ask_offset() + 1, None);
            }
            values[instrument.bid_offset()] = Some(quote.bid);
            values[instrument.ask_offset()] = Some(quote.ask);
            swaps.insert(
                id,
                SwapEntry::new(id, quote.buy_swap, quote.sell_swap, timestamp),
            );
        }

        Self {
            values,
            timestamp,
            swaps,
        }
    }

    /// Rebuilds a record from a persisted row. No swaps are attached yet.
    pub fn from_row(row: QuoteRow) -> Self {
        Self {
            values: row.values,
            timestamp: row.timestamp,
            swaps: HashMap::new(),
        }
    }

    /// Returns the persisted form of this record. Swaps are stored separately.
    pub fn to_row(&self) -> QuoteRow {
        QuoteRow::new(self.values.clone(), self.timestamp)
    }

    /// Attaches the swap entries in force at this record's timestamp.
    pub fn attach_swaps(&mut self, swaps: HashMap<InstrumentId, SwapEntry>) {
        self.swaps = swaps;
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn swaps(&self) -> &HashMap<InstrumentId, SwapEntry> {
        &self.swaps
    }

    /// Decodes the quote of a single instrument.
    ///
    /// # Arguments
    ///
    /// * `registry` - The registry the record was encoded against.
    /// * `name` - The instrument name.
    ///
    /// # Returns
    ///
    /// * `Ok(Quote)` with swap figures taken from the attached swaps (zero if
    ///   none is attached for the instrument).
    /// * `Err(TickError::InvalidArgument)` if the name is not registered or
    ///   the record holds no quote for it.
    pub fn decode(&self, registry: &InstrumentRegistry, name: &str) -> Result<Quote> {
        let instrument = registry
            .get(name)
            .ok_or_else(|| TickError::InvalidArgument(format!("unknown instrument: {}", name)))?;
        self.quote_for(&instrument)
    }

    fn quote_for(&self, instrument: &Instrument) -> Result<Quote> {
        // A row whose length equals the ask offset passes here and is
        // rejected by the slot lookup below.
        if instrument.ask_offset() > self.values.len() {
            return Err(TickError::InvalidArgument(format!(
                "instrument {} is outside a tick of {} values",
                instrument,
                self.values.len()
            )));
        }

        let slot = |offset: usize| self.values.get(offset).copied().flatten();
        let (Some(bid), Some(ask)) = (slot(instrument.bid_offset()), slot(instrument.ask_offset()))
        else {
            return Err(TickError::InvalidArgument(format!(
                "no quote for instrument {} at {}",
                instrument, self.timestamp
            )));
        };

        let (buy_swap, sell_swap) = self
            .swaps
            .get(&instrument.get_id())
            .map_or((0.0, 0.0), |swap| (swap.buy_swap, swap.sell_swap));

        Ok(Quote::new(bid, ask, buy_swap, sell_swap))
    }

    /// Returns an iterator over `(name, quote)` for every registered
    /// instrument this record holds a quote for, in ascending id order.
    ///
    /// Instruments without a quote in this record are skipped.
    pub fn iter<'a>(&'a self, registry: &'a InstrumentRegistry) -> TickRecordIterator<'a> {
        TickRecordIterator {
            record: self,
            registry,
            next_id: 0,
            end_id: self.values.len() / 2,
        }
    }

    /// Writes this record's row to a quote store.
    pub async fn persist(&self, store: &dyn QuoteStore) -> Result<()> {
        store.insert(self.to_row()).await?;
        Ok(())
    }
}

pub struct TickRecordIterator<'a> {
    record: &'a TickRecord,
    registry: &'a InstrumentRegistry,
    next_id: InstrumentId,
    end_id: InstrumentId,
}

impl<'a> Iterator for TickRecordIterator<'a> {
    type Item = (String, Quote);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_id < self.end_id {
            let id = self.next_id;
            self.next_id += 1;

            let Some(instrument) = self.registry.get_by_id(id) else {
                continue;
            };
            if let Ok(quote) = self.record.quote_for(&instrument) {
                return Some((instrument.get_name().to_string(), quote));
            }
        }
        None
    }
}
