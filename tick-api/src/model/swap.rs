//! Swap (carry interest) entries.

use crate::model::instrument::InstrumentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The swap rate in force for one instrument from `timestamp` until the next
/// entry for the same instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwapEntry {
    pub instrument_id: InstrumentId,
    pub buy_swap: f64,
    pub sell_swap: f64,
    pub timestamp: DateTime<Utc>,
}

impl SwapEntry {
    /// Creates a new SwapEntry.
    ///
    /// # Arguments
    ///
    /// * `instrument_id` - The instrument the rate applies to.
    /// * `buy_swap` - Swap for long positions.
    /// * `sell_swap` - Swap for short positions.
    /// * `timestamp` - The instant the rate takes effect.
    ///
    /// # Returns
    ///
    /// A new `SwapEntry`.
    pub fn new(
        instrument_id: InstrumentId,
        buy_swap: f64,
        sell_swap: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            instrument_id,
            buy_swap,
            sell_swap,
            timestamp,
        }
    }
}
