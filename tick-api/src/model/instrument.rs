//! Defines the data model for tradable instruments.
//!
//! An instrument is a currency pair or security tracked by the tick store.
//! Its id doubles as the slot index inside a packed `TickRecord`.

use serde::{Deserialize, Serialize};

pub type InstrumentId = usize;

/// A tradable pair or security known to an `InstrumentRegistry`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument {
    /// Sequential identifier assigned at registration.
    ///
    /// Bid and ask for this instrument live at offsets `2 * id` and
    /// `2 * id + 1` of every tick record.
    id: InstrumentId,

    /// The human-readable name (e.g., "USD/JPY").
    name: String,
}

impl Instrument {
    /// Creates a new Instrument.
    ///
    /// # Arguments
    ///
    /// * `id` - The registry-assigned identifier.
    /// * `name` - The instrument name (e.g., "EUR/USD").
    ///
    /// # Returns
    ///
    /// A new `Instrument` instance.
    pub fn new(id: InstrumentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn get_id(&self) -> InstrumentId {
        self.id
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Offset of the bid price inside a packed value array.
    pub fn bid_offset(&self) -> usize {
        self.id * 2
    }

    /// Offset of the ask price inside a packed value array.
    pub fn ask_offset(&self) -> usize {
        self.id * 2 + 1
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}
