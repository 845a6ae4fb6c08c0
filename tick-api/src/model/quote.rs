//! Quote values.
//!
//! Includes `Quote`, the decoded per-instrument view of a tick, and `RawQuote`
//! for bid/ask pairs received from outside the tick store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Bid/ask prices of one instrument at one instant, with the swap figures in
/// force at that instant.
///
/// Compared by value. `Quote::default()` is all zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Quote {
    /// The best bid price.
    pub bid: f64,
    /// The best ask price.
    pub ask: f64,
    /// Carry adjustment applied to long positions.
    pub buy_swap: f64,
    /// Carry adjustment applied to short positions.
    pub sell_swap: f64,
}

impl Quote {
    /// Creates a new Quote.
    ///
    /// # Arguments
    ///
    /// * `bid` - The best bid price.
    /// * `ask` - The best ask price.
    /// * `buy_swap` - Swap for long positions.
    /// * `sell_swap` - Swap for short positions.
    ///
    /// # Returns
    ///
    /// A new `Quote`.
    pub fn new(bid: f64, ask: f64, buy_swap: f64, sell_swap: f64) -> Self {
        Self {
            bid,
            ask,
            buy_swap,
            sell_swap,
        }
    }

    /// Creates a Quote carrying prices only; both swaps are zero.
    pub fn with_prices(bid: f64, ask: f64) -> Self {
        Self::new(bid, ask, 0.0, 0.0)
    }

    /// Returns the quote as `[bid, ask, buy_swap, sell_swap]`.
    pub fn values(&self) -> [f64; 4] {
        [self.bid, self.ask, self.buy_swap, self.sell_swap]
    }

    pub fn spread(&self) -> f64 {
        self.ask - self.bid
    }
}

/// A bid/ask pair for a single instrument as delivered by an external source,
/// before any swap data has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
    pub bid: f64,
    pub ask: f64,
    pub timestamp: DateTime<Utc>,
}

impl RawQuote {
    pub fn new(bid: f64, ask: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            bid,
            ask,
            timestamp,
        }
    }
}
