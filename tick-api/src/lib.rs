//! # Ticks
//!
//! Data model for multi-instrument price ticks.
//!
//! ## Modules
//! - `model`: Instruments, the id registry, quotes, swap entries and packed tick records.
//! - `traits`: Contracts for the quote and swap backing stores.
//! - `error`: The `TickError` type.

pub mod error;
pub mod model;
pub mod traits;

pub use error::TickError;
pub use model::instrument::{Instrument, InstrumentId};
pub use model::instrument_registry::InstrumentRegistry;
pub use model::quote::{Quote, RawQuote};
pub use model::record::{QuoteRow, TickRecord};
pub use model::swap::SwapEntry;
pub use model::tick::{NullTick, Tick};
pub use traits::quote_store::QuoteStore;
pub use traits::swap_store::SwapStore;
