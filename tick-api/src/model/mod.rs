//! Core data models of the tick store.
//!
//! # Submodules
//! - [`instrument`]: Tradable pairs and their ids.
//! - [`instrument_registry`]: Name to id allocation.
//! - [`quote`]: Decoded per-instrument quotes.
//! - [`swap`]: Swap rate entries.
//! - [`record`]: Packed tick records and their persisted rows.
//! - [`tick`]: The record/null tick variant.

pub mod instrument;
pub mod instrument_registry;
pub mod quote;
pub mod record;
pub mod swap;
pub mod tick;

pub use instrument::{Instrument, InstrumentId};
pub use instrument_registry::InstrumentRegistry;
pub use quote::{Quote, RawQuote};
pub use record::{QuoteRow, TickRecord};
pub use swap::SwapEntry;
pub use tick::{NullTick, Tick};
