//! Backing store implementations for the `QuoteStore` and `SwapStore` traits.
//!
//! - [`memory`]: Volatile stores, mainly for tests.
//! - [`file`]: A single-file snapshot store used by the command-line tools.

pub mod file;
pub mod memory;
pub mod series;

pub use file::FileStore;
pub use memory::{MemoryQuoteStore, MemorySwapStore};
