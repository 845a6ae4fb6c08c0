//! # Tick Core Library
//!
//! Runtime side of the tick store: backing stores, swap lookups and range
//! retrieval over the model defined in the `ticks` crate.
//!
//! ## Modules
//! - `store`: In-memory and file-backed `QuoteStore`/`SwapStore` implementations.
//! - `swap_window`: Nearest-preceding swap lookup over a time window.
//! - `tick_store`: Range fetch, extent and delete over a quote/swap store pair.
//! - `config`: `StoreConfig`, loaded from the config directory.
//! - `args`: Standardized argument parsing.
//! - `fs`: Directory paths, atomic state persistence and the registry loader.
//! - `logging`: Logger setup for binaries and tests.

pub mod args;
pub mod config;
pub mod fs;
pub mod logging;
pub mod store;
pub mod swap_window;
pub mod tick_store;

pub use config::StoreConfig;
pub use swap_window::SwapWindow;
pub use tick_store::{Extent, TickStore};
