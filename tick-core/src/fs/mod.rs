pub mod instrument_loader;
pub mod paths;
pub mod persistence;

pub use instrument_loader::{load_registry, save_registry};
pub use paths::PathManager;
pub use persistence::{load_binary, load_state, save_binary, save_state};
