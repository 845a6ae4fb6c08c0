use thiserror::Error;

/// Errors raised while encoding, decoding or retrieving ticks.
#[derive(Error, Debug)]
pub enum TickError {
    /// The caller referenced an unknown instrument or an offset the record
    /// does not hold.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A quote or swap backing store failed. The store's error is passed
    /// through untouched.
    #[error(transparent)]
    BackingStore(#[from] anyhow::Error),
}

/// A specialized Result type for tick operations.
pub type Result<T> = std::result::Result<T, TickError>;
