//! Error type for index storage and reporting.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    /// Environment, transaction, or database failure from the record store.
    #[error("store error: {0}")]
    Store(#[from] heed::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A stored key or value failed to decode.
    #[error("corrupt entry in the `{database}` database")]
    Corrupt { database: &'static str },
}

pub type Result<T> = std::result::Result<T, IndexError>;
