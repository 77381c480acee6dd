//! Engine and store error types.

use thiserror::Error;

use crate::component::ParseComponentError;

/// Errors raised by the generation pipeline and the batch writer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `n` is below the smallest number the engine processes (4).
    #[error("n = {n} is out of range: the engine starts at 4")]
    InvalidNumber {
        /// The rejected number.
        n: u64,
    },
    /// Divisors were requested for a prime.
    #[error("n = {n} is prime and has no proper divisors")]
    NotComposite {
        /// The rejected number.
        n: u64,
    },
    /// The engine configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The record store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised by a [`RecordStore`](crate::store::RecordStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite reported an error.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Graph data could not be encoded or decoded.
    #[error("graph data: {0}")]
    Json(#[from] serde_json::Error),
    /// A value does not fit the store's integer column type.
    #[error("value {0} does not fit a 64-bit signed column")]
    OutOfRange(u64),
    /// A batch tried to write an `n` at or below the current checkpoint.
    #[error("record n = {n} is not beyond the checkpoint {checkpoint}")]
    NotAppendOnly {
        /// The offending record.
        n: u64,
        /// The highest `n` already stored or earlier in the same batch.
        checkpoint: u64,
    },
    /// A stored row could not be turned back into a record.
    #[error("stored record n = {n} is corrupt: {reason}")]
    Corrupt {
        /// The row's key.
        n: u64,
        /// What was wrong with it.
        reason: String,
    },
    /// A stored component string failed to parse.
    #[error(transparent)]
    ParseComponent(#[from] ParseComponentError),
}
