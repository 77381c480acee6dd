//! Record persistence.
//!
//! A [`RecordStore`] is an append-only table of records keyed by `n`. The
//! writer only ever calls [`RecordStore::commit`] with a batch of strictly
//! increasing `n` beyond the current checkpoint; a backend must make the
//! whole batch visible at once or not at all.
//!
//! | Backend | Durability | Use |
//! |---------|------------|-----|
//! | [`SqliteStore`] | one transaction per batch | the `records` table read by the browser |
//! | [`MemoryStore`] | process lifetime | tests, dry runs |

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use crate::record::Record;

/// Append-only storage of records with the max stored `n` as checkpoint.
pub trait RecordStore {
    /// The highest stored `n`, or `None` for an empty store.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read.
    fn max_n(&self) -> Result<Option<u64>, StoreError>;

    /// Appends a batch atomically.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the batch could not be persisted; nothing
    /// from the batch is visible afterwards.
    fn commit(&mut self, batch: &[Record]) -> Result<(), StoreError>;

    /// Reads back one record.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read or the stored
    /// row is corrupt.
    fn get(&self, n: u64) -> Result<Option<Record>, StoreError>;

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read.
    fn count(&self) -> Result<u64, StoreError>;

    /// Reclaims unused space. A no-op unless the backend has something to do.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if compaction fails.
    fn compact(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Checks that `batch` is strictly increasing and starts beyond `checkpoint`.
pub(crate) fn check_append_only(
    checkpoint: Option<u64>,
    batch: &[Record],
) -> Result<(), StoreError> {
    let mut last = checkpoint;
    for record in batch {
        if let Some(prev) = last {
            if record.n <= prev {
                return Err(StoreError::NotAppendOnly {
                    n: record.n,
                    checkpoint: prev,
                });
            }
        }
        last = Some(record.n);
    }
    Ok(())
}

impl<S: RecordStore + ?Sized> RecordStore for &mut S {
    fn max_n(&self) -> Result<Option<u64>, StoreError> {
        (**self).max_n()
    }

    fn commit(&mut self, batch: &[Record]) -> Result<(), StoreError> {
        (**self).commit(batch)
    }

    fn get(&self, n: u64) -> Result<Option<Record>, StoreError> {
        (**self).get(n)
    }

    fn count(&self) -> Result<u64, StoreError> {
        (**self).count()
    }

    fn compact(&mut self) -> Result<(), StoreError> {
        (**self).compact()
    }
}
