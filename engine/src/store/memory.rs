//! In-memory record store.

use std::collections::BTreeMap;

use super::{check_append_only, RecordStore};
use crate::error::StoreError;
use crate::record::Record;

/// A [`RecordStore`] held in a `BTreeMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    records: BTreeMap<u64, Record>,
    commits: usize,
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in ascending `n`.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Number of successful commits so far.
    #[must_use]
    pub fn commit_count(&self) -> usize {
        self.commits
    }
}

impl RecordStore for MemoryStore {
    fn max_n(&self) -> Result<Option<u64>, StoreError> {
        Ok(self.records.keys().next_back().copied())
    }

    fn commit(&mut self, batch: &[Record]) -> Result<(), StoreError> {
        check_append_only(self.max_n()?, batch)?;
        self.records
            .extend(batch.iter().map(|record| (record.n, record.clone())));
        self.commits += 1;
        Ok(())
    }

    fn get(&self, n: u64) -> Result<Option<Record>, StoreError> {
        Ok(self.records.get(&n).cloned())
    }

    fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.len() as u64)
    }
}
