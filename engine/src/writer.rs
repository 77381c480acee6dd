//! Checkpointed, cancellable batch generation.
//!
//! ```text
//! checkpoint = store.max_n()          (None → config.start_n)
//! loop:
//!     cancelled? ─yes─→ stop                      (batch boundary)
//!     for up to batch_size numbers:
//!         cancelled? ─yes─→ break                 (per number)
//!         batch.push(compute_record(n))
//!     store.commit(batch)                         (atomic)
//! ```
//!
//! Cancellation never interrupts a record: the in-flight number finishes,
//! the short batch is committed, and the run returns normally.

use tracing::{info, warn};

use crate::cancel::CancellationToken;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::record::{compute_record, Record};
use crate::store::RecordStore;

// Larger batches grow on demand.
const MAX_PREALLOCATED: usize = 4096;

/// Outcome of one [`CheckpointedBatchWriter::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// First `n` this run processed (the resume point).
    pub resumed_at: u64,
    /// Last `n` committed by this run, if any.
    pub last_committed: Option<u64>,
    /// Records committed by this run.
    pub records: u64,
    /// Batches committed by this run.
    pub batches: u64,
    /// Whether the run ended because of a stop request.
    pub cancelled: bool,
}

/// Drives the pipeline over ascending `n` and persists one record per `n`.
#[derive(Debug)]
pub struct CheckpointedBatchWriter<S> {
    store: S,
    config: EngineConfig,
}

impl<S: RecordStore> CheckpointedBatchWriter<S> {
    /// Creates a writer over `store`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the configuration is invalid.
    pub fn new(store: S, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// The store being written.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Releases the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The next `n` to generate: one past the checkpoint, or `start_n` for
    /// an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the checkpoint cannot be read.
    pub fn resume_point(&self) -> Result<u64, EngineError> {
        Ok(match self.store.max_n()? {
            Some(max) => max.saturating_add(1),
            None => self.config.start_n,
        })
    }

    fn exhausted(&self, n: u64) -> bool {
        self.config.stop_after.is_some_and(|stop| n > stop)
    }

    /// Generates and commits records until cancelled or past `stop_after`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] on the first failed read or commit. The
    /// failed batch is not retried; everything committed before it remains.
    pub fn run(&mut self, cancel: &CancellationToken) -> Result<RunSummary, EngineError> {
        let mut next = self.resume_point()?;
        let mut summary = RunSummary {
            resumed_at: next,
            last_committed: None,
            records: 0,
            batches: 0,
            cancelled: false,
        };
        info!(
            start = next,
            batch_size = self.config.batch_size,
            graph_threshold = self.config.graph_threshold,
            "starting generation"
        );

        let mut batch: Vec<Record> =
            Vec::with_capacity(self.config.batch_size.min(MAX_PREALLOCATED));
        while !cancel.is_cancelled() && !self.exhausted(next) {
            for _ in 0..self.config.batch_size {
                if cancel.is_cancelled() || self.exhausted(next) {
                    break;
                }
                batch.push(compute_record(next, self.config.graph_threshold)?);
                next += 1;
            }
            if batch.is_empty() {
                break;
            }

            if let Err(err) = self.store.commit(&batch) {
                warn!(
                    first = batch.first().map(|r| r.n),
                    rows = batch.len(),
                    "batch commit failed"
                );
                return Err(err.into());
            }
            summary.records += batch.len() as u64;
            summary.batches += 1;
            summary.last_committed = batch.last().map(|r| r.n);
            info!(n = next - 1, "processed up to");
            batch.clear();
        }

        summary.cancelled = cancel.is_cancelled();
        if summary.cancelled {
            info!(last = ?summary.last_committed, "generation stopped on request");
        }

        if self.config.compact_on_finish {
            info!("compacting store");
            self.store.compact()?;
        }
        Ok(summary)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;

    fn bounded(stop_after: u64, batch_size: usize) -> EngineConfig {
        EngineConfig {
            batch_size,
            stop_after: Some(stop_after),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn empty_store_starts_at_start_n() {
        let writer = CheckpointedBatchWriter::new(MemoryStore::new(), bounded(10, 3)).unwrap();
        assert_eq!(writer.resume_point().unwrap(), 4);
    }

    #[test]
    fn bounded_run_commits_full_and_short_batches() {
        let mut writer =
            CheckpointedBatchWriter::new(MemoryStore::new(), bounded(13, 4)).unwrap();
        let summary = writer.run(&CancellationToken::new()).unwrap();

        // 4..=13 is ten numbers: batches of 4, 4, 2.
        assert_eq!(summary.records, 10);
        assert_eq!(summary.batches, 3);
        assert_eq!(summary.last_committed, Some(13));
        assert!(!summary.cancelled);
        assert_eq!(writer.store().commit_count(), 3);
        let ns: Vec<u64> = writer.store().records().map(|r| r.n).collect();
        assert_eq!(ns, (4..=13).collect::<Vec<_>>());
    }

    #[test]
    fn resumes_after_checkpoint() {
        let mut store = MemoryStore::new();
        store.commit(&[compute_record(4, 500).unwrap()]).unwrap();
        let mut writer = CheckpointedBatchWriter::new(store, bounded(8, 100)).unwrap();
        assert_eq!(writer.resume_point().unwrap(), 5);
        let summary = writer.run(&CancellationToken::new()).unwrap();
        assert_eq!(summary.resumed_at, 5);
        assert_eq!(summary.records, 4);
    }

    #[test]
    fn cancelled_before_start_commits_nothing() {
        let token = CancellationToken::new();
        token.cancel();
        let mut writer =
            CheckpointedBatchWriter::new(MemoryStore::new(), EngineConfig::default()).unwrap();
        let summary = writer.run(&token).unwrap();
        assert!(summary.cancelled);
        assert_eq!(summary.records, 0);
        assert_eq!(writer.store().commit_count(), 0);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EngineConfig {
            batch_size: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            CheckpointedBatchWriter::new(MemoryStore::new(), config),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    /// Cancels the run after a fixed number of commits.
    struct CancelAfter {
        inner: MemoryStore,
        commits_left: usize,
        token: CancellationToken,
    }

    impl RecordStore for CancelAfter {
        fn max_n(&self) -> Result<Option<u64>, StoreError> {
            self.inner.max_n()
        }
        fn commit(&mut self, batch: &[Record]) -> Result<(), StoreError> {
            self.inner.commit(batch)?;
            self.commits_left = self.commits_left.saturating_sub(1);
            if self.commits_left == 0 {
                self.token.cancel();
            }
            Ok(())
        }
        fn get(&self, n: u64) -> Result<Option<Record>, StoreError> {
            self.inner.get(n)
        }
        fn count(&self) -> Result<u64, StoreError> {
            self.inner.count()
        }
    }

    #[test]
    fn cancellation_at_batch_boundary() {
        let token = CancellationToken::new();
        let store = CancelAfter {
            inner: MemoryStore::new(),
            commits_left: 2,
            token: token.clone(),
        };
        let config = EngineConfig {
            batch_size: 5,
            ..EngineConfig::default()
        };
        let mut writer = CheckpointedBatchWriter::new(store, config).unwrap();
        let summary = writer.run(&token).unwrap();
        assert!(summary.cancelled);
        assert_eq!(summary.batches, 2);
        assert_eq!(summary.last_committed, Some(13));
        assert_eq!(writer.store().inner.max_n().unwrap(), Some(13));
    }
}
