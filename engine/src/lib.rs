//! Z_n divisor-graph generation engine.
//!
//! For every integer `n` (in ascending order, starting from a checkpoint) the
//! engine partitions `[1, n)` among the proper divisors of `n`, pairs divisors
//! whose product is `n`, and describes each pair as a graph component:
//!
//! | Pair | Component | Rendered |
//! |------|-----------|----------|
//! | `a · a = n` | complete graph on `bucket(a)` | `C_{m}` |
//! | `a · b = n`, `a ≠ b` | complete bipartite graph `bucket(a) × bucket(b)` | `K_{low,high}` |
//!
//! # Pipeline
//!
//! ```text
//! n ─→ primality::is_prime ─(composite)─→ divisors::factors
//!        │                                     ↓
//!        │                          partition::partition → Buckets
//!        │                                     ↓
//!        │                          component::pair → Decomposition
//!        │                                     ↓ (n < threshold)
//!        │                          graph::build → Graph
//!        ↓                                     ↓
//!      Record::prime ───────────────→ record::Record
//!                                              ↓
//!                            writer::CheckpointedBatchWriter → store::RecordStore
//! ```
//!
//! # Example
//!
//! ```
//! use zn_engine::record::compute_record;
//!
//! let record = compute_record(12, 500).unwrap();
//! assert_eq!(record.components_str(), "K_{1,2}, K_{2,2}");
//! assert_eq!(record.weight, 7);
//! assert_eq!(record.graph.map(|g| g.edges.len()), Some(6));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod cancel;
pub mod component;
pub mod config;
pub mod divisors;
pub mod error;
pub mod graph;
pub mod partition;
pub mod primality;
pub mod record;
pub mod store;
pub mod writer;

pub use cancel::CancellationToken;
pub use component::{Component, Decomposition};
pub use config::EngineConfig;
pub use error::{EngineError, StoreError};
pub use graph::Graph;
pub use partition::Buckets;
pub use record::{compute_record, Record};
pub use store::{MemoryStore, RecordStore, SqliteStore};
pub use writer::{CheckpointedBatchWriter, RunSummary};
