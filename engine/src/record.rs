//! The persisted unit: one record per `n`, and the pipeline that computes it.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::component::{self, pair, Component};
use crate::divisors::{factors, MIN_N};
use crate::error::EngineError;
use crate::graph::{build, Graph};
use crate::partition::partition;
use crate::primality::is_prime;

/// Decomposition of one `n`. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The number.
    pub n: u64,
    /// Components in generation order.
    pub components: Vec<Component>,
    /// Sum of component sizes; 0 for primes.
    pub weight: u64,
    /// Explicit graph, present only below the graph threshold.
    pub graph: Option<Graph>,
    /// Whether `n` is prime.
    pub is_prime: bool,
}

impl Record {
    /// The record of a prime: no components, no weight, no graph.
    #[must_use]
    pub fn prime(n: u64) -> Self {
        Self {
            n,
            components: Vec::new(),
            weight: 0,
            graph: None,
            is_prime: true,
        }
    }

    /// The canonical component string (`""` for primes).
    #[must_use]
    pub fn components_str(&self) -> String {
        component::render(&self.components)
    }

    /// True if any component is a complete graph.
    #[must_use]
    pub fn has_complete(&self) -> bool {
        self.components.iter().any(Component::is_complete)
    }
}

/// Runs the full pipeline for `n`.
///
/// Graphs are built only when `n < graph_threshold`. All intermediate state
/// (divisors, buckets) is dropped before returning, so calling this twice for
/// the same `n` yields identical records.
///
/// # Errors
///
/// Returns [`EngineError::InvalidNumber`] when `n < 4`.
pub fn compute_record(n: u64, graph_threshold: u64) -> Result<Record, EngineError> {
    if n < MIN_N {
        return Err(EngineError::InvalidNumber { n });
    }
    if is_prime(n) {
        return Ok(Record::prime(n));
    }

    let divisors = factors(n)?;
    let buckets = partition(n, &divisors);
    let decomposition = pair(n, &divisors, &buckets);
    let graph = (n < graph_threshold).then(|| build(&decomposition, &buckets));

    debug!(
        n,
        divisors = divisors.len(),
        components = decomposition.pairs().len(),
        weight = decomposition.weight(),
        "computed record"
    );

    Ok(Record {
        n,
        components: decomposition.components().collect(),
        weight: decomposition.weight() as u64,
        graph,
        is_prime: false,
    })
}
