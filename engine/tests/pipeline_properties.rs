//! Property-based tests for the record pipeline.
//!
//! Uses proptest to check the decomposition laws for arbitrary n.

use proptest::prelude::*;
use zn_engine::component::{parse_list, pair, Component};
use zn_engine::divisors::factors;
use zn_engine::partition::partition;
use zn_engine::primality::is_prime;
use zn_engine::record::compute_record;

fn totient(n: u64) -> u64 {
    let mut result = n;
    let mut m = n;
    let mut p = 2;
    while p * p <= m {
        if m % p == 0 {
            while m % p == 0 {
                m /= p;
            }
            result -= result / p;
        }
        p += 1;
    }
    if m > 1 {
        result -= result / m;
    }
    result
}

// =============================================================================
// Partition
// =============================================================================

proptest! {
    /// Buckets are pairwise disjoint and stay inside [1, n).
    #[test]
    fn prop_buckets_disjoint(n in 4u64..20_000) {
        prop_assume!(!is_prime(n));
        let buckets = partition(n, &factors(n).unwrap());
        prop_assert!(buckets.verify_disjoint(n));
    }

    /// Exactly the integers sharing a factor with n are claimed.
    #[test]
    fn prop_claimed_count_is_n_minus_one_minus_totient(n in 4u64..20_000) {
        prop_assume!(!is_prime(n));
        let buckets = partition(n, &factors(n).unwrap());
        prop_assert_eq!(buckets.claimed_count() as u64, n - 1 - totient(n));
    }
}

// =============================================================================
// Pairing
// =============================================================================

proptest! {
    /// The weight equals the number of claimed values.
    #[test]
    fn prop_weight_matches_claimed(n in 4u64..20_000) {
        prop_assume!(!is_prime(n));
        let divisors = factors(n).unwrap();
        let buckets = partition(n, &divisors);
        let d = pair(n, &divisors, &buckets);
        prop_assert_eq!(d.weight(), buckets.claimed_count());
    }

    /// Bipartite sides are rendered low first; squares produce one C_{m}.
    #[test]
    fn prop_component_shapes(n in 4u64..20_000) {
        prop_assume!(!is_prime(n));
        let record = compute_record(n, 0).unwrap();
        let square = (2..n).any(|a| a * a == n);
        let completes = record.components.iter().filter(|c| c.is_complete()).count();
        prop_assert_eq!(completes, usize::from(square));
        for c in &record.components {
            if let Component::Bipartite { low, high } = *c {
                prop_assert!(low <= high);
            }
        }
        prop_assert_eq!(parse_list(&record.components_str()).unwrap(), record.components);
    }
}

// =============================================================================
// Records
// =============================================================================

proptest! {
    /// Recomputing a record gives the same record.
    #[test]
    fn prop_idempotent(n in 4u64..5_000, threshold in 0u64..1_000) {
        prop_assert_eq!(compute_record(n, threshold).unwrap(), compute_record(n, threshold).unwrap());
    }

    /// Primes have empty records; composites never do.
    #[test]
    fn prop_prime_records(n in 4u64..20_000) {
        let record = compute_record(n, 500).unwrap();
        if is_prime(n) {
            prop_assert!(record.is_prime);
            prop_assert_eq!(record.components_str(), "");
            prop_assert_eq!(record.weight, 0);
            prop_assert!(record.graph.is_none());
        } else {
            prop_assert!(!record.is_prime);
            prop_assert!(!record.components.is_empty());
            prop_assert!(record.weight > 0);
        }
    }

    /// Edge counts follow C_{m} → m(m−1)/2 and K_{x,y} → x·y.
    #[test]
    fn prop_edge_count_law(n in 4u64..500) {
        prop_assume!(!is_prime(n));
        let record = compute_record(n, 500).unwrap();
        let graph = record.graph.as_ref().unwrap();
        let expected: usize = record.components.iter().map(Component::edge_count).sum();
        prop_assert_eq!(graph.edges.len(), expected);
        prop_assert!(graph.edges.iter().all(|e| e.from != e.to));
        prop_assert_eq!(graph.nodes.len() as u64, record.weight);
    }
}
