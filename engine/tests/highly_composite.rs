//! Exhaustive bucket checks for numbers with many divisor pairs.
//!
//! Node ids in a graph are the claimed integers, so two buckets sharing a
//! value would silently merge nodes across components. These tests check the
//! partition directly instead of relying on the graph builder's dedup pass.

use std::collections::HashSet;

use zn_engine::component::pair;
use zn_engine::divisors::factors;
use zn_engine::graph::build;
use zn_engine::partition::partition;

/// A selection of highly composite numbers.
const HIGHLY_COMPOSITE: [u64; 20] = [
    4, 6, 12, 24, 36, 48, 60, 120, 180, 240, 360, 720, 840, 1260, 1680, 2520, 5040, 7560,
    10080, 55440,
];

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

#[test]
fn buckets_are_disjoint_and_in_range() {
    for n in HIGHLY_COMPOSITE {
        let divisors = factors(n).unwrap();
        let buckets = partition(n, &divisors);

        let mut seen = HashSet::new();
        for (divisor, values) in buckets.iter() {
            for &v in values {
                assert!(v >= 1 && v < n, "n = {}: {} out of range", n, v);
                assert_eq!(v % divisor, 0, "n = {}: {} not a multiple of {}", n, v, divisor);
                assert!(seen.insert(v), "n = {}: {} claimed twice", n, v);
            }
        }
        assert!(buckets.verify_disjoint(n));
    }
}

#[test]
fn every_value_goes_to_its_largest_dividing_divisor() {
    for n in HIGHLY_COMPOSITE {
        let divisors = factors(n).unwrap();
        let buckets = partition(n, &divisors);
        for (divisor, values) in buckets.iter() {
            for &v in values {
                let largest = divisors.iter().copied().find(|d| v % d == 0);
                assert_eq!(largest, Some(divisor), "n = {}, v = {}", n, v);
            }
        }
    }
}

#[test]
fn claimed_values_are_exactly_the_non_units() {
    // m in [1, n) is claimed iff gcd(m, n) > 1.
    for n in HIGHLY_COMPOSITE {
        let buckets = partition(n, &factors(n).unwrap());
        let claimed: HashSet<u64> = buckets.iter().flat_map(|(_, v)| v.iter().copied()).collect();
        let expected: HashSet<u64> = (1..n).filter(|&m| gcd(m, n) > 1).collect();
        assert_eq!(claimed, expected, "n = {}", n);
    }
}

#[test]
fn weight_counts_every_claimed_value_once() {
    for n in HIGHLY_COMPOSITE {
        let divisors = factors(n).unwrap();
        let buckets = partition(n, &divisors);
        let decomposition = pair(n, &divisors, &buckets);
        assert_eq!(decomposition.weight(), buckets.claimed_count(), "n = {}", n);
    }
}

#[test]
fn graph_nodes_need_no_dedup() {
    for n in HIGHLY_COMPOSITE.into_iter().filter(|&n| n < 2000) {
        let divisors = factors(n).unwrap();
        let buckets = partition(n, &divisors);
        let decomposition = pair(n, &divisors, &buckets);
        let graph = build(&decomposition, &buckets);

        // Without dedup the node list would be exactly `weight` long.
        assert_eq!(graph.nodes.len(), decomposition.weight(), "n = {}", n);
        let ids: HashSet<u64> = graph.nodes.iter().map(|node| node.id).collect();
        assert_eq!(ids.len(), graph.nodes.len());

        for (group, matched) in decomposition.pairs().iter().enumerate() {
            let members: HashSet<u64> = graph.group(group).map(|node| node.id).collect();
            assert_eq!(members.len(), matched.component.size(), "n = {}, group {}", n, group);
        }
    }
}
