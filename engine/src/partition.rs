//! Greedy descending-claim partition of `[1, n)` among the divisors of `n`.
//!
//! Divisors are visited from largest to smallest. Divisor `f` scans its
//! multiples `f, 2f, 3f, …` below `n` and claims every one that no larger
//! divisor has claimed yet, so each integer lands in the bucket of the
//! *largest* divisor dividing it.
//!
//! # Example
//!
//! ```
//! use zn_engine::partition::partition;
//!
//! let buckets = partition(12, &[6, 4, 3, 2]);
//! assert_eq!(buckets.get(6), Some(&[6][..]));
//! assert_eq!(buckets.get(4), Some(&[4, 8][..]));
//! assert_eq!(buckets.get(3), Some(&[3, 9][..]));
//! assert_eq!(buckets.get(2), Some(&[2, 10][..]));
//! assert_eq!(buckets.claimed_count(), 7);
//! ```

use std::collections::HashSet;

/// Divisor buckets of one `n`, in the order the divisors were processed.
///
/// # Invariant
///
/// Buckets are pairwise disjoint and every value lies in `[1, n)`.
/// [`Buckets::verify_disjoint`] re-checks both.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Buckets {
    entries: Vec<(u64, Vec<u64>)>,
}

impl Buckets {
    /// Values claimed by `divisor`, or `None` if it was never processed.
    #[must_use]
    pub fn get(&self, divisor: u64) -> Option<&[u64]> {
        self.entries
            .iter()
            .find(|(d, _)| *d == divisor)
            .map(|(_, values)| values.as_slice())
    }

    /// Number of values claimed by `divisor` (0 if it has no bucket).
    #[must_use]
    pub fn size(&self, divisor: u64) -> usize {
        self.get(divisor).map_or(0, <[u64]>::len)
    }

    /// `(divisor, values)` pairs in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[u64])> {
        self.entries.iter().map(|(d, v)| (*d, v.as_slice()))
    }

    /// Number of buckets (one per processed divisor, including empty ones).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no divisor was processed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of claimed values across all buckets.
    #[must_use]
    pub fn claimed_count(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).sum()
    }

    /// Checks that no value appears twice and every value is in `[1, n)`.
    #[must_use]
    pub fn verify_disjoint(&self, n: u64) -> bool {
        let mut seen = HashSet::with_capacity(self.claimed_count());
        self.entries
            .iter()
            .flat_map(|(_, values)| values.iter())
            .all(|&v| (1..n).contains(&v) && seen.insert(v))
    }
}

/// Partitions the multiples of `divisors` below `n` into disjoint buckets.
///
/// `divisors` is expected in descending order (as produced by
/// [`factors`](crate::divisors::factors)); the claim priority follows the
/// slice order. Claim state lives only for the duration of this call.
#[must_use]
pub fn partition(n: u64, divisors: &[u64]) -> Buckets {
    let mut claimed: HashSet<u64> = HashSet::new();
    let mut entries = Vec::with_capacity(divisors.len());

    for &f in divisors {
        let mut bucket = Vec::new();
        if f > 0 {
            let mut m = f;
            while m < n {
                if claimed.insert(m) {
                    bucket.push(m);
                }
                m += f;
            }
        }
        entries.push((f, bucket));
    }

    let buckets = Buckets { entries };
    debug_assert!(buckets.verify_disjoint(n), "bucket invariant violated");
    buckets
}
