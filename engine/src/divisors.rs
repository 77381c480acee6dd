//! Proper-divisor extraction.

use crate::error::EngineError;
use crate::primality::is_prime;

/// Smallest `n` the engine accepts.
pub const MIN_N: u64 = 4;

/// Lists the divisors of `n` strictly between 1 and `n`, sorted descending.
///
/// Trial-divides `2..=⌊√n⌋`; each hit `i` contributes `i` and `n / i`, and a
/// square root contributes once.
///
/// # Errors
///
/// Returns [`EngineError::InvalidNumber`] when `n < 4` and
/// [`EngineError::NotComposite`] when `n` is prime. Both are caller bugs: the
/// pipeline checks primality before asking for divisors.
///
/// ```
/// use zn_engine::divisors::factors;
///
/// assert_eq!(factors(12).unwrap(), vec![6, 4, 3, 2]);
/// assert_eq!(factors(9).unwrap(), vec![3]);
/// assert!(factors(7).is_err());
/// ```
pub fn factors(n: u64) -> Result<Vec<u64>, EngineError> {
    if n < MIN_N {
        return Err(EngineError::InvalidNumber { n });
    }
    if is_prime(n) {
        return Err(EngineError::NotComposite { n });
    }

    let mut found = Vec::new();
    let mut i: u64 = 2;
    while i.saturating_mul(i) <= n {
        if n % i == 0 {
            found.push(i);
            if i * i != n {
                found.push(n / i);
            }
        }
        i += 1;
    }
    found.sort_unstable_by(|a, b| b.cmp(a));
    Ok(found)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn descending_and_proper() {
        assert_eq!(factors(4).unwrap(), vec![2]);
        assert_eq!(factors(36).unwrap(), vec![18, 12, 9, 6, 4, 3, 2]);
        assert_eq!(factors(100).unwrap(), vec![50, 25, 20, 10, 5, 4, 2]);
    }

    #[test]
    fn matches_naive_enumeration() {
        for n in (MIN_N..600).filter(|&n| !is_prime(n)) {
            let mut naive: Vec<u64> = (2..n).filter(|d| n % d == 0).collect();
            naive.reverse();
            assert_eq!(factors(n).unwrap(), naive, "n = {}", n);
        }
    }

    #[test]
    fn rejects_contract_violations() {
        assert!(matches!(factors(3), Err(EngineError::InvalidNumber { n: 3 })));
        assert!(matches!(factors(0), Err(EngineError::InvalidNumber { n: 0 })));
        assert!(matches!(factors(13), Err(EngineError::NotComposite { n: 13 })));
    }
}
