//! Divisor pairing and canonical component strings.
//!
//! Every unordered pair `{a, b}` of proper divisors with `a · b = n` becomes
//! one graph component, visited through its larger member so that each pair
//! is seen once. Components are kept in discovery order (descending `a`);
//! the rendered string is matched literally by downstream text search, so
//! neither the order nor the `C_{m}` / `K_{low,high}` shapes may change.
//!
//! ```
//! use zn_engine::component::{pair, Component};
//! use zn_engine::partition::partition;
//!
//! let divisors = [6, 4, 3, 2];
//! let buckets = partition(12, &divisors);
//! let decomposition = pair(12, &divisors, &buckets);
//!
//! assert_eq!(
//!     decomposition.components().collect::<Vec<_>>(),
//!     vec![Component::bipartite(1, 2), Component::bipartite(2, 2)]
//! );
//! assert_eq!(decomposition.components_str(), "K_{1,2}, K_{2,2}");
//! assert_eq!(decomposition.weight(), 7);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::partition::Buckets;

/// Separator between rendered components.
pub const SEPARATOR: &str = ", ";

/// A graph component produced by one divisor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// Complete graph `C_{size}` from a divisor paired with itself.
    Complete(usize),
    /// Complete bipartite graph `K_{low,high}` from two distinct divisors.
    Bipartite {
        /// Smaller bucket size.
        low: usize,
        /// Larger bucket size.
        high: usize,
    },
}

impl Component {
    /// Bipartite component with its sides sorted ascending.
    #[must_use]
    pub fn bipartite(x: usize, y: usize) -> Self {
        Self::Bipartite {
            low: x.min(y),
            high: x.max(y),
        }
    }

    /// Number of vertices the component spans.
    #[must_use]
    pub fn size(&self) -> usize {
        match *self {
            Self::Complete(m) => m,
            Self::Bipartite { low, high } => low + high,
        }
    }

    /// Number of edges the component's graph has.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        match *self {
            Self::Complete(m) => m * m.saturating_sub(1) / 2,
            Self::Bipartite { low, high } => low * high,
        }
    }

    /// True for `C_{m}`.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete(m) => write!(f, "C_{{{}}}", m),
            Self::Bipartite { low, high } => write!(f, "K_{{{},{}}}", low, high),
        }
    }
}

// Serialized as the component string so the JSON view matches the stored row.
impl Serialize for Component {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Component {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

/// Error when parsing a rendered component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseComponentError {
    /// The text is neither `C_{m}` nor `K_{x,y}`.
    #[error("unrecognized component '{0}'")]
    Malformed(String),
    /// A bipartite component is written with its larger side first.
    #[error("bipartite component '{0}' is not in K_{{low,high}} order")]
    Unordered(String),
}

impl FromStr for Component {
    type Err = ParseComponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseComponentError::Malformed(s.to_string());
        let number = |t: &str| t.parse::<usize>().map_err(|_| malformed());

        if let Some(inner) = s.strip_prefix("C_{").and_then(|r| r.strip_suffix('}')) {
            return Ok(Self::Complete(number(inner)?));
        }
        if let Some(inner) = s.strip_prefix("K_{").and_then(|r| r.strip_suffix('}')) {
            let (low, high) = inner.split_once(',').ok_or_else(malformed)?;
            let (low, high) = (number(low)?, number(high)?);
            if low > high {
                return Err(ParseComponentError::Unordered(s.to_string()));
            }
            return Ok(Self::Bipartite { low, high });
        }
        Err(malformed())
    }
}

/// Renders components in the given order, joined with [`SEPARATOR`].
#[must_use]
pub fn render(components: &[Component]) -> String {
    components
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Parses a rendered component list; the empty string is the empty list.
///
/// # Errors
///
/// Returns a [`ParseComponentError`] for the first entry that does not parse.
pub fn parse_list(s: &str) -> Result<Vec<Component>, ParseComponentError> {
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(SEPARATOR).map(str::parse).collect()
}

/// A matched divisor pair `major · minor = n` with `major ≥ minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchedPair {
    /// The larger divisor (the one the traversal was on).
    pub major: u64,
    /// `n / major`.
    pub minor: u64,
    /// The component derived from the two bucket sizes.
    pub component: Component,
}

impl MatchedPair {
    /// True when the divisor is paired with itself.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.major == self.minor
    }
}

/// All matched pairs of one `n`, in generation order, with their total weight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Decomposition {
    pairs: Vec<MatchedPair>,
    weight: usize,
}

impl Decomposition {
    /// Matched pairs in generation order.
    #[must_use]
    pub fn pairs(&self) -> &[MatchedPair] {
        &self.pairs
    }

    /// Components in generation order.
    pub fn components(&self) -> impl Iterator<Item = Component> + '_ {
        self.pairs.iter().map(|p| p.component)
    }

    /// Sum of component sizes.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.weight
    }

    /// The canonical `", "`-joined component string.
    #[must_use]
    pub fn components_str(&self) -> String {
        render(&self.components().collect::<Vec<_>>())
    }
}

/// Pairs the divisors of `n` and derives one component per unordered pair.
///
/// `divisors` is walked in slice order (descending for well-formed input).
/// A divisor `a` is skipped when `b = n / a` is not in `divisors`, when
/// `a < b`, or when `(a, b)` was already emitted, which only happens for a
/// malformed list with repeated entries.
#[must_use]
pub fn pair(n: u64, divisors: &[u64], buckets: &Buckets) -> Decomposition {
    let known: HashSet<u64> = divisors.iter().copied().collect();
    let mut processed: HashSet<(u64, u64)> = HashSet::new();
    let mut decomposition = Decomposition::default();

    for &a in divisors {
        if a == 0 || n % a != 0 {
            continue;
        }
        let b = n / a;
        if !known.contains(&b) || a < b {
            continue;
        }
        if !processed.insert((a, b)) {
            continue;
        }

        let len_a = buckets.size(a);
        let component = if a == b {
            decomposition.weight += len_a;
            Component::Complete(len_a)
        } else {
            let len_b = buckets.size(b);
            decomposition.weight += len_a + len_b;
            Component::bipartite(len_a, len_b)
        };
        decomposition.pairs.push(MatchedPair {
            major: a,
            minor: b,
            component,
        });
    }

    decomposition
}
