//! Explicit node/edge realization of a decomposition.
//!
//! Each matched pair becomes one node group (its index in generation order).
//! Node ids are the claimed integers themselves, which are unique per `n`
//! because buckets are disjoint.
//!
//! | Component | Nodes | Edges |
//! |-----------|-------|-------|
//! | `C_{m}` | `bucket(a)` | every unordered pair, `m(m−1)/2` |
//! | `K_{x,y}` | `bucket(a)` then `bucket(b)` | `bucket(a) × bucket(b)`, `x·y` |
//!
//! The JSON form (`{"nodes": [...], "edges": [...]}`) is what the store
//! persists in `graph_data`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::component::Decomposition;
use crate::partition::Buckets;

/// Default upper bound (exclusive) on `n` for building graphs.
pub const DEFAULT_GRAPH_THRESHOLD: u64 = 500;

/// A graph vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The claimed integer.
    pub id: u64,
    /// Display label (`id` in decimal).
    pub label: String,
    /// Index of the component that produced the node.
    pub group: usize,
}

/// An undirected edge between two node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// One endpoint.
    pub from: u64,
    /// The other endpoint.
    pub to: u64,
}

/// Nodes and edges of every component of one `n`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Graph {
    /// Vertices, unique by id, in insertion order.
    pub nodes: Vec<Node>,
    /// Undirected edges.
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Nodes belonging to component `group`.
    pub fn group(&self, group: usize) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| node.group == group)
    }
}

/// Builds the graph for a decomposition from the buckets it was derived from.
#[must_use]
pub fn build(decomposition: &Decomposition, buckets: &Buckets) -> Graph {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();

    for (group, matched) in decomposition.pairs().iter().enumerate() {
        let side_a = buckets.get(matched.major).unwrap_or(&[]);
        push_nodes(&mut nodes, side_a, group);

        if matched.is_square() {
            for (i, &u) in side_a.iter().enumerate() {
                for &v in &side_a[i + 1..] {
                    edges.push(Edge { from: u, to: v });
                }
            }
        } else {
            let side_b = buckets.get(matched.minor).unwrap_or(&[]);
            push_nodes(&mut nodes, side_b, group);
            for &u in side_a {
                for &v in side_b {
                    edges.push(Edge { from: u, to: v });
                }
            }
        }
    }

    Graph {
        nodes: dedup_nodes(nodes),
        edges,
    }
}

fn push_nodes(nodes: &mut Vec<Node>, values: &[u64], group: usize) {
    nodes.extend(values.iter().map(|&v| Node {
        id: v,
        label: v.to_string(),
        group,
    }));
}

fn dedup_nodes(nodes: Vec<Node>) -> Vec<Node> {
    let before = nodes.len();
    let mut seen = HashSet::with_capacity(before);
    let unique: Vec<Node> = nodes.into_iter().filter(|n| seen.insert(n.id)).collect();
    if unique.len() != before {
        warn!(
            dropped = before - unique.len(),
            "duplicate node ids across components"
        );
    }
    unique
}
