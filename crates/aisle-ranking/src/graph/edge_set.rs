//! Raw learned edges and pairwise conflict resolution.

use std::collections::BTreeMap;

use petgraph::graphmap::DiGraphMap;
use petgraph::Direction;

use aisle_core::models::{ProductId, ProductRelation};

/// Directed weights for one store, keyed by `(predecessor, successor)`.
///
/// Repeated relations for the same key are summed, so the set can be built
/// from raw rows or from several partial reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeSet {
    weights: BTreeMap<(ProductId, ProductId), u32>,
}

impl EdgeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_relations<'a>(relations: impl IntoIterator<Item = &'a ProductRelation>) -> Self {
        let mut set = Self::new();
        for rel in relations {
            set.add(rel.predecessor, rel.successor, rel.weight);
        }
        set
    }

    /// Add `weight` to the directed edge. Self-loops and zero weights are ignored.
    pub fn add(&mut self, predecessor: ProductId, successor: ProductId, weight: u32) {
        if predecessor == successor || weight == 0 {
            return;
        }
        let entry = self.weights.entry((predecessor, successor)).or_insert(0);
        *entry = entry.saturating_add(weight);
    }

    pub fn weight(&self, predecessor: ProductId, successor: ProductId) -> Option<u32> {
        self.weights.get(&(predecessor, successor)).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Collapse every two-way pair to its heavier direction.
    ///
    /// A→B survives only when `w(A→B) > w(B→A)`; equal weights drop both
    /// directions. One-way edges pass through unchanged.
    pub fn resolve_conflicts(&self) -> KeptGraph {
        let mut graph = DiGraphMap::new();
        for (&(from, to), &weight) in &self.weights {
            let reverse = self.weights.get(&(to, from)).copied().unwrap_or(0);
            if weight > reverse {
                graph.add_edge(from, to, weight);
            }
        }
        KeptGraph { graph }
    }
}

/// Conflict-free graph: at most one direction per product pair.
#[derive(Debug, Clone, Default)]
pub struct KeptGraph {
    pub(crate) graph: DiGraphMap<ProductId, u32>,
}

impl KeptGraph {
    pub fn contains_edge(&self, from: ProductId, to: ProductId) -> bool {
        self.graph.contains_edge(from, to)
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Kept edges as `(from, to, weight)`, sorted.
    pub fn edges(&self) -> Vec<(ProductId, ProductId, u32)> {
        let mut edges: Vec<_> = self
            .graph
            .all_edges()
            .map(|(from, to, weight)| (from, to, *weight))
            .collect();
        edges.sort_unstable();
        edges
    }

    /// Products that appear in any kept edge, ascending.
    pub fn nodes(&self) -> Vec<ProductId> {
        let mut nodes: Vec<_> = self.graph.nodes().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Successors of `node`, ascending.
    pub fn successors(&self, node: ProductId) -> Vec<ProductId> {
        let mut next: Vec<_> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .collect();
        next.sort_unstable();
        next
    }

    pub fn in_degree(&self, node: ProductId) -> usize {
        self.graph
            .neighbors_directed(node, Direction::Incoming)
            .count()
    }
}
