//! Deterministic Kahn sort over the kept graph.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::algo::tarjan_scc;
use tracing::debug;

use aisle_core::models::ProductId;

use super::KeptGraph;

/// Total order over every product in the kept graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MasterSequence {
    order: Vec<ProductId>,
    index: HashMap<ProductId, usize>,
    /// How many trailing entries came from unresolved cycles.
    stalled: usize,
}

impl MasterSequence {
    /// Run Kahn's algorithm. The ready set always yields its smallest id and
    /// successors are relaxed in ascending id order, so the same kept graph
    /// always gives the same sequence. Nodes stuck on a cycle are appended in
    /// ascending id order.
    pub fn build(kept: &KeptGraph) -> Self {
        let mut in_degree: BTreeMap<ProductId, usize> = kept
            .nodes()
            .into_iter()
            .map(|node| (node, kept.in_degree(node)))
            .collect();

        let mut ready: BTreeSet<ProductId> = in_degree
            .iter()
            .filter(|(_, deg)| **deg == 0)
            .map(|(&node, _)| node)
            .collect();

        let mut order = Vec::with_capacity(in_degree.len());
        while let Some(node) = ready.pop_first() {
            order.push(node);
            in_degree.remove(&node);
            for next in kept.successors(node) {
                if let Some(deg) = in_degree.get_mut(&next) {
                    *deg -= 1;
                    if *deg == 0 {
                        ready.insert(next);
                    }
                }
            }
        }

        // Whatever is left sits on or behind a cycle.
        let stalled = in_degree.len();
        if stalled > 0 {
            let cycles: Vec<Vec<ProductId>> = tarjan_scc(&kept.graph)
                .into_iter()
                .filter(|scc| scc.len() > 1)
                .map(|mut scc| {
                    scc.sort_unstable();
                    scc
                })
                .collect();
            debug!(stalled, ?cycles, "walking order has unresolved cycles");
            order.extend(in_degree.into_keys());
        }

        let index = order.iter().enumerate().map(|(i, &p)| (p, i)).collect();
        Self {
            order,
            index,
            stalled,
        }
    }

    pub fn position(&self, product: ProductId) -> Option<usize> {
        self.index.get(&product).copied()
    }

    pub fn as_slice(&self) -> &[ProductId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of products placed by the cycle fallback.
    pub fn stalled(&self) -> usize {
        self.stalled
    }
}
