//! RankEngine: picks manual, learned, or alphabetical ordering for a list.

use serde::{Deserialize, Serialize};
use tracing::debug;

use aisle_core::config::RankingConfig;
use aisle_core::models::{CandidateItem, ProductId, ProductRelation, StoreId};

use crate::graph::{EdgeSet, MasterSequence};
use crate::manual;
use crate::rank::{assign_ranks, sort_by_key};

/// Which rule produced an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderMode {
    /// Positions set by the shopper for the current store.
    Manual,
    /// Walking order learned from previous trips.
    Learned,
    /// No store or no learned edges: category, then name.
    Alphabetical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedOrder {
    pub mode: OrderMode,
    pub items: Vec<CandidateItem>,
}

/// Stateless apart from its config; every call recomputes from the edges it
/// is given.
#[derive(Debug, Clone, Default)]
pub struct RankEngine {
    config: RankingConfig,
}

impl RankEngine {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Order `candidates` for shopping in `store`.
    ///
    /// Never fails: cycles, unseen products, and missing store context all
    /// resolve to a deterministic order.
    pub fn order(
        &self,
        store: Option<StoreId>,
        edges: &[ProductRelation],
        candidates: Vec<CandidateItem>,
    ) -> RankedOrder {
        let label = self.config.uncategorized_label.as_str();

        if manual::is_active(store, &candidates) {
            debug!(candidates = candidates.len(), "manual order active");
            return RankedOrder {
                mode: OrderMode::Manual,
                items: manual::order(store, candidates, label),
            };
        }

        let edge_set = match store {
            Some(store) => EdgeSet::from_relations(edges.iter().filter(|e| e.store_id == store)),
            None => EdgeSet::new(),
        };
        if edge_set.is_empty() {
            debug!(store = ?store, "no learned edges, alphabetical order");
            return RankedOrder {
                mode: OrderMode::Alphabetical,
                items: self.alphabetical(candidates),
            };
        }

        let master = MasterSequence::build(&edge_set.resolve_conflicts());
        let ranks = assign_ranks(&master, &candidates, &self.config);
        debug!(
            store = ?store,
            edges = edge_set.len(),
            master_len = master.len(),
            stalled = master.stalled(),
            "learned order"
        );
        RankedOrder {
            mode: OrderMode::Learned,
            items: sort_by_key(candidates, &ranks, label),
        }
    }

    /// `order` without the mode.
    pub fn compute_order(
        &self,
        store: Option<StoreId>,
        edges: &[ProductRelation],
        candidates: Vec<CandidateItem>,
    ) -> Vec<CandidateItem> {
        self.order(store, edges, candidates).items
    }

    /// Full walking order for a store's graph.
    pub fn master_sequence(&self, edges: &[ProductRelation]) -> Vec<ProductId> {
        let kept = EdgeSet::from_relations(edges).resolve_conflicts();
        MasterSequence::build(&kept).as_slice().to_vec()
    }

    /// Category, then name.
    pub fn alphabetical(&self, candidates: Vec<CandidateItem>) -> Vec<CandidateItem> {
        let ranks = vec![0.0; candidates.len()];
        sort_by_key(candidates, &ranks, &self.config.uncategorized_label)
    }
}
