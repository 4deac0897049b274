//! `(rank, category, name)` ordering shared by learned and manual modes.

use std::cmp::Ordering;

use aisle_core::models::{CandidateItem, ItemId, ProductId};

/// Borrowed sort key for one candidate.
#[derive(Debug, Clone, Copy)]
pub struct SortKey<'a> {
    pub rank: f64,
    pub category: &'a str,
    pub name: &'a str,
    pub product_id: ProductId,
    pub item_id: ItemId,
}

impl<'a> SortKey<'a> {
    pub fn new(rank: f64, candidate: &'a CandidateItem, uncategorized: &'a str) -> Self {
        Self {
            rank,
            category: candidate.category_or(uncategorized),
            name: &candidate.name,
            product_id: candidate.product_id,
            item_id: candidate.item_id,
        }
    }

    /// Rank, then category, then name. Ids break exact duplicates so the
    /// output never depends on input order.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.rank
            .total_cmp(&other.rank)
            .then_with(|| self.category.cmp(other.category))
            .then_with(|| self.name.cmp(other.name))
            .then_with(|| self.product_id.cmp(&other.product_id))
            .then_with(|| self.item_id.cmp(&other.item_id))
    }
}

/// Sort `candidates` by the rank produced for each of them.
pub fn sort_by_key(
    candidates: Vec<CandidateItem>,
    ranks: &[f64],
    uncategorized: &str,
) -> Vec<CandidateItem> {
    debug_assert_eq!(candidates.len(), ranks.len());
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by(|&a, &b| {
        SortKey::new(ranks[a], &candidates[a], uncategorized)
            .compare(&SortKey::new(ranks[b], &candidates[b], uncategorized))
    });

    let mut slots: Vec<Option<CandidateItem>> = candidates.into_iter().map(Some).collect();
    order
        .into_iter()
        .filter_map(|idx| slots[idx].take())
        .collect()
}
