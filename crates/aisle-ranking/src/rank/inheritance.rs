//! Rank lookup with category inheritance for products never seen in a store.

use std::collections::HashMap;

use aisle_core::config::RankingConfig;
use aisle_core::models::CandidateItem;

use crate::graph::MasterSequence;

/// One rank per candidate, in input order.
///
/// - Known product: its master-sequence index.
/// - Unknown product: highest known index among candidates of the same
///   category, plus `unranked_category_offset`.
/// - Unknown product with no ranked peer: `f64::INFINITY`.
pub fn assign_ranks(
    master: &MasterSequence,
    candidates: &[CandidateItem],
    config: &RankingConfig,
) -> Vec<f64> {
    let label = config.uncategorized_label.as_str();
    let known: Vec<Option<usize>> = candidates
        .iter()
        .map(|c| master.position(c.product_id))
        .collect();

    let mut best_by_category: HashMap<&str, usize> = HashMap::new();
    for (candidate, position) in candidates.iter().zip(&known) {
        if let Some(position) = *position {
            best_by_category
                .entry(candidate.category_or(label))
                .and_modify(|best| *best = (*best).max(position))
                .or_insert(position);
        }
    }

    candidates
        .iter()
        .zip(known)
        .map(|(candidate, position)| match position {
            Some(position) => position as f64,
            None => best_by_category
                .get(candidate.category_or(label))
                .map(|&best| best as f64 + config.unranked_category_offset)
                .unwrap_or(f64::INFINITY),
        })
        .collect()
}
