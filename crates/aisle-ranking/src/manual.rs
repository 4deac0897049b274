//! Manual override: drag-and-drop positions recorded for the active store.

use aisle_core::models::{CandidateItem, StoreId};

use crate::rank::sort_by_key;

/// Manual mode is on when at least one candidate has a position recorded for
/// `store`. Positions recorded for any other store context are ignored.
pub fn is_active(store: Option<StoreId>, candidates: &[CandidateItem]) -> bool {
    candidates
        .iter()
        .any(|c| c.manual_position_for(store).is_some())
}

/// Order by manual position; items without a position for `store` go last,
/// then the usual category/name tie-break.
pub fn order(
    store: Option<StoreId>,
    candidates: Vec<CandidateItem>,
    uncategorized: &str,
) -> Vec<CandidateItem> {
    let positions: Vec<f64> = candidates
        .iter()
        .map(|c| c.manual_position_for(store).unwrap_or(f64::INFINITY))
        .collect();
    sort_by_key(candidates, &positions, uncategorized)
}
