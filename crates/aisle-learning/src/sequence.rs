//! SequenceLearner: consecutive purchases become directed edge increments.

use aisle_core::errors::AisleResult;
use aisle_core::models::{LearningSummary, PurchaseEvent, StoreId};
use aisle_core::traits::IEdgeSink;

/// Stateless. It trusts its input; deduplication across calls is the
/// controller's job.
pub struct SequenceLearner;

impl SequenceLearner {
    /// Sort `events` by timestamp (stable, so equal timestamps keep input
    /// order) and upsert one edge per consecutive pair of distinct products.
    pub fn learn<S>(
        sink: &S,
        store_id: StoreId,
        events: &[PurchaseEvent],
    ) -> AisleResult<LearningSummary>
    where
        S: IEdgeSink + ?Sized,
    {
        let mut ordered: Vec<&PurchaseEvent> = events.iter().collect();
        ordered.sort_by_key(|e| e.bought_at);

        let mut summary = LearningSummary::default();
        for pair in ordered.windows(2) {
            let (from, to) = (pair[0].product_id, pair[1].product_id);
            if from == to {
                summary.skipped_repeats += 1;
                continue;
            }
            sink.upsert_edge(store_id, from, to)?;
            summary.transitions += 1;
        }
        Ok(summary)
    }
}
