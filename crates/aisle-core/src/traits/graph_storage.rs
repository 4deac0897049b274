use crate::errors::AisleResult;
use crate::models::{ProductId, ProductRelation, StoreId};

/// Anything that can record a learned transition.
pub trait IEdgeSink {
    /// Create the edge with weight 1 or atomically add 1 to its weight.
    ///
    /// `predecessor == successor` is a no-op returning `Ok(false)`.
    fn upsert_edge(
        &self,
        store_id: StoreId,
        predecessor: ProductId,
        successor: ProductId,
    ) -> AisleResult<bool>;
}

/// Per-store co-purchase graph.
pub trait IGraphStorage: IEdgeSink + Send + Sync {
    /// Every edge learned for `store_id`, in no particular order.
    fn get_edges(&self, store_id: StoreId) -> AisleResult<Vec<ProductRelation>>;

    fn edge_count(&self, store_id: StoreId) -> AisleResult<usize>;
}
