use crate::errors::AisleResult;
use crate::models::{
    CandidateItem, ItemId, ListId, ListStatus, PurchasedItem, ShoppingList,
};

use super::{IEdgeSink, IGraphStorage};

/// Operations available inside one atomic unit of work.
///
/// Every write made through this handle is committed together or rolled back
/// together.
pub trait IUnitOfWork: IEdgeSink {
    fn get_list(&self, list_id: ListId) -> AisleResult<Option<ShoppingList>>;

    /// Bought items with a `bought_at`, ordered by `(bought_at, item id)`.
    /// With `uncommitted_only`, items already committed are left out.
    fn purchased_sequence(
        &self,
        list_id: ListId,
        uncommitted_only: bool,
    ) -> AisleResult<Vec<PurchasedItem>>;

    /// Flag items as committed. Returns the number of rows changed.
    fn mark_committed(&self, item_ids: &[ItemId]) -> AisleResult<usize>;

    fn set_list_status(&self, list_id: ListId, status: ListStatus) -> AisleResult<()>;
}

/// List-side storage consumed by the ordering engine.
pub trait IShoppingStorage: IGraphStorage {
    fn get_list(&self, list_id: ListId) -> AisleResult<Option<ShoppingList>>;

    /// Unbought items of a list joined with product name and category.
    fn candidates(&self, list_id: ListId) -> AisleResult<Vec<CandidateItem>>;

    /// Run `work` inside one transaction. An error from `work` or from the
    /// commit rolls everything back and is returned.
    fn with_unit_of_work(
        &self,
        work: &mut dyn FnMut(&dyn IUnitOfWork) -> AisleResult<()>,
    ) -> AisleResult<()>;
}
