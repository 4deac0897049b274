use serde::{Deserialize, Serialize};

use super::{ProductId, StoreId};

/// A learned walking transition: in `store_id`, `predecessor` was bought right
/// before `successor` on `weight` observed trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductRelation {
    pub store_id: StoreId,
    pub predecessor: ProductId,
    pub successor: ProductId,
    pub weight: u32,
}

impl ProductRelation {
    pub fn new(
        store_id: impl Into<StoreId>,
        predecessor: impl Into<ProductId>,
        successor: impl Into<ProductId>,
        weight: u32,
    ) -> Self {
        Self {
            store_id: store_id.into(),
            predecessor: predecessor.into(),
            successor: successor.into(),
            weight,
        }
    }
}
