use serde::{Deserialize, Serialize};

use super::{ItemId, ProductId, StoreId};

/// An unbought list item waiting to be ordered, joined with its product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateItem {
    pub item_id: ItemId,
    pub product_id: ProductId,
    pub name: String,
    pub category: Option<String>,
    pub manual_sort_position: Option<f64>,
    pub manual_sort_store_id: Option<StoreId>,
}

impl CandidateItem {
    /// Candidate without a manual position.
    pub fn new(
        item_id: impl Into<ItemId>,
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        category: Option<&str>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            product_id: product_id.into(),
            name: name.into(),
            category: category.map(str::to_string),
            manual_sort_position: None,
            manual_sort_store_id: None,
        }
    }

    /// Attach a manual position recorded for `store`.
    pub fn with_manual_position(mut self, position: f64, store: Option<StoreId>) -> Self {
        self.manual_sort_position = Some(position);
        self.manual_sort_store_id = store;
        self
    }

    /// Category label, substituting `uncategorized` for a missing one.
    pub fn category_or<'a>(&'a self, uncategorized: &'a str) -> &'a str {
        self.category.as_deref().unwrap_or(uncategorized)
    }

    /// Manual position if it was recorded for `store`.
    pub fn manual_position_for(&self, store: Option<StoreId>) -> Option<f64> {
        self.manual_sort_position
            .filter(|_| self.manual_sort_store_id == store)
    }
}
