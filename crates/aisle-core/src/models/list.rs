use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ItemId, ListId, ProductId, StoreId};

/// Lifecycle of a shopping list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListStatus {
    Active,
    Completed,
    Archived,
}

impl ListStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ListStatus::Active => "active",
            ListStatus::Completed => "completed",
            ListStatus::Archived => "archived",
        }
    }

    pub fn from_str_name(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ListStatus::Active),
            "completed" => Some(ListStatus::Completed),
            "archived" => Some(ListStatus::Archived),
            _ => None,
        }
    }
}

/// A shopping list. Its store context selects which graph and which manual
/// positions apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: ListId,
    pub name: String,
    pub store_id: Option<StoreId>,
    pub status: ListStatus,
}

/// One product on one list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub id: ItemId,
    pub list_id: ListId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub bought: bool,
    pub bought_at: Option<DateTime<Utc>>,
    /// Set once the purchase has been fed to the learner by a partial commit.
    pub committed: bool,
    pub manual_sort_position: Option<f64>,
    /// Store context the manual position was recorded for.
    pub manual_sort_store_id: Option<StoreId>,
}
