use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ProductId;

/// One observed purchase inside a shopping session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseEvent {
    pub product_id: ProductId,
    pub bought_at: DateTime<Utc>,
}

impl PurchaseEvent {
    pub fn new(product_id: impl Into<ProductId>, bought_at: DateTime<Utc>) -> Self {
        Self {
            product_id: product_id.into(),
            bought_at,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Mid-trip commit; only not-yet-committed purchases are learned.
    Commit,
    /// List completion; the full sequence is learned once.
    Complete,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Commit => "commit",
            SessionKind::Complete => "complete",
        }
    }
}

/// A bought list item as seen by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasedItem {
    pub item_id: super::ItemId,
    pub event: PurchaseEvent,
    /// Already handed to the learner by an earlier commit.
    pub committed: bool,
}
