//! Domain records shared by storage, ranking, and learning.

mod candidate;
mod ids;
mod list;
mod product;
mod purchase;
mod relation;
mod session_outcome;

pub use candidate::CandidateItem;
pub use ids::{ItemId, ListId, ProductId, StoreId};
pub use list::{ListItem, ListStatus, ShoppingList};
pub use product::{Product, Store};
pub use purchase::{PurchaseEvent, PurchasedItem, SessionKind};
pub use relation::ProductRelation;
pub use session_outcome::{LearningSummary, SessionOutcome, SkipReason};
