//! Rank lookup and the final comparator.

pub mod comparator;
pub mod inheritance;

pub use comparator::{sort_by_key, SortKey};
pub use inheritance::assign_ranks;
