//! # aisle-core
//!
//! Foundation crate for the Aisle list ordering engine.
//! Defines identifiers, models, storage traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AisleConfig;
pub use errors::{AisleError, AisleResult};
pub use models::{
    CandidateItem, ItemId, ListId, ListStatus, ProductId, ProductRelation, PurchaseEvent,
    SessionKind, SessionOutcome, StoreId,
};
