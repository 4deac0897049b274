//! # aisle-engine
//!
//! Entry point for hosts: opens storage from an [`AisleConfig`], ranks list
//! items for a store, and turns finished trips into learned edges.
//!
//! [`AisleConfig`]: aisle_core::AisleConfig

pub mod engine;
pub mod observability;

pub use aisle_ranking::{OrderMode, RankedOrder};
pub use engine::AisleEngine;
