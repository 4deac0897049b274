//! # aisle-ranking
//!
//! Turns a store's learned co-purchase graph into a walking order for the
//! unbought items of a list.
//!
//! Pipeline: conflict resolution → deterministic Kahn sort → rank lookup with
//! category inheritance → three-level comparator. When the list carries manual
//! positions for its store, the manual layer replaces the whole pipeline.
//!
//! Everything here is a pure function of its inputs; persistence lives in
//! `aisle-storage`.

pub mod engine;
pub mod graph;
pub mod manual;
pub mod rank;

pub use engine::{OrderMode, RankEngine, RankedOrder};
pub use graph::{EdgeSet, KeptGraph, MasterSequence};
