//! In-memory graph model: raw weighted edges, the conflict-free kept graph,
//! and the master sequence derived from it.

pub mod edge_set;
pub mod topo;

pub use edge_set::{EdgeSet, KeptGraph};
pub use topo::MasterSequence;
