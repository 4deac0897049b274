//! # aisle-learning
//!
//! Feeds observed purchase order into the per-store co-purchase graph.
//!
//! `SequenceLearner` turns one ordered session into edge increments.
//! `SessionCommitController` decides which purchases a commit or a list
//! completion hands to the learner, and flags them so a transition is never
//! learned twice by repeated commits.

pub mod controller;
pub mod sequence;

pub use controller::SessionCommitController;
pub use sequence::SequenceLearner;
