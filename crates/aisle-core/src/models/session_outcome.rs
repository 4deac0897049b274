use serde::{Deserialize, Serialize};

use super::SessionKind;

/// What one learner pass did to the graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningSummary {
    /// Transitions fed to `upsert_edge`.
    pub transitions: usize,
    /// Consecutive purchases of the same product, not learned.
    pub skipped_repeats: usize,
}

impl std::ops::AddAssign for LearningSummary {
    fn add_assign(&mut self, other: Self) {
        self.transitions += other.transitions;
        self.skipped_repeats += other.skipped_repeats;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    NoStoreContext,
    UnknownList,
    ListNotActive,
    NothingToLearn,
}

/// Result of a commit or completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SessionOutcome {
    Learned {
        kind: SessionKind,
        summary: LearningSummary,
        /// Items newly flagged as committed (always 0 on completion).
        items_committed: usize,
    },
    Skipped {
        kind: SessionKind,
        reason: SkipReason,
    },
}

impl SessionOutcome {
    pub fn transitions(&self) -> usize {
        match self {
            SessionOutcome::Learned { summary, .. } => summary.transitions,
            SessionOutcome::Skipped { .. } => 0,
        }
    }
}
