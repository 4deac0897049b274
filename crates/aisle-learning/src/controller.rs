//! SessionCommitController: exactly-once learning per purchased transition.

use std::sync::Arc;

use tracing::{debug, info};

use aisle_core::errors::{AisleResult, StorageError};
use aisle_core::models::{
    ItemId, LearningSummary, ListId, ListStatus, PurchaseEvent, PurchasedItem, SessionKind,
    SessionOutcome, SkipReason, StoreId,
};
use aisle_core::traits::{IShoppingStorage, IUnitOfWork};

use crate::sequence::SequenceLearner;

/// Runs the learner for commits and completions. Each call is one unit of
/// work: edge increments, committed flags, and the status change land
/// together or not at all.
pub struct SessionCommitController {
    storage: Arc<dyn IShoppingStorage>,
}

impl SessionCommitController {
    pub fn new(storage: Arc<dyn IShoppingStorage>) -> Self {
        Self { storage }
    }

    /// Partial commit: learn from purchases made since the last commit and
    /// flag exactly those items.
    ///
    /// Transitions are learned inside the new batch only; the step from the
    /// last committed purchase to the first new one is not recorded.
    pub fn commit(&self, list_id: ListId) -> AisleResult<SessionOutcome> {
        let outcome = self.in_unit_of_work(|uow| commit_pending(uow, list_id))?;
        log_outcome(list_id, &outcome);
        Ok(outcome)
    }

    /// Completion: walk the whole bought sequence once and mark the list
    /// completed. Pairs of items that were both committed earlier are
    /// skipped; the step from a committed item to a new one is learned here.
    /// Lists that are not active are left alone.
    pub fn complete(&self, list_id: ListId) -> AisleResult<SessionOutcome> {
        let outcome = self.in_unit_of_work(|uow| complete_list(uow, list_id))?;
        log_outcome(list_id, &outcome);
        Ok(outcome)
    }

    /// Learn a caller-supplied sequence for `store_id` in one transaction.
    pub fn learn_sequence(
        &self,
        store_id: Option<StoreId>,
        sequence: &[PurchaseEvent],
        kind: SessionKind,
    ) -> AisleResult<SessionOutcome> {
        let Some(store_id) = store_id else {
            return Ok(SessionOutcome::Skipped {
                kind,
                reason: SkipReason::NoStoreContext,
            });
        };
        if sequence.is_empty() {
            return Ok(SessionOutcome::Skipped {
                kind,
                reason: SkipReason::NothingToLearn,
            });
        }

        let summary =
            self.in_unit_of_work(|uow| SequenceLearner::learn(uow, store_id, sequence))?;
        info!(
            store = %store_id,
            kind = kind.as_str(),
            transitions = summary.transitions,
            "learned session sequence"
        );
        Ok(SessionOutcome::Learned {
            kind,
            summary,
            items_committed: 0,
        })
    }

    fn in_unit_of_work<T>(
        &self,
        mut work: impl FnMut(&dyn IUnitOfWork) -> AisleResult<T>,
    ) -> AisleResult<T> {
        let mut result = None;
        self.storage.with_unit_of_work(&mut |uow| {
            result = Some(work(uow)?);
            Ok(())
        })?;
        result.ok_or_else(|| {
            StorageError::TransactionFailed {
                stage: "unit of work".into(),
                reason: "committed without running".into(),
            }
            .into()
        })
    }
}

fn commit_pending(uow: &dyn IUnitOfWork, list_id: ListId) -> AisleResult<SessionOutcome> {
    let kind = SessionKind::Commit;
    let Some(list) = uow.get_list(list_id)? else {
        return Ok(skipped(kind, SkipReason::UnknownList));
    };
    if list.status != ListStatus::Active {
        return Ok(skipped(kind, SkipReason::ListNotActive));
    }
    let Some(store_id) = list.store_id else {
        return Ok(skipped(kind, SkipReason::NoStoreContext));
    };

    let pending = uow.purchased_sequence(list_id, true)?;
    if pending.is_empty() {
        return Ok(skipped(kind, SkipReason::NothingToLearn));
    }

    let events: Vec<PurchaseEvent> = pending.iter().map(|p| p.event).collect();
    let summary = SequenceLearner::learn(uow, store_id, &events)?;
    let ids: Vec<ItemId> = pending.iter().map(|p| p.item_id).collect();
    let items_committed = uow.mark_committed(&ids)?;

    Ok(SessionOutcome::Learned {
        kind,
        summary,
        items_committed,
    })
}

fn complete_list(uow: &dyn IUnitOfWork, list_id: ListId) -> AisleResult<SessionOutcome> {
    let kind = SessionKind::Complete;
    let Some(list) = uow.get_list(list_id)? else {
        return Ok(skipped(kind, SkipReason::UnknownList));
    };
    if list.status != ListStatus::Active {
        return Ok(skipped(kind, SkipReason::ListNotActive));
    }

    let outcome = match list.store_id {
        Some(store_id) => {
            let sequence = uow.purchased_sequence(list_id, false)?;
            let mut summary = LearningSummary::default();
            for run in unlearned_runs(&sequence) {
                summary += SequenceLearner::learn(uow, store_id, &run)?;
            }
            SessionOutcome::Learned {
                kind,
                summary,
                items_committed: 0,
            }
        }
        // The list still completes; there is just no graph to learn into.
        None => skipped(kind, SkipReason::NoStoreContext),
    };

    uow.set_list_status(list_id, ListStatus::Completed)?;
    Ok(outcome)
}

/// Split the full bought sequence wherever two neighbours were both already
/// committed; those transitions are in the graph. Runs shorter than two
/// events carry no transition and are dropped.
fn unlearned_runs(sequence: &[PurchasedItem]) -> Vec<Vec<PurchaseEvent>> {
    let mut runs = Vec::new();
    let mut current: Vec<PurchaseEvent> = Vec::new();
    let mut previous_committed = false;
    for item in sequence {
        if item.committed && previous_committed {
            runs.push(std::mem::take(&mut current));
        }
        current.push(item.event);
        previous_committed = item.committed;
    }
    runs.push(current);
    runs.retain(|run| run.len() > 1);
    runs
}

fn skipped(kind: SessionKind, reason: SkipReason) -> SessionOutcome {
    SessionOutcome::Skipped { kind, reason }
}

fn log_outcome(list_id: ListId, outcome: &SessionOutcome) {
    match outcome {
        SessionOutcome::Learned {
            kind,
            summary,
            items_committed,
        } => info!(
            list = %list_id,
            kind = kind.as_str(),
            transitions = summary.transitions,
            skipped_repeats = summary.skipped_repeats,
            items_committed,
            "session learned"
        ),
        SessionOutcome::Skipped { kind, reason } => {
            debug!(list = %list_id, kind = kind.as_str(), ?reason, "session skipped")
        }
    }
}
