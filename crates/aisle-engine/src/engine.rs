//! AisleEngine: the façade hosts call into.

use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use aisle_core::config::{AisleConfig, RankingConfig};
use aisle_core::errors::{AisleError, AisleResult};
use aisle_core::models::{
    CandidateItem, ListId, ProductId, PurchaseEvent, SessionKind, SessionOutcome, StoreId,
};
use aisle_core::traits::IShoppingStorage;
use aisle_learning::SessionCommitController;
use aisle_ranking::{RankEngine, RankedOrder};
use aisle_storage::StorageEngine;

/// `storage.db_path` value that selects an in-memory database.
pub const IN_MEMORY_DB_PATH: &str = ":memory:";

/// Ranks list items and learns from finished trips.
///
/// Generic over the storage so hosts and tests can inject their own
/// `IShoppingStorage`; the default is the SQLite [`StorageEngine`].
pub struct AisleEngine<S: IShoppingStorage + 'static = StorageEngine> {
    storage: Arc<S>,
    ranker: RankEngine,
    sessions: SessionCommitController,
}

impl AisleEngine<StorageEngine> {
    /// Validate `config`, open (and migrate) the database it names.
    pub fn open(config: &AisleConfig) -> AisleResult<Self> {
        config.validate()?;
        let storage = if config.storage.db_path == IN_MEMORY_DB_PATH {
            StorageEngine::open_in_memory()?
        } else {
            StorageEngine::open_with_config(Path::new(&config.storage.db_path), &config.storage)?
        };
        Ok(Self::new(Arc::new(storage), config.ranking.clone()))
    }

    /// In-memory database with default settings.
    pub fn open_in_memory() -> AisleResult<Self> {
        Ok(Self::new(
            Arc::new(StorageEngine::open_in_memory()?),
            RankingConfig::default(),
        ))
    }
}

impl<S: IShoppingStorage + 'static> AisleEngine<S> {
    pub fn new(storage: Arc<S>, ranking: RankingConfig) -> Self {
        let sessions = SessionCommitController::new(storage.clone());
        Self {
            storage,
            ranker: RankEngine::new(ranking),
            sessions,
        }
    }

    /// The underlying storage, for catalog and list maintenance.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Order `candidates` for a trip through `store_id`.
    ///
    /// A failed edge read is logged and treated as "nothing learned", so the
    /// caller still gets a usable (manual or alphabetical) order.
    pub fn compute_order(
        &self,
        store_id: Option<StoreId>,
        candidates: Vec<CandidateItem>,
    ) -> AisleResult<Vec<CandidateItem>> {
        Ok(self.rank(store_id, candidates).items)
    }

    /// Record the transitions of `sequence` in `store_id`'s graph.
    pub fn learn_from_session(
        &self,
        store_id: Option<StoreId>,
        sequence: &[PurchaseEvent],
        kind: SessionKind,
    ) -> AisleResult<SessionOutcome> {
        let _span = crate::learn_span!(store_id, kind).entered();
        self.sessions.learn_sequence(store_id, sequence, kind)
    }

    /// Unbought items of `list_id` in shopping order, with the rule that
    /// produced it.
    pub fn ordered_items(&self, list_id: ListId) -> AisleResult<RankedOrder> {
        let list = self
            .storage
            .get_list(list_id)?
            .ok_or(AisleError::ListNotFound { id: list_id })?;
        let candidates = self.storage.candidates(list_id)?;
        Ok(self.rank(list.store_id, candidates))
    }

    /// Learn from items bought since the last commit.
    pub fn commit_session(&self, list_id: ListId) -> AisleResult<SessionOutcome> {
        let _span = crate::commit_span!(list_id, SessionKind::Commit).entered();
        self.sessions.commit(list_id)
    }

    /// Learn the whole trip and close the list.
    pub fn complete_list(&self, list_id: ListId) -> AisleResult<SessionOutcome> {
        let _span = crate::commit_span!(list_id, SessionKind::Complete).entered();
        self.sessions.complete(list_id)
    }

    /// Every product the store's graph knows, in learned walking order.
    pub fn walking_order(&self, store_id: StoreId) -> AisleResult<Vec<ProductId>> {
        let edges = self.storage.get_edges(store_id)?;
        Ok(self.ranker.master_sequence(&edges))
    }

    fn rank(&self, store_id: Option<StoreId>, candidates: Vec<CandidateItem>) -> RankedOrder {
        let _span = crate::rank_span!(store_id, candidates.len()).entered();
        let edges = match store_id {
            Some(store) => self.storage.get_edges(store).unwrap_or_else(|err| {
                warn!(
                    store = %store,
                    error = %err,
                    "edge read failed, ranking without learned order"
                );
                Vec::new()
            }),
            None => Vec::new(),
        };
        self.ranker.order(store_id, &edges, candidates)
    }
}
