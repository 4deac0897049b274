//! End-to-end ordering through the façade: learn trips, then rank lists.

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};

use aisle_core::config::{AisleConfig, RankingConfig};
use aisle_core::errors::{AisleError, AisleResult, StorageError};
use aisle_core::models::*;
use aisle_core::traits::{IEdgeSink, IGraphStorage, IShoppingStorage, IUnitOfWork};
use aisle_engine::{AisleEngine, OrderMode};
use aisle_storage::StorageEngine;

fn t(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 10, 8, 0, 0).unwrap() + Duration::minutes(minute)
}

fn events(products: &[ProductId]) -> Vec<PurchaseEvent> {
    products
        .iter()
        .enumerate()
        .map(|(i, &p)| PurchaseEvent::new(p, t(i as i64)))
        .collect()
}

struct Shop {
    engine: AisleEngine,
    store: StoreId,
}

impl Shop {
    fn new() -> Self {
        let engine = AisleEngine::open_in_memory().unwrap();
        let store = engine.storage().create_store("Wochenmarkt").unwrap().id;
        Self { engine, store }
    }

    fn product(&self, name: &str, category: Option<&str>) -> ProductId {
        self.engine.storage().create_product(name, category).unwrap().id
    }

    fn walk(&self, products: &[ProductId]) {
        self.engine
            .learn_from_session(Some(self.store), &events(products), SessionKind::Complete)
            .unwrap();
    }

    /// Active list in this store holding `products`, all unbought.
    fn list(&self, products: &[ProductId]) -> (ListId, Vec<ItemId>) {
        let storage = self.engine.storage();
        let list = storage.create_list("Einkauf", Some(self.store)).unwrap().id;
        let items = products
            .iter()
            .map(|&p| storage.add_item(list, p, 1).unwrap())
            .collect();
        (list, items)
    }

    fn ordered_names(&self, list: ListId) -> (OrderMode, Vec<String>) {
        let ranked = self.engine.ordered_items(list).unwrap();
        (ranked.mode, ranked.items.into_iter().map(|c| c.name).collect())
    }
}

fn names(items: &[CandidateItem]) -> Vec<&str> {
    items.iter().map(|c| c.name.as_str()).collect()
}

#[test]
fn learned_trips_drive_the_next_list() {
    let shop = Shop::new();
    let bread = shop.product("Brot", Some("Backwaren"));
    let milk = shop.product("Milch", Some("Kühlregal"));
    let cheese = shop.product("Käse", Some("Kühlregal"));
    for _ in 0..3 {
        shop.walk(&[bread, milk, cheese]);
    }

    let (list, _) = shop.list(&[cheese, bread, milk]);
    let (mode, order) = shop.ordered_names(list);

    assert_eq!(mode, OrderMode::Learned);
    assert_eq!(order, ["Brot", "Milch", "Käse"]);
}

#[test]
fn heavier_direction_wins() {
    let shop = Shop::new();
    let a = shop.product("Zwiebeln", Some("Gemüse"));
    let b = shop.product("Apfelsaft", Some("Getränke"));
    for _ in 0..3 {
        shop.walk(&[a, b]);
    }
    shop.walk(&[b, a]);

    let candidates = vec![
        CandidateItem::new(2, b, "Apfelsaft", Some("Getränke")),
        CandidateItem::new(1, a, "Zwiebeln", Some("Gemüse")),
    ];
    let order = shop.engine.compute_order(Some(shop.store), candidates).unwrap();
    assert_eq!(names(&order), ["Zwiebeln", "Apfelsaft"]);
}

#[test]
fn tied_directions_fall_back_to_category_and_name() {
    let shop = Shop::new();
    let salami = shop.product("Salami", Some("Wurst"));
    let gouda = shop.product("Gouda", Some("Käse"));
    for _ in 0..2 {
        shop.walk(&[salami, gouda]);
        shop.walk(&[gouda, salami]);
    }

    let candidates = vec![
        CandidateItem::new(1, salami, "Salami", Some("Wurst")),
        CandidateItem::new(2, gouda, "Gouda", Some("Käse")),
    ];
    let order = shop.engine.compute_order(Some(shop.store), candidates).unwrap();
    assert_eq!(names(&order), ["Gouda", "Salami"]);
}

#[test]
fn graphs_are_per_store() {
    let shop = Shop::new();
    let bread = shop.product("Brot", Some("Zz"));
    let apples = shop.product("Äpfel", Some("Aa"));
    shop.walk(&[bread, apples]);
    let other = shop.engine.storage().create_store("Discounter").unwrap().id;

    let candidates = vec![
        CandidateItem::new(1, bread, "Brot", Some("Zz")),
        CandidateItem::new(2, apples, "Äpfel", Some("Aa")),
    ];
    let here = shop.engine.compute_order(Some(shop.store), candidates.clone()).unwrap();
    let there = shop.engine.compute_order(Some(other), candidates).unwrap();

    assert_eq!(names(&here), ["Brot", "Äpfel"]);
    assert_eq!(names(&there), ["Äpfel", "Brot"]);
}

#[test]
fn unseen_product_follows_its_category_peer() {
    let shop = Shop::new();
    let apples = shop.product("Äpfel", Some("Obst"));
    let bread = shop.product("Brot", Some("Backwaren"));
    let pears = shop.product("Birnen", Some("Obst"));
    shop.walk(&[apples, bread]);

    let (list, _) = shop.list(&[bread, pears, apples]);
    let (_, order) = shop.ordered_names(list);
    assert_eq!(order, ["Äpfel", "Birnen", "Brot"]);
}

#[test]
fn unseen_product_without_ranked_peer_goes_last() {
    let shop = Shop::new();
    let bread = shop.product("Brot", Some("Backwaren"));
    let milk = shop.product("Milch", Some("Kühlregal"));
    let plums = shop.product("Aprikosen", Some("Obst"));
    shop.walk(&[bread, milk]);

    let (list, _) = shop.list(&[plums, milk, bread]);
    let (_, order) = shop.ordered_names(list);
    assert_eq!(order, ["Brot", "Milch", "Aprikosen"]);
}

#[test]
fn no_store_orders_by_category_then_name() {
    let shop = Shop::new();
    let candidates = vec![
        CandidateItem::new(1, 1, "Tomaten", Some("Gemüse")),
        CandidateItem::new(2, 2, "Bier", Some("Getränke")),
        CandidateItem::new(3, 3, "Gurke", Some("Gemüse")),
    ];
    let forward = shop.engine.compute_order(None, candidates.clone()).unwrap();
    let mut reversed_input = candidates;
    reversed_input.reverse();
    let reversed = shop.engine.compute_order(None, reversed_input).unwrap();

    assert_eq!(names(&forward), ["Gurke", "Tomaten", "Bier"]);
    assert_eq!(forward, reversed);
}

#[test]
fn empty_candidate_list_orders_to_empty() {
    let shop = Shop::new();
    assert!(shop.engine.compute_order(Some(shop.store), Vec::new()).unwrap().is_empty());
}

#[test]
fn manual_order_overrides_learning_for_its_store_only() {
    let shop = Shop::new();
    let bread = shop.product("Brot", Some("Backwaren"));
    let milk = shop.product("Milch", Some("Kühlregal"));
    let eggs = shop.product("Eier", Some("Kühlregal"));
    shop.walk(&[bread, milk, eggs]);

    let (list, items) = shop.list(&[bread, milk, eggs]);
    let storage = shop.engine.storage();
    storage.apply_manual_order(list, &[items[2], items[0], items[1]]).unwrap();

    let (mode, order) = shop.ordered_names(list);
    assert_eq!(mode, OrderMode::Manual);
    assert_eq!(order, ["Eier", "Brot", "Milch"]);

    // Positions were stamped for the first store; elsewhere they are stale.
    let other = storage.create_store("Discounter").unwrap().id;
    storage.set_list_store(list, Some(other)).unwrap();
    let (mode, order) = shop.ordered_names(list);
    assert_eq!(mode, OrderMode::Alphabetical);
    assert_eq!(order, ["Brot", "Eier", "Milch"]);
}

#[test]
fn clearing_manual_order_restores_learned_order() {
    let shop = Shop::new();
    let bread = shop.product("Brot", None);
    let milk = shop.product("Milch", None);
    shop.walk(&[bread, milk]);
    let (list, items) = shop.list(&[bread, milk]);
    shop.engine
        .storage()
        .apply_manual_order(list, &[items[1], items[0]])
        .unwrap();
    assert_eq!(shop.ordered_names(list).1, ["Milch", "Brot"]);

    shop.engine.storage().clear_manual_order(list).unwrap();

    let (mode, order) = shop.ordered_names(list);
    assert_eq!(mode, OrderMode::Learned);
    assert_eq!(order, ["Brot", "Milch"]);
}

#[test]
fn bought_items_leave_the_ordering() {
    let shop = Shop::new();
    let bread = shop.product("Brot", None);
    let milk = shop.product("Milch", None);
    let (list, items) = shop.list(&[bread, milk]);
    shop.engine.storage().set_item_bought(items[0], true, t(0)).unwrap();

    assert_eq!(shop.ordered_names(list).1, ["Milch"]);
}

#[test]
fn trip_commits_feed_the_next_list() {
    let shop = Shop::new();
    let bread = shop.product("Brot", Some("Zz"));
    let milk = shop.product("Milch", Some("Aa"));
    let (list, items) = shop.list(&[bread, milk]);
    let storage = shop.engine.storage();
    storage.set_item_bought(items[0], true, t(0)).unwrap();
    storage.set_item_bought(items[1], true, t(4)).unwrap();

    let committed = shop.engine.commit_session(list).unwrap();
    assert_eq!(committed.transitions(), 1);
    let again = shop.engine.commit_session(list).unwrap();
    assert!(matches!(
        again,
        SessionOutcome::Skipped { reason: SkipReason::NothingToLearn, .. }
    ));
    shop.engine.complete_list(list).unwrap();

    let (next, _) = shop.list(&[milk, bread]);
    let (mode, order) = shop.ordered_names(next);
    assert_eq!(mode, OrderMode::Learned);
    assert_eq!(order, ["Brot", "Milch"]);
    assert_eq!(storage.get_list(list).unwrap().unwrap().status, ListStatus::Completed);
}

#[test]
fn learning_without_store_is_skipped() {
    let shop = Shop::new();
    let a = shop.product("A", None);
    let b = shop.product("B", None);
    let outcome = shop
        .engine
        .learn_from_session(None, &events(&[a, b]), SessionKind::Commit)
        .unwrap();
    assert!(matches!(
        outcome,
        SessionOutcome::Skipped { reason: SkipReason::NoStoreContext, .. }
    ));
    assert_eq!(shop.engine.storage().edge_count(shop.store).unwrap(), 0);
}

#[test]
fn walking_order_lists_every_known_product() {
    let shop = Shop::new();
    let a = shop.product("A", None);
    let b = shop.product("B", None);
    let c = shop.product("C", None);
    shop.walk(&[c, a]);
    shop.walk(&[a, b]);

    assert_eq!(shop.engine.walking_order(shop.store).unwrap(), vec![c, a, b]);
}

#[test]
fn ordering_an_unknown_list_is_an_error() {
    let shop = Shop::new();
    let err = shop.engine.ordered_items(ListId(999)).unwrap_err();
    assert!(matches!(err, AisleError::ListNotFound { .. }));
}

#[test]
fn ordering_is_deterministic_across_calls() {
    let shop = Shop::new();
    let ids: Vec<ProductId> = (0..6)
        .map(|i| shop.product(&format!("P{i}"), Some(if i % 2 == 0 { "Even" } else { "Odd" })))
        .collect();
    shop.walk(&[ids[3], ids[1], ids[4]]);
    shop.walk(&[ids[4], ids[3]]);
    shop.walk(&[ids[0], ids[5], ids[2], ids[0]]);

    let (list, _) = shop.list(&ids);
    let first = shop.engine.ordered_items(list).unwrap();
    for _ in 0..5 {
        assert_eq!(shop.engine.ordered_items(list).unwrap(), first);
    }
}

// --- Configuration ---

#[test]
fn open_from_config_uses_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("aisle.db");
    let toml = format!(
        "[storage]\ndb_path = {:?}\nread_pool_size = 2\n\n[ranking]\nuncategorized_label = \"Sonstiges\"\n",
        path.to_string_lossy()
    );
    let config = AisleConfig::from_toml(&toml).unwrap();

    let store = {
        let engine = AisleEngine::open(&config).unwrap();
        let storage = engine.storage();
        let store = storage.create_store("Markt").unwrap().id;
        let a = storage.create_product("A", None).unwrap().id;
        let b = storage.create_product("B", None).unwrap().id;
        engine
            .learn_from_session(Some(store), &events(&[b, a]), SessionKind::Complete)
            .unwrap();
        store
    };

    let reopened = AisleEngine::open(&config).unwrap();
    assert_eq!(reopened.walking_order(store).unwrap().len(), 2);
    assert!(path.exists());
}

#[test]
fn open_rejects_invalid_config() {
    let mut config = AisleConfig::default();
    config.ranking.unranked_category_offset = 1.5;
    assert!(matches!(
        AisleEngine::open(&config),
        Err(AisleError::ConfigError(_))
    ));
}

#[test]
fn in_memory_path_opens_without_touching_disk() {
    let mut config = AisleConfig::default();
    config.storage.db_path = aisle_engine::engine::IN_MEMORY_DB_PATH.to_string();
    let engine = AisleEngine::open(&config).unwrap();
    assert!(engine.storage().create_store("Markt").is_ok());
}

#[test]
fn tracing_init_is_idempotent() {
    let config = AisleConfig::default().observability;
    aisle_engine::observability::init_tracing(&config);
    assert!(!aisle_engine::observability::init_tracing(&config));
}

// --- Degraded reads ---

/// Storage whose graph reads always fail.
struct UnreadableGraph(StorageEngine);

impl IEdgeSink for UnreadableGraph {
    fn upsert_edge(
        &self,
        store: StoreId,
        from: ProductId,
        to: ProductId,
    ) -> AisleResult<bool> {
        self.0.upsert_edge(store, from, to)
    }
}

impl IGraphStorage for UnreadableGraph {
    fn get_edges(&self, _: StoreId) -> AisleResult<Vec<ProductRelation>> {
        Err(StorageError::SqliteError {
            message: "database disk image is malformed".into(),
        }
        .into())
    }
    fn edge_count(&self, store: StoreId) -> AisleResult<usize> {
        self.0.edge_count(store)
    }
}

impl IShoppingStorage for UnreadableGraph {
    fn get_list(&self, list_id: ListId) -> AisleResult<Option<ShoppingList>> {
        IShoppingStorage::get_list(&self.0, list_id)
    }
    fn candidates(&self, list_id: ListId) -> AisleResult<Vec<CandidateItem>> {
        self.0.candidates(list_id)
    }
    fn with_unit_of_work(
        &self,
        work: &mut dyn FnMut(&dyn IUnitOfWork) -> AisleResult<()>,
    ) -> AisleResult<()> {
        self.0.with_unit_of_work(work)
    }
}

#[test]
fn failed_edge_read_degrades_to_alphabetical() {
    let storage = StorageEngine::open_in_memory().unwrap();
    let store = storage.create_store("Markt").unwrap().id;
    let engine = AisleEngine::new(
        Arc::new(UnreadableGraph(storage)),
        RankingConfig::default(),
    );

    let candidates = vec![
        CandidateItem::new(1, 1, "Milch", Some("Kühlregal")),
        CandidateItem::new(2, 2, "Brot", Some("Backwaren")),
    ];
    let order = engine.compute_order(Some(store), candidates).unwrap();
    assert_eq!(names(&order), ["Brot", "Milch"]);

    // Walking order has no fallback; the read error surfaces.
    assert!(engine.walking_order(store).is_err());
}
