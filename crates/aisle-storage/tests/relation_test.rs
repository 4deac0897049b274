//! Co-purchase graph storage: upsert-increment, self-loop rejection, store scoping.

use aisle_core::constants::INITIAL_EDGE_WEIGHT;
use aisle_core::models::{ProductId, StoreId};
use aisle_core::traits::{IEdgeSink, IGraphStorage};
use aisle_storage::StorageEngine;

fn seeded() -> (StorageEngine, StoreId, Vec<ProductId>) {
    let engine = StorageEngine::open_in_memory().unwrap();
    let store = engine.create_store("Wochenmarkt").unwrap().id;
    let products = ["Äpfel", "Brot", "Käse"]
        .iter()
        .map(|name| engine.create_product(name, None).unwrap().id)
        .collect();
    (engine, store, products)
}

#[test]
fn first_observation_creates_edge_with_weight_one() {
    let (engine, store, p) = seeded();
    assert!(engine.upsert_edge(store, p[0], p[1]).unwrap());

    let edges = engine.get_edges(store).unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].predecessor, p[0]);
    assert_eq!(edges[0].successor, p[1]);
    assert_eq!(edges[0].weight, INITIAL_EDGE_WEIGHT);
}

#[test]
fn repeated_observation_increments_instead_of_duplicating() {
    let (engine, store, p) = seeded();
    for _ in 0..3 {
        engine.upsert_edge(store, p[0], p[1]).unwrap();
    }
    assert_eq!(engine.edge_count(store).unwrap(), 1);
    assert_eq!(engine.edge_weight(store, p[0], p[1]).unwrap(), Some(3));
}

#[test]
fn opposite_directions_are_separate_edges() {
    let (engine, store, p) = seeded();
    engine.upsert_edge(store, p[0], p[1]).unwrap();
    engine.upsert_edge(store, p[1], p[0]).unwrap();
    assert_eq!(engine.edge_count(store).unwrap(), 2);
}

#[test]
fn self_loop_is_a_silent_noop() {
    let (engine, store, p) = seeded();
    assert!(!engine.upsert_edge(store, p[2], p[2]).unwrap());
    assert_eq!(engine.edge_count(store).unwrap(), 0);
}

#[test]
fn edges_are_scoped_per_store() {
    let (engine, store, p) = seeded();
    let other = engine.create_store("Discounter").unwrap().id;
    engine.upsert_edge(store, p[0], p[1]).unwrap();
    engine.upsert_edge(other, p[1], p[0]).unwrap();

    let here = engine.get_edges(store).unwrap();
    assert_eq!(here.len(), 1);
    assert_eq!(here[0].predecessor, p[0]);
    assert!(here.iter().all(|e| e.store_id == store));
    assert_eq!(engine.edge_weight(other, p[0], p[1]).unwrap(), None);
}

#[test]
fn unknown_product_is_a_storage_failure() {
    let (engine, store, p) = seeded();
    let err = engine.upsert_edge(store, p[0], ProductId(9_999)).unwrap_err();
    assert!(matches!(err, aisle_core::AisleError::StorageError(_)));
}

#[test]
fn store_without_edges_reads_empty() {
    let (engine, _, _) = seeded();
    assert!(engine.get_edges(StoreId(404)).unwrap().is_empty());
}
