//! Property tests for ordering and conflict resolution.

use proptest::prelude::*;

use aisle_core::models::{CandidateItem, ProductId, ProductRelation, StoreId};
use aisle_ranking::{EdgeSet, MasterSequence, OrderMode, RankEngine};

const STORE: StoreId = StoreId(1);
const CATEGORIES: [&str; 4] = ["Obst", "Gemüse", "Kühlregal", "Backwaren"];

fn edge_strategy(n: i64) -> impl Strategy<Value = Vec<(i64, i64, u32)>> {
    prop::collection::vec((0..n, 0..n, 1u32..6), 0..(n as usize * 3))
}

fn candidate_strategy(n: i64) -> impl Strategy<Value = Vec<CandidateItem>> {
    prop::collection::btree_set(0..n, 0..(n as usize))
        .prop_flat_map(|products| {
            let len = products.len();
            (
                Just(products.into_iter().collect::<Vec<_>>()),
                prop::collection::vec((0usize..CATEGORIES.len() + 1, "[a-z]{1,6}"), len),
            )
        })
        .prop_map(|(products, attrs)| {
            products
                .into_iter()
                .zip(attrs)
                .map(|(product, (cat, name))| {
                    CandidateItem::new(product + 100, product, name, CATEGORIES.get(cat).copied())
                })
                .collect()
        })
}

fn relations(edges: &[(i64, i64, u32)]) -> Vec<ProductRelation> {
    edges
        .iter()
        .filter(|(a, b, _)| a != b)
        .map(|&(a, b, w)| ProductRelation::new(STORE, a, b, w))
        .collect()
}

fn ids(items: &[CandidateItem]) -> Vec<i64> {
    items.iter().map(|c| c.item_id.get()).collect()
}

proptest! {
    #[test]
    fn kept_graph_has_no_two_cycles(edges in edge_strategy(12)) {
        let kept = EdgeSet::from_relations(&relations(&edges)).resolve_conflicts();
        for (from, to, _) in kept.edges() {
            prop_assert!(!kept.contains_edge(to, from), "{from} <-> {to} both kept");
        }
    }

    #[test]
    fn master_sequence_covers_each_kept_node_once(edges in edge_strategy(12)) {
        let kept = EdgeSet::from_relations(&relations(&edges)).resolve_conflicts();
        let master = MasterSequence::build(&kept);
        let mut seen: Vec<ProductId> = master.as_slice().to_vec();
        seen.sort_unstable();
        prop_assert_eq!(seen, kept.nodes());
    }

    #[test]
    fn compute_order_is_deterministic_and_input_order_independent(
        edges in edge_strategy(10),
        candidates in candidate_strategy(14),
    ) {
        let engine = RankEngine::default();
        let rels = relations(&edges);
        let first = engine.compute_order(Some(STORE), &rels, candidates.clone());
        let again = engine.compute_order(Some(STORE), &rels, candidates.clone());
        let mut reversed_input = candidates.clone();
        reversed_input.reverse();
        let reversed = engine.compute_order(Some(STORE), &rels, reversed_input);

        prop_assert_eq!(ids(&first), ids(&again));
        prop_assert_eq!(ids(&first), ids(&reversed));
        prop_assert_eq!(first.len(), candidates.len());
    }

    #[test]
    fn without_edges_order_is_category_then_name(candidates in candidate_strategy(14)) {
        let engine = RankEngine::default();
        let ranked = engine.order(Some(STORE), &[], candidates.clone());
        prop_assert_eq!(ranked.mode, OrderMode::Alphabetical);

        let mut expected = candidates;
        expected.sort_by(|a, b| {
            a.category_or("Uncategorized")
                .cmp(b.category_or("Uncategorized"))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.product_id.cmp(&b.product_id))
        });
        prop_assert_eq!(ids(&ranked.items), ids(&expected));
    }

    #[test]
    fn learned_order_respects_every_kept_edge_on_acyclic_graphs(
        candidates in candidate_strategy(10),
        raw in prop::collection::vec((0i64..10, 0i64..10, 1u32..4), 0..20),
    ) {
        // Forward-only edges (low id → high id) can never form a cycle.
        let edges: Vec<_> = raw
            .into_iter()
            .filter(|(a, b, _)| a < b)
            .collect();
        let rels = relations(&edges);
        let engine = RankEngine::default();
        let out = engine.compute_order(Some(STORE), &rels, candidates);
        let pos = |p: i64| out.iter().position(|c| c.product_id == ProductId(p));

        let kept = EdgeSet::from_relations(&rels).resolve_conflicts();
        for (from, to, _) in kept.edges() {
            if let (Some(a), Some(b)) = (pos(from.get()), pos(to.get())) {
                prop_assert!(a < b, "{from} should come before {to}");
            }
        }
    }

    #[test]
    fn manual_override_ignores_graph(
        edges in edge_strategy(10),
        candidates in candidate_strategy(10),
    ) {
        prop_assume!(!candidates.is_empty());
        let engine = RankEngine::default();
        let n = candidates.len();
        let manual: Vec<_> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.with_manual_position((n - i) as f64, Some(STORE)))
            .collect();

        let with_graph = engine.order(Some(STORE), &relations(&edges), manual.clone());
        let without_graph = engine.order(Some(STORE), &[], manual.clone());

        prop_assert_eq!(with_graph.mode, OrderMode::Manual);
        prop_assert_eq!(ids(&with_graph.items), ids(&without_graph.items));
        let mut expected = ids(&manual);
        expected.reverse();
        prop_assert_eq!(ids(&with_graph.items), expected);
    }
}
