//! Golden ranking scenarios shared by tests across the workspace.
//!
//! Each JSON file under `golden/ranking/` describes one store graph, one
//! candidate list, and the order the engine must produce.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use aisle_core::models::{CandidateItem, ProductRelation, StoreId};

/// Root directory of the fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// List all JSON files in a fixture subdirectory, sorted by name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// One golden ranking case.
#[derive(Debug, Clone, Deserialize)]
pub struct RankingScenario {
    pub description: String,
    pub store_id: Option<StoreId>,
    /// `[predecessor, successor, weight]` triples for `store_id`.
    #[serde(default)]
    pub edges: Vec<(i64, i64, u32)>,
    pub candidates: Vec<CandidateItem>,
    /// Expected output, by candidate name.
    pub expected: Vec<String>,
    /// `"manual"`, `"learned"`, or `"alphabetical"`.
    pub expected_mode: String,
}

impl RankingScenario {
    pub fn relations(&self) -> Vec<ProductRelation> {
        let store = self.store_id.unwrap_or(StoreId(0));
        self.edges
            .iter()
            .map(|&(from, to, weight)| ProductRelation::new(store, from, to, weight))
            .collect()
    }
}

/// Every ranking scenario, with its file name.
pub fn ranking_scenarios() -> Vec<(String, RankingScenario)> {
    list_fixtures("ranking")
        .into_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let scenario = load_fixture(&format!("ranking/{name}"));
            (name, scenario)
        })
        .collect()
}
