/// Aisle engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Weight assigned to a freshly observed transition.
pub const INITIAL_EDGE_WEIGHT: u32 = 1;

/// Spacing between positions written by a bulk manual reorder.
pub const MANUAL_POSITION_STEP: f64 = 1.0;

/// Current schema version. Bump together with a new migration.
pub const SCHEMA_VERSION: u32 = 3;
