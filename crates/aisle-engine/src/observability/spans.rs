//! Span per engine operation: ranking, learning, commit/complete.

/// Create a ranking span.
#[macro_export]
macro_rules! rank_span {
    ($store:expr, $candidates:expr) => {
        tracing::info_span!("aisle.rank", store = ?$store, candidates = $candidates)
    };
}

/// Create a learning span for a caller-supplied sequence.
#[macro_export]
macro_rules! learn_span {
    ($store:expr, $kind:expr) => {
        tracing::info_span!("aisle.learn", store = ?$store, kind = $kind.as_str())
    };
}

/// Create a session commit span.
#[macro_export]
macro_rules! commit_span {
    ($list:expr, $kind:expr) => {
        tracing::info_span!("aisle.commit", list = %$list, kind = $kind.as_str())
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const RANK: &str = "aisle.rank";
    pub const LEARN: &str = "aisle.learn";
    pub const COMMIT: &str = "aisle.commit";
}
