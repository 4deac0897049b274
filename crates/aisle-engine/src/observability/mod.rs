//! Tracing setup and per-operation span definitions.

pub mod spans;

use tracing_subscriber::EnvFilter;

use aisle_core::config::ObservabilityConfig;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "AISLE_LOG";

/// Install the global subscriber.
///
/// `AISLE_LOG` wins over `config.log_level` when set. Returns `false` if a
/// subscriber was already installed, which leaves the existing one in place.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json_logs {
        builder
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
    } else {
        builder.try_init()
    };
    installed.is_ok()
}
