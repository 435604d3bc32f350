// ============================================================================
// Logging
// Subscriber setup for binaries and demos embedding the crate
// ============================================================================

use tracing::Level;

/// Install a formatting subscriber printing events up to `level`.
///
/// The library itself only emits events (market loading at `debug`,
/// tick snapping at `trace`); applications normally install their own
/// subscriber. Returns an error if a global subscriber is already set.
///
/// # Example
/// ```
/// exchange_precision::utils::init_logging(tracing::Level::DEBUG).ok();
/// ```
pub fn init_logging(level: Level) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .try_init()
}
