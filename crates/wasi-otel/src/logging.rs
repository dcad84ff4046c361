//! Diagnostic logging for the bridge itself.
//!
//! The bridge reports degraded input and export failures through `tracing`.
//! Embedders that already run a subscriber get these events for free; the
//! rest can call [`init_diagnostics`].

use tracing_subscriber::EnvFilter;

/// Variable holding the diagnostic filter, in `EnvFilter` syntax.
pub const LOG_ENV: &str = "WASI_OTEL_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Installs a stderr fmt subscriber filtered by [`LOG_ENV`], defaulting to
/// `warn`. Returns `false` if a global subscriber was already set.
pub fn init_diagnostics() -> bool {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .is_ok()
}
