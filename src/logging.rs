//! Logging configuration using tracing
//!
//! Structured logging to stderr, filtered through the RUST_LOG environment variable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with the default "warn" filter
///
/// # Example RUST_LOG values
/// - `RUST_LOG=info` - station operations (sends, receipts, maintenance)
/// - `RUST_LOG=postomat=debug` - security gate decisions and locker scans
/// - `RUST_LOG=postomat::station::security=trace` - everything from the security gate
///
/// # Errors
/// Returns an error if the subscriber has already been initialized
pub fn init() -> crate::Result<()> {
    init_with_default("warn")
}

/// Initialize the tracing subscriber, using `default_filter` when RUST_LOG is unset
pub fn init_with_default(default_filter: &str) -> crate::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_writer(std::io::stderr)
                .pretty(),
        )
        .try_init()
        .map_err(|e| crate::PostomatError::Other(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init_with_default("debug");
}
