//! Tracing subscriber setup for binaries and tests embedding the runtime.

use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`, with `info` as
/// the baseline level.
///
/// Returns `false` when a global subscriber is already installed.
pub fn init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
