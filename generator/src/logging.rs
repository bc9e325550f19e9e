//! Tracing setup for the generator binary.
//!
//! Progress ("generating <path>") is reported through `tracing` on stderr;
//! stdout is reserved for command output (`render`, `manifest`, summaries).

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing subscriber.
///
/// Reads `RUST_LOG` env var. Defaults to `info` if unset.
///
/// # Example
/// ```bash
/// RUST_LOG=generator=debug cargo run -p generator -- generate
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
