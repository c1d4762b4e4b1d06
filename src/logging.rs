//! Tracing subscriber setup.
//!
//! Events go to stderr; stdout carries the MCP stdio transport.

use tracing_subscriber::{Registry, filter::EnvFilter, fmt, layer::SubscriberExt};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence over `default_directive`. Returns `false`
/// when a global subscriber was already installed.
pub fn init(default_directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .with_target(false),
    );
    tracing::subscriber::set_global_default(subscriber).is_ok()
}
