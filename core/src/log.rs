// SPDX-License-Identifier: MPL-2.0

use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

/// Installs a global subscriber which writes to stderr, keeping stdout free for the listing.
///
/// Set the environment variable `RUST_LOG` to one of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
/// to override `default_level`.
pub fn init(default_level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(default_level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_level(true)
        // The target is mostly just noise.
        .with_target(false)
        // Timestamps are mostly noise as well.
        .without_time()
        .init();
}
