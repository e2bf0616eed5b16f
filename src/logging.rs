//! Subscriber setup shared by the binaries.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// `--log-level` value, falling back to `info` when it does not parse.
pub fn parse_level(level: &str) -> Level {
    level.parse().unwrap_or(Level::INFO)
}

/// Installs a compact stderr subscriber. `RUST_LOG` overrides the default level.
pub fn init_tracing(level: &str) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(parse_level(level).into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();
}
