//! Diagnostic logging on stderr.
//!
//! Icon confirmations go to stdout with `println!`; everything routed through
//! `tracing` ends up here. Filter priority: `--log-filter` > `EXT_ICON_GEN_LOG`
//! > `RUST_LOG` > [`DEFAULT_LOG_FILTER`].

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn init_logging(custom_filter: Option<&str>) {
    let env_filter = build_env_filter(custom_filter);

    // A second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_env_filter(custom_filter: Option<&str>) -> EnvFilter {
    if let Some(filter) = custom_filter {
        return EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    }

    EnvFilter::try_from_env("EXT_ICON_GEN_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}
