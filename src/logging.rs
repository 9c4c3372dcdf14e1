//! Tracing setup for the binary.
//!
//! Logs go to stderr so stdout only carries the report. `RUST_LOG` is honoured
//! unless `-v` is passed, which forces `debug`.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

/// Install the global subscriber. A second call is a no-op.
pub fn init_tracing(verbose: bool) {
    let filter = build_filter(verbose, std::env::var("RUST_LOG").ok().as_deref());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}

fn build_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    EnvFilter::new(filter_directive(verbose, rust_log))
}

fn filter_directive(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        _ if verbose => VERBOSE_LEVEL.to_string(),
        Some(directive) => directive.to_string(),
        None => DEFAULT_LEVEL.to_string(),
    }
}
