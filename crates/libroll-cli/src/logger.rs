//! Logging setup for the libroll CLI.
//!
//! ```rust,no_run
//! use libroll_cli::logger::init_logger;
//! use tracing::info;
//!
//! init_logger(false, false, false);
//! info!("Starting build");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "libroll=debug,libroll_cli=debug,libroll_bundler=debug,libroll_config=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "libroll=info,libroll_cli=info,libroll_bundler=info,libroll_config=info";

/// Initialize the tracing subscriber.
///
/// Called once at the start of the program. The filter is chosen in this order:
/// 1. `--verbose`: DEBUG for libroll crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. INFO for libroll crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(select_filter(verbose, quiet), no_color);
}

/// Initialize logger with a custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
