//! Logging setup for the CLI.
//!
//! Log lines go to stderr so JSON on stdout stays machine-readable.
//!
//! The level is determined in this order:
//! 1. `--verbose`: DEBUG for scss-loader crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG` environment variable
//! 4. Default: WARN

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter implied by the global flags
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("scss_loader=debug,scss_loader_cli=debug")
    } else if quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("scss_loader=warn,scss_loader_cli=warn"))
    }
}

/// Install the global subscriber. Call once, before any logging.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt_layer)
        .init();
}
