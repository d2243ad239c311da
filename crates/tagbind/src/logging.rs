//! Tracing subscriber for the CLI.
//!
//! Events go to stderr so command output on stdout stays machine-readable.
//! `RUST_LOG` is honored unless `-q`, `-v` or `debug = true` in the settings
//! pick a level explicitly.

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::Registry;

use crate::args::GlobalArgs;

const DEFAULT_LEVEL: &str = "warn";

/// `debug` from the settings raises verbosity to at least `-vv`.
fn level_for(args: &GlobalArgs, debug: bool) -> Option<&'static str> {
    if args.quiet {
        return Some("off");
    }
    let verbosity = if debug {
        args.verbose.max(2)
    } else {
        args.verbose
    };
    match verbosity {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

pub fn init_tracing(args: &GlobalArgs, debug: bool) {
    let env_filter = match level_for(args, debug) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL)),
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .without_time()
        .with_filter(env_filter);

    // a subscriber may already be installed when embedded in tests
    let _ = Registry::default().with(stderr_layer).try_init();
}
