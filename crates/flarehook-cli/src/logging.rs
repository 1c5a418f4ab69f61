//! Log output for the hook binary.
//!
//! dehydrated relays hook stdout to its own log, so events go to stdout
//! without timestamps or level names. Fatal errors carry their own `ERROR:`
//! marker. `RUST_LOG` overrides the level chosen from `CF_DEBUG`.

use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

const DEBUG_FILTER: &str = "warn,flarehook=debug,flarehook_core=debug,flarehook_client=debug,\
                            flarehook_propagation=debug,flarehook_cli=debug";

/// Filter directives used when `RUST_LOG` is not set
#[must_use]
pub const fn default_directives(debug: bool) -> &'static str {
    if debug {
        DEBUG_FILTER
    } else {
        DEFAULT_FILTER
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(debug: bool) {
    let ansi = std::io::stdout().is_terminal();
    if !ansi {
        colored::control::set_override(false);
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(debug)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_level(false)
        .with_ansi(ansi)
        .without_time()
        .try_init();
}
