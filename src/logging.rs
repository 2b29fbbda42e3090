//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`, so stdout stays reserved for
//! the report.

use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "wordtally=warn",
        1 => "wordtally=info",
        2 => "wordtally=debug",
        _ => "wordtally=trace",
    }
}

/// Initialize tracing for the binary. `RUST_LOG` overrides the verbosity flags.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // A second initialization (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(verbose >= 3) // Show thread IDs for -vvv
        .with_thread_names(verbose >= 3)
        .try_init();

    debug!("wordtally started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
