// ABOUTME: Process-wide tracing subscriber setup.
// ABOUTME: Installed once at startup; components log through the tracing macros.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

/// Full local timestamp, e.g. `2024-05-01 13:37:00`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Install the global subscriber, writing to stderr.
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, falling
/// back to info. A second call is a no-op.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
