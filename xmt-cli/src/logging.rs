//! Development-time tracing for debugging the `xmt` binary.
//!
//! Tracing is diagnostics only: it goes to stderr via `RUST_LOG` and never
//! mixes with the formatted output the binary exists to produce.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset: only this binary and the formatter.
const DEFAULT_FILTER: &str = "xmt=warn,xmt_cli=warn";

/// Initialize tracing subscriber for development logging.
///
/// Reads `RUST_LOG` env var. Defaults to [`DEFAULT_FILTER`] if unset.
/// Output: stderr, compact format.
///
/// # Example
/// ```bash
/// RUST_LOG=xmt=debug,xmt_cli=debug xmt print hello
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
