//! Tracing subscriber setup
//!
//! Records go to stderr so they never interleave with the session transcript
//! on stdout.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `level` is used, falling back to `warn`
/// if it is not a valid filter.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
