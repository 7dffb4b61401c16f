//! Logging setup for the `chaingen` binary.

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;

/// Install a stderr subscriber filtered by `RUST_LOG` (default `info`).
///
/// Logs go to stderr so the chain summary and `--json` report on stdout stay
/// machine-readable. Calling this twice keeps the first subscriber.
pub fn init_logs() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(env_filter)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
