//! Tracing setup for the CLI.
//!
//! Reports go to stdout; log events go to stderr so `--json` output stays
//! machine readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `--log` wins over `RUST_LOG`. Defaults to `info`, which shows every
/// element the demonstrations list and every conflict they catch.
///
/// # Example
/// ```bash
/// failfast --log failfast=debug demo --kind set
/// ```
pub fn init(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}
