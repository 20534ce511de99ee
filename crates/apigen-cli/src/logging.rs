//! Logging initialisation

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "info";

/// Build the log filter. An explicit level wins over `RUST_LOG`.
pub fn filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|err| {
            eprintln!("invalid log level '{level}' ({err}), using {DEFAULT_FILTER}");
            EnvFilter::new(DEFAULT_FILTER)
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    }
}

/// Initialize the global subscriber. Logs go to stderr so that command
/// output on stdout stays machine-readable.
pub fn init_logging(level: Option<&str>) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    // Ignore the error when a subscriber is already set
    let _ = tracing_subscriber::registry()
        .with(filter(level))
        .with(fmt_layer)
        .try_init();
}
