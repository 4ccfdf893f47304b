//! Telemetry and Observability
//!
//! Sets up `tracing-subscriber` for the client. Log lines go to stderr so
//! they never interleave with the chat transcript on stdout.
//!
//! Priority: `RUST_LOG` env var > `--log` flag / config `log_level` > "info".

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with the given log level.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_telemetry_with_level(log_level: &str) {
    let default_filter = format!("{},wayfarer_client={}", log_level, log_level);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}

/// Initialize the tracing subscriber with default settings.
///
/// Falls back to "info" if no `RUST_LOG` env var is set. Use
/// `init_telemetry_with_level` once config is available.
pub fn init_telemetry() {
    init_telemetry_with_level("info");
}
