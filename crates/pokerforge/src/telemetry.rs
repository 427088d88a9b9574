//! Tracing initialization.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set, e.g. `RUST_LOG=debug,tower_http=info`.
/// Otherwise the level is `info`, or `debug` in debug mode.
pub fn init(debug: bool) {
    let default = if debug {
        "debug,tower_http=debug"
    } else {
        "info,tower_http=info,axum=info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();
}
