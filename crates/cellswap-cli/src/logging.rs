//! Structured logging. One `tracing_subscriber::fmt` subscriber, filtered
//! by `-v`/`RUST_LOG` the way a `tracing`-based CLI normally wires it up.
//! The human-facing progress lines are a separate, deliberately plain
//! rendering of the [`cellswap_db::Report`] (see `render.rs`) — independent
//! of this event stream.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
