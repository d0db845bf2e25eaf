//! Logging setup using `tracing` and `tracing-subscriber`.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Initialize the global subscriber: compact format, no timestamps.
///
/// `RUST_LOG` overrides the level only when no explicit verbosity flag was
/// given on the command line.
pub fn init_logging(level: LevelFilter, use_env: bool, with_ansi: bool) {
    let filter = if use_env {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level))
    } else {
        default_filter(level)
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_ansi(with_ansi)
                .with_target(false)
                .without_time(),
        )
        .init();
}

fn default_filter(level: LevelFilter) -> EnvFilter {
    // External crates stay at warn level to reduce noise.
    EnvFilter::new(format!(
        "warn,ipc_cli={level},ipc_core={level},ipc_hapi={level},\
         ipc_model={level},ipc_output={level},ipc_standards={level}"
    ))
}
