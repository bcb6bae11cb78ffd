// Tracing subscriber setup
use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, time::ChronoUtc},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Install the global subscriber; call once at process start
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing(verbose: bool, json: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into());

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .init();
    } else {
        let use_colors =
            std::env::var_os("NO_COLOR").is_none() && std::io::stderr().is_terminal();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(verbose)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(use_colors)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn default_filter(level: Level) -> String {
    [
        "tenant_check",
        "ops_cli",
        "schema_guard",
        "config_engine",
        "database_layer",
    ]
    .iter()
    .map(|target| format!("{target}={level}"))
    .chain(std::iter::once("sqlx=warn".to_string()))
    .collect::<Vec<_>>()
    .join(",")
}
