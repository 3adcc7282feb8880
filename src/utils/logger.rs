use std::io::Stderr;
use tracing_subscriber::fmt::format::{DefaultFields, Format};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type StderrLayer<S> = fmt::Layer<S, DefaultFields, Format, fn() -> Stderr>;

fn filter_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Shared stderr layer: no targets, thread ids or source locations.
fn stderr_layer<S>() -> StderrLayer<S> {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr as fn() -> Stderr)
}

pub fn init_cli_logger(verbose: bool) {
    let filter = filter_or(if verbose { "staffhub=debug,info" } else { "staffhub=info" });

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer().compact())
        .init();
}

/// JSON lines on stderr, for log shippers.
pub fn init_json_logger(level: Option<&str>) {
    let filter = filter_or(&format!("staffhub={}", level.unwrap_or("info")));

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer().json())
        .init();
}
