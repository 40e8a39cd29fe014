//! Tracing subscriber setup.

use crate::config::Environment;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Filter used when `RUST_LOG` is unset. The PDF and DOCX parsers are noisy
/// on malformed uploads, so they only report warnings and above.
fn default_directives(env: &Environment) -> String {
    let (app, http, parsers, rest) = match env {
        Environment::Dev => ("debug", "debug", "warn", "info"),
        Environment::Staging => ("debug", "info", "warn", "info"),
        Environment::Prod => ("info", "info", "error", "warn"),
    };
    format!("{CRATE_TARGET}={app},tower_http={http},lopdf={parsers},docx_rs={parsers},{rest}")
}

pub fn init_logging(env: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(env)));

    // JSON lines in production, pretty output with source locations in dev
    let (json, pretty) = if matches!(env, Environment::Prod) {
        (Some(fmt::layer().json().with_target(true)), None)
    } else {
        let pretty = fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(env.is_dev())
            .with_line_number(env.is_dev());
        (None, Some(pretty))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();

    tracing::info!(env = ?env, "Logging initialized");
}
