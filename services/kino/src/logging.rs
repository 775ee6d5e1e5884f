//! Logging setup
//!
//! Everything goes to stderr; stdout carries only the result. `--debug`
//! always turns the per-draw diagnostics on, whatever `RUST_LOG` says.

use shared::errors::ServiceError;
use tracing::{error, warn};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Target of the per-draw diagnostic events
pub const DIAGNOSTICS_TARGET: &str = "kino::diagnostics";

/// Build the event filter from `RUST_LOG` (if set and valid) and the debug flag
pub fn log_filter(debug: bool, rust_log: Option<&str>) -> Result<EnvFilter, ServiceError> {
    let default_directive = if debug { "kino=info" } else { "kino=warn" };
    let filter = rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive));

    if !debug {
        return Ok(filter);
    }

    let diagnostics: Directive = format!("{}=info", DIAGNOSTICS_TARGET)
        .parse()
        .map_err(ServiceError::invalid_config)?;
    Ok(filter.add_directive(diagnostics))
}

pub fn init_logging(debug: bool) -> Result<(), ServiceError> {
    let use_json = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| "text".to_string())
        .eq_ignore_ascii_case("json");

    let rust_log = std::env::var("RUST_LOG").ok();
    let env_filter = log_filter(debug, rust_log.as_deref())?;

    if use_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

/// Log a failed run at the level its category calls for
pub fn log_failure(e: &ServiceError) {
    match e.category.log_level() {
        "warn" => warn!(code = %e.code, category = ?e.category, "Run failed"),
        _ => error!(code = %e.code, category = ?e.category, "Run failed"),
    }
}
