//! Tracing/logging initialization.
//!
//! JSON lines on stdout, filtered by `RUST_LOG`. Setting `WARDEN_LOG_FORMAT=pretty`
//! switches to the human-readable formatter for local runs.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "info";
pub const FORMAT_VAR: &str = "WARDEN_LOG_FORMAT";

/// Initialize tracing/logging for the process.
///
/// `default_filter` applies when `RUST_LOG` is unset or unparsable.
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let pretty = std::env::var(FORMAT_VAR)
        .map(|v| v.eq_ignore_ascii_case("pretty"))
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    let installed = if pretty {
        builder.with_target(true).try_init()
    } else {
        builder.json().with_target(false).try_init()
    };

    if installed.is_ok() {
        ::tracing::debug!(pretty, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_is_a_noop() {
        init(DEFAULT_FILTER);
        init("debug");
    }
}
