//! Tracing subscriber setup.
//!
//! Logs go to stderr so that report output on stdout stays machine-readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::DEFAULT_LOG_LEVEL;

/// Build the filter from a directive string such as `info` or
/// `warn,periodical=debug`.
fn build_filter(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// Initialize tracing.
///
/// # Arguments
///
/// * `log_level` - Filter directives (see [`EnvFilter`])
/// * `json` - Emit one JSON object per event instead of human-readable lines
///
/// # Panics
///
/// Panics if tracing has already been initialized.
pub fn init_tracing(log_level: &str, json: bool) {
    let registry = tracing_subscriber::registry().with(build_filter(log_level));

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    tracing::debug!(log_level, json, "Tracing initialized");
}

/// Initialize tracing for tests (only logs errors).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("error")
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_valid_directives() {
        let filter = build_filter("warn,periodical=trace");
        assert!(filter.to_string().contains("periodical=trace"));
    }

    #[test]
    fn test_test_tracing_can_be_called_twice() {
        init_test_tracing();
        init_test_tracing();
    }
}
