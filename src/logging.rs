//! Logging initialization and configuration.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when nothing is configured.
pub const DEFAULT_FILTER: &str = "shell_gate=info";

/// Build the filter for a configured level.
///
/// A bare level such as `debug` is scoped to this crate; anything containing
/// a target (`=`) or several directives (`,`) is used as written. Unparseable
/// input falls back to [`DEFAULT_FILTER`].
pub fn filter_for(level: Option<&str>) -> EnvFilter {
    let directive = match level.map(str::trim) {
        None | Some("") => DEFAULT_FILTER.to_string(),
        Some(level) if level.contains('=') || level.contains(',') => level.to_string(),
        Some(level) => format!("shell_gate={}", level),
    };

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the logging system.
///
/// Log lines go to stderr so stdout stays free for command results.
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init(level: Option<&str>) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_default() {
        assert_eq!(filter_for(None).to_string(), DEFAULT_FILTER);
        assert_eq!(filter_for(Some("  ")).to_string(), DEFAULT_FILTER);
    }

    #[test]
    fn test_filter_bare_level_scoped() {
        assert_eq!(filter_for(Some("debug")).to_string(), "shell_gate=debug");
    }

    #[test]
    fn test_filter_directive_passthrough() {
        let filter = filter_for(Some("shell_gate=trace,tower_http=debug")).to_string();
        assert!(filter.contains("shell_gate=trace"));
        assert!(filter.contains("tower_http=debug"));
    }

    #[test]
    fn test_try_init_idempotent() {
        // First call may or may not succeed depending on test order
        let _ = try_init(None);
        let _ = try_init(Some("debug"));
    }

    #[test]
    fn test_logging_works() {
        let _ = try_init(None);

        tracing::info!("test info message");
        tracing::debug!("test debug message");
        tracing::warn!("test warn message");
    }
}
