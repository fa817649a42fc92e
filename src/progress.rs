//! Progress notification sinks.
//!
//! The caller of the gate may supply a sink that receives informational lines
//! while a request is handled. Delivery is best-effort: a failing sink is
//! logged and otherwise ignored.

use tokio::sync::mpsc;

use crate::security::sanitize_for_display;

/// Error returned by a sink that could not accept a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError(pub String);

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "progress sink rejected message: {}", self.0)
    }
}

impl std::error::Error for SinkError {}

/// Receiver of informational progress lines.
///
/// Implementations must not block.
pub trait ProgressSink: Send + Sync {
    /// Deliver one informational line.
    fn info(&self, message: &str) -> Result<(), SinkError>;
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn info(&self, _message: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that forwards lines to the tracing subscriber.
///
/// Control characters are stripped before logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn info(&self, message: &str) -> Result<(), SinkError> {
        tracing::info!(target: "shell_gate::progress", "{}", sanitize_for_display(message));
        Ok(())
    }
}

impl ProgressSink for mpsc::UnboundedSender<String> {
    fn info(&self, message: &str) -> Result<(), SinkError> {
        self.send(message.to_string())
            .map_err(|_| SinkError("receiver dropped".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::LogCapture;

    #[test]
    fn test_null_sink() {
        assert!(NullSink.info("anything").is_ok());
    }

    #[test]
    fn test_log_sink() {
        let _ = crate::logging::try_init(None);
        assert!(LogSink.info("Running command: echo hi").is_ok());
    }

    #[test]
    fn test_log_sink_strips_control_characters() {
        let capture = LogCapture::default();
        tracing::subscriber::with_default(capture.subscriber(), || {
            LogSink
                .info("Running command: echo \x1b[2Jcleared\x07")
                .unwrap();
        });

        let logged = capture.contents();
        assert!(logged.contains("Running command: echo [2Jcleared"));
        assert!(!logged.contains('\x1b'));
        assert!(!logged.contains('\x07'));
    }

    #[test]
    fn test_channel_sink_delivers() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        tx.info("first").unwrap();
        tx.info("second").unwrap();
        assert_eq!(rx.try_recv().unwrap(), "first");
        assert_eq!(rx.try_recv().unwrap(), "second");
    }

    #[test]
    fn test_channel_sink_closed() {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        drop(rx);
        let err = tx.info("lost").unwrap_err();
        assert!(err.to_string().contains("receiver dropped"));
    }
}
