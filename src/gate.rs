//! The command gate: policy check, execution and introspection behind one
//! entry point.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::GateConfig;
use crate::execution::{CommandExecutor, ExecutionLimits, ExecutionResult};
use crate::progress::ProgressSink;
use crate::security::{sanitize_for_display, CommandPolicy};

/// Name reported by [`ShellGate::info`].
pub const SERVER_NAME: &str = "shell-gate";

/// Description reported by [`ShellGate::info`].
pub const SERVER_DESCRIPTION: &str =
    "A server that allows running terminal commands behind an allow-list policy";

/// Read-only descriptor of the running gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub allowed_commands: Vec<String>,
    pub max_output_length: usize,
    /// Timeout in seconds.
    pub timeout: u64,
}

/// Policy-gated command runner.
///
/// Built once at startup from a validated [`GateConfig`] and shared (usually
/// behind an `Arc`) by every request. It holds no mutable state, so
/// invocations never contend with each other.
#[derive(Debug, Clone)]
pub struct ShellGate {
    config: GateConfig,
    policy: CommandPolicy,
    executor: CommandExecutor,
}

impl ShellGate {
    /// Create a gate from validated settings.
    pub fn new(config: GateConfig) -> Self {
        let policy = CommandPolicy::new(config.allowed_commands().to_vec());
        let executor = CommandExecutor::new(ExecutionLimits::new(
            config.timeout(),
            config.max_output_length(),
        ));

        Self {
            config,
            policy,
            executor,
        }
    }

    /// The settings this gate was built with.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Check and run one command line.
    ///
    /// Rejected commands never reach the executor and emit no progress. An
    /// admitted command emits a single `Running command: ...` line to `sink`
    /// before it is spawned; a failing sink is logged and ignored.
    pub async fn run(&self, command: &str, sink: &dyn ProgressSink) -> ExecutionResult {
        let approved = match self.policy.check(command) {
            Ok(approved) => approved,
            Err(rejection) => {
                info!("Rejected command: {}", sanitize_for_display(&rejection.to_string()));
                return rejection.into();
            }
        };

        info!("Running command: {}", sanitize_for_display(command));
        if let Err(e) = sink.info(&format!("Running command: {}", command)) {
            warn!("progress notification failed: {}", e);
        }

        self.executor.execute(&approved).await
    }

    /// Check and run one command line, returning the caller-facing text.
    pub async fn terminal(&self, command: &str, sink: &dyn ProgressSink) -> String {
        self.run(command, sink).await.into_text()
    }

    /// Describe this gate and its effective settings.
    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: SERVER_DESCRIPTION.to_string(),
            allowed_commands: self.config.allowed_commands().to_vec(),
            max_output_length: self.config.max_output_length(),
            timeout: self.config.timeout_secs(),
        }
    }
}

impl Default for ShellGate {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::LogCapture;
    use crate::progress::{NullSink, SinkError};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink(Mutex<Vec<String>>);

    impl ProgressSink for RecordingSink {
        fn info(&self, message: &str) -> Result<(), SinkError> {
            self.0.lock().unwrap().push(message.to_string());
            Ok(())
        }
    }

    struct FailingSink;

    impl ProgressSink for FailingSink {
        fn info(&self, _message: &str) -> Result<(), SinkError> {
            Err(SinkError("broken".into()))
        }
    }

    fn gate(allowed: &[&str], max_len: usize, timeout: u64) -> ShellGate {
        ShellGate::new(
            GateConfig::new(allowed.iter().map(|s| s.to_string()).collect(), max_len, timeout)
                .unwrap(),
        )
    }

    #[test]
    fn test_info_reports_defaults() {
        let info = ShellGate::default().info();
        assert_eq!(info.name, "shell-gate");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            info.allowed_commands,
            vec!["dir", "ls", "echo", "pwd", "whoami", "python", "pip"]
        );
        assert_eq!(info.max_output_length, 4096);
        assert_eq!(info.timeout, 30);
    }

    #[test]
    fn test_info_field_names() {
        let json = serde_json::to_value(ShellGate::default().info()).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "allowed_commands",
                "description",
                "max_output_length",
                "name",
                "timeout",
                "version"
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_command() {
        let sink = RecordingSink::default();
        let text = ShellGate::default().terminal("   ", &sink).await;
        assert_eq!(text, "No command specified");
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_command_emits_nothing() {
        let sink = RecordingSink::default();
        let text = ShellGate::default().terminal("rm -rf /", &sink).await;
        assert_eq!(
            text,
            "Command 'rm' is not allowed. Allowed commands: dir, ls, echo, pwd, whoami, python, pip"
        );
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_progress_line_contains_raw_command() {
        let sink = RecordingSink::default();
        let gate = gate(&["echo"], 4096, 5);
        let text = gate.terminal("echo hello", &sink).await;
        assert_eq!(text.trim_end(), "hello");
        assert_eq!(*sink.0.lock().unwrap(), vec!["Running command: echo hello"]);
    }

    #[tokio::test]
    async fn test_failing_sink_does_not_fail_invocation() {
        let gate = gate(&["echo"], 4096, 5);
        let text = gate.terminal("echo still-runs", &FailingSink).await;
        assert_eq!(text.trim_end(), "still-runs");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_truncation_scenario() {
        let gate = gate(&["echo"], 10, 5);
        let text = gate.terminal("echo 1234567890ABC", &NullSink).await;
        assert_eq!(
            text,
            "1234567890\n... Output truncated (total length: 14 characters)"
        );
    }

    #[test]
    fn test_rejection_log_strips_control_characters() {
        let capture = LogCapture::default();
        let text = {
            let _guard = tracing::subscriber::set_default(capture.subscriber());
            tokio_test::block_on(
                ShellGate::default().terminal("\x1b]0;owned\x07rm -rf /", &NullSink),
            )
        };

        // The caller still gets the raw token back.
        assert!(text.starts_with("Command '\x1b]0;owned\x07rm' is not allowed."));

        let logged = capture.contents();
        assert!(logged.contains("Rejected command: Command ']0;ownedrm' is not allowed."));
        assert!(!logged.contains('\x1b'));
        assert!(!logged.contains('\x07'));
    }
}
