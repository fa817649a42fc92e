//! Platform shell invocation.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};

use crate::security::ApprovedCommand;

/// Limits applied to every execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionLimits {
    /// Wall-clock budget for the whole process lifetime.
    pub timeout: Duration,
    /// Maximum number of characters returned.
    pub max_output_length: usize,
}

impl ExecutionLimits {
    /// Create limits from a timeout and an output budget.
    pub fn new(timeout: Duration, max_output_length: usize) -> Self {
        Self {
            timeout,
            max_output_length,
        }
    }
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self {
            timeout: super::DEFAULT_TIMEOUT,
            max_output_length: super::DEFAULT_MAX_OUTPUT_LENGTH,
        }
    }
}

/// Shell used to interpret command lines on this platform.
#[cfg(windows)]
pub fn platform_shell() -> (&'static str, &'static str) {
    ("cmd", "/C")
}

/// Shell used to interpret command lines on this platform.
#[cfg(not(windows))]
pub fn platform_shell() -> (&'static str, &'static str) {
    ("sh", "-c")
}

/// Builds the child process for an approved command line.
///
/// The command line is handed to the platform shell unmodified, so pipes,
/// redirects and builtins behave as typed. Stdin is closed; stdout and stderr
/// are captured through separate pipes. On Unix the shell leads its own
/// process group so a timeout can take down everything it started.
#[derive(Debug)]
pub struct ShellCommand {
    inner: Command,
}

impl ShellCommand {
    /// Prepare a shell invocation for `command`.
    pub fn new(command: &ApprovedCommand) -> Self {
        let (shell, flag) = platform_shell();
        let mut inner = Command::new(shell);
        inner
            .arg(flag)
            .arg(command.command_line())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        inner.process_group(0);

        Self { inner }
    }

    /// Start the process.
    pub fn spawn(mut self) -> std::io::Result<Child> {
        self.inner.spawn()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_default() {
        let limits = ExecutionLimits::default();
        assert_eq!(limits.timeout, Duration::from_secs(30));
        assert_eq!(limits.max_output_length, 4096);
    }

    #[test]
    fn test_limits_new() {
        let limits = ExecutionLimits::new(Duration::from_secs(5), 10);
        assert_eq!(limits.timeout, Duration::from_secs(5));
        assert_eq!(limits.max_output_length, 10);
    }

    #[cfg(unix)]
    #[test]
    fn test_platform_shell_unix() {
        assert_eq!(platform_shell(), ("sh", "-c"));
    }

    #[cfg(windows)]
    #[test]
    fn test_platform_shell_windows() {
        assert_eq!(platform_shell(), ("cmd", "/C"));
    }

    #[tokio::test]
    async fn test_spawn_echo() {
        let command = ApprovedCommand::for_test("echo spawned");
        let child = ShellCommand::new(&command).spawn().unwrap();
        let output = child.wait_with_output().await.unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("spawned"));
    }
}
