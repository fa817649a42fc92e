//! Execution result types.

use std::fmt;
use std::time::Duration;

use crate::security::PolicyError;

/// The single textual outcome of one gate invocation.
///
/// Exactly one variant is produced per request. [`fmt::Display`] renders the
/// string handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Merged and possibly truncated process output.
    Output(String),
    /// The policy refused the command; no process was spawned.
    Rejected(PolicyError),
    /// The process outlived its budget and was killed.
    TimedOut(Duration),
    /// The process could not be started or its streams could not be read.
    Failed(String),
}

impl ExecutionResult {
    /// Whether the command ran to completion.
    pub fn is_output(&self) -> bool {
        matches!(self, Self::Output(_))
    }

    /// Whether the command was refused by policy.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Whether the command was killed for exceeding the timeout.
    pub fn timed_out(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }

    /// Render the result as the caller-facing string.
    pub fn into_text(self) -> String {
        match self {
            Self::Output(text) => text,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(text) => f.write_str(text),
            Self::Rejected(reason) => write!(f, "{}", reason),
            Self::TimedOut(timeout) => {
                write!(f, "Command timed out after {} seconds", timeout.as_secs())
            }
            Self::Failed(details) => write!(f, "Error executing command: {}", details),
        }
    }
}

impl From<PolicyError> for ExecutionResult {
    fn from(err: PolicyError) -> Self {
        Self::Rejected(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_passthrough() {
        let result = ExecutionResult::Output("hello\n".into());
        assert!(result.is_output());
        assert_eq!(result.into_text(), "hello\n");
    }

    #[test]
    fn test_timeout_message() {
        let result = ExecutionResult::TimedOut(Duration::from_secs(30));
        assert!(result.timed_out());
        assert_eq!(result.to_string(), "Command timed out after 30 seconds");
    }

    #[test]
    fn test_failed_message() {
        let result = ExecutionResult::Failed("No such file or directory (os error 2)".into());
        assert_eq!(
            result.into_text(),
            "Error executing command: No such file or directory (os error 2)"
        );
    }

    #[test]
    fn test_rejected_from_policy_error() {
        let result: ExecutionResult = PolicyError::EmptyCommand.into();
        assert!(result.is_rejected());
        assert_eq!(result.into_text(), "No command specified");
    }

    #[test]
    fn test_rejected_lists_allowed() {
        let result = ExecutionResult::Rejected(PolicyError::NotAllowed {
            base_command: "rm".into(),
            allowed: vec!["ls".into(), "echo".into()],
        });
        assert_eq!(
            result.to_string(),
            "Command 'rm' is not allowed. Allowed commands: ls, echo"
        );
    }
}
