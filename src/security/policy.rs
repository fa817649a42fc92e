//! Allow-list policy applied to every command before it is spawned.

/// Allow-list policy.
///
/// A command is admitted when its base command (first whitespace-delimited
/// token, lower-cased) starts with one of the configured entries. This is a
/// plain string prefix test: an entry of `"ls"` also admits `"lsof"` and
/// `"lsblk"`, and `"py"` admits `"python3"`. Entries are compared as written,
/// so an upper-case entry never matches.
///
/// Only the first token is inspected. The whole line is handed to the shell,
/// so `echo hi; rm x` is admitted when `echo` is allowed.
#[derive(Debug, Clone)]
pub struct CommandPolicy {
    allowed: Vec<String>,
}

impl CommandPolicy {
    /// Create a policy from an ordered list of allowed prefixes.
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    /// The configured prefixes, in configuration order.
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Check a raw command line against the allow-list.
    ///
    /// On success the returned [`ApprovedCommand`] is the only value the
    /// executor accepts.
    pub fn check(&self, command: &str) -> Result<ApprovedCommand, PolicyError> {
        let base_command = base_command(command).ok_or(PolicyError::EmptyCommand)?;

        if !self
            .allowed
            .iter()
            .any(|prefix| base_command.starts_with(prefix.as_str()))
        {
            return Err(PolicyError::NotAllowed {
                base_command,
                allowed: self.allowed.clone(),
            });
        }

        Ok(ApprovedCommand {
            command_line: command.to_string(),
            base_command,
        })
    }
}

/// A command line that has passed [`CommandPolicy::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedCommand {
    command_line: String,
    base_command: String,
}

impl ApprovedCommand {
    /// The full command line, exactly as received.
    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// The lower-cased first token that matched the allow-list.
    pub fn base_command(&self) -> &str {
        &self.base_command
    }

    #[cfg(test)]
    pub(crate) fn for_test(command_line: &str) -> Self {
        Self {
            command_line: command_line.to_string(),
            base_command: base_command(command_line).unwrap_or_default(),
        }
    }
}

/// Extract the lower-cased first whitespace-delimited token.
///
/// Returns `None` for empty or whitespace-only input.
pub fn base_command(command: &str) -> Option<String> {
    command.split_whitespace().next().map(str::to_lowercase)
}

/// Reasons a command is refused before execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Nothing but whitespace was supplied.
    EmptyCommand,
    /// The base command matches no allowed prefix.
    NotAllowed {
        base_command: String,
        allowed: Vec<String>,
    },
}

impl std::fmt::Display for PolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCommand => write!(f, "No command specified"),
            Self::NotAllowed {
                base_command,
                allowed,
            } => write!(
                f,
                "Command '{}' is not allowed. Allowed commands: {}",
                base_command,
                allowed.join(", ")
            ),
        }
    }
}

impl std::error::Error for PolicyError {}

/// Strip control characters from a command for log output.
///
/// Newlines and tabs survive; the result is capped at 1000 characters.
pub fn sanitize_for_display(command: &str) -> String {
    command
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .take(1000)
        .collect()
}
