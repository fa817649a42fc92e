//! Error types for shell-gate.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for shell-gate operations.
///
/// Errors raised while running a command never reach the caller of
/// [`ShellGate::terminal`](crate::ShellGate::terminal); they are rendered
/// into the textual result instead. This type surfaces at the edges:
/// startup, configuration and the HTTP adapter.
#[derive(Error, Debug)]
pub enum ShellGateError {
    /// The shell process could not be started.
    #[error("failed to spawn process: {0}")]
    Spawn(#[source] std::io::Error),

    /// I/O error while talking to a running process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP adapter failed to bind or serve.
    #[error("server error: {0}")]
    Server(String),
}

/// Convenience Result type for shell-gate operations.
pub type Result<T> = std::result::Result<T, ShellGateError>;
