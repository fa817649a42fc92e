//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to run a command.
#[derive(Debug, Clone, Deserialize)]
pub struct TerminalRequest {
    /// The full command line.
    pub command: String,
}

/// Result of a gate invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminalResponse {
    /// The caller-facing result text.
    pub output: String,
    /// Progress lines emitted while handling the request.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<String>,
}

/// Generic API error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "BAD_REQUEST").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }
}
