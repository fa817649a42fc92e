//! Command execution engine.
//!
//! This module runs commands that already passed the policy:
//! - spawning through the platform shell with separate stdout/stderr pipes
//! - racing completion against a wall-clock timeout, killing and reaping on expiry
//! - merging and truncating the captured output
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use shell_gate::execution::{CommandExecutor, ExecutionLimits};
//! use shell_gate::security::CommandPolicy;
//!
//! # async fn run() {
//! let policy = CommandPolicy::new(vec!["echo".into()]);
//! let approved = policy.check("echo hello").unwrap();
//!
//! let executor = CommandExecutor::new(ExecutionLimits::new(Duration::from_secs(5), 4096));
//! let result = executor.execute(&approved).await;
//! println!("{}", result);
//! # }
//! ```

mod command;
mod executor;
mod result;

pub use command::{platform_shell, ExecutionLimits, ShellCommand};
pub use executor::{CommandExecutor, DEFAULT_MAX_OUTPUT_LENGTH, DEFAULT_TIMEOUT};
pub use result::ExecutionResult;
