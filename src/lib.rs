//! # shell-gate
//!
//! Policy-gated shell command execution for AI agent tool calls.
//!
//! A single capability is exposed: run an operating-system command and get
//! its captured output back as one string. Every request passes through a
//! static allow-list before a process is spawned, runs under a hard
//! wall-clock timeout, and has its output bounded to a configured number of
//! characters.
//!
//! ## Features
//!
//! - **Allow-list policy**: prefix match on the lower-cased first token
//! - **Guaranteed termination**: timed-out processes are killed and reaped
//! - **Bounded output**: stdout and stderr merged, then truncated by characters
//! - **Transport-agnostic**: the gate takes a string and a progress sink;
//!   an HTTP adapter is included
//!
//! ## Quick Start
//!
//! ```no_run
//! use shell_gate::{GateConfig, NullSink, ShellGate};
//!
//! #[tokio::main]
//! async fn main() -> shell_gate::Result<()> {
//!     shell_gate::logging::try_init(None).ok();
//!
//!     let config = GateConfig::new(vec!["echo".into(), "ls".into()], 4096, 30)?;
//!     let gate = ShellGate::new(config);
//!
//!     println!("{}", gate.terminal("echo hello", &NullSink).await);
//!     println!("{}", gate.terminal("rm -rf /", &NullSink).await);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod execution;
pub mod gate;
pub mod logging;
pub mod output;
pub mod progress;
pub mod security;

// Re-export commonly used types
pub use config::{Config, ConfigError, GateConfig};
pub use error::{Result, ShellGateError};
pub use execution::{CommandExecutor, ExecutionLimits, ExecutionResult};
pub use gate::{ServerInfo, ShellGate};
pub use progress::{LogSink, NullSink, ProgressSink, SinkError};
pub use security::{ApprovedCommand, CommandPolicy, PolicyError};
