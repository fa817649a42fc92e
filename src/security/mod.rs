//! Command admission for shell-gate.
//!
//! Every command passes through a [`CommandPolicy`] before a process is
//! spawned. The policy is a static allow-list of command prefixes; there is
//! no authentication layer and no sandboxing of admitted commands.
//!
//! ## Example
//!
//! ```rust
//! use shell_gate::security::{CommandPolicy, PolicyError};
//!
//! let policy = CommandPolicy::new(vec!["echo".into(), "ls".into()]);
//! assert!(policy.check("echo hello").is_ok());
//! assert_eq!(policy.check("  "), Err(PolicyError::EmptyCommand));
//! assert!(policy.check("rm -rf /").is_err());
//! ```

pub mod policy;

pub use policy::{base_command, sanitize_for_display, ApprovedCommand, CommandPolicy, PolicyError};
