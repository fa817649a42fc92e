//! HTTP adapter for shell-gate.
//!
//! A thin transport over [`ShellGate`](crate::ShellGate). Gate failures
//! (rejections, timeouts, spawn errors) are ordinary textual results and are
//! returned with `200 OK`; only malformed requests produce HTTP errors.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/v1` - Server descriptor
//! - `GET /api/v1/info` - Server descriptor
//! - `POST /api/v1/terminal` - Run a command through the gate
//!
//! ## Example
//!
//! ```no_run
//! use shell_gate::api::{serve, AppState, ServerConfig};
//! use shell_gate::ShellGate;
//!
//! #[tokio::main]
//! async fn main() -> shell_gate::Result<()> {
//!     let state = AppState::new(ShellGate::default());
//!     serve(ServerConfig::new("127.0.0.1", 3000), state).await
//! }
//! ```

pub mod handlers;
pub mod router;
pub mod types;

// Re-export commonly used types
pub use handlers::AppState;
pub use router::{create_router, serve, ServerConfig};
pub use types::{ErrorResponse, TerminalRequest, TerminalResponse};
