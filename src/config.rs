//! Configuration management for shell-gate.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (TOML)
//! 4. Default values
//!
//! The gate settings live at the top level of the file:
//!
//! ```toml
//! allowed_commands = ["ls", "echo", "git"]
//! max_output_length = 8192
//! timeout = 60
//!
//! [server]
//! port = 3100
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::execution::{DEFAULT_MAX_OUTPUT_LENGTH, DEFAULT_TIMEOUT};

/// Commands admitted when no configuration says otherwise.
pub const DEFAULT_ALLOWED_COMMANDS: [&str; 7] =
    ["dir", "ls", "echo", "pwd", "whoami", "python", "pip"];

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Application configuration, as read from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Allowed command prefixes.
    pub allowed_commands: Vec<String>,
    /// Maximum characters returned per command.
    pub max_output_length: usize,
    /// Timeout in seconds.
    pub timeout: u64,
    /// HTTP adapter settings.
    pub server: ServerSection,
    /// Logging settings.
    pub logging: LoggingSection,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_commands: DEFAULT_ALLOWED_COMMANDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_output_length: DEFAULT_MAX_OUTPUT_LENGTH,
            timeout: DEFAULT_TIMEOUT.as_secs(),
            server: ServerSection::default(),
            logging: LoggingSection::default(),
        }
    }
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Enable graceful shutdown.
    pub graceful_shutdown: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            graceful_shutdown: true,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level or filter directive (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Validated, immutable settings for the command gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateConfig {
    allowed_commands: Vec<String>,
    max_output_length: usize,
    timeout: Duration,
}

impl GateConfig {
    /// Build gate settings, rejecting values the gate cannot honour.
    pub fn new(
        allowed_commands: Vec<String>,
        max_output_length: usize,
        timeout_secs: u64,
    ) -> Result<Self, ConfigError> {
        if max_output_length == 0 {
            return Err(ConfigError::Invalid(
                "max_output_length must be at least 1".into(),
            ));
        }
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout must be at least 1".into()));
        }
        // An empty prefix would admit every command.
        if allowed_commands.iter().any(|c| c.is_empty()) {
            return Err(ConfigError::Invalid(
                "allowed_commands must not contain empty entries".into(),
            ));
        }

        Ok(Self {
            allowed_commands,
            max_output_length,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Allowed command prefixes, in configuration order.
    pub fn allowed_commands(&self) -> &[String] {
        &self.allowed_commands
    }

    /// Maximum characters returned per command.
    pub fn max_output_length(&self) -> usize {
        self.max_output_length
    }

    /// Per-command wall-clock budget.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Per-command budget in whole seconds.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            allowed_commands: DEFAULT_ALLOWED_COMMANDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_output_length: DEFAULT_MAX_OUTPUT_LENGTH,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Toml)?;
        config.gate()?;
        Ok(config)
    }

    /// Validated gate settings.
    pub fn gate(&self) -> Result<GateConfig, ConfigError> {
        GateConfig::new(
            self.allowed_commands.clone(),
            self.max_output_length,
            self.timeout,
        )
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var("SHELL_GATE_HOST") {
            self.server.host = host;
        }

        if let Ok(port) = std::env::var("SHELL_GATE_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }

        if let Ok(level) = std::env::var("SHELL_GATE_LOG_LEVEL") {
            self.logging.level = level;
        } else if let Ok(level) = std::env::var("RUST_LOG") {
            self.logging.level = level;
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = args.host {
            self.server.host = host.to_string();
        }

        if let Some(port) = args.port {
            self.server.port = port;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Resolve which file to read, if any.
    ///
    /// An explicit path (CLI, then `SHELL_GATE_CONFIG`) is always returned;
    /// the default `config.toml` only when it exists.
    pub fn resolve_path(args: &Args) -> Option<PathBuf> {
        if let Some(ref path) = args.config {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var("SHELL_GATE_CONFIG") {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        let default = PathBuf::from(DEFAULT_CONFIG_FILE);
        default.exists().then_some(default)
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match Self::resolve_path(args) {
            Some(path) => Config::from_file(&path)?,
            None => Config::default(),
        };

        config.apply_env();
        config.apply_args(args);

        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file is unusable.
    ///
    /// The error that caused the fallback is returned alongside so the caller
    /// can log it once logging is up. Environment and CLI overrides still apply.
    pub fn load_or_default(args: &Args) -> (Self, Option<ConfigError>) {
        let (mut config, error) = match Self::resolve_path(args) {
            Some(path) => match Config::from_file(&path) {
                Ok(config) => (config, None),
                Err(e) => (Config::default(), Some(e)),
            },
            None => (Config::default(), None),
        };

        config.apply_env();
        config.apply_args(args);

        (config, error)
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> &str {
        &self.logging.level
    }

    /// Address the HTTP adapter binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// TOML parsing error.
    Toml(toml::de::Error),
    /// A value is out of range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Toml(e) => write!(f, "failed to parse config file: {}", e),
            Self::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
