//! Shell-gate binary entry point.

use std::process::ExitCode;

use shell_gate::api::{self, AppState, ServerConfig};
use shell_gate::cli::{self, Args};
use shell_gate::{logging, Config, GateConfig, NullSink, ShellGate};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Run 'shell-gate --help' for usage.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> shell_gate::Result<()> {
    let (config, load_error) = Config::load_or_default(&args);

    logging::init(Some(config.log_filter()));

    if let Some(e) = load_error {
        error!("Error loading config, using defaults: {}", e);
    }

    let gate_config = config.gate().unwrap_or_else(|e| {
        error!("Invalid gate settings, using defaults: {}", e);
        GateConfig::default()
    });
    let gate = ShellGate::new(gate_config);

    if args.info {
        let info = serde_json::to_string_pretty(&gate.info())
            .map_err(|e| shell_gate::ShellGateError::Server(e.to_string()))?;
        println!("{}", info);
        return Ok(());
    }

    if let Some(command) = args.exec.as_deref() {
        println!("{}", gate.terminal(command, &NullSink).await);
        return Ok(());
    }

    info!("shell-gate v{}", env!("CARGO_PKG_VERSION"));
    info!(
        allowed = ?gate.config().allowed_commands(),
        max_output_length = gate.config().max_output_length(),
        timeout_secs = gate.config().timeout_secs(),
        "Gate configured"
    );

    api::serve(ServerConfig::from(&config), AppState::new(gate)).await
}
