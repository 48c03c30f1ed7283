//! Binary entry point for intentd.
//!
//! This binary wires the Ollama gateway into the interpretation service
//! and exposes it over HTTP or one-shot CLI commands.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr/print_stdout in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use intentd::config::{DEFAULT_BIND, ServiceConfig};
use intentd::llm::OllamaClient;
use intentd::models::InterpretationRequest;
use intentd::services::InterpretService;
use intentd::{Error, observability, server};
use std::process::ExitCode;
use std::sync::Arc;

/// intentd - natural-language intent interpretation service.
#[derive(Parser)]
#[command(name = "intentd")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP service.
    Serve {
        /// Address to bind.
        #[arg(short, long, env = "INTENTD_BIND", default_value = DEFAULT_BIND)]
        bind: String,
    },

    /// Probe the model backend and report liveness.
    Health,

    /// Interpret a single message and print the structured command.
    Interpret {
        /// The message to interpret.
        message: String,
    },
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    observability::init_logging(cli.verbose);

    let config = ServiceConfig::from_env();
    match run_command(cli.command, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
async fn run_command(command: Commands, config: ServiceConfig) -> intentd::Result<()> {
    let provider = Arc::new(OllamaClient::from_config(&config));
    let service = Arc::new(InterpretService::new(provider, config.retry));

    match command {
        Commands::Serve { bind } => server::serve(service, &bind).await,

        Commands::Health => {
            run_blocking(move || service.check_backend()).await?;
            println!("model backend is reachable");
            Ok(())
        },

        Commands::Interpret { message } => {
            let command =
                run_blocking(move || service.interpret(&InterpretationRequest { message })).await?;
            let rendered =
                serde_json::to_string_pretty(&command).map_err(|e| Error::OperationFailed {
                    operation: "render_command".to_string(),
                    cause: e.to_string(),
                })?;
            println!("{rendered}");
            Ok(())
        },
    }
}

/// Hosts a synchronous pipeline call on the blocking pool.
async fn run_blocking<T, F>(call: F) -> intentd::Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> intentd::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| Error::OperationFailed {
            operation: "blocking_task".to_string(),
            cause: e.to_string(),
        })?
}
