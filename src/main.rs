//! # Puente CLI
//!
//! Command-line interface for the printer command bridge.
//!
//! ## Usage
//!
//! ```bash
//! # Serve the command channel over HTTP (simulated driver)
//! puente serve --listen 0.0.0.0:8080
//!
//! # Run the built-in test ticket against the simulated driver
//! puente print-test
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use puente::dispatch::{CommandRequest, CommandResponse, Dispatcher, ResponseValue};
use puente::error::BridgeError;
use puente::server::{ServerConfig, serve};

/// Puente - POS thermal printer command bridge
#[derive(Parser, Debug)]
#[command(name = "puente")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the command channel over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,
    },
    /// Print the built-in test ticket on the simulated driver
    PrintTest,
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BridgeError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen } => {
            let config = ServerConfig {
                listen_addr: listen,
            };
            serve(config, Dispatcher::simulated()).await
        }
        Commands::PrintTest => {
            let dispatcher = Dispatcher::simulated();
            for method in ["open", "printTest"] {
                let response = dispatcher.dispatch(&CommandRequest::bare(method)).await;
                println!("{}: {}", method, describe(&response));
                if matches!(response, CommandResponse::Error { .. }) {
                    std::process::exit(1);
                }
            }
            Ok(())
        }
    }
}

/// Human-readable outcome for CLI output.
fn describe(response: &CommandResponse) -> String {
    match response {
        CommandResponse::Ok { result } => match result {
            ResponseValue::Bool(value) => format!("ok ({})", value),
            ResponseValue::Int(value) => format!("ok ({})", value),
            ResponseValue::Str(value) => format!("ok ({})", value),
        },
        CommandResponse::Error { code, message } => format!("error {}: {}", code, message),
        CommandResponse::NotImplemented { method } => format!("not implemented: {}", method),
    }
}
