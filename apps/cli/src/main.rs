//! # Batoi Books Entry Point
//!
//! The actual setup is in lib.rs so it can be tested.

use std::process::ExitCode;

use clap::Parser;

use batoi_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    batoi_cli::init_tracing();

    let cli = Cli::parse();
    match batoi_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(code = ?err.code, "{}", err.message);
            ExitCode::FAILURE
        }
    }
}
