//! # Batoi Books CLI Library
//!
//! Stores, commands and startup for the `batoi` binary.
//!
//! ## Module Organization
//! ```text
//! batoi_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap definitions and dispatch
//! ├── context.rs      ◄─── AppContext (composition root)
//! ├── output.rs       ◄─── Text rendering
//! ├── state/
//! │   ├── cart.rs     ◄─── CartLedger (persisted cart)
//! │   ├── catalog.rs  ◄─── CatalogCache (remote book list)
//! │   ├── modules.rs  ◄─── ModulesCache
//! │   ├── messages.rs ◄─── NotificationQueue
//! │   ├── loading.rs  ◄─── Loading flag and last error
//! │   └── config.rs   ◄─── AppConfig
//! ├── commands/
//! │   ├── book.rs     ◄─── Catalog listing and CRUD
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── module.rs   ◄─── Module listing
//! │   └── navigation.rs ◄─ Path → view
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod output;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use context::AppContext;
use error::AppResult;
use state::AppConfig;

/// Runs one CLI invocation.
///
/// ## Sequence
/// 1. Load configuration (file, then `BATOI_*` environment)
/// 2. Open storage and the books service (`AppContext::open`)
/// 3. Execute the command and print its result
/// 4. Print the notifications the command produced
/// 5. Close storage
pub async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load(cli.config.clone())?;
    info!(api = %config.api.base_url, "Starting Batoi Books");

    let ctx = AppContext::open(config).await?;
    let result = execute_and_print(&ctx, cli.command, cli.json).await;

    for message in ctx.messages.messages() {
        eprintln!("{}", message);
    }

    ctx.shutdown().await;
    result
}

async fn execute_and_print(ctx: &AppContext, command: Command, json: bool) -> AppResult<()> {
    let out = cli::execute(ctx, command).await?;
    let text = cli::render(&out, json)?;
    if !text.is_empty() {
        println!("{}", text);
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=batoi=trace` - Show trace for batoi crates only
/// - Default: INFO, debug for batoi crates
///
/// Logs go to stderr so command output stays pipeable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,batoi=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
