//! # rulequote
//!
//! Command-line front-end for RuleQuote.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Parse arguments (clap)                                             │
//! │  2. Initialize tracing (stderr, RUST_LOG)                              │
//! │  3. Load ServiceConfig (--config / RULEQUOTE_CONFIG / default path)    │
//! │  4. Build Services                                                     │
//! │  5. Run the command, print its output on stdout                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use rulequote_service::{ServiceConfig, Services};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = ServiceConfig::load(cli.config.clone())?;
    debug!(
        output_dir = ?config.documents.output_dir,
        valid_days = config.quotes.default_valid_days,
        discounts_enabled = config.rules.discounts.enabled,
        "Configuration loaded"
    );

    let services = Services::from_config(&config)?;

    let output = match &cli.command {
        Command::Totals(args) => commands::totals(&services, args)?,
        Command::Quote(args) => commands::quote(&services, args).await?,
        Command::Rules => commands::rules(&services)?,
    };
    println!("{}", output);

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rulequote=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
