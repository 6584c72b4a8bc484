//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use rulequote_core::CustomerTier;
use std::path::PathBuf;

/// Quote pricing with tiered discounts and tax.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(name = "rulequote")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "RULEQUOTE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// RuleQuote commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Price a list of line items without creating a quote
    Totals(TotalsArgs),

    /// Create a quote from a JSON payload
    Quote(QuoteArgs),

    /// Print the pricing rules in effect
    Rules,
}

#[derive(Args, Debug, Clone)]
pub struct TotalsArgs {
    /// JSON file with an array of line items
    #[arg(long)]
    pub items: PathBuf,

    /// Customer tier (standard, premium)
    #[arg(long, default_value = "standard")]
    pub tier: CustomerTier,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    /// JSON file with the quote payload
    #[arg(long)]
    pub input: PathBuf,

    /// Also render the quote document
    #[arg(long)]
    pub render: bool,
}
