//! sitenav CLI - Site navigation resolver.
//!
//! Provides commands for:
//! - `check`: Resolve navigation against the docs tree and report findings
//! - `dump`: Print the resolved navigation model as JSON

mod commands;
mod error;
mod output;
mod scan;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, DumpArgs};
use output::Output;

/// Site navigation resolver.
#[derive(Parser)]
#[command(name = "sitenav", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check navigation references against the docs tree.
    Check(CheckArgs),
    /// Print the resolved navigation model as JSON.
    Dump(DumpArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // Check if verbose flag is set
    let verbose = match &cli.command {
        Commands::Check(args) => args.verbose,
        Commands::Dump(args) => args.verbose,
    };

    // Initialize tracing with appropriate log level
    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Dump(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
