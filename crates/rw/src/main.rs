//! RW alias CLI.
//!
//! Provides commands for:
//! - `build`: Resolve `[[alias]]` links and write rewritten pages
//! - `check`: Resolve links without writing anything and report problems

mod commands;
mod error;
mod output;
mod pipeline;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, CheckArgs};
use output::Output;

/// RW alias - wiki-style links for Markdown documentation.
#[derive(Parser)]
#[command(name = "rw-alias", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite alias links and write pages to the output directory.
    Build(BuildArgs),
    /// Report alias problems without writing pages.
    Check(CheckArgs),
}

/// Initialize tracing once the effective verbosity is known.
///
/// Verbose enables INFO level, otherwise use `RUST_LOG` or default to WARN.
pub(crate) fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
