//! pt CLI - site path tree inspector.
//!
//! Provides commands for:
//! - `tree`: Print the resource tree of a source directory
//! - `resolve`: Resolve a request path to its source file
//! - `ls`: Show children, siblings and parents of a node

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use commands::{LsArgs, ResolveArgs, TreeArgs};
use output::Output;

/// pt - site path tree inspector.
#[derive(Parser)]
#[command(name = "pt", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resource tree.
    Tree(TreeArgs),
    /// Resolve a request path to its source file.
    Resolve(ResolveArgs),
    /// Show the neighbourhood of a node.
    Ls(LsArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Tree(args) => args.source.verbose,
            Self::Resolve(args) => args.source.verbose,
            Self::Ls(args) => args.source.verbose,
        }
    }
}

/// --verbose enables INFO level, otherwise use RUST_LOG or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy()
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.command.verbose()))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Tree(args) => args.execute(&output),
        Commands::Resolve(args) => args.execute(&output),
        Commands::Ls(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
