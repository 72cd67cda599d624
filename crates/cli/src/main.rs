//! relint CLI - keeps PHPStan diagnostics fresh while you edit

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod protocol;
mod settings;

/// relint - analysis scheduling and diagnostics for PHPStan
#[derive(Parser)]
#[command(name = "relint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve an editor session over stdin/stdout (JSON lines)
    Serve {
        /// Path to relint.toml (default: <project root>/relint.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Project root used as the analyzer working directory
        /// (default: discovered from the current directory)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Analyze a single file and print its diagnostics
    Check {
        /// File to analyze
        file: PathBuf,

        /// Path to relint.toml (default: <project root>/relint.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the resolved configuration
    Config {
        /// Path to relint.toml (default: <project root>/relint.toml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for command output and the
    // serve protocol
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, root } => cmd::serve::run(config, root).await,
        Commands::Check { file, config } => cmd::check::run(file, config).await,
        Commands::Config { config } => cmd::config::run(config),
    }
}
