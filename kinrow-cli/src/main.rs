//! KINROW CLI - Command-line interface
//!
//! Commands:
//! - play: Play games of k-in-a-row between two strategies
//! - analyze: Compare minimax and alpha-beta on one position

mod analyze_cmd;
mod board_args;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kinrow")]
#[command(about = "Adversarial search on k-in-a-row")]
struct Cli {
    /// Random seed for reproducible play
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games between two strategies
    Play(play_cmd::PlayArgs),
    /// Search one position with both algorithms
    Analyze(analyze_cmd::AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Analyze(args) => analyze_cmd::run(args),
    }
}
