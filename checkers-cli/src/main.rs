//! Checkers CLI - Command-line interface
//!
//! Commands:
//! - play: Play a game in the terminal (vs the heuristic opponent or hot-seat)
//! - match: Let the heuristic opponent play itself and report results
//! - show: Print the opening position

mod match_cmd;
mod play;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use checkers_core::{Board, Side};

use match_cmd::MatchArgs;
use play::PlayArgs;

#[derive(Parser)]
#[command(name = "checkers")]
#[command(about = "English draughts with a heuristic opponent")]
struct Cli {
    /// Seed for the opponent's random choices (reproducible games)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(PlayArgs),
    /// Play the heuristic opponent against itself
    Match(MatchArgs),
    /// Print the opening position
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    match cli.command {
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::Show => {
            println!("{}", render::render_board(&Board::standard(), &[]));
            println!("{:?} moves first.", Side::Red);
            Ok(())
        }
    }
}

/// Log to stderr so board output on stdout stays clean
fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
