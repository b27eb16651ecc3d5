//! Command-line interface for tictactoe_arcade.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tictactoe_engine::Difficulty;

/// Tic-tac-toe against a heuristic AI, with match history and a leaderboard
#[derive(Parser, Debug)]
#[command(name = "tictactoe_arcade")]
#[command(about = "Play tic-tac-toe against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "arcade.toml")]
    pub config: PathBuf,

    /// Override the database path from the configuration
    #[arg(long)]
    pub db_path: Option<String>,

    /// Override the rating service URL from the configuration
    #[arg(long)]
    pub rating_url: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactive games on the terminal
    Play {
        /// Player name stored with finished games
        #[arg(short, long)]
        name: Option<String>,

        /// AI difficulty (hard, medium, easy, stupid)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },

    /// Print the leaderboard
    Leaderboard,

    /// Print statistics for one player
    Stats {
        /// Player name (defaults to the configured name)
        #[arg(short, long)]
        name: Option<String>,
    },
}
