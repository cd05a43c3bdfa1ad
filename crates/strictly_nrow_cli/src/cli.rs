//! Command-line interface for strictly_nrow.

use clap::{Parser, Subcommand};
use strictly_nrow::{BoardSize, Difficulty, GameMode, Mark};

/// Strictly N-in-a-row - generalized tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_nrow")]
#[command(about = "N-in-a-row on 3x3 to 6x6 boards, against a friend or the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game on stdin/stdout
    Play {
        /// Game mode (human, automated); overrides the config file
        #[arg(short, long)]
        mode: Option<GameMode>,

        /// Difficulty tier (easy, medium, hard, expert, extreme)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Board size for human-vs-human games (3x3 .. 6x6)
        #[arg(short, long)]
        size: Option<BoardSize>,

        /// Your mark against the computer (X moves first)
        #[arg(long)]
        mark: Option<Mark>,

        /// Path to play defaults
        #[arg(short, long, default_value = "strictly_nrow.toml")]
        config: std::path::PathBuf,
    },

    /// Print the computer's move for a position
    Suggest {
        /// Board text, row by row: X, O and . for empty (e.g. "XX. OO. ...")
        #[arg(short, long)]
        board: String,

        /// Difficulty tier supplying the win rule and search depth
        #[arg(short, long, conflicts_with = "size", required_unless_present = "size")]
        difficulty: Option<Difficulty>,

        /// Board size supplying the win rule (needs --depth)
        #[arg(short, long)]
        size: Option<BoardSize>,

        /// Mark to move
        #[arg(long)]
        mark: Mark,

        /// Search depth in plies; overrides the difficulty's
        #[arg(long)]
        depth: Option<u8>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the difficulty and board-size tables
    Rules {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}
