//! Strictly N-in-a-row - terminal front end
//!
//! Play a game, ask the computer for a move, or print the rules.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use strictly_nrow::{BoardChoice, RulesTable};
use strictly_nrow_cli::{run_play, run_rules, run_suggest, CliConfig, Cli, Command};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let rules = RulesTable::default();

    match cli.command {
        Command::Play {
            mode,
            difficulty,
            size,
            mark,
            config,
        } => {
            let config =
                CliConfig::load_or_default(&config)?.with_overrides(mode, difficulty, size, mark);
            info!(?config, "Starting interactive game");
            run_play(&config, rules, std::io::stdin().lock(), std::io::stdout().lock())
        }
        Command::Suggest {
            board,
            difficulty,
            size,
            mark,
            depth,
            json,
        } => {
            let choice = match (difficulty, size) {
                (Some(difficulty), _) => BoardChoice::Difficulty(difficulty),
                (None, Some(size)) => BoardChoice::Size(size),
                (None, None) => anyhow::bail!("Pass --difficulty or --size"),
            };
            run_suggest(&rules, &board, choice, mark, depth, json, std::io::stdout().lock())
        }
        Command::Rules { json } => run_rules(&rules, json, std::io::stdout().lock()),
    }
}
