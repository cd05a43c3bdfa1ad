//! Tests for command-line parsing.

use clap::Parser;
use strictly_nrow::{BoardSize, Difficulty, GameMode, Mark};
use strictly_nrow_cli::{Cli, Command};

#[test]
fn test_play_defaults() {
    let cli = Cli::try_parse_from(["strictly_nrow", "play"]).expect("Valid args");
    match cli.command {
        Command::Play {
            mode,
            difficulty,
            size,
            mark,
            config,
        } => {
            assert_eq!(mode, None);
            assert_eq!(difficulty, None);
            assert_eq!(size, None);
            assert_eq!(mark, None);
            assert_eq!(config, std::path::PathBuf::from("strictly_nrow.toml"));
        }
        other => panic!("Expected play, got {other:?}"),
    }
}

#[test]
fn test_play_overrides() {
    let cli = Cli::try_parse_from([
        "strictly_nrow",
        "play",
        "--mode",
        "human",
        "--size",
        "4x4",
        "--mark",
        "o",
    ])
    .expect("Valid args");
    match cli.command {
        Command::Play {
            mode, size, mark, ..
        } => {
            assert_eq!(mode, Some(GameMode::HumanVsHuman));
            assert_eq!(size, Some(BoardSize::Four));
            assert_eq!(mark, Some(Mark::O));
        }
        other => panic!("Expected play, got {other:?}"),
    }
}

#[test]
fn test_suggest_with_difficulty() {
    let cli = Cli::try_parse_from([
        "strictly_nrow",
        "suggest",
        "--board",
        "XX. OO. ...",
        "--difficulty",
        "medium",
        "--mark",
        "X",
        "--json",
    ])
    .expect("Valid args");
    match cli.command {
        Command::Suggest {
            board,
            difficulty,
            json,
            ..
        } => {
            assert_eq!(board, "XX. OO. ...");
            assert_eq!(difficulty, Some(Difficulty::Medium));
            assert!(json);
        }
        other => panic!("Expected suggest, got {other:?}"),
    }
}

#[test]
fn test_suggest_needs_a_rule() {
    let result = Cli::try_parse_from(["strictly_nrow", "suggest", "--board", "...", "--mark", "X"]);
    assert!(result.is_err());
}

#[test]
fn test_suggest_rejects_both_rules() {
    let result = Cli::try_parse_from([
        "strictly_nrow",
        "suggest",
        "--board",
        "... ... ...",
        "--difficulty",
        "easy",
        "--size",
        "3x3",
        "--mark",
        "X",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_unknown_difficulty_rejected() {
    let result = Cli::try_parse_from(["strictly_nrow", "play", "--difficulty", "legendary"]);
    assert!(result.is_err());
}
