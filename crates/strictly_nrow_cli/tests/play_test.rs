//! Tests for the line-based game loop and one-shot commands.

use std::io::Cursor;
use strictly_nrow::{BoardChoice, BoardSize, Difficulty, GameMode, Mark, RulesTable};
use strictly_nrow_cli::{run_play, run_rules, run_suggest, CliConfig};

fn play(config: &CliConfig, script: &str) -> String {
    let mut output = Vec::new();
    run_play(
        config,
        RulesTable::default(),
        Cursor::new(script.as_bytes()),
        &mut output,
    )
    .expect("Game loop runs");
    String::from_utf8(output).expect("UTF-8 output")
}

fn two_humans() -> CliConfig {
    CliConfig::default().with_overrides(
        Some(GameMode::HumanVsHuman),
        None,
        Some(BoardSize::Three),
        None,
    )
}

#[test]
fn test_human_game_reports_winner() {
    let output = play(&two_humans(), "0\n3\n1\n4\n2\nquit\n");
    assert!(output.contains("Player X wins (cells 0, 1, 2)"), "{output}");
}

#[test]
fn test_rejected_moves_are_explained() {
    let output = play(&two_humans(), "0\n0\n9\nabc\nquit\n");
    assert!(output.contains("Cell 0 is already occupied"), "{output}");
    assert!(output.contains("Cell 9 is outside a board of 9 cells"), "{output}");
    assert!(output.contains("Not a cell number"), "{output}");
}

#[test]
fn test_reset_walks_setup_prompts() {
    let output = play(&two_humans(), "reset\nhuman\n4x4\n15\nquit\n");
    assert!(output.contains("Mode (human, automated):"), "{output}");
    assert!(output.contains("Board (3x3, 4x4, 5x5, 6x6, or a difficulty):"), "{output}");
    assert!(output.contains("O to move"), "{output}");
}

#[test]
fn test_computer_replies() {
    let config = CliConfig::default().with_overrides(
        Some(GameMode::HumanVsAutomated),
        Some(Difficulty::Easy),
        None,
        Some(Mark::X),
    );
    let output = play(&config, "4\n");
    let last_board = output.rsplit("X to move").nth(1).unwrap_or_default();
    assert!(last_board.contains('O'), "{output}");
}

#[test]
fn test_end_of_input_stops_loop() {
    let output = play(&two_humans(), "");
    assert!(output.contains("X to move"), "{output}");
}

#[test]
fn test_suggest_json() {
    let mut output = Vec::new();
    run_suggest(
        &RulesTable::default(),
        "XX. OO. ...",
        BoardChoice::Difficulty(Difficulty::Medium),
        Mark::X,
        None,
        true,
        &mut output,
    )
    .expect("Suggestion");
    let json: serde_json::Value = serde_json::from_slice(&output).expect("JSON output");
    assert_eq!(json["index"], 2);
    assert_eq!(json["depth"], 3);
    assert_eq!(json["mark"], "X");
}

#[test]
fn test_suggest_rejects_finished_position() {
    let mut output = Vec::new();
    let err = run_suggest(
        &RulesTable::default(),
        "XXX OO. ...",
        BoardChoice::Difficulty(Difficulty::Easy),
        Mark::O,
        None,
        false,
        &mut output,
    )
    .unwrap_err();
    assert!(err.to_string().contains("already decided"));
}

#[test]
fn test_rules_table_text() {
    let mut output = Vec::new();
    run_rules(&RulesTable::default(), false, &mut output).expect("Rules");
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("extreme"));
    assert!(text.contains("6x6"));
}

#[test]
fn test_rules_table_json() {
    let mut output = Vec::new();
    run_rules(&RulesTable::default(), true, &mut output).expect("Rules");
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["difficulties"][4]["difficulty"], "extreme");
    assert_eq!(json["difficulties"][4]["depth"], 2);
    assert_eq!(json["sizes"][1]["board"], "4x4");
}
