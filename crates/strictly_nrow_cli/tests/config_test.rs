//! Tests for loading play defaults from TOML.

use std::io::Write;
use strictly_nrow::{BoardChoice, BoardSize, Difficulty, GameMode, Mark};
use strictly_nrow_cli::{CliConfig, ConfigErrorKind};
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
mode = "human-vs-human"
difficulty = "expert"
size = "5x5"
mark = "O"
"#,
    );

    let config = CliConfig::from_file(file.path()).expect("Valid config");
    assert_eq!(config.mode(), &GameMode::HumanVsHuman);
    assert_eq!(config.difficulty(), &Difficulty::Expert);
    assert_eq!(config.size(), &BoardSize::Five);
    assert_eq!(config.mark(), &Mark::O);
    assert_eq!(config.board_choice(), BoardChoice::Size(BoardSize::Five));
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = CliConfig::load_or_default(dir.path().join("strictly_nrow.toml"))
        .expect("Defaults");
    assert_eq!(config, CliConfig::default());
    assert_eq!(
        config.board_choice(),
        BoardChoice::Difficulty(Difficulty::Medium)
    );
}

#[test]
fn test_unknown_difficulty_is_an_error() {
    let file = write_config("difficulty = \"impossible\"\n");
    let err = CliConfig::load_or_default(file.path()).unwrap_err();
    assert!(matches!(err.kind, ConfigErrorKind::Parse(_)), "{err}");
    assert!(err.file.ends_with("config.rs"));
}

#[test]
fn test_unknown_key_is_an_error() {
    let file = write_config("depth = 9\n");
    let err = CliConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err.kind, ConfigErrorKind::Parse(_)), "{err}");
}

#[test]
fn test_unreadable_path_is_an_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = CliConfig::from_file(dir.path()).unwrap_err();
    assert!(matches!(err.kind, ConfigErrorKind::Read(_)), "{err}");
}
