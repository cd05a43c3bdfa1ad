//! Play defaults loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_nrow::{BoardChoice, BoardSize, Difficulty, GameMode, Mark};
use tracing::{debug, info, instrument};

/// Defaults for `play`, each overridable from the command line.
///
/// ```toml
/// mode = "human-vs-automated"
/// difficulty = "hard"
/// size = "4x4"
/// mark = "O"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Game mode.
    #[serde(default = "default_mode")]
    mode: GameMode,

    /// Difficulty against the computer.
    #[serde(default = "default_difficulty")]
    difficulty: Difficulty,

    /// Board size for human-vs-human games.
    #[serde(default = "default_size")]
    size: BoardSize,

    /// Human's mark against the computer.
    #[serde(default = "default_mark")]
    mark: Mark,
}

fn default_mode() -> GameMode {
    GameMode::HumanVsAutomated
}

fn default_difficulty() -> Difficulty {
    Difficulty::Medium
}

fn default_size() -> BoardSize {
    BoardSize::Three
}

fn default_mark() -> Mark {
    Mark::X
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            difficulty: default_difficulty(),
            size: default_size(),
            mark: default_mark(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(ConfigErrorKind::Read(e.to_string())))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(ConfigErrorKind::Parse(e.to_string())))?;

        info!(mode = %config.mode, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file if it exists, otherwise returns the defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            debug!("No config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides.
    pub fn with_overrides(
        mut self,
        mode: Option<GameMode>,
        difficulty: Option<Difficulty>,
        size: Option<BoardSize>,
        mark: Option<Mark>,
    ) -> Self {
        self.mode = mode.unwrap_or(self.mode);
        self.difficulty = difficulty.unwrap_or(self.difficulty);
        self.size = size.unwrap_or(self.size);
        self.mark = mark.unwrap_or(self.mark);
        self
    }

    /// Board choice for the configured mode.
    ///
    /// The computer always plays a difficulty tier; two humans play the
    /// configured size.
    pub fn board_choice(&self) -> BoardChoice {
        match self.mode {
            GameMode::HumanVsAutomated => BoardChoice::Difficulty(self.difficulty),
            GameMode::HumanVsHuman => BoardChoice::Size(self.size),
        }
    }
}

/// What went wrong loading the config file.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ConfigErrorKind {
    /// The file could not be read.
    #[display("Failed to read config file: {}", _0)]
    Read(String),
    /// The file is not valid play-defaults TOML.
    #[display("Failed to parse config: {}", _0)]
    Parse(String),
}

/// Configuration error, tagged with the location that raised it.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", kind, file, line)]
pub struct ConfigError {
    /// What failed.
    #[error(not(source))]
    pub kind: ConfigErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a configuration error at the caller's location.
    #[track_caller]
    pub fn new(kind: ConfigErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
