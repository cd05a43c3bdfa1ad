//! Rules configuration: board sizes, win lengths and search depths.
//!
//! The tables are plain data handed to [`GameSession`](crate::GameSession)
//! at construction, so tests can inject their own.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

/// Smallest supported board side.
pub const MIN_BOARD_SIZE: usize = 3;

/// Largest supported board side.
pub const MAX_BOARD_SIZE: usize = 6;

/// Error building a [`WinRule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RuleError {
    /// Board side outside the supported range.
    #[display("Board size {} is outside {}..={}", _0, MIN_BOARD_SIZE, MAX_BOARD_SIZE)]
    UnsupportedSize(usize),
    /// Win length of zero or longer than the board side.
    #[display("Win length {} does not fit a {}x{} board", win_length, size, size)]
    InvalidWinLength {
        /// Board side.
        size: usize,
        /// Requested win length.
        win_length: usize,
    },
}

impl std::error::Error for RuleError {}

/// Board side N and the run length L needed to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StoredWinRule")]
pub struct WinRule {
    size: usize,
    win_length: usize,
}

/// Unchecked serialized form of a [`WinRule`].
#[derive(Deserialize)]
struct StoredWinRule {
    size: usize,
    win_length: usize,
}

impl TryFrom<StoredWinRule> for WinRule {
    type Error = RuleError;

    fn try_from(stored: StoredWinRule) -> Result<Self, Self::Error> {
        Self::new(stored.size, stored.win_length)
    }
}

impl WinRule {
    /// Creates a rule, checking `3 <= size <= 6` and `1 <= win_length <= size`.
    #[instrument]
    pub fn new(size: usize, win_length: usize) -> Result<Self, RuleError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size) {
            return Err(RuleError::UnsupportedSize(size));
        }
        if win_length == 0 || win_length > size {
            return Err(RuleError::InvalidWinLength { size, win_length });
        }
        Ok(Self { size, win_length })
    }

    /// Rule where the whole side must be filled (L = N).
    const fn full_side(size: usize) -> Self {
        Self {
            size,
            win_length: size,
        }
    }

    /// Board side N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Win length L.
    pub fn win_length(&self) -> usize {
        self.win_length
    }
}

/// Difficulty tier for games against the automated opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// 3x3, three in a row, shallow search.
    Easy,
    /// 3x3, three in a row.
    Medium,
    /// 4x4, four in a row.
    Hard,
    /// 5x5, five in a row.
    Expert,
    /// 6x6, six in a row, shallow search to stay responsive.
    Extreme,
}

/// Explicit board size for human-vs-human games.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum BoardSize {
    /// 3x3 board.
    #[serde(rename = "3x3")]
    #[strum(to_string = "3x3", serialize = "3")]
    Three,
    /// 4x4 board.
    #[serde(rename = "4x4")]
    #[strum(to_string = "4x4", serialize = "4")]
    Four,
    /// 5x5 board.
    #[serde(rename = "5x5")]
    #[strum(to_string = "5x5", serialize = "5")]
    Five,
    /// 6x6 board.
    #[serde(rename = "6x6")]
    #[strum(to_string = "6x6", serialize = "6")]
    Six,
}

impl BoardSize {
    /// Side length N.
    pub fn side(self) -> usize {
        match self {
            BoardSize::Three => 3,
            BoardSize::Four => 4,
            BoardSize::Five => 5,
            BoardSize::Six => 6,
        }
    }
}

/// What the player picked on the board-selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum BoardChoice {
    /// A difficulty tier, which fixes size, win length and search depth.
    #[display("{}", _0)]
    Difficulty(Difficulty),
    /// A bare board size, with win length from the size table.
    #[display("{}", _0)]
    Size(BoardSize),
}

/// Parameters fixed by a difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Board size and win length.
    pub rule: WinRule,
    /// Plies searched by the automated opponent.
    pub search_depth: u8,
}

impl DifficultyProfile {
    const fn new(size: usize, search_depth: u8) -> Self {
        Self {
            rule: WinRule::full_side(size),
            search_depth,
        }
    }
}

/// Difficulty and size tables.
///
/// Entries are ordered like [`Difficulty::iter`] and [`BoardSize::iter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesTable {
    profiles: [DifficultyProfile; 5],
    sizes: [WinRule; 4],
}

impl RulesTable {
    /// Creates a table from explicit entries.
    pub fn new(profiles: [DifficultyProfile; 5], sizes: [WinRule; 4]) -> Self {
        Self { profiles, sizes }
    }

    /// Returns a copy of the table with one difficulty replaced.
    pub fn with_profile(mut self, difficulty: Difficulty, profile: DifficultyProfile) -> Self {
        self.profiles[difficulty as usize] = profile;
        self
    }

    /// Returns a copy of the table with one size rule replaced.
    pub fn with_size_rule(mut self, size: BoardSize, rule: WinRule) -> Self {
        self.sizes[size as usize] = rule;
        self
    }

    /// Parameters for a difficulty tier.
    pub fn profile(&self, difficulty: Difficulty) -> DifficultyProfile {
        self.profiles[difficulty as usize]
    }

    /// Win rule for an explicit board size.
    pub fn size_rule(&self, size: BoardSize) -> WinRule {
        self.sizes[size as usize]
    }

    /// Win rule for either kind of board choice.
    pub fn rule_for(&self, choice: BoardChoice) -> WinRule {
        match choice {
            BoardChoice::Difficulty(d) => self.profile(d).rule,
            BoardChoice::Size(s) => self.size_rule(s),
        }
    }

    /// Search depth for a board choice; only difficulty tiers carry one.
    pub fn depth_for(&self, choice: BoardChoice) -> Option<u8> {
        match choice {
            BoardChoice::Difficulty(d) => Some(self.profile(d).search_depth),
            BoardChoice::Size(_) => None,
        }
    }

    /// Iterates over every difficulty with its parameters.
    pub fn profiles(&self) -> impl Iterator<Item = (Difficulty, DifficultyProfile)> + '_ {
        Difficulty::iter().map(|d| (d, self.profile(d)))
    }

    /// Iterates over every explicit size with its rule.
    pub fn size_rules(&self) -> impl Iterator<Item = (BoardSize, WinRule)> + '_ {
        BoardSize::iter().map(|s| (s, self.size_rule(s)))
    }
}

impl Default for RulesTable {
    fn default() -> Self {
        Self {
            profiles: [
                DifficultyProfile::new(3, 2),
                DifficultyProfile::new(3, 3),
                DifficultyProfile::new(4, 3),
                DifficultyProfile::new(5, 3),
                DifficultyProfile::new(6, 2),
            ],
            sizes: [
                WinRule::full_side(3),
                WinRule::full_side(4),
                WinRule::full_side(5),
                WinRule::full_side(6),
            ],
        }
    }
}
