//! Game rules for N-in-a-row.
//!
//! Pure functions over a [`Board`]: they never mutate it and carry no
//! state between calls, so the search can call them at every node.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::find_winning_line;

use crate::config::WinRule;
use crate::types::{Board, Mark};
use serde::{Deserialize, Serialize};

/// Terminal status of a board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalResult {
    /// No winning run and at least one empty cell.
    InProgress,
    /// A run of the win length was found.
    Won {
        /// Owner of the run.
        mark: Mark,
        /// Cell indices of the first run found, in run order.
        line: Vec<usize>,
    },
    /// Board full without a winning run.
    Draw,
}

impl TerminalResult {
    /// Returns true for a win or a draw.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TerminalResult::InProgress)
    }

    /// Returns the winner, if any.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            TerminalResult::Won { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Cells of the winning run, empty unless the game was won.
    pub fn winning_line(&self) -> &[usize] {
        match self {
            TerminalResult::Won { line, .. } => line,
            _ => &[],
        }
    }
}

impl std::fmt::Display for TerminalResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminalResult::InProgress => write!(f, "In progress"),
            TerminalResult::Won { mark, .. } => write!(f, "Player {} wins", mark),
            TerminalResult::Draw => write!(f, "Draw"),
        }
    }
}

/// Evaluates the board under `rule`: win first, then draw, else in progress.
pub fn evaluate(board: &Board, rule: &WinRule) -> TerminalResult {
    debug_assert_eq!(board.size(), rule.size(), "board does not match its rule");

    if let Some((mark, line)) = find_winning_line(board, rule.win_length()) {
        TerminalResult::Won { mark, line }
    } else if is_full(board) {
        TerminalResult::Draw
    } else {
        TerminalResult::InProgress
    }
}
