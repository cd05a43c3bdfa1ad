//! First-class move and error types.
//!
//! Moves are domain events: a mark placed on a cell. They can be checked
//! against a session's preconditions before they are applied.

use crate::config::BoardSize;
use crate::session::Phase;
use crate::types::Mark;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A mark placed on a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{} -> {}", mark, index)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// Target cell, row-major.
    pub index: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, index: usize) -> Self {
        Self { mark, index }
    }
}

/// Why a move request was not applied.
///
/// These are expected user-input conditions, not failures: the session
/// ignores such requests and leaves its state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum MoveRejection {
    /// The game has already been won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// The index does not name a cell.
    #[display("Cell {} is outside a board of {} cells", index, len)]
    OutOfRange {
        /// Requested cell.
        index: usize,
        /// Number of cells on the board.
        len: usize,
    },

    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(usize),

    /// The requesting side does not have the move.
    #[display("It's not {}'s turn", _0)]
    WrongTurn(Mark),
}

impl std::error::Error for MoveRejection {}

/// Error from a setup step of the session state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SetupError {
    /// The step does not apply in the current phase.
    #[display("Cannot {} while {}", step, phase)]
    WrongPhase {
        /// The attempted step.
        step: &'static str,
        /// Phase the session was in.
        phase: Phase,
    },

    /// Automated games take their search depth from a difficulty tier.
    #[display("A game against the computer needs a difficulty, not a bare {} board", _0)]
    DifficultyRequired(BoardSize),

    /// Automated games need the human's mark.
    #[display("A game against the computer needs the human's mark")]
    SymbolRequired,
}

impl std::error::Error for SetupError {}
