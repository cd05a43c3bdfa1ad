//! Strictly N-in-a-row - generalized tic-tac-toe game logic
//!
//! Boards range from 3x3 to 6x6 and the win length is part of the rules,
//! so the same engine plays classic tic-tac-toe and its larger variants.
//!
//! # Architecture
//!
//! - **Geometry**: index <-> (row, col) mapping and board symmetries
//! - **Rules**: win/draw detection in a fixed, deterministic scan order
//! - **Eval**: positional cell weights used by the search
//! - **Search**: depth-limited minimax for the automated opponent
//! - **Session**: the setup/play state machine a front end drives
//!
//! # Example
//!
//! ```
//! use strictly_nrow::{BoardChoice, Difficulty, GameMode, GameSession, Mark, RulesTable};
//!
//! let mut session = GameSession::start(
//!     RulesTable::default(),
//!     GameMode::HumanVsAutomated,
//!     BoardChoice::Difficulty(Difficulty::Medium),
//!     Some(Mark::X),
//! )
//! .expect("valid setup");
//!
//! // The automated O reply is played inside the same call.
//! let state = session.apply_move(4);
//! assert_eq!(state.board().count(Mark::O), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod config;
mod contracts;
mod eval;
mod geometry;
mod rules;
mod search;
mod session;
mod types;

// Crate-level exports - Core types
pub use types::{Board, BoardParseError, CellOutOfRange, Mark};

// Crate-level exports - Geometry
pub use geometry::{index, row_col, Symmetry};

// Crate-level exports - Rules configuration
pub use config::{
    BoardChoice, BoardSize, Difficulty, DifficultyProfile, RuleError, RulesTable, WinRule,
};

// Crate-level exports - Win detection
pub use rules::{evaluate, find_winning_line, is_full, TerminalResult};

// Crate-level exports - Evaluation and search
pub use eval::{cell_weight, score, CORNER_OR_CENTER_WEIGHT, EDGE_WEIGHT, INTERIOR_WEIGHT};
pub use search::{choose_move, SearchEngine, SearchOutcome, WIN_SCORE};

// Crate-level exports - Moves and contracts
pub use action::{Move, MoveRejection, SetupError};
pub use contracts::{CellInRange, CellIsEmpty, GameNotOver, LegalMove, PlayersTurn, Precondition};

// Crate-level exports - Session state machine
pub use session::{
    GameMode, GameSession, MoveReport, Opponent, Phase, SessionState, SnapshotError,
};
