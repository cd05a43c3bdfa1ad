//! Move preconditions.
//!
//! Each precondition is a named check over a [`SessionState`] and a
//! [`Move`]. [`LegalMove`] composes them in the order a rejection is
//! reported.

use crate::action::{Move, MoveRejection};
use crate::session::SessionState;
use tracing::instrument;

/// A condition that must hold before a move is applied.
pub trait Precondition {
    /// Checks the condition for `mov` against `state`.
    fn check(state: &SessionState, mov: &Move) -> Result<(), MoveRejection>;
}

/// Precondition: the game has not been won or drawn.
pub struct GameNotOver;

impl Precondition for GameNotOver {
    fn check(state: &SessionState, _mov: &Move) -> Result<(), MoveRejection> {
        if state.result().is_terminal() {
            Err(MoveRejection::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the index names a cell on the board.
pub struct CellInRange;

impl Precondition for CellInRange {
    fn check(state: &SessionState, mov: &Move) -> Result<(), MoveRejection> {
        let board = state.board();
        if board.contains(mov.index) {
            Ok(())
        } else {
            Err(MoveRejection::OutOfRange {
                index: mov.index,
                len: board.len(),
            })
        }
    }
}

/// Precondition: the cell holds no mark.
pub struct CellIsEmpty;

impl Precondition for CellIsEmpty {
    fn check(state: &SessionState, mov: &Move) -> Result<(), MoveRejection> {
        if state.board().is_vacant(mov.index) {
            Ok(())
        } else {
            Err(MoveRejection::CellOccupied(mov.index))
        }
    }
}

/// Precondition: the move's mark has the turn.
pub struct PlayersTurn;

impl Precondition for PlayersTurn {
    fn check(state: &SessionState, mov: &Move) -> Result<(), MoveRejection> {
        if mov.mark == state.current_turn() {
            Ok(())
        } else {
            Err(MoveRejection::WrongTurn(mov.mark))
        }
    }
}

/// Composite precondition: game running, cell on the board and empty, mover's turn.
pub struct LegalMove;

impl Precondition for LegalMove {
    #[instrument(skip(state))]
    fn check(state: &SessionState, mov: &Move) -> Result<(), MoveRejection> {
        GameNotOver::check(state, mov)?;
        CellInRange::check(state, mov)?;
        CellIsEmpty::check(state, mov)?;
        PlayersTurn::check(state, mov)?;
        Ok(())
    }
}
