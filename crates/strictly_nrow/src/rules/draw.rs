//! Draw detection logic for N-in-a-row.

use crate::types::Board;

/// Checks if the board is full (every cell occupied).
///
/// A full board with no winning run is a draw.
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(Option::is_some)
}
