//! Positional evaluation.
//!
//! Corners (and the center of odd boards) are worth the most, other border
//! cells less, the interior least. The weights break ties between equally
//! scored root moves and give the search a static value at its depth limit.

use crate::geometry::row_col;
use crate::types::{Board, Mark};

/// Weight of a corner, or of the center cell on an odd board.
pub const CORNER_OR_CENTER_WEIGHT: i32 = 3;

/// Weight of a border cell that is not a corner.
pub const EDGE_WEIGHT: i32 = 2;

/// Weight of a strictly interior cell.
pub const INTERIOR_WEIGHT: i32 = 1;

/// Positional weight of a cell on a `size`×`size` board.
pub fn cell_weight(cell: usize, size: usize) -> i32 {
    let (row, col) = row_col(cell, size);
    let last = size - 1;

    let row_edge = row == 0 || row == last;
    let col_edge = col == 0 || col == last;
    let center = size % 2 == 1 && row == size / 2 && col == size / 2;

    if (row_edge && col_edge) || center {
        CORNER_OR_CENTER_WEIGHT
    } else if row_edge || col_edge {
        EDGE_WEIGHT
    } else {
        INTERIOR_WEIGHT
    }
}

/// Static value of a board for `perspective`: the weight of its cells minus
/// the weight of the opponent's.
pub fn score(board: &Board, perspective: Mark) -> i32 {
    let size = board.size();
    board
        .cells()
        .iter()
        .enumerate()
        .filter_map(|(cell, mark)| {
            mark.map(|m| {
                let weight = cell_weight(cell, size);
                if m == perspective { weight } else { -weight }
            })
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_3x3() {
        let weights: Vec<i32> = (0..9).map(|i| cell_weight(i, 3)).collect();
        assert_eq!(weights, vec![3, 2, 3, 2, 3, 2, 3, 2, 3]);
    }

    #[test]
    fn test_weights_4x4_has_no_center() {
        let weights: Vec<i32> = (0..16).map(|i| cell_weight(i, 4)).collect();
        assert_eq!(
            weights,
            vec![3, 2, 2, 3, 2, 1, 1, 2, 2, 1, 1, 2, 3, 2, 2, 3]
        );
    }

    #[test]
    fn test_weights_5x5_center_and_interior() {
        assert_eq!(cell_weight(12, 5), CORNER_OR_CENTER_WEIGHT);
        assert_eq!(cell_weight(6, 5), INTERIOR_WEIGHT);
        assert_eq!(cell_weight(2, 5), EDGE_WEIGHT);
        assert_eq!(cell_weight(24, 5), CORNER_OR_CENTER_WEIGHT);
    }

    #[test]
    fn test_score_is_antisymmetric() {
        let board: Board = "X.O .X. ..O".parse().unwrap();
        // X: corner + center = 6, O: corner + corner = 6
        assert_eq!(score(&board, Mark::X), 0);

        let board: Board = "X.O .X. .O.".parse().unwrap();
        assert_eq!(score(&board, Mark::X), 1);
        assert_eq!(score(&board, Mark::O), -1);
    }
}
