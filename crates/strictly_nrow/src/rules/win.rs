//! Win detection logic for N-in-a-row.

use crate::geometry::index;
use crate::types::{Board, Mark};

/// A straight run of cells: `start`, `start + step`, `start + 2 * step`, ...
#[derive(Debug, Clone, Copy)]
struct Run {
    start: usize,
    step: usize,
}

impl Run {
    fn cells(self, len: usize) -> impl Iterator<Item = usize> {
        (0..len).map(move |k| self.start + k * self.step)
    }
}

/// Every candidate run of `len` cells on a `size`×`size` board, in scan order:
/// rows, then columns, then each L×L window's diagonal followed by its
/// anti-diagonal.
fn runs(size: usize, len: usize) -> impl Iterator<Item = Run> {
    let span = size - len;

    let rows = (0..size).flat_map(move |i| {
        (0..=span).map(move |j| Run {
            start: index(i, j, size),
            step: 1,
        })
    });

    let columns = (0..=span).flat_map(move |i| {
        (0..size).map(move |j| Run {
            start: index(i, j, size),
            step: size,
        })
    });

    let diagonals = (0..=span).flat_map(move |i| {
        (0..=span).flat_map(move |j| {
            [
                Run {
                    start: index(i, j, size),
                    step: size + 1,
                },
                Run {
                    start: index(i, j + len - 1, size),
                    step: size - 1,
                },
            ]
        })
    });

    rows.chain(columns).chain(diagonals)
}

/// Returns the mark owning every cell of the run, if any.
fn run_owner(board: &Board, run: Run, len: usize) -> Option<Mark> {
    let mut cells = run.cells(len);
    let first = board.get(cells.next()?)?;
    cells.all(|cell| board.get(cell) == Some(first)).then_some(first)
}

/// Finds the first run of `win_length` identical marks in scan order.
///
/// Returns the owning mark and the run's cell indices, or `None` if no run
/// exists. Scanning stops at the first match.
pub fn find_winning_line(board: &Board, win_length: usize) -> Option<(Mark, Vec<usize>)> {
    let size = board.size();
    if win_length == 0 || win_length > size {
        return None;
    }

    runs(size, win_length).find_map(|run| {
        run_owner(board, run, win_length).map(|mark| (mark, run.cells(win_length).collect()))
    })
}
