//! Board geometry: linear index <-> (row, col), and the square's symmetries.

use serde::{Deserialize, Serialize};

/// Maps a row-major cell index to `(row, col)`.
pub fn row_col(index: usize, size: usize) -> (usize, usize) {
    (index / size, index % size)
}

/// Maps `(row, col)` to a row-major cell index.
///
/// Callers guarantee `row < size` and `col < size`.
pub fn index(row: usize, col: usize, size: usize) -> usize {
    row * size + col
}

/// One of the eight symmetries of a square board (dihedral group D4).
///
/// Applied as an optional left-right mirror followed by clockwise
/// quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symmetry {
    quarter_turns: u8,
    mirrored: bool,
}

impl Symmetry {
    /// Leaves every cell in place.
    pub const IDENTITY: Symmetry = Symmetry {
        quarter_turns: 0,
        mirrored: false,
    };

    /// Creates a symmetry from clockwise quarter turns (taken mod 4) and a mirror flag.
    pub fn new(quarter_turns: u8, mirrored: bool) -> Self {
        Self {
            quarter_turns: quarter_turns % 4,
            mirrored,
        }
    }

    /// All eight symmetries, identity first.
    pub fn all() -> [Symmetry; 8] {
        let mut all = [Self::IDENTITY; 8];
        for (slot, turns) in (0..4u8).enumerate() {
            all[slot * 2] = Self::new(turns, false);
            all[slot * 2 + 1] = Self::new(turns, true);
        }
        all
    }

    /// Maps a cell index on an N×N board to its image under this symmetry.
    pub fn apply(self, cell: usize, size: usize) -> usize {
        let (mut row, mut col) = row_col(cell, size);
        let last = size - 1;

        if self.mirrored {
            col = last - col;
        }

        for _ in 0..self.quarter_turns {
            (row, col) = (col, last - row);
        }

        index(row, col, size)
    }
}

impl Default for Symmetry {
    fn default() -> Self {
        Self::IDENTITY
    }
}
