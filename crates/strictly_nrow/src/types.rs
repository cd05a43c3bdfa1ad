//! Core domain types for N-in-a-row.

use crate::geometry::{self, Symmetry};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// A player's mark.
///
/// X always moves first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// First player.
    X,
    /// Second player.
    O,
}

impl Mark {
    /// Returns the opponent's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Returns the character used when rendering the board.
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

/// Error returned when writing to a cell that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, derive_more::Error)]
#[display("Cell {} is outside a board of {} cells", index, len)]
pub struct CellOutOfRange {
    /// The requested index.
    pub index: usize,
    /// Number of cells on the board.
    pub len: usize,
}

/// Error returned when parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardParseError {
    /// The text contained no cells.
    #[display("Board text is empty")]
    Empty,
    /// A character that is not a mark or an empty-cell marker.
    #[display("Unexpected character {:?} in board text", _0)]
    InvalidChar(char),
    /// The number of cells is not a perfect square.
    #[display("{} cells do not form a square board", _0)]
    NotSquare(usize),
    /// A stored board whose cell list does not match its side length.
    #[display("{} cells do not fill a {}x{} board", cells, size, size)]
    CellCount {
        /// Declared side length.
        size: usize,
        /// Number of cells present.
        cells: usize,
    },
}

impl std::error::Error for BoardParseError {}

/// Square N×N board stored in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StoredBoard")]
pub struct Board {
    size: usize,
    cells: Vec<Option<Mark>>,
}

/// Unchecked serialized form of a [`Board`].
#[derive(Deserialize)]
struct StoredBoard {
    size: usize,
    cells: Vec<Option<Mark>>,
}

impl TryFrom<StoredBoard> for Board {
    type Error = BoardParseError;

    fn try_from(stored: StoredBoard) -> Result<Self, Self::Error> {
        let StoredBoard { size, cells } = stored;
        if size == 0 {
            return Err(BoardParseError::Empty);
        }
        if cells.len() != size * size {
            return Err(BoardParseError::CellCount {
                size,
                cells: cells.len(),
            });
        }
        Ok(Self { size, cells })
    }
}

impl Board {
    /// Creates an empty board with the given side length.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (N²).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the board has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns the mark in the cell, or `None` if the cell is empty or out of range.
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    /// Returns true if `index` names a cell on this board.
    pub fn contains(&self, index: usize) -> bool {
        index < self.cells.len()
    }

    /// Returns true if the cell exists and holds no mark.
    pub fn is_vacant(&self, index: usize) -> bool {
        matches!(self.cells.get(index), Some(None))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Option<Mark>] {
        &self.cells
    }

    /// Sets the content of a cell.
    pub fn set(&mut self, index: usize, cell: Option<Mark>) -> Result<(), CellOutOfRange> {
        let len = self.cells.len();
        let slot = self
            .cells
            .get_mut(index)
            .ok_or(CellOutOfRange { index, len })?;
        *slot = cell;
        Ok(())
    }

    /// Returns a copy of the board with `mark` placed at `index`.
    ///
    /// Callers guarantee `index` is in range.
    pub(crate) fn with_mark(&self, index: usize, mark: Mark) -> Self {
        let mut next = self.clone();
        next.cells[index] = Some(mark);
        next
    }

    /// Places `mark` at `index` in place. Callers guarantee `index` is in range.
    pub(crate) fn put(&mut self, index: usize, mark: Mark) {
        self.cells[index] = Some(mark);
    }

    /// Indices of empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| index)
    }

    /// Number of cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|c| **c == Some(mark)).count()
    }

    /// Returns the board with every cell moved by `symmetry`.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn transformed(&self, symmetry: Symmetry) -> Self {
        let mut cells = vec![None; self.cells.len()];
        for (index, cell) in self.cells.iter().enumerate() {
            cells[symmetry.apply(index, self.size)] = *cell;
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Formats the board for play, numbering empty cells from 0.
    pub fn display(&self) -> String {
        let width = self.cells.len().saturating_sub(1).to_string().len();
        let mut result = String::new();
        for row in 0..self.size {
            let line = (0..self.size)
                .map(|col| {
                    let pos = geometry::index(row, col, self.size);
                    match self.cells[pos] {
                        Some(mark) => format!("{:>width$}", mark.symbol()),
                        None => format!("{:>width$}", pos),
                    }
                })
                .collect::<Vec<_>>()
                .join(" | ");
            result.push_str(&line);
            if row + 1 < self.size {
                let rule = vec!["-".repeat(width); self.size].join("-+-");
                result.push('\n');
                result.push_str(&rule);
                result.push('\n');
            }
        }
        result
    }
}

impl fmt::Display for Board {
    /// Compact form, one row per line: `X`, `O`, `.` for empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(self.size.max(1)).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                write!(f, "{}", cell.map_or('.', Mark::symbol))?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `X`/`O` (any case) and `.`, `-`, `_` for empty cells.
    ///
    /// Whitespace and `|` separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .map(|c| match c {
                'X' | 'x' => Ok(Some(Mark::X)),
                'O' | 'o' => Ok(Some(Mark::O)),
                '.' | '-' | '_' => Ok(None),
                other => Err(BoardParseError::InvalidChar(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if cells.is_empty() {
            return Err(BoardParseError::Empty);
        }

        let size = cells.len().isqrt();
        if size * size != cells.len() {
            return Err(BoardParseError::NotSquare(cells.len()));
        }

        Ok(Self { size, cells })
    }
}
