//! Depth-limited minimax for the automated opponent.
//!
//! The search is a pure recursive function over board snapshots: every
//! child is a fresh copy of its parent with one more mark, and nothing is
//! shared between branches.
//!
//! # Scoring
//!
//! - Terminal positions score `WIN_SCORE`, `-WIN_SCORE` or 0, whatever the
//!   depth at which they occur. The terminal check comes before the depth
//!   check.
//! - Positions at the depth limit score [`eval::score`] from the automated
//!   player's side.
//!
//! # Example
//!
//! ```
//! use strictly_nrow::{Board, Mark, SearchEngine, WinRule};
//!
//! let board: Board = "XX. OO. ...".parse().unwrap();
//! let engine = SearchEngine::new(WinRule::new(3, 3).unwrap(), Mark::X, 2);
//! assert_eq!(engine.choose_move(&board), 2);
//! ```

use crate::config::WinRule;
use crate::eval::{self, cell_weight};
use crate::rules::{self, TerminalResult};
use crate::types::{Board, Mark};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a position the automated player has won.
///
/// Larger than any positional score (at most 3 * 36).
pub const WIN_SCORE: i32 = 10_000;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Chosen cell.
    pub index: usize,
    /// Minimax value of the chosen cell.
    pub score: i32,
    /// Positions visited below the root.
    pub nodes: u64,
}

/// Value of a subtree and how many positions it took to get it.
#[derive(Debug, Clone, Copy)]
struct Evaluation {
    score: i32,
    nodes: u64,
}

impl Evaluation {
    fn leaf(score: i32) -> Self {
        Self { score, nodes: 1 }
    }
}

/// Minimax searcher for one automated player under one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchEngine {
    rule: WinRule,
    automated: Mark,
    max_depth: u8,
}

impl SearchEngine {
    /// Creates a searcher playing `automated` to `max_depth` plies.
    pub fn new(rule: WinRule, automated: Mark, max_depth: u8) -> Self {
        Self {
            rule,
            automated,
            max_depth,
        }
    }

    /// The mark this engine plays against.
    pub fn human(&self) -> Mark {
        self.automated.opponent()
    }

    /// Picks the automated player's move on `board`.
    ///
    /// # Panics
    ///
    /// Panics if the board has no empty cell.
    pub fn choose_move(&self, board: &Board) -> usize {
        self.search(board).index
    }

    /// Searches every empty cell in ascending order and returns the best.
    ///
    /// Exact ties in value go to the higher [`cell_weight`], then to the
    /// lower index.
    ///
    /// # Panics
    ///
    /// Panics if the board has no empty cell.
    #[instrument(skip(self, board), fields(automated = %self.automated, max_depth = self.max_depth))]
    pub fn search(&self, board: &Board) -> SearchOutcome {
        let size = board.size();
        let mut best: Option<(usize, i32)> = None;
        let mut nodes = 0;

        for cell in board.empty_cells() {
            let child = board.with_mark(cell, self.automated);
            let eval = self.minimax(&child, self.human(), 1);
            nodes += eval.nodes;

            let better = match best {
                None => true,
                Some((best_cell, best_score)) => {
                    eval.score > best_score
                        || (eval.score == best_score
                            && cell_weight(cell, size) > cell_weight(best_cell, size))
                }
            };
            if better {
                best = Some((cell, eval.score));
            }
        }

        let Some((index, score)) = best else {
            panic!("search called on a board with no empty cell");
        };

        debug!(index, score, nodes, "Search complete");
        SearchOutcome {
            index,
            score,
            nodes,
        }
    }

    fn minimax(&self, board: &Board, to_move: Mark, depth: u8) -> Evaluation {
        match rules::evaluate(board, &self.rule) {
            TerminalResult::Won { mark, .. } if mark == self.automated => {
                return Evaluation::leaf(WIN_SCORE);
            }
            TerminalResult::Won { .. } => return Evaluation::leaf(-WIN_SCORE),
            TerminalResult::Draw => return Evaluation::leaf(0),
            TerminalResult::InProgress => {}
        }

        if depth >= self.max_depth {
            return Evaluation::leaf(eval::score(board, self.automated));
        }

        let maximizing = to_move == self.automated;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };
        let mut nodes = 1;

        for cell in board.empty_cells() {
            let child = board.with_mark(cell, to_move);
            let eval = self.minimax(&child, to_move.opponent(), depth + 1);
            nodes += eval.nodes;
            best = if maximizing {
                best.max(eval.score)
            } else {
                best.min(eval.score)
            };
        }

        Evaluation { score: best, nodes }
    }
}

/// Picks the move for `automated` on `board`, searching `max_depth` plies.
///
/// # Panics
///
/// Panics if the board has no empty cell.
pub fn choose_move(board: &Board, rule: WinRule, automated: Mark, max_depth: u8) -> usize {
    SearchEngine::new(rule, automated, max_depth).choose_move(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule3() -> WinRule {
        WinRule::new(3, 3).unwrap()
    }

    #[test]
    fn test_takes_immediate_win_over_block() {
        let board: Board = "XX. OO. ...".parse().unwrap();
        for depth in 1..=3 {
            assert_eq!(choose_move(&board, rule3(), Mark::X, depth), 2, "depth {depth}");
        }
    }

    #[test]
    fn test_blocks_at_depth_two() {
        // O to move; X threatens the top row.
        let board: Board = "XX. .O. ...".parse().unwrap();
        assert_eq!(choose_move(&board, rule3(), Mark::O, 2), 2);
    }

    #[test]
    fn test_last_cell() {
        let board: Board = "XOX XOO OX.".parse().unwrap();
        let outcome = SearchEngine::new(rule3(), Mark::X, 1).search(&board);
        assert_eq!(outcome.index, 8);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_winning_score() {
        let board: Board = "OO. XX. X..".parse().unwrap();
        let outcome = SearchEngine::new(rule3(), Mark::O, 2).search(&board);
        assert_eq!(outcome.index, 2);
        assert_eq!(outcome.score, WIN_SCORE);
        assert!(outcome.nodes > 0);
    }

    #[test]
    fn test_tie_break_prefers_corner() {
        // Depth 0 scores every child by position alone from O's side:
        // each candidate's value is its own cell weight minus X's center.
        let board: Board = "... .X. ...".parse().unwrap();
        let outcome = SearchEngine::new(rule3(), Mark::O, 0).search(&board);
        assert_eq!(outcome.index, 0);
    }

    #[test]
    #[should_panic(expected = "no empty cell")]
    fn test_full_board_panics() {
        let board: Board = "XOX XOO OXX".parse().unwrap();
        choose_move(&board, rule3(), Mark::O, 2);
    }
}
