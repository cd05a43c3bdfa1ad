//! Tests for the automated opponent's move choice.

use strictly_nrow::{
    cell_weight, choose_move, evaluate, Board, Mark, SearchEngine, TerminalResult, WinRule,
    WIN_SCORE,
};

/// Plays `moves` alternately from X onto an empty board, stopping before a terminal position.
fn position(rule: WinRule, moves: impl IntoIterator<Item = usize>) -> (Board, Mark) {
    let mut board = Board::new(rule.size());
    let mut to_move = Mark::X;
    for cell in moves {
        if !board.is_vacant(cell) {
            continue;
        }
        let mut next = board.clone();
        next.set(cell, Some(to_move)).unwrap();
        if evaluate(&next, &rule).is_terminal() {
            break;
        }
        board = next;
        to_move = to_move.opponent();
    }
    (board, to_move)
}

#[test]
fn test_search_returns_empty_cell() {
    let cases = [(3, 3, 3), (4, 3, 2), (4, 4, 2), (5, 4, 1), (6, 5, 1)];
    for (size, len, depth) in cases {
        let rule = WinRule::new(size, len).unwrap();
        let cells = size * size;
        for stride in [1, 5, 7] {
            for played in 0..cells {
                let order = (0..played).map(|k| (k * stride + played) % cells);
                let (board, to_move) = position(rule, order);
                let chosen = choose_move(&board, rule, to_move, depth);
                assert!(
                    board.is_vacant(chosen),
                    "{size}x{size} L{len} stride {stride}: chose {chosen} on\n{board}"
                );
            }
        }
    }
}

#[test]
fn test_center_opening_answered_with_corner() {
    let rule = WinRule::new(3, 3).unwrap();
    let board: Board = "... .X. ...".parse().unwrap();
    let chosen = choose_move(&board, rule, Mark::O, 3);
    assert!([0, 2, 6, 8].contains(&chosen), "chose {chosen}");
    assert_eq!(chosen, 0);
}

#[test]
fn test_completes_own_row() {
    let rule = WinRule::new(3, 3).unwrap();
    let board: Board = "XX. OO. ...".parse().unwrap();
    assert_eq!(choose_move(&board, rule, Mark::X, 3), 2);
}

#[test]
fn test_blocks_diagonal_threat() {
    let rule = WinRule::new(3, 3).unwrap();
    let board: Board = "X.. .X. O..".parse().unwrap();
    assert_eq!(choose_move(&board, rule, Mark::O, 2), 8);
}

#[test]
fn test_avoids_losing_moves_on_larger_board() {
    // X needs one more cell on the bottom row of a 4x4, four in a row.
    let rule = WinRule::new(4, 4).unwrap();
    let board: Board = "O... .O.. ..O. XXX.".parse().unwrap();
    let outcome = SearchEngine::new(rule, Mark::O, 2).search(&board);
    // 15 also completes O's diagonal.
    assert_eq!(outcome.index, 15);
    assert_eq!(outcome.score, WIN_SCORE);
}

#[test]
fn test_forced_block_scores_above_loss() {
    let rule = WinRule::new(4, 3).unwrap();
    let board: Board = "XX.. .... ..O. ....".parse().unwrap();
    let outcome = SearchEngine::new(rule, Mark::O, 2).search(&board);
    assert_eq!(outcome.index, 2);
    assert!(outcome.score > -WIN_SCORE);
}

#[test]
fn test_deeper_search_visits_more_nodes() {
    let rule = WinRule::new(4, 4).unwrap();
    let board = Board::new(4);
    let shallow = SearchEngine::new(rule, Mark::X, 1).search(&board);
    let deep = SearchEngine::new(rule, Mark::X, 2).search(&board);
    assert!(deep.nodes > shallow.nodes);
}

#[test]
fn test_equal_scores_prefer_heavier_cell() {
    // Depth 1 on an empty board scores each move by its own weight.
    let rule = WinRule::new(4, 4).unwrap();
    let board = Board::new(4);
    let outcome = SearchEngine::new(rule, Mark::X, 1).search(&board);
    assert_eq!(cell_weight(outcome.index, 4), 3);
    assert_eq!(outcome.index, 0);
}

#[test]
fn test_search_never_mutates_board() {
    let rule = WinRule::new(3, 3).unwrap();
    let board: Board = "X.. .O. ...".parse().unwrap();
    let before = board.clone();
    choose_move(&board, rule, Mark::X, 3);
    assert_eq!(board, before);
    assert_eq!(evaluate(&board, &rule), TerminalResult::InProgress);
}
