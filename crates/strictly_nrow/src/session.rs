//! Game session state machine.
//!
//! A front end walks the session through its setup steps and then feeds it
//! cell indices:
//!
//! ```text
//! AwaitingMode -> AwaitingBoard -> AwaitingSymbol (automated only) -> Playing -> Terminal
//! ```
//!
//! Against the automated opponent its reply is searched and applied inside
//! the same [`GameSession::apply_move`] call, so callers only ever observe
//! positions where the human has the move or the game is over.

use crate::action::{Move, MoveRejection, SetupError};
use crate::config::{BoardChoice, Difficulty, RulesTable, WinRule};
use crate::contracts::{LegalMove, Precondition};
use crate::rules::{self, TerminalResult};
use crate::search::SearchEngine;
use crate::types::{Board, Mark};
use derive_getters::Getters;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who the human is playing against.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(ascii_case_insensitive)]
pub enum GameMode {
    /// Two humans share the board.
    #[strum(to_string = "human-vs-human", serialize = "human", serialize = "hvh")]
    HumanVsHuman,
    /// A human plays the search engine.
    #[strum(
        to_string = "human-vs-automated",
        serialize = "automated",
        serialize = "computer",
        serialize = "hva"
    )]
    HumanVsAutomated,
}

/// The opposing side of a running game.
///
/// Carries what the turn logic needs to decide whether to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Opponent {
    /// Another human moves for the other mark.
    Human,
    /// The search engine moves for `mark`.
    Automated {
        /// The engine's mark.
        mark: Mark,
        /// Plies searched per reply.
        depth: u8,
    },
}

/// Where the session is in its lifecycle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Phase {
    /// Waiting for a game mode.
    #[strum(to_string = "awaiting a game mode")]
    AwaitingMode,
    /// Waiting for a board size or difficulty.
    #[strum(to_string = "awaiting a board")]
    AwaitingBoard,
    /// Waiting for the human's mark (automated games only).
    #[strum(to_string = "awaiting a symbol")]
    AwaitingSymbol,
    /// Moves are accepted.
    #[strum(to_string = "playing")]
    Playing,
    /// Won or drawn.
    #[strum(to_string = "finished")]
    Terminal,
}

/// Board, rule, turn and result of a running game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StoredState")]
pub struct SessionState {
    board: Board,
    rule: WinRule,
    opponent: Opponent,
    current_turn: Mark,
    result: TerminalResult,
}

/// Why a stored [`SessionState`] was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SnapshotError {
    /// The board side differs from the rule's.
    #[display("{}x{} board stored with a {}x{} rule", board, board, rule, rule)]
    SizeMismatch {
        /// Stored board side.
        board: usize,
        /// Stored rule side.
        rule: usize,
    },
    /// The stored result is not what the board evaluates to.
    #[display("Stored result {:?} does not match the board ({:?})", stored, actual)]
    StaleResult {
        /// Result found in the snapshot.
        stored: TerminalResult,
        /// Result of evaluating the stored board.
        actual: TerminalResult,
    },
}

impl std::error::Error for SnapshotError {}

/// Unchecked serialized form of a [`SessionState`].
#[derive(Deserialize)]
struct StoredState {
    board: Board,
    rule: WinRule,
    opponent: Opponent,
    current_turn: Mark,
    result: TerminalResult,
}

impl TryFrom<StoredState> for SessionState {
    type Error = SnapshotError;

    fn try_from(stored: StoredState) -> Result<Self, Self::Error> {
        if stored.board.size() != stored.rule.size() {
            return Err(SnapshotError::SizeMismatch {
                board: stored.board.size(),
                rule: stored.rule.size(),
            });
        }
        let actual = rules::evaluate(&stored.board, &stored.rule);
        if actual != stored.result {
            return Err(SnapshotError::StaleResult {
                stored: stored.result,
                actual,
            });
        }
        Ok(Self {
            board: stored.board,
            rule: stored.rule,
            opponent: stored.opponent,
            current_turn: stored.current_turn,
            result: stored.result,
        })
    }
}

impl SessionState {
    /// Creates a game on an empty board with X to move.
    pub fn new(rule: WinRule, opponent: Opponent) -> Self {
        Self {
            board: Board::new(rule.size()),
            rule,
            opponent,
            current_turn: Mark::X,
            result: TerminalResult::InProgress,
        }
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board size and win length.
    pub fn rule(&self) -> WinRule {
        self.rule
    }

    /// The opposing side.
    pub fn opponent(&self) -> Opponent {
        self.opponent
    }

    /// Mark to move next (the last mover's, once the game is over).
    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    /// Terminal status, with the winning line when won.
    pub fn result(&self) -> &TerminalResult {
        &self.result
    }

    /// Game mode derived from the opponent.
    pub fn mode(&self) -> GameMode {
        match self.opponent {
            Opponent::Human => GameMode::HumanVsHuman,
            Opponent::Automated { .. } => GameMode::HumanVsAutomated,
        }
    }

    /// The engine's mark in automated games.
    pub fn automated_mark(&self) -> Option<Mark> {
        match self.opponent {
            Opponent::Human => None,
            Opponent::Automated { mark, .. } => Some(mark),
        }
    }

    /// Mark a move request from the front end plays.
    ///
    /// In human-vs-human games that is whoever has the turn; against the
    /// engine it is always the human's mark.
    pub fn requester(&self) -> Mark {
        match self.opponent {
            Opponent::Human => self.current_turn,
            Opponent::Automated { mark, .. } => mark.opponent(),
        }
    }

    /// Whether a front-end request for `index` would be accepted.
    pub fn is_playable(&self, index: usize) -> bool {
        LegalMove::check(self, &Move::new(self.requester(), index)).is_ok()
    }

    /// Places a legal move, re-evaluates, and passes the turn if the game goes on.
    pub(crate) fn place(&mut self, mov: Move) {
        debug_assert_eq!(mov.mark, self.current_turn, "move out of turn");
        self.board.put(mov.index, mov.mark);
        self.result = rules::evaluate(&self.board, &self.rule);
        if !self.result.is_terminal() {
            self.current_turn = self.current_turn.opponent();
        }
    }
}

/// What one accepted move request did.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct MoveReport {
    /// The requester's move.
    human: Move,
    /// The engine's reply, if it had the next turn.
    reply: Option<Move>,
    /// Terminal status after both moves.
    result: TerminalResult,
}

/// Setup selections and the running game, one variant per lifecycle step.
#[derive(Debug, Clone)]
enum Stage {
    AwaitingMode,
    AwaitingBoard {
        mode: GameMode,
    },
    AwaitingSymbol {
        difficulty: Difficulty,
        board: Board,
    },
    Active {
        choice: BoardChoice,
        state: SessionState,
    },
}

/// Single-owner session driving one game at a time.
#[derive(Debug, Clone)]
pub struct GameSession {
    rules: RulesTable,
    stage: Stage,
}

impl GameSession {
    /// Creates a session waiting for a game mode.
    #[instrument(skip(rules))]
    pub fn new(rules: RulesTable) -> Self {
        info!("Creating new game session");
        Self {
            rules,
            stage: Stage::AwaitingMode,
        }
    }

    /// Runs every setup step at once and returns a session ready to play.
    ///
    /// `human_mark` is required against the engine and ignored otherwise.
    #[instrument(skip(rules))]
    pub fn start(
        rules: RulesTable,
        mode: GameMode,
        choice: BoardChoice,
        human_mark: Option<Mark>,
    ) -> Result<Self, SetupError> {
        let mut session = Self::new(rules);
        session.select_mode(mode)?;
        session.select_board(choice)?;
        if session.phase() == Phase::AwaitingSymbol {
            let mark = human_mark.ok_or(SetupError::SymbolRequired)?;
            session.select_symbol(mark)?;
        } else if human_mark.is_some() {
            debug!("Ignoring symbol choice outside automated mode");
        }
        Ok(session)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        match &self.stage {
            Stage::AwaitingMode => Phase::AwaitingMode,
            Stage::AwaitingBoard { .. } => Phase::AwaitingBoard,
            Stage::AwaitingSymbol { .. } => Phase::AwaitingSymbol,
            Stage::Active { state, .. } if state.result().is_terminal() => Phase::Terminal,
            Stage::Active { .. } => Phase::Playing,
        }
    }

    /// The tables this session was built with.
    pub fn rules(&self) -> &RulesTable {
        &self.rules
    }

    /// Selected game mode, once chosen.
    pub fn mode(&self) -> Option<GameMode> {
        match &self.stage {
            Stage::AwaitingMode => None,
            Stage::AwaitingBoard { mode } => Some(*mode),
            Stage::AwaitingSymbol { .. } => Some(GameMode::HumanVsAutomated),
            Stage::Active { state, .. } => Some(state.mode()),
        }
    }

    /// Selected board size or difficulty, once chosen.
    pub fn choice(&self) -> Option<BoardChoice> {
        match &self.stage {
            Stage::AwaitingMode | Stage::AwaitingBoard { .. } => None,
            Stage::AwaitingSymbol { difficulty, .. } => Some(BoardChoice::Difficulty(*difficulty)),
            Stage::Active { choice, .. } => Some(*choice),
        }
    }

    /// The board, from the moment a size or difficulty is chosen.
    pub fn board(&self) -> Option<&Board> {
        match &self.stage {
            Stage::AwaitingSymbol { board, .. } => Some(board),
            Stage::Active { state, .. } => Some(state.board()),
            _ => None,
        }
    }

    /// The running game, in `Playing` and `Terminal`.
    pub fn state(&self) -> Option<&SessionState> {
        match &self.stage {
            Stage::Active { state, .. } => Some(state),
            _ => None,
        }
    }

    /// Mark to move, in `Playing` and `Terminal`.
    pub fn current_turn(&self) -> Option<Mark> {
        self.state().map(SessionState::current_turn)
    }

    /// Terminal status, in `Playing` and `Terminal`.
    pub fn result(&self) -> Option<&TerminalResult> {
        self.state().map(SessionState::result)
    }

    /// Whether the front end should let the user click `index`.
    pub fn is_playable(&self, index: usize) -> bool {
        self.state().is_some_and(|state| state.is_playable(index))
    }

    /// Chooses human-vs-human or human-vs-automated.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn select_mode(&mut self, mode: GameMode) -> Result<(), SetupError> {
        let Stage::AwaitingMode = self.stage else {
            return Err(self.wrong_phase("select a game mode"));
        };
        info!(%mode, "Mode selected");
        self.stage = Stage::AwaitingBoard { mode };
        Ok(())
    }

    /// Chooses the board, building an empty one of the matching size.
    ///
    /// Automated games need a difficulty tier, which also fixes the search
    /// depth; a bare size is rejected.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn select_board(&mut self, choice: BoardChoice) -> Result<(), SetupError> {
        let Stage::AwaitingBoard { mode } = self.stage else {
            return Err(self.wrong_phase("select a board"));
        };
        let rule = self.rules.rule_for(choice);

        self.stage = match (mode, choice) {
            (GameMode::HumanVsHuman, _) => Stage::Active {
                choice,
                state: SessionState::new(rule, Opponent::Human),
            },
            (GameMode::HumanVsAutomated, BoardChoice::Difficulty(difficulty)) => {
                Stage::AwaitingSymbol {
                    difficulty,
                    board: Board::new(rule.size()),
                }
            }
            (GameMode::HumanVsAutomated, BoardChoice::Size(size)) => {
                warn!(%size, "Automated game needs a difficulty");
                return Err(SetupError::DifficultyRequired(size));
            }
        };

        info!(
            %choice,
            size = rule.size(),
            win_length = rule.win_length(),
            "Board selected"
        );
        Ok(())
    }

    /// Chooses the human's mark; the engine takes the other one.
    ///
    /// X moves first, so an engine playing X opens immediately.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn select_symbol(&mut self, human: Mark) -> Result<(), SetupError> {
        let Stage::AwaitingSymbol { difficulty, .. } = self.stage else {
            return Err(self.wrong_phase("select a symbol"));
        };
        let profile = self.rules.profile(difficulty);
        let opponent = Opponent::Automated {
            mark: human.opponent(),
            depth: profile.search_depth,
        };

        let mut state = SessionState::new(profile.rule, opponent);
        play_automated_turn(&mut state);

        info!(%human, %difficulty, "Symbol selected, game started");
        self.stage = Stage::Active {
            choice: BoardChoice::Difficulty(difficulty),
            state,
        };
        Ok(())
    }

    /// Applies a move request, then the engine's reply if it has the turn.
    ///
    /// Requests for an out-of-range or occupied cell, out of turn, or after
    /// the game ended are ignored and the state is returned unchanged.
    ///
    /// # Panics
    ///
    /// Panics if called before setup is complete.
    pub fn apply_move(&mut self, index: usize) -> &SessionState {
        if let Err(rejection) = self.try_apply_move(index) {
            debug!(index, %rejection, "Move request ignored");
        }
        match &self.stage {
            Stage::Active { state, .. } => state,
            _ => unreachable!("try_apply_move panics outside an active game"),
        }
    }

    /// Like [`apply_move`](Self::apply_move), but reports why a request was ignored.
    ///
    /// # Panics
    ///
    /// Panics if called before setup is complete.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn try_apply_move(&mut self, index: usize) -> Result<MoveReport, MoveRejection> {
        let phase = self.phase();
        let Stage::Active { state, .. } = &mut self.stage else {
            panic!("apply_move called while {phase}");
        };

        let human = Move::new(state.requester(), index);
        LegalMove::check(state, &human)?;
        state.place(human);
        info!(%human, result = %state.result(), "Move applied");

        let reply = play_automated_turn(state);

        Ok(MoveReport {
            human,
            reply,
            result: state.result().clone(),
        })
    }

    /// Drops every selection and returns to mode selection.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn reset(&mut self) {
        info!("Session reset");
        self.stage = Stage::AwaitingMode;
    }

    /// Steps back one screen.
    ///
    /// A finished game restarts on a cleared board with the same settings.
    /// Otherwise the last selection is undone: symbol, then board, then mode.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn back(&mut self) {
        self.stage = match std::mem::replace(&mut self.stage, Stage::AwaitingMode) {
            Stage::AwaitingMode | Stage::AwaitingBoard { .. } => Stage::AwaitingMode,
            Stage::AwaitingSymbol { .. } => Stage::AwaitingBoard {
                mode: GameMode::HumanVsAutomated,
            },
            Stage::Active { choice, state } if state.result().is_terminal() => {
                let mut fresh = SessionState::new(state.rule(), state.opponent());
                play_automated_turn(&mut fresh);
                Stage::Active {
                    choice,
                    state: fresh,
                }
            }
            Stage::Active { choice, state } => match (state.opponent(), choice) {
                (Opponent::Automated { .. }, BoardChoice::Difficulty(difficulty)) => {
                    Stage::AwaitingSymbol {
                        difficulty,
                        board: Board::new(state.rule().size()),
                    }
                }
                _ => Stage::AwaitingBoard { mode: state.mode() },
            },
        };
        info!(phase = %self.phase(), "Stepped back");
    }

    fn wrong_phase(&self, step: &'static str) -> SetupError {
        let phase = self.phase();
        warn!(step, %phase, "Setup step out of order");
        SetupError::WrongPhase { step, phase }
    }
}

/// Searches and plays the engine's move if it has the turn in a running game.
fn play_automated_turn(state: &mut SessionState) -> Option<Move> {
    let Opponent::Automated { mark, depth } = state.opponent() else {
        return None;
    };
    if state.result().is_terminal() || state.current_turn() != mark {
        return None;
    }

    let outcome = SearchEngine::new(state.rule(), mark, depth).search(state.board());
    let reply = Move::new(mark, outcome.index);
    state.place(reply);

    info!(
        %reply,
        score = outcome.score,
        nodes = outcome.nodes,
        result = %state.result(),
        "Automated reply applied"
    );
    Some(reply)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardSize;

    fn hvh(size: BoardSize) -> GameSession {
        GameSession::start(
            RulesTable::default(),
            GameMode::HumanVsHuman,
            BoardChoice::Size(size),
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_human_turns_alternate() {
        let mut session = hvh(BoardSize::Three);
        assert_eq!(session.current_turn(), Some(Mark::X));
        session.apply_move(4);
        assert_eq!(session.current_turn(), Some(Mark::O));
        assert_eq!(session.board().unwrap().get(4), Some(Mark::X));
    }

    #[test]
    fn test_terminal_keeps_last_mover() {
        let mut session = hvh(BoardSize::Three);
        for index in [0, 3, 1, 4, 2] {
            session.apply_move(index);
        }
        assert_eq!(session.phase(), Phase::Terminal);
        assert_eq!(session.current_turn(), Some(Mark::X));
        assert_eq!(session.result().unwrap().winning_line(), &[0, 1, 2]);
    }

    #[test]
    fn test_try_apply_move_reports_reason() {
        let mut session = hvh(BoardSize::Four);
        session.apply_move(5);
        assert_eq!(session.try_apply_move(5), Err(MoveRejection::CellOccupied(5)));
        assert_eq!(
            session.try_apply_move(16),
            Err(MoveRejection::OutOfRange { index: 16, len: 16 })
        );
    }

    #[test]
    fn test_wrong_phase_setup() {
        let mut session = GameSession::new(RulesTable::default());
        assert_eq!(
            session.select_symbol(Mark::X),
            Err(SetupError::WrongPhase {
                step: "select a symbol",
                phase: Phase::AwaitingMode
            })
        );
    }

    #[test]
    #[should_panic(expected = "apply_move called while awaiting a game mode")]
    fn test_apply_move_during_setup_panics() {
        let mut session = GameSession::new(RulesTable::default());
        session.apply_move(0);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("automated".parse::<GameMode>().unwrap(), GameMode::HumanVsAutomated);
        assert_eq!("HvH".parse::<GameMode>().unwrap(), GameMode::HumanVsHuman);
        assert_eq!(GameMode::HumanVsHuman.to_string(), "human-vs-human");
    }
}
