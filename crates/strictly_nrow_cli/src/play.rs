//! Line-based game loop.
//!
//! Reads one command per line. In setup phases a line answers the current
//! prompt; while playing it is a cell number. `back`, `reset` and `quit`
//! work everywhere.

use crate::config::CliConfig;
use anyhow::Result;
use std::io::{BufRead, Write};
use strictly_nrow::{
    BoardChoice, BoardSize, Difficulty, GameMode, GameSession, Mark, Phase, RulesTable,
    TerminalResult,
};
use tracing::{debug, info, instrument};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Quit,
    Back,
    Reset,
    Help,
    Answer(String),
}

impl Input {
    fn parse(line: &str) -> Option<Self> {
        let word = line.trim();
        if word.is_empty() {
            return None;
        }
        Some(match word.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Input::Quit,
            "b" | "back" => Input::Back,
            "r" | "reset" => Input::Reset,
            "h" | "?" | "help" => Input::Help,
            _ => Input::Answer(word.to_string()),
        })
    }
}

/// Parses a difficulty name or a board size.
pub fn parse_board_choice(text: &str) -> Option<BoardChoice> {
    text.parse::<Difficulty>()
        .map(BoardChoice::Difficulty)
        .or_else(|_| text.parse::<BoardSize>().map(BoardChoice::Size))
        .ok()
}

/// Drives a session from `input` until `quit` or end of input.
///
/// The session starts from `config`; `back` and `reset` reach the
/// interactive setup prompts.
#[instrument(skip_all, fields(mode = %config.mode()))]
pub fn run_play(
    config: &CliConfig,
    rules: RulesTable,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    let mut session = GameSession::start(
        rules,
        *config.mode(),
        config.board_choice(),
        Some(*config.mark()),
    )?;
    info!(choice = %config.board_choice(), "Game started");

    let mut line = String::new();
    loop {
        render(&session, &mut output)?;
        write!(output, "{} ", prompt(&session))?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("End of input");
            writeln!(output)?;
            break;
        }

        match Input::parse(&line) {
            None => {}
            Some(Input::Quit) => break,
            Some(Input::Back) => session.back(),
            Some(Input::Reset) => session.reset(),
            Some(Input::Help) => writeln!(output, "{}", HELP)?,
            Some(Input::Answer(answer)) => {
                if let Err(message) = answer_prompt(&mut session, &answer) {
                    writeln!(output, "{}", message)?;
                }
            }
        }
    }

    info!("Leaving game loop");
    Ok(())
}

const HELP: &str = "Commands: a cell number while playing, `back`, `reset`, `quit`";

fn prompt(session: &GameSession) -> String {
    match session.phase() {
        Phase::AwaitingMode => "Mode (human, automated):".to_string(),
        Phase::AwaitingBoard => match session.mode() {
            Some(GameMode::HumanVsAutomated) => {
                "Difficulty (easy, medium, hard, expert, extreme):".to_string()
            }
            _ => "Board (3x3, 4x4, 5x5, 6x6, or a difficulty):".to_string(),
        },
        Phase::AwaitingSymbol => "Your mark (X moves first):".to_string(),
        Phase::Playing => match session.current_turn() {
            Some(mark) => format!("{} to move, cell:", mark),
            None => "Cell:".to_string(),
        },
        Phase::Terminal => "`back` to play again, `reset` for a new setup:".to_string(),
    }
}

fn render(session: &GameSession, output: &mut impl Write) -> Result<()> {
    let Some(board) = session.board() else {
        return Ok(());
    };
    writeln!(output)?;
    writeln!(output, "{}", board.display())?;
    if let Some(result) = session.result() {
        match result {
            TerminalResult::InProgress => {}
            TerminalResult::Won { line, .. } => {
                let cells: Vec<String> = line.iter().map(ToString::to_string).collect();
                writeln!(output, "{} (cells {})", result, cells.join(", "))?;
            }
            TerminalResult::Draw => writeln!(output, "{}", result)?,
        }
    }
    Ok(())
}

/// Feeds one answer to the session, returning a message for the user on failure.
fn answer_prompt(session: &mut GameSession, answer: &str) -> Result<(), String> {
    match session.phase() {
        Phase::AwaitingMode => {
            let mode = answer
                .parse::<GameMode>()
                .map_err(|_| format!("Unknown mode {:?}", answer))?;
            session.select_mode(mode).map_err(|e| e.to_string())
        }
        Phase::AwaitingBoard => {
            let choice = parse_board_choice(answer)
                .ok_or_else(|| format!("Unknown board {:?}", answer))?;
            session.select_board(choice).map_err(|e| e.to_string())
        }
        Phase::AwaitingSymbol => {
            let mark = answer
                .parse::<Mark>()
                .map_err(|_| format!("Unknown mark {:?}", answer))?;
            session.select_symbol(mark).map_err(|e| e.to_string())
        }
        Phase::Playing | Phase::Terminal => {
            let index = answer
                .parse::<usize>()
                .map_err(|_| format!("Not a cell number: {:?}", answer))?;
            session
                .try_apply_move(index)
                .map(|report| debug!(?report, "Move accepted"))
                .map_err(|e| e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_parse() {
        assert_eq!(Input::parse("  QUIT\n"), Some(Input::Quit));
        assert_eq!(Input::parse("back"), Some(Input::Back));
        assert_eq!(Input::parse("4"), Some(Input::Answer("4".to_string())));
        assert_eq!(Input::parse("   "), None);
    }

    #[test]
    fn test_parse_board_choice() {
        assert_eq!(
            parse_board_choice("hard"),
            Some(BoardChoice::Difficulty(Difficulty::Hard))
        );
        assert_eq!(parse_board_choice("5x5"), Some(BoardChoice::Size(BoardSize::Five)));
        assert_eq!(parse_board_choice("7x7"), None);
    }
}
