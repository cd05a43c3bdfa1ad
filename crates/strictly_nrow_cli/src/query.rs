//! One-shot commands: move suggestion and the rules tables.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::io::Write;
use strictly_nrow::{
    evaluate, Board, BoardChoice, BoardSize, Difficulty, Mark, RulesTable, SearchEngine,
    SearchOutcome,
};
use tracing::{info, instrument};

/// What `suggest` prints.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    /// Mark the move is for.
    pub mark: Mark,
    /// Board side.
    pub size: usize,
    /// Win length.
    pub win_length: usize,
    /// Plies searched.
    pub depth: u8,
    /// Search result.
    #[serde(flatten)]
    pub outcome: SearchOutcome,
}

/// Searches the position described by `board_text` for `mark`.
///
/// The win rule comes from `choice`; the depth from `depth` or else the
/// difficulty tier.
#[instrument(skip(rules))]
pub fn suggest(
    rules: &RulesTable,
    board_text: &str,
    choice: BoardChoice,
    mark: Mark,
    depth: Option<u8>,
) -> Result<Suggestion> {
    let board: Board = board_text
        .parse()
        .with_context(|| format!("Invalid board {:?}", board_text))?;
    let rule = rules.rule_for(choice);
    if board.size() != rule.size() {
        bail!(
            "{0}x{0} board does not match {1} ({2}x{2})",
            board.size(),
            choice,
            rule.size()
        );
    }

    let result = evaluate(&board, &rule);
    if result.is_terminal() {
        bail!("Position is already decided: {}", result);
    }

    let depth = depth
        .or_else(|| rules.depth_for(choice))
        .context("--depth is required with --size")?;
    let outcome = SearchEngine::new(rule, mark, depth).search(&board);
    info!(index = outcome.index, score = outcome.score, "Suggestion ready");

    Ok(Suggestion {
        mark,
        size: rule.size(),
        win_length: rule.win_length(),
        depth,
        outcome,
    })
}

/// Runs `suggest` and prints the result.
pub fn run_suggest(
    rules: &RulesTable,
    board_text: &str,
    choice: BoardChoice,
    mark: Mark,
    depth: Option<u8>,
    json: bool,
    mut output: impl Write,
) -> Result<()> {
    let suggestion = suggest(rules, board_text, choice, mark, depth)?;
    if json {
        writeln!(output, "{}", serde_json::to_string_pretty(&suggestion)?)?;
    } else {
        writeln!(
            output,
            "{} plays {} (score {}, {} positions at depth {})",
            suggestion.mark,
            suggestion.outcome.index,
            suggestion.outcome.score,
            suggestion.outcome.nodes,
            suggestion.depth
        )?;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct DifficultyRow {
    difficulty: Difficulty,
    size: usize,
    win_length: usize,
    depth: u8,
}

#[derive(Debug, Serialize)]
struct SizeRow {
    board: BoardSize,
    win_length: usize,
}

#[derive(Debug, Serialize)]
struct RulesReport {
    difficulties: Vec<DifficultyRow>,
    sizes: Vec<SizeRow>,
}

impl From<&RulesTable> for RulesReport {
    fn from(rules: &RulesTable) -> Self {
        Self {
            difficulties: rules
                .profiles()
                .map(|(difficulty, profile)| DifficultyRow {
                    difficulty,
                    size: profile.rule.size(),
                    win_length: profile.rule.win_length(),
                    depth: profile.search_depth,
                })
                .collect(),
            sizes: rules
                .size_rules()
                .map(|(board, rule)| SizeRow {
                    board,
                    win_length: rule.win_length(),
                })
                .collect(),
        }
    }
}

/// Prints the difficulty and size tables.
pub fn run_rules(rules: &RulesTable, json: bool, mut output: impl Write) -> Result<()> {
    let report = RulesReport::from(rules);
    if json {
        writeln!(output, "{}", serde_json::to_string_pretty(&report)?)?;
        return Ok(());
    }

    writeln!(output, "{:<10} {:>5} {:>4} {:>5}", "difficulty", "board", "win", "depth")?;
    for row in &report.difficulties {
        writeln!(
            output,
            "{:<10} {:>5} {:>4} {:>5}",
            row.difficulty.to_string(),
            format!("{0}x{0}", row.size),
            row.win_length,
            row.depth
        )?;
    }
    writeln!(output)?;
    writeln!(output, "{:<10} {:>4}", "board", "win")?;
    for row in &report.sizes {
        writeln!(output, "{:<10} {:>4}", row.board.to_string(), row.win_length)?;
    }
    Ok(())
}
