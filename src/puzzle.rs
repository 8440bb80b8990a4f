//! Puzzle files: a theme line, a letter board and the list of answer strands.
//!
//! ```text
//! A good roast
//!
//! G L P L K C
//! ...
//!
//! HOWL 8 6 w ne w
//! ...
//! ```
//!
//! Sections are separated by single blank lines. Answer lines are
//! `WORD ROW COL STEP...` with a 1-indexed start; anything after the blank line
//! that ends the answers is ignored.

use crate::board::{Board, BoardError};
use crate::step::Pos;
use crate::strand::{ParseStrandError, Strand};
use crate::{debug_log, info_log};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Everything that can make a puzzle file unusable.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleLoadError {
    #[error("malformed puzzle: {0}")]
    MalformedPuzzle(String),

    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),

    #[error("line {line}: answer '{word}' leaves the board")]
    OutOfBoundsAnswer { line: usize, word: String },

    #[error("line {line}: answer '{word}' spells '{spelled}' on the board")]
    SpellingMismatch {
        line: usize,
        word: String,
        spelled: String,
    },

    #[error("line {line}: answer '{word}' crosses itself")]
    FoldedAnswer { line: usize, word: String },

    #[error("line {line}: unknown step '{token}'")]
    UnknownStep { line: usize, token: String },

    #[error("failed to read puzzle: {0}")]
    Io(#[from] std::io::Error),
}

/// A theme word together with its strand on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub word: String,
    pub strand: Strand,
}

/// How the answer strands cover the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tiling {
    /// Cells no answer passes through, in row-major order.
    pub uncovered: Vec<Pos>,
    /// Cells more than one answer passes through, in row-major order.
    pub overlapping: Vec<Pos>,
}

impl Tiling {
    /// True when every cell belongs to exactly one answer.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.uncovered.is_empty() && self.overlapping.is_empty()
    }
}

/// A validated puzzle. Never changes once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    theme: String,
    board: Board,
    answers: Vec<Answer>,
}

impl Puzzle {
    /// Parse a puzzle from its lines. Trailing newline characters on each line
    /// are ignored, so the output of a `lines()` call and lines that still end
    /// in `\n` both work.
    ///
    /// # Errors
    ///
    /// Returns the first [`PuzzleLoadError`] found, checking the layout, then
    /// the board, then each answer in file order.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, PuzzleLoadError> {
        let lines: Vec<&str> = lines
            .iter()
            .map(|line| line.as_ref().trim_end_matches(['\n', '\r']))
            .collect();

        let theme_line = lines
            .first()
            .ok_or_else(|| malformed("puzzle is empty"))?;
        let theme = parse_theme(theme_line)?;

        match lines.get(1) {
            Some(line) if is_blank(line) => {}
            Some(_) => return Err(malformed("expected a blank line after the theme")),
            None => return Err(malformed("missing blank line after the theme")),
        }

        let board_start = 2;
        let board_end = block_end(&lines, board_start);
        if board_end == board_start {
            return Err(malformed("board has no rows"));
        }
        if board_end == lines.len() {
            return Err(malformed("missing blank line after the board"));
        }
        let board = Board::from_rows(&lines[board_start..board_end])?;

        let answers_start = board_end + 1;
        let answers_end = block_end(&lines, answers_start);
        if answers_end == answers_start {
            return Err(malformed("puzzle has no answers"));
        }

        let answers = lines[answers_start..answers_end]
            .iter()
            .enumerate()
            .map(|(offset, line)| parse_answer(answers_start + offset + 1, line, &board))
            .collect::<Result<Vec<_>, _>>()?;

        let puzzle = Self {
            theme,
            board,
            answers,
        };

        info_log!(
            "Loaded puzzle '{}': {}x{} board, {} answers",
            puzzle.theme,
            puzzle.board.num_rows(),
            puzzle.board.num_cols(),
            puzzle.answers.len()
        );
        let tiling = puzzle.tiling();
        if !tiling.is_exact() {
            log::warn!(
                "Puzzle '{}' does not tile its board: {} uncovered, {} overlapping cells",
                puzzle.theme,
                tiling.uncovered.len(),
                tiling.overlapping.len()
            );
        }

        Ok(puzzle)
    }

    /// # Errors
    ///
    /// Returns [`PuzzleLoadError::Io`] if the file cannot be read, or any
    /// error from [`Puzzle::from_lines`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PuzzleLoadError> {
        let path = path.as_ref();
        debug_log!("Reading puzzle from {}", path.display());
        fs::read_to_string(path)?.parse()
    }

    /// The theme, trimmed of whitespace and enclosing quotes.
    #[must_use]
    pub fn theme(&self) -> &str {
        &self.theme
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Answers in file order.
    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Report how the answers cover the board. Exact tiling is an authoring
    /// convention and is not checked when loading.
    #[must_use]
    pub fn tiling(&self) -> Tiling {
        let mut counts: HashMap<Pos, usize> = HashMap::new();
        for answer in &self.answers {
            for pos in answer.strand.positions() {
                *counts.entry(pos).or_insert(0) += 1;
            }
        }

        let mut tiling = Tiling::default();
        for pos in self.board.positions() {
            match counts.get(&pos).copied().unwrap_or(0) {
                0 => tiling.uncovered.push(pos),
                1 => {}
                _ => tiling.overlapping.push(pos),
            }
        }
        tiling
    }
}

impl FromStr for Puzzle {
    type Err = PuzzleLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        Self::from_lines(&lines)
    }
}

fn malformed(reason: &str) -> PuzzleLoadError {
    PuzzleLoadError::MalformedPuzzle(reason.to_string())
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Index of the first blank line at or after `start`, or `lines.len()`.
fn block_end(lines: &[&str], start: usize) -> usize {
    lines
        .iter()
        .skip(start)
        .position(|line| is_blank(line))
        .map_or(lines.len(), |offset| start + offset)
}

/// The theme line, without one pair of matching surrounding quotes.
fn parse_theme(line: &str) -> Result<String, PuzzleLoadError> {
    let mut theme = line.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = theme
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            theme = inner.trim();
            break;
        }
    }
    if theme.is_empty() {
        return Err(malformed("theme line is empty"));
    }
    Ok(theme.to_string())
}

/// Parse and validate one answer line; `line_no` is 1-indexed.
fn parse_answer(line_no: usize, line: &str, board: &Board) -> Result<Answer, PuzzleLoadError> {
    let Some((word, rest)) = line.trim().split_once(char::is_whitespace) else {
        return Err(PuzzleLoadError::MalformedPuzzle(format!(
            "line {line_no}: expected WORD ROW COL STEP..., found '{}'",
            line.trim()
        )));
    };
    let word = word.to_lowercase();

    let strand: Strand = rest.parse().map_err(|e| match e {
        ParseStrandError::Step(step) => PuzzleLoadError::UnknownStep {
            line: line_no,
            token: step.0,
        },
        other => PuzzleLoadError::MalformedPuzzle(format!("line {line_no}: {other}")),
    })?;
    if strand.steps().is_empty() {
        return Err(PuzzleLoadError::MalformedPuzzle(format!(
            "line {line_no}: answer '{word}' has no steps"
        )));
    }

    let spelled = board
        .evaluate_strand(&strand)
        .map_err(|_| PuzzleLoadError::OutOfBoundsAnswer {
            line: line_no,
            word: word.clone(),
        })?;
    if spelled != word {
        return Err(PuzzleLoadError::SpellingMismatch {
            line: line_no,
            word,
            spelled,
        });
    }
    if strand.is_folded() {
        return Err(PuzzleLoadError::FoldedAnswer {
            line: line_no,
            word,
        });
    }

    debug_log!("Answer '{}' at {}", word, strand);
    Ok(Answer { word, strand })
}
