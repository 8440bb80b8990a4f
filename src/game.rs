//! Play state for one puzzle: theme-word submission and the hint meter.

use crate::board::{Board, OutOfBounds};
use crate::dictionary::Dictionary;
use crate::puzzle::{Answer, Puzzle, PuzzleLoadError};
use crate::strand::Strand;
use crate::{debug_log, info_log};
use std::collections::HashSet;
use std::path::Path;

pub const DEFAULT_HINT_THRESHOLD: u32 = 3;

/// Submissions spelling fewer letters than this are rejected outright.
pub const MIN_STRAND_LENGTH: usize = 4;

/// Result of [`Game::submit_strand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    TooShort,
    /// The same theme path, or the same non-theme word, was credited before.
    AlreadyFound,
    ThemeWordFound(String),
    NonThemeWordFound(String),
    InvalidWord,
}

/// The answer a hint currently points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveHint {
    /// Index into the puzzle's answers.
    pub index: usize,
    /// Whether the answer's endpoints should be shown.
    pub revealed: bool,
}

/// Result of [`Game::use_hint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintOutcome {
    /// The meter is below the threshold.
    NoHintYet,
    /// A new answer is targeted; `revealed` is false.
    NewHint(ActiveHint),
    /// The active hint moved to its second stage; `revealed` is true.
    HintAlreadyRevealed(ActiveHint),
    /// The active hint is fully revealed already.
    AlreadyUsingCurrent,
    /// Every answer's start cell is covered by a found strand.
    NothingToHint,
}

/// A puzzle being played, borrowing a shared dictionary.
pub struct Game<'d> {
    puzzle: Puzzle,
    dictionary: &'d dyn Dictionary,
    hint_threshold: u32,
    found: Vec<Strand>,
    hint_meter: u32,
    active_hint: Option<ActiveHint>,
    attempted_non_theme: HashSet<String>,
}

impl<'d> Game<'d> {
    #[must_use]
    pub fn new(puzzle: Puzzle, dictionary: &'d dyn Dictionary, hint_threshold: u32) -> Self {
        Self {
            puzzle,
            dictionary,
            hint_threshold,
            found: Vec::new(),
            hint_meter: 0,
            active_hint: None,
            attempted_non_theme: HashSet::new(),
        }
    }

    /// Load a puzzle file and start a game on it.
    ///
    /// # Errors
    ///
    /// Returns any [`PuzzleLoadError`] from reading or validating the file.
    pub fn load<P: AsRef<Path>>(
        path: P,
        dictionary: &'d dyn Dictionary,
        hint_threshold: u32,
    ) -> Result<Self, PuzzleLoadError> {
        Ok(Self::new(
            Puzzle::from_file(path)?,
            dictionary,
            hint_threshold,
        ))
    }

    #[must_use]
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    #[must_use]
    pub fn theme(&self) -> &str {
        self.puzzle.theme()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.puzzle.board()
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        self.puzzle.answers()
    }

    /// Theme strands found so far, in discovery order.
    #[must_use]
    pub fn found_strands(&self) -> &[Strand] {
        &self.found
    }

    #[must_use]
    pub fn hint_meter(&self) -> u32 {
        self.hint_meter
    }

    #[must_use]
    pub fn hint_threshold(&self) -> u32 {
        self.hint_threshold
    }

    #[must_use]
    pub fn active_hint(&self) -> Option<ActiveHint> {
        self.active_hint
    }

    #[must_use]
    pub fn game_over(&self) -> bool {
        self.found.len() == self.answers().len()
    }

    /// Play a strand.
    ///
    /// Theme words are matched by path: the strand must trace exactly the cells
    /// of a recorded answer. Any other strand spelling a dictionary word feeds
    /// the hint meter once per distinct word.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if the strand leaves the board; the play state
    /// is left untouched.
    pub fn submit_strand(&mut self, strand: &Strand) -> Result<SubmitOutcome, OutOfBounds> {
        if strand.len() < MIN_STRAND_LENGTH {
            debug_log!("Rejecting {}-cell strand as too short", strand.len());
            return Ok(SubmitOutcome::TooShort);
        }

        let spelled = self.board().evaluate_strand(strand)?;

        let theme_match = self
            .answers()
            .iter()
            .position(|answer| answer.strand == *strand);
        if let Some(index) = theme_match {
            if self.found.contains(strand) {
                return Ok(SubmitOutcome::AlreadyFound);
            }
            self.found.push(strand.clone());
            if self.active_hint.is_some_and(|hint| hint.index == index) {
                self.active_hint = None;
            }
            let word = self.answers()[index].word.clone();
            info_log!(
                "Theme word '{}' found ({}/{})",
                word,
                self.found.len(),
                self.answers().len()
            );
            return Ok(SubmitOutcome::ThemeWordFound(word));
        }

        if self.dictionary.is_word(&spelled) {
            if !self.attempted_non_theme.insert(spelled.clone()) {
                return Ok(SubmitOutcome::AlreadyFound);
            }
            self.hint_meter += 1;
            debug_log!("Non-theme word '{}', hint meter {}", spelled, self.hint_meter);
            return Ok(SubmitOutcome::NonThemeWordFound(spelled));
        }

        debug_log!("'{}' is not in the word list", spelled);
        Ok(SubmitOutcome::InvalidWord)
    }

    /// Spend the hint meter.
    ///
    /// The first hint targets the first answer whose start cell is not the start
    /// of any found strand. Asking again reveals that answer's endpoints at no
    /// cost; after that the hint stays as it is until its answer is found.
    pub fn use_hint(&mut self) -> HintOutcome {
        if self.hint_meter < self.hint_threshold {
            return HintOutcome::NoHintYet;
        }

        match self.active_hint {
            None => {
                let target = self.answers().iter().position(|answer| {
                    let start = answer.strand.start();
                    !self.found.iter().any(|found| found.start() == start)
                });
                let Some(index) = target else {
                    return HintOutcome::NothingToHint;
                };
                self.hint_meter -= self.hint_threshold;
                let hint = ActiveHint {
                    index,
                    revealed: false,
                };
                self.active_hint = Some(hint);
                info_log!("Hint targets answer {}", index);
                HintOutcome::NewHint(hint)
            }
            Some(ActiveHint {
                index,
                revealed: false,
            }) => {
                let hint = ActiveHint {
                    index,
                    revealed: true,
                };
                self.active_hint = Some(hint);
                HintOutcome::HintAlreadyRevealed(hint)
            }
            Some(ActiveHint { revealed: true, .. }) => HintOutcome::AlreadyUsingCurrent,
        }
    }
}
