//! The immutable letter grid of a puzzle.

use crate::step::Pos;
use crate::strand::Strand;
use std::fmt;

/// Reasons a grid of letters cannot form a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board has no rows")]
    Empty,

    #[error("board row {row} is empty")]
    EmptyRow { row: usize },

    #[error("board row {row} has {found} letters, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("board cell ({row}, {col}) is '{cell}', not a single letter")]
    NotALetter { row: usize, col: usize, cell: char },
}

/// A position outside the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("position {pos} is outside the {rows}x{cols} board")]
pub struct OutOfBounds {
    pub pos: Pos,
    pub rows: usize,
    pub cols: usize,
}

/// Rectangular grid of lowercase letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    letters: Vec<Vec<char>>,
}

impl Board {
    /// Validate and store a grid, folding every letter to lowercase.
    ///
    /// # Errors
    ///
    /// Returns a [`BoardError`] if the grid is empty, ragged, or holds a
    /// non-alphabetic cell.
    pub fn new(letters: Vec<Vec<char>>) -> Result<Self, BoardError> {
        let expected = letters.first().ok_or(BoardError::Empty)?.len();

        let mut rows = Vec::with_capacity(letters.len());
        for (row, cells) in letters.into_iter().enumerate() {
            if cells.is_empty() {
                return Err(BoardError::EmptyRow { row });
            }
            if cells.len() != expected {
                return Err(BoardError::Ragged {
                    row,
                    expected,
                    found: cells.len(),
                });
            }
            let lowered = cells
                .into_iter()
                .enumerate()
                .map(|(col, cell)| fold_letter(cell).ok_or(BoardError::NotALetter { row, col, cell }))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(lowered);
        }

        Ok(Self { letters: rows })
    }

    /// Build a board from text rows; whitespace inside a row is ignored, so
    /// `"G L P"` and `"glp"` describe the same row.
    ///
    /// # Errors
    ///
    /// Same as [`Board::new`].
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let letters = rows
            .iter()
            .map(|row| row.as_ref().chars().filter(|c| !c.is_whitespace()).collect())
            .collect();
        Self::new(letters)
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.letters.len()
    }

    #[must_use]
    pub fn num_cols(&self) -> usize {
        self.letters[0].len()
    }

    #[must_use]
    pub fn contains(&self, pos: Pos) -> bool {
        self.index(pos).is_some()
    }

    /// Rows of the board, top first.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        self.letters.iter().map(Vec::as_slice)
    }

    /// Every position on the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let cols = self.num_cols();
        (0..self.num_rows()).flat_map(move |row| {
            (0..cols).map(move |col| Pos::new(to_coord(row), to_coord(col)))
        })
    }

    /// Every cell with its letter, in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, char)> + '_ {
        self.positions().zip(self.letters.iter().flatten().copied())
    }

    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `pos` lies outside the board.
    pub fn get_letter(&self, pos: Pos) -> Result<char, OutOfBounds> {
        self.index(pos)
            .map(|(row, col)| self.letters[row][col])
            .ok_or(OutOfBounds {
                pos,
                rows: self.num_rows(),
                cols: self.num_cols(),
            })
    }

    /// The word spelled by the strand's cells, in order.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] for the first position outside the board.
    pub fn evaluate_strand(&self, strand: &Strand) -> Result<String, OutOfBounds> {
        strand
            .positions()
            .into_iter()
            .map(|pos| self.get_letter(pos))
            .collect()
    }

    fn index(&self, pos: Pos) -> Option<(usize, usize)> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        (row < self.num_rows() && col < self.num_cols()).then_some((row, col))
    }
}

impl fmt::Display for Board {
    /// Space-separated uppercase rows, as in a puzzle file.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.letters {
            let line: Vec<String> = row.iter().map(|c| c.to_uppercase().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Lowercase `cell` if it is a letter whose lowercase form is a single char.
fn fold_letter(cell: char) -> Option<char> {
    if !cell.is_alphabetic() {
        return None;
    }
    let mut lower = cell.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn to_coord(index: usize) -> i32 {
    index as i32
}
