//! Strands: paths of cells given as a start position and a sequence of steps.

use crate::step::{NoSuchStep, ParseStepError, Pos, Step};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Failure to read a strand written as `ROW COL STEP...`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseStrandError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error("'{0}' is not a row or column number")]
    BadCoordinate(String),

    #[error(transparent)]
    Step(#[from] ParseStepError),
}

/// A start position followed by unit steps.
///
/// Equality compares `start` and `steps`, which is the same as comparing the
/// derived position sequences: each step is fixed by two consecutive positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Strand {
    start: Pos,
    steps: Vec<Step>,
}

impl Strand {
    #[must_use]
    pub fn new(start: Pos, steps: Vec<Step>) -> Self {
        Self { start, steps }
    }

    /// Build a strand through the given cells in order.
    ///
    /// Returns `Ok(None)` for an empty path.
    ///
    /// # Errors
    ///
    /// Returns [`NoSuchStep`] for the first pair of consecutive cells that are
    /// not adjacent.
    pub fn from_positions(path: &[Pos]) -> Result<Option<Self>, NoSuchStep> {
        let Some(&start) = path.first() else {
            return Ok(None);
        };
        let steps = path
            .windows(2)
            .map(|pair| pair[0].step_to(pair[1]))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(Self { start, steps }))
    }

    #[must_use]
    pub fn start(&self) -> Pos {
        self.start
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of cells covered, which is one more than the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len() + 1
    }

    /// Always false; a strand covers at least its start cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    #[must_use]
    pub fn end(&self) -> Pos {
        self.steps
            .iter()
            .fold(self.start, |pos, &step| pos.take_step(step))
    }

    /// Absolute positions on an unbounded grid, start first.
    #[must_use]
    pub fn positions(&self) -> Vec<Pos> {
        let mut positions = Vec::with_capacity(self.len());
        let mut current = self.start;
        positions.push(current);
        for &step in &self.steps {
            current = current.take_step(step);
            positions.push(current);
        }
        positions
    }

    /// True if any cell is visited more than once.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        let mut visited = HashSet::with_capacity(self.len());
        self.positions().into_iter().any(|pos| !visited.insert(pos))
    }

    /// True if two edges of the strand cross.
    ///
    /// On the 8-connected grid two unit edges cross exactly when their midpoints
    /// coincide. Midpoints are kept in doubled coordinates so they stay integral.
    /// Edges one index apart share a vertex and are never compared.
    #[must_use]
    pub fn is_folded(&self) -> bool {
        let midpoints: Vec<(i64, i64)> = self
            .positions()
            .windows(2)
            .map(|edge| {
                (
                    i64::from(edge[0].row) + i64::from(edge[1].row),
                    i64::from(edge[0].col) + i64::from(edge[1].col),
                )
            })
            .collect();

        midpoints.iter().enumerate().any(|(i, mid)| {
            midpoints
                .iter()
                .skip(i + 2)
                .any(|other| other == mid)
        })
    }
}

impl fmt::Display for Strand {
    /// Renders as `ROW COL STEP...` with a 1-indexed start, the puzzle file notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            i64::from(self.start.row) + 1,
            i64::from(self.start.col) + 1
        )?;
        for step in &self.steps {
            write!(f, " {step}")?;
        }
        Ok(())
    }
}

impl FromStr for Strand {
    type Err = ParseStrandError;

    /// Parse the `ROW COL STEP...` notation with a 1-indexed start. Tokens may
    /// be separated by any run of whitespace and steps are case-insensitive.
    /// Any `i32` coordinate is accepted; off-board starts are left for the
    /// board to reject.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let row = parse_coordinate(tokens.next().ok_or(ParseStrandError::Missing("row"))?)?;
        let col = parse_coordinate(tokens.next().ok_or(ParseStrandError::Missing("column"))?)?;
        let steps = tokens
            .map(str::parse::<Step>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(
            Pos::new(row.saturating_sub(1), col.saturating_sub(1)),
            steps,
        ))
    }
}

fn parse_coordinate(token: &str) -> Result<i32, ParseStrandError> {
    token
        .parse()
        .map_err(|_| ParseStrandError::BadCoordinate(token.to_string()))
}
