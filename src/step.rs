//! Grid directions and single-cell coordinate arithmetic.
//!
//! Positions are 0-indexed `(row, col)` pairs with the origin at the top-left
//! corner; rows grow downward and columns grow rightward.

use std::fmt;
use std::str::FromStr;

/// One of the eight directions on the 8-connected grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Step {
    pub const ALL: [Step; 8] = [
        Step::N,
        Step::S,
        Step::E,
        Step::W,
        Step::NE,
        Step::NW,
        Step::SE,
        Step::SW,
    ];

    /// Unit `(row, col)` offset of this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Step::N => (-1, 0),
            Step::S => (1, 0),
            Step::E => (0, 1),
            Step::W => (0, -1),
            Step::NE => (-1, 1),
            Step::NW => (-1, -1),
            Step::SE => (1, 1),
            Step::SW => (1, -1),
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Step::N => "n",
            Step::S => "s",
            Step::E => "e",
            Step::W => "w",
            Step::NE => "ne",
            Step::NW => "nw",
            Step::SE => "se",
            Step::SW => "sw",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A direction token that names none of the eight steps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown step '{0}' (expected one of n, s, e, w, ne, nw, se, sw)")]
pub struct ParseStepError(pub String);

impl FromStr for Step {
    type Err = ParseStepError;

    /// Parse a direction name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Step::ALL
            .into_iter()
            .find(|step| step.name() == lower)
            .ok_or_else(|| ParseStepError(s.to_string()))
    }
}

/// Two positions that are not unit-adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no single step leads from {from} to {to}")]
pub struct NoSuchStep {
    pub from: Pos,
    pub to: Pos,
}

/// A cell coordinate. Not tied to any board, so it may lie outside one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// The position one `step` away. Total: never checks any bounds.
    ///
    /// Coordinates saturate at the ends of the `i32` range, which lie far
    /// outside any board.
    #[must_use]
    pub const fn take_step(self, step: Step) -> Pos {
        let (dr, dc) = step.delta();
        Pos::new(self.row.saturating_add(dr), self.col.saturating_add(dc))
    }

    /// The unique step leading from `self` to `other`.
    ///
    /// # Errors
    ///
    /// Returns [`NoSuchStep`] when `other` is the same cell or lies two or more
    /// cells away in any direction.
    pub fn step_to(self, other: Pos) -> Result<Step, NoSuchStep> {
        let delta = (
            i64::from(other.row) - i64::from(self.row),
            i64::from(other.col) - i64::from(self.col),
        );
        Step::ALL
            .into_iter()
            .find(|step| {
                let (dr, dc) = step.delta();
                (i64::from(dr), i64::from(dc)) == delta
            })
            .ok_or(NoSuchStep {
                from: self,
                to: other,
            })
    }

    #[must_use]
    pub fn is_adjacent_to(self, other: Pos) -> bool {
        self.step_to(other).is_ok()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
