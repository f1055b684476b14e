use std::fmt::Display;

use crate::Direction;

/// The partial-progress predicates the phase solvers chain together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    LowerRow,
    RowZero,
    RowOne,
}

impl Display for Invariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Invariant::LowerRow => "lower-row",
            Invariant::RowZero => "row-zero",
            Invariant::RowOne => "row-one",
        })
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("puzzle dimensions must be non-zero, got {height}x{width}")]
    EmptyDimensions { height: usize, width: usize },
    #[error("initial layout does not have the shape {height}x{width}")]
    Shape { height: usize, width: usize },
    #[error("labels are not a permutation of 0..{cells}")]
    NotPermutation { cells: usize },
    #[error("invalid tile label: {0:?}")]
    InvalidLabel(String),
    #[error("({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },
    #[error("invalid direction: {0:?}")]
    InvalidDirection(char),
    #[error("move off grid: {direction} with the blank at ({row}, {col})")]
    InvalidMove {
        direction: Direction,
        row: usize,
        col: usize,
    },
    #[error("tile {0} not found")]
    MissingTile(usize),
    #[error("({row}, {col}) is not a target for {phase}")]
    InvalidTarget {
        phase: &'static str,
        row: usize,
        col: usize,
    },
    #[error("{invariant} invariant does not hold at ({row}, {col})")]
    InvariantViolation {
        invariant: Invariant,
        row: usize,
        col: usize,
    },
    #[error("puzzle is not solvable")]
    Unsolvable,
    #[error("exhaustive search is limited to small grids, got {cells} cells")]
    TooLargeForSearch { cells: usize },
}
