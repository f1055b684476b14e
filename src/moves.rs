use std::fmt::{Display, Write};

use crate::PuzzleError;

/// Direction the blank travels. Each direction is written as one
/// character in a move string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// (row, col) displacement of the blank.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Direction::Up => 'u',
            Direction::Down => 'd',
            Direction::Left => 'l',
            Direction::Right => 'r',
        }
    }

    /// The direction that takes the blank from `from` to the adjacent cell `to`.
    pub fn between(from: (usize, usize), to: (usize, usize)) -> Option<Direction> {
        let delta = (
            to.0 as isize - from.0 as isize,
            to.1 as isize - from.1 as isize,
        );
        Direction::ALL.into_iter().find(|d| d.offset() == delta)
    }

    /// Where the blank lands when moving from `(row, col)` on a
    /// `height` x `width` grid, or `None` if that would leave the grid.
    pub fn step(
        self,
        (row, col): (usize, usize),
        height: usize,
        width: usize,
    ) -> Option<(usize, usize)> {
        let (dr, dc) = self.offset();
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;
        (row < height && col < width).then_some((row, col))
    }
}

impl TryFrom<char> for Direction {
    type Error = PuzzleError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'u' => Ok(Direction::Up),
            'd' => Ok(Direction::Down),
            'l' => Ok(Direction::Left),
            'r' => Ok(Direction::Right),
            other => Err(PuzzleError::InvalidDirection(other)),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_char(self.as_char())
    }
}

pub fn parse_moves(moves: &str) -> Result<Vec<Direction>, PuzzleError> {
    moves.chars().map(Direction::try_from).collect()
}
