use itertools::{iproduct, Itertools};
use pathfinding::directed::astar::astar;
use smallvec::SmallVec;

use crate::{Direction, Puzzle, PuzzleError};

/// Largest grid (in cells) the exhaustive search will take on.
pub const MAX_SEARCH_CELLS: usize = 12;

impl Puzzle {
    /// A shortest move string that solves the puzzle, without changing it.
    pub fn optimal_solution(&self) -> Result<String, PuzzleError> {
        self.validate()?;

        let cells = self.height * self.width;
        if cells > MAX_SEARCH_CELLS {
            return Err(PuzzleError::TooLargeForSearch { cells });
        }
        if !self.is_solvable() {
            return Err(PuzzleError::Unsolvable);
        }

        let (path, _) = astar(
            self,
            successors,
            manhattan_distance,
            Puzzle::is_solved,
        )
        .ok_or(PuzzleError::Unsolvable)?;

        let blanks = path
            .iter()
            .map(Puzzle::blank_position)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(blanks
            .into_iter()
            .tuple_windows()
            .filter_map(|(from, to)| Direction::between(from, to))
            .map(Direction::as_char)
            .collect())
    }
}

fn successors(puzzle: &Puzzle) -> SmallVec<[(Puzzle, usize); 4]> {
    let mut out = SmallVec::new();
    if let Ok(blank) = puzzle.blank_position() {
        for direction in Direction::ALL {
            let mut next = puzzle.clone();
            if next.slide(blank, direction).is_ok() {
                out.push((next, 1));
            }
        }
    }

    out
}

// every tile other than the blank needs at least this many moves to get home
fn manhattan_distance(puzzle: &Puzzle) -> usize {
    iproduct!(0..puzzle.height, 0..puzzle.width)
        .map(|(row, col)| (row, col, puzzle[(row, col)]))
        .filter(|&(_, _, label)| label != 0)
        .map(|(row, col, label)| {
            row.abs_diff(label / puzzle.width) + col.abs_diff(label % puzzle.width)
        })
        .sum()
}
