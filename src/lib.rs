use std::{
    fmt::{Display, Write},
    ops::Index,
    ops::IndexMut,
};

use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};

mod error;
mod moves;
mod optimal;
mod solver;

pub use error::{Invariant, PuzzleError};
pub use moves::{parse_moves, Direction};
pub use optimal::MAX_SEARCH_CELLS;

/// A `height` x `width` sliding-tile puzzle. Label 0 is the blank; the
/// solved layout has label `col + width * row` at every cell, which puts
/// the blank in the top-left corner.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Puzzle {
    height: usize,
    width: usize,
    tiles: Vec<usize>,
}

impl Puzzle {
    /// Build a puzzle, solved unless an initial layout is given. The
    /// layout is copied, so the caller's rows are never shared.
    pub fn new(
        height: usize,
        width: usize,
        initial: Option<Vec<Vec<usize>>>,
    ) -> Result<Puzzle, PuzzleError> {
        if height == 0 || width == 0 {
            return Err(PuzzleError::EmptyDimensions { height, width });
        }

        let tiles = match initial {
            None => (0..height * width).collect(),
            Some(rows) => {
                if rows.len() != height || rows.iter().any(|row| row.len() != width) {
                    return Err(PuzzleError::Shape { height, width });
                }
                rows.into_iter().flatten().collect()
            }
        };

        let puzzle = Puzzle {
            height,
            width,
            tiles,
        };
        puzzle.validate()?;
        Ok(puzzle)
    }

    pub fn from_rows(rows: Vec<Vec<usize>>) -> Result<Puzzle, PuzzleError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        Puzzle::new(height, width, Some(rows))
    }

    /// A uniformly shuffled layout that can always be solved.
    pub fn random<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        rng: &mut R,
    ) -> Result<Puzzle, PuzzleError> {
        let mut puzzle = Puzzle::new(height, width, None)?;

        // only the blank's position varies on a strip
        if puzzle.is_strip() {
            let direction = if height == 1 {
                Direction::Right
            } else {
                Direction::Down
            };
            for _ in 0..rng.gen_range(0..height.max(width)) {
                puzzle.apply(direction)?;
            }
            return Ok(puzzle);
        }

        puzzle.tiles.shuffle(rng);
        if !puzzle.is_solvable() {
            // swapping two non-blank tiles flips the permutation parity
            let a = puzzle.index_of(1)?;
            let b = puzzle.index_of(2)?;
            puzzle.tiles.swap(a, b);
        }

        Ok(puzzle)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get_number(&self, row: usize, col: usize) -> Option<usize> {
        self.in_bounds(row, col).then(|| self[(row, col)])
    }

    /// Overwrite one cell. The permutation is not re-checked here; the
    /// solvers validate the whole grid before they start.
    pub fn set_number(&mut self, row: usize, col: usize, value: usize) -> Result<(), PuzzleError> {
        if !self.in_bounds(row, col) {
            return Err(PuzzleError::OutOfBounds { row, col });
        }
        self[(row, col)] = value;
        Ok(())
    }

    /// Current position of the tile that belongs at `(solved_row, solved_col)`.
    pub fn current_position(
        &self,
        solved_row: usize,
        solved_col: usize,
    ) -> Result<(usize, usize), PuzzleError> {
        self.locate(solved_col + self.width * solved_row)
    }

    pub fn blank_position(&self) -> Result<(usize, usize), PuzzleError> {
        self.current_position(0, 0)
    }

    /// Apply a move string token by token. A bad token aborts the rest of
    /// the string; moves before it stay applied.
    pub fn update_puzzle(&mut self, moves: &str) -> Result<(), PuzzleError> {
        let mut blank = self.blank_position()?;
        for c in moves.chars() {
            let direction = Direction::try_from(c)?;
            blank = self.slide(blank, direction)?;
        }
        Ok(())
    }

    pub fn apply(&mut self, direction: Direction) -> Result<(), PuzzleError> {
        let blank = self.blank_position()?;
        self.slide(blank, direction).map(|_| ())
    }

    pub fn is_solved(&self) -> bool {
        self.tiles.iter().enumerate().all(|(ix, &label)| ix == label)
    }

    /// Whether the solved layout is reachable from this one.
    ///
    /// Every move is a transposition with the blank and shifts the blank's
    /// taxicab distance from the origin by one, so on grids at least 2x2 the
    /// two parities must agree. On a strip the other tiles can never pass
    /// each other.
    pub fn is_solvable(&self) -> bool {
        if self.validate().is_err() {
            return false;
        }

        if self.is_strip() {
            return self
                .tiles
                .iter()
                .filter(|&&label| label != 0)
                .tuple_windows()
                .all(|(a, b)| a < b);
        }

        match self.blank_position() {
            Ok((row, col)) => self.permutation_parity() == (row + col) % 2,
            Err(_) => false,
        }
    }

    /// Check that the labels are a permutation of `0..height * width`.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        let cells = self.tiles.len();
        let mut seen = vec![false; cells];
        for &label in &self.tiles {
            match seen.get_mut(label) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(PuzzleError::NotPermutation { cells }),
            }
        }
        Ok(())
    }

    pub(crate) fn is_strip(&self) -> bool {
        self.height == 1 || self.width == 1
    }

    pub(crate) fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Move the blank at `blank` one step, returning where it ends up.
    pub(crate) fn slide(
        &mut self,
        blank: (usize, usize),
        direction: Direction,
    ) -> Result<(usize, usize), PuzzleError> {
        let next = direction
            .step(blank, self.height, self.width)
            .ok_or(PuzzleError::InvalidMove {
                direction,
                row: blank.0,
                col: blank.1,
            })?;

        let from = blank.0 * self.width + blank.1;
        let to = next.0 * self.width + next.1;
        self.tiles.swap(from, to);
        Ok(next)
    }

    pub(crate) fn locate(&self, label: usize) -> Result<(usize, usize), PuzzleError> {
        self.index_of(label)
            .map(|ix| (ix / self.width, ix % self.width))
    }

    fn index_of(&self, label: usize) -> Result<usize, PuzzleError> {
        self.tiles
            .iter()
            .position(|&t| t == label)
            .ok_or(PuzzleError::MissingTile(label))
    }

    // parity of the permutation taking each cell to the cell its tile belongs at
    fn permutation_parity(&self) -> usize {
        let cells = self.tiles.len();
        let mut seen = vec![false; cells];
        let mut cycles = 0;
        for start in 0..cells {
            if seen[start] {
                continue;
            }

            cycles += 1;
            let mut ix = start;
            while !seen[ix] {
                seen[ix] = true;
                ix = self.tiles[ix];
            }
        }

        (cells - cycles) % 2
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for row in self.tiles.chunks(self.width) {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            write!(f, "[{}]", row.iter().join(", "))?;
        }

        Ok(())
    }
}

impl Index<(usize, usize)> for Puzzle {
    type Output = usize;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.tiles[index.0 * self.width + index.1]
    }
}

impl IndexMut<(usize, usize)> for Puzzle {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut Self::Output {
        &mut self.tiles[index.0 * self.width + index.1]
    }
}

/// Parse rows separated by newlines or `/`, labels separated by
/// whitespace or commas. Brackets are ignored, so the `Display` output
/// parses back.
pub fn parse_puzzle(p: &str) -> Result<Puzzle, PuzzleError> {
    let rows: Vec<Vec<usize>> = p
        .trim()
        .split(|c: char| c == '\n' || c == '/')
        .map(|row| row.trim())
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.split(|c: char| c.is_whitespace() || matches!(c, ',' | '[' | ']'))
                .filter(|label| !label.is_empty())
                .map(|label| {
                    label
                        .parse::<usize>()
                        .map_err(|_| PuzzleError::InvalidLabel(label.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<_, _>>()?;

    Puzzle::from_rows(rows)
}

#[cfg(test)]
mod test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn default_layout_is_solved() {
        let puzzle = Puzzle::new(3, 4, None).unwrap();
        assert!(puzzle.is_solved());
        assert_eq!(puzzle.get_number(2, 3), Some(11));
        assert_eq!(puzzle.get_number(1, 0), Some(4));
        assert_eq!(puzzle.get_number(3, 0), None);
    }

    #[test]
    fn rejects_bad_layouts() {
        assert_eq!(
            Puzzle::new(0, 3, None),
            Err(PuzzleError::EmptyDimensions {
                height: 0,
                width: 3
            })
        );
        assert_eq!(
            Puzzle::new(2, 2, Some(vec![vec![0, 1], vec![2]])),
            Err(PuzzleError::Shape {
                height: 2,
                width: 2
            })
        );
        assert_eq!(
            Puzzle::new(2, 2, Some(vec![vec![0, 1], vec![1, 3]])),
            Err(PuzzleError::NotPermutation { cells: 4 })
        );
        assert_eq!(
            Puzzle::new(2, 2, Some(vec![vec![0, 1], vec![2, 4]])),
            Err(PuzzleError::NotPermutation { cells: 4 })
        );
    }

    #[test]
    fn clone_is_independent() {
        let original = Puzzle::new(3, 3, None).unwrap();
        let mut copy = original.clone();
        copy.update_puzzle("rd").unwrap();
        copy.set_number(2, 2, 0).unwrap();

        assert!(original.is_solved());
        assert_ne!(original, copy);
    }

    #[test]
    fn display_is_row_per_line() {
        let puzzle = Puzzle::from_rows(vec![vec![3, 1, 2], vec![4, 0, 5]]).unwrap();
        assert_eq!(puzzle.to_string(), "[3, 1, 2]\n[4, 0, 5]");
        assert_eq!(parse_puzzle(&puzzle.to_string()), Ok(puzzle));
    }

    #[test]
    fn parses_slash_and_newline_rows() {
        let a = parse_puzzle("3 1 2 / 4 0 5 / 6 7 8").unwrap();
        let b = parse_puzzle(
            "
3,1,2
4,0,5
6,7,8
",
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.current_position(1, 0), Ok((0, 0)));
        assert_eq!(
            parse_puzzle("0 1 / 2 x"),
            Err(PuzzleError::InvalidLabel("x".to_string()))
        );
    }

    #[test]
    fn current_position_finds_tiles() {
        let puzzle = parse_puzzle("3 2 1/4 0 5/6 7 8").unwrap();
        assert_eq!(puzzle.current_position(0, 0), Ok((1, 1)));
        assert_eq!(puzzle.current_position(0, 1), Ok((0, 2)));
        assert_eq!(puzzle.current_position(1, 0), Ok((0, 0)));
        assert_eq!(puzzle.current_position(2, 2), Ok((2, 2)));
    }

    #[test]
    fn update_moves_the_blank() {
        let mut puzzle = Puzzle::new(3, 3, None).unwrap();
        puzzle.update_puzzle("rdlu").unwrap();
        assert_eq!(puzzle.to_string(), "[0, 4, 2]\n[1, 3, 5]\n[6, 7, 8]");

        puzzle.update_puzzle("rdlu").unwrap();
        puzzle.update_puzzle("rdlu").unwrap();
        assert!(puzzle.is_solved());
    }

    #[test]
    fn off_grid_move_fails_without_rollback() {
        let mut puzzle = Puzzle::new(2, 3, None).unwrap();
        assert_eq!(
            puzzle.update_puzzle("u"),
            Err(PuzzleError::InvalidMove {
                direction: Direction::Up,
                row: 0,
                col: 0
            })
        );

        assert_eq!(
            puzzle.update_puzzle("rrr"),
            Err(PuzzleError::InvalidMove {
                direction: Direction::Right,
                row: 0,
                col: 2
            })
        );
        assert_eq!(puzzle.blank_position(), Ok((0, 2)));

        assert_eq!(
            puzzle.update_puzzle("dq"),
            Err(PuzzleError::InvalidDirection('q'))
        );
        assert_eq!(puzzle.blank_position(), Ok((1, 2)));
    }

    #[test]
    fn set_number_is_bounds_checked() {
        let mut puzzle = Puzzle::new(2, 2, None).unwrap();
        assert_eq!(
            puzzle.set_number(2, 0, 1),
            Err(PuzzleError::OutOfBounds { row: 2, col: 0 })
        );
        puzzle.set_number(0, 1, 3).unwrap();
        assert_eq!(puzzle[(0, 1)], 3);
        assert_eq!(
            puzzle.validate(),
            Err(PuzzleError::NotPermutation { cells: 4 })
        );
        assert!(!puzzle.is_solvable());
    }

    #[test]
    fn solvability_follows_parity() {
        assert!(parse_puzzle("3 1 2/4 0 5/6 7 8").unwrap().is_solvable());
        assert!(!parse_puzzle("3 2 1/4 0 5/6 7 8").unwrap().is_solvable());
        assert!(parse_puzzle("1 0/2 3").unwrap().is_solvable());
        assert!(!parse_puzzle("0 2/1 3").unwrap().is_solvable());

        assert!(parse_puzzle("1 2 0 3").unwrap().is_solvable());
        assert!(!parse_puzzle("2 1 0 3").unwrap().is_solvable());
    }

    #[test]
    fn random_layouts_are_solvable() {
        let mut rng = StdRng::seed_from_u64(7);
        for (height, width) in [(2, 2), (3, 3), (4, 4), (3, 5), (1, 6), (5, 1)] {
            for _ in 0..20 {
                let puzzle = Puzzle::random(height, width, &mut rng).unwrap();
                assert!(puzzle.validate().is_ok());
                assert!(puzzle.is_solvable());
            }
        }
    }
}
