//! Phase-by-phase solver.
//!
//! Rows are fixed from the bottom up and right to left, one tile at a time,
//! until only the top two rows remain. Those are fixed a column at a time
//! from the right, and the last 2x2 block is rotated into place. Each step
//! checks the invariant it starts from and the one it leaves behind.

use auto_enums::auto_enum;

use crate::{Invariant, Puzzle, PuzzleError};

// blank at (r - 1, 0), tile for (r, 0) at (r - 1, 1)
const COL0_ROTATION: &str = "ruldrdlurdluurddlur";
// blank at (1, c - 2), tile for (0, c) at (1, c - 1)
const ROW0_ROTATION: &str = "urdlurrdluldrruld";
const CORNER_ROTATION: &str = "rdlu";

/// Cells that must already hold their solved tile for `invariant` to hold
/// with the blank at `(row, col)`.
#[auto_enum(Iterator)]
fn fixed_cells(
    invariant: Invariant,
    row: usize,
    col: usize,
    height: usize,
    width: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let below_strip = (2 * width..height * width).map(move |ix| (ix / width, ix % width));
    match invariant {
        // everything after the blank in row-major order
        Invariant::LowerRow => {
            (row * width + col + 1..height * width).map(move |ix| (ix / width, ix % width))
        }
        Invariant::RowZero => below_strip
            .chain((col..width).map(|c| (1, c)))
            .chain((col + 1..width).map(|c| (0, c))),
        Invariant::RowOne => below_strip
            .chain((col + 1..width).map(|c| (1, c)))
            .chain((col + 1..width).map(|c| (0, c))),
    }
}

impl Puzzle {
    /// The blank is at `(target_row, target_col)`, every row below it is
    /// solved, and so is the rest of its own row to the right.
    pub fn lower_row_invariant(&self, target_row: usize, target_col: usize) -> bool {
        self.holds(Invariant::LowerRow, target_row, target_col)
    }

    /// The blank is at `(0, target_col)`, rows from 2 down are solved,
    /// row 1 is solved from `target_col` rightward and row 0 right of it.
    pub fn row0_invariant(&self, target_col: usize) -> bool {
        self.height >= 2 && self.holds(Invariant::RowZero, 0, target_col)
    }

    /// The blank is at `(1, target_col)`, rows from 2 down are solved and
    /// both top rows are solved right of `target_col`.
    pub fn row1_invariant(&self, target_col: usize) -> bool {
        self.height >= 2 && self.holds(Invariant::RowOne, 1, target_col)
    }

    /// Place the tile for `(target_row, target_col)`, leaving the blank to
    /// its left. Needs the lower-row invariant at the target.
    pub fn solve_interior_tile(
        &mut self,
        target_row: usize,
        target_col: usize,
    ) -> Result<String, PuzzleError> {
        self.check_target(
            "interior tiles",
            target_row >= 2 && target_col >= 1,
            target_row,
            target_col,
        )?;
        self.require(Invariant::LowerRow, target_row, target_col)?;

        let mut moves = String::new();
        let label = target_col + self.width * target_row;
        self.position_tile(target_row, target_col, label, &mut moves)?;

        self.require(Invariant::LowerRow, target_row, target_col - 1)?;
        Ok(moves)
    }

    /// Place the tile for `(target_row, 0)` and park the blank at the end of
    /// the row above.
    pub fn solve_col0_tile(&mut self, target_row: usize) -> Result<String, PuzzleError> {
        self.check_target("column zero", target_row >= 2, target_row, 0)?;
        self.require(Invariant::LowerRow, target_row, 0)?;

        let mut moves = String::new();
        let label = self.width * target_row;
        self.play(&mut moves, "u", 1)?;
        if self[(target_row, 0)] == label {
            self.play(&mut moves, "r", self.width - 1)?;
        } else {
            self.play(&mut moves, "r", 1)?;
            self.position_tile(target_row - 1, 1, label, &mut moves)?;
            self.play(&mut moves, COL0_ROTATION, 1)?;
            self.play(&mut moves, "r", self.width - 2)?;
        }

        self.require(Invariant::LowerRow, target_row - 1, self.width - 1)?;
        Ok(moves)
    }

    /// Place the tile for `(1, target_col)`, moving the blank above it.
    pub fn solve_row1_tile(&mut self, target_col: usize) -> Result<String, PuzzleError> {
        self.check_target("row one", target_col >= 2, 1, target_col)?;
        self.require(Invariant::RowOne, 1, target_col)?;

        let mut moves = String::new();
        self.position_tile(1, target_col, self.width + target_col, &mut moves)?;
        self.play(&mut moves, "ur", 1)?;

        self.require(Invariant::RowZero, 0, target_col)?;
        Ok(moves)
    }

    /// Place the tile for `(0, target_col)`, moving the blank one column
    /// left into row 1.
    pub fn solve_row0_tile(&mut self, target_col: usize) -> Result<String, PuzzleError> {
        self.check_target("row zero", target_col >= 2, 0, target_col)?;
        self.require(Invariant::RowZero, 0, target_col)?;

        let mut moves = String::new();
        self.play(&mut moves, "ld", 1)?;
        if self[(0, target_col)] != target_col {
            self.position_tile(1, target_col - 1, target_col, &mut moves)?;
            self.play(&mut moves, ROW0_ROTATION, 1)?;
        }

        self.require(Invariant::RowOne, 1, target_col - 1)?;
        Ok(moves)
    }

    /// Finish the top-left 2x2 block. With one blank only three
    /// arrangements of the block are reachable, so a few turns of the same
    /// rotation either solve it or prove it unsolvable.
    pub fn solve_2x2(&mut self) -> Result<String, PuzzleError> {
        self.check_target("the 2x2 corner", true, 1, 1)?;
        self.require(Invariant::RowOne, 1, 1)?;

        let mut moves = String::new();
        self.play(&mut moves, "lu", 1)?;

        let mut turns = 0;
        while !self.is_solved() {
            if turns == 3 {
                return Err(PuzzleError::Unsolvable);
            }
            self.play(&mut moves, CORNER_ROTATION, 1)?;
            turns += 1;
        }

        Ok(moves)
    }

    /// Solve the whole puzzle in place and return the moves used. Replaying
    /// them on the starting layout gives the solved layout.
    pub fn solve_puzzle(&mut self) -> Result<String, PuzzleError> {
        self.validate()?;
        if self.is_solved() {
            return Ok(String::new());
        }
        if !self.is_solvable() {
            return Err(PuzzleError::Unsolvable);
        }

        let mut moves = String::new();
        let (row, col) = self.blank_position()?;

        if self.is_strip() {
            let toward_origin = if self.height == 1 { "l" } else { "u" };
            self.play(&mut moves, toward_origin, row + col)?;
            return Ok(moves);
        }

        self.play(&mut moves, "r", self.width - 1 - col)?;
        self.play(&mut moves, "d", self.height - 1 - row)?;

        for target_row in (2..self.height).rev() {
            for target_col in (1..self.width).rev() {
                moves += &self.solve_interior_tile(target_row, target_col)?;
            }
            moves += &self.solve_col0_tile(target_row)?;
        }

        for target_col in (2..self.width).rev() {
            moves += &self.solve_row1_tile(target_col)?;
            moves += &self.solve_row0_tile(target_col)?;
        }

        moves += &self.solve_2x2()?;
        Ok(moves)
    }

    /// Bring the tile labelled `label` to `(target_row, target_col)`, where
    /// the blank currently is, and leave the blank on its left.
    ///
    /// The tile is either in a row above the target or in the target row
    /// itself. Every loop goes round the tile on the side away from the
    /// solved cells: above it when possible, below it only in row 0.
    fn position_tile(
        &mut self,
        target_row: usize,
        target_col: usize,
        label: usize,
        moves: &mut String,
    ) -> Result<(), PuzzleError> {
        let (row, col) = self.locate(label)?;
        let rise = target_row - row;
        self.play(moves, "u", rise)?;

        if col == target_col {
            // the blank went straight through the tile and sits above it
            self.play(moves, "lddru", rise - 1)?;
            return self.play(moves, "ld", 1);
        }

        if col < target_col {
            self.play(moves, "l", target_col - col)?;
            let around = if row > 0 { "urrdl" } else { "drrul" };
            self.play(moves, around, target_col - col - 1)?;
            if row == target_row {
                return Ok(());
            }

            self.play(moves, "dru", 1)?;
            self.play(moves, "lddru", rise - 1)?;
        } else {
            self.play(moves, "r", col - target_col)?;
            let around = if row > 0 { "ulldr" } else { "dllur" };
            self.play(moves, around, col - target_col - 1)?;
            if row == target_row {
                return self.play(moves, "ulld", 1);
            }

            if row > 0 {
                self.play(moves, "ul", 1)?;
                self.play(moves, "lddru", rise)?;
            } else {
                self.play(moves, "dlu", 1)?;
                self.play(moves, "lddru", rise - 1)?;
            }
        }

        self.play(moves, "ld", 1)
    }

    // apply `pattern` `times` times, logging it as it goes
    fn play(&mut self, moves: &mut String, pattern: &str, times: usize) -> Result<(), PuzzleError> {
        for _ in 0..times {
            self.update_puzzle(pattern)?;
            moves.push_str(pattern);
        }
        Ok(())
    }

    fn holds(&self, invariant: Invariant, row: usize, col: usize) -> bool {
        self.in_bounds(row, col)
            && self[(row, col)] == 0
            && fixed_cells(invariant, row, col, self.height, self.width)
                .all(|(r, c)| self[(r, c)] == c + self.width * r)
    }

    fn require(&self, invariant: Invariant, row: usize, col: usize) -> Result<(), PuzzleError> {
        if self.holds(invariant, row, col) {
            Ok(())
        } else {
            Err(PuzzleError::InvariantViolation {
                invariant,
                row,
                col,
            })
        }
    }

    fn check_target(
        &self,
        phase: &'static str,
        in_phase: bool,
        row: usize,
        col: usize,
    ) -> Result<(), PuzzleError> {
        if in_phase && !self.is_strip() && self.in_bounds(row, col) {
            Ok(())
        } else {
            Err(PuzzleError::InvalidTarget { phase, row, col })
        }
    }
}
