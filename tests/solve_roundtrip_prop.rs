//! Replay laws for the phase solver over generated layouts.

use fifteen_solver::{Direction, Puzzle, PuzzleError};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};

proptest! {
    #[test]
    fn replaying_the_solution_solves_the_original(
        seed in any::<u64>(),
        height in 2usize..=7,
        width in 2usize..=7,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let original = Puzzle::random(height, width, &mut rng).unwrap();

        let mut puzzle = original.clone();
        let moves = puzzle.solve_puzzle().unwrap();
        prop_assert!(puzzle.is_solved());

        let mut replay = original.clone();
        replay.update_puzzle(&moves).unwrap();
        prop_assert_eq!(replay, puzzle);
    }

    #[test]
    fn walks_from_solved_stay_solvable(
        steps in proptest::collection::vec(0usize..4, 0..200),
        height in 1usize..=5,
        width in 1usize..=5,
    ) {
        let mut puzzle = Puzzle::new(height, width, None).unwrap();
        for step in steps {
            match puzzle.apply(Direction::ALL[step]) {
                Ok(()) | Err(PuzzleError::InvalidMove { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error {}", other),
            }
        }
        prop_assert!(puzzle.is_solvable());

        let original = puzzle.clone();
        let moves = puzzle.solve_puzzle().unwrap();
        prop_assert!(puzzle.is_solved());

        let mut replay = original;
        replay.update_puzzle(&moves).unwrap();
        prop_assert!(replay.is_solved());
    }

    #[test]
    fn clones_never_share_state(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let original = Puzzle::random(4, 4, &mut rng).unwrap();
        let snapshot = original.to_string();

        let mut copy = original.clone();
        copy.solve_puzzle().unwrap();
        prop_assert_eq!(original.to_string(), snapshot);
    }
}
