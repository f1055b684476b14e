use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use fifteen_solver::{parse_puzzle, Puzzle};

const REVERSED_4X4: &str = "
15 14 13 12
11 10  9  8
 7  6  5  4
 3  2  1  0
";

const SMALL_3X3: &str = "
8 7 6
5 4 3
2 1 0
";

fn criterion_bench(c: &mut Criterion) {
    c.bench_function("reversed 4x4", |b| {
        let input = parse_puzzle(REVERSED_4X4).unwrap();
        b.iter_batched(
            || input.clone(),
            |mut puzzle| puzzle.solve_puzzle(),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("random 8x8", |b| {
        let mut rng = StdRng::seed_from_u64(8);
        b.iter_batched(
            || Puzzle::random(8, 8, &mut rng).unwrap(),
            |mut puzzle| puzzle.solve_puzzle(),
            BatchSize::SmallInput,
        )
    });

    c.bench_function("optimal 3x3", |b| {
        let input = parse_puzzle(SMALL_3X3).unwrap();
        b.iter(|| black_box(&input).optimal_solution())
    });
}

criterion_group!(benches, criterion_bench);
criterion_main!(benches);
