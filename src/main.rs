use clap::Parser;
use fifteen_solver::{parse_puzzle, Puzzle, MAX_SEARCH_CELLS};
use rand::{rngs::StdRng, SeedableRng};

// Grids are written row by row, rows separated by '/' or newlines:
// "3 1 2/4 0 5/6 7 8". Label 0 is the blank and the solved layout puts
// it in the top-left corner. Moves name the direction the blank travels
// (u, d, l, r).
#[derive(Debug, Parser)]
#[command(
    name = "fifteen-solver",
    about = "Solve sliding-tile puzzles one row and column at a time"
)]
struct Args {
    /// Starting layout; a random solvable layout is used when omitted
    #[arg(short, long)]
    grid: Option<String>,

    /// Height of the random layout
    #[arg(long, default_value_t = 4)]
    height: usize,

    /// Width of the random layout
    #[arg(long, default_value_t = 4)]
    width: usize,

    /// Seed for the random layout
    #[arg(short, long)]
    seed: Option<u64>,

    /// Also search for a shortest solution (small grids only)
    #[arg(long)]
    optimal: bool,

    /// Print the grid after every move
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let source = match &args.grid {
        Some(grid) => parse_puzzle(grid)?,
        None => {
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            Puzzle::random(args.height, args.width, &mut rng)?
        }
    };

    println!("----");
    println!("Source:");
    println!("{}", source);
    println!("----");

    let mut puzzle = source.clone();
    let moves = puzzle.solve_puzzle()?;

    let mut replay = source.clone();
    replay.update_puzzle(&moves)?;
    if !replay.is_solved() {
        anyhow::bail!("move string {:?} does not solve the puzzle", moves);
    }

    println!("Found a solution in {} moves:", moves.len());
    println!("{}", moves);
    println!("----");

    if args.verbose {
        let mut step = source.clone();
        for c in moves.chars() {
            step.update_puzzle(&c.to_string())?;
            println!("{}\n{}\n", c, step);
        }
        println!("----");
    }

    if args.optimal {
        let cells = source.height() * source.width();
        if cells > MAX_SEARCH_CELLS {
            anyhow::bail!(
                "shortest-solution search supports at most {} cells, got {}",
                MAX_SEARCH_CELLS,
                cells
            );
        }

        let shortest = source.optimal_solution()?;
        println!("Shortest solution has {} moves:", shortest.len());
        println!("{}", shortest);
        println!("----");
    }

    println!();
    Ok(())
}
