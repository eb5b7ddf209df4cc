use docopt::Docopt;
use itertools::Itertools;
use rand::{self, SeedableRng, XorShiftRng};
use serde_derive::Deserialize;
use stepmaze::{
    cells::Cartesian2DCoordinate,
    generators::RecursiveBacktracker,
    maze::Maze,
    pathing::BfsSolver,
    units::{Height, Width},
};

const USAGE: &str = "Stepmaze

Carves a random perfect maze one wall at a time, then solves it one cell at
a time, and prints the result.

Usage:
    stepmaze_driver -h | --help
    stepmaze_driver [--grid-width=<w>] [--grid-height=<h>] [--entrance-x=<x> --entrance-y=<y>] [--exit-x=<x> --exit-y=<y>] [--seed=<n>] [--show-steps]

Options:
    -h --help          Show this screen.
    --grid-width=<w>   The grid width in cells [default: 20].
    --grid-height=<h>  The grid height in cells [default: 20].
    --entrance-x=<x>   x coordinate of the entrance cell [default: 0].
    --entrance-y=<y>   y coordinate of the entrance cell [default: 0].
    --exit-x=<x>       x coordinate of the exit cell. Bottom-right corner if omitted.
    --exit-y=<y>       y coordinate of the exit cell. Bottom-right corner if omitted.
    --seed=<n>         Fixed seed for a reproducible carving run.
    --show-steps       Print every carve, backtrack, visit and path event.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_entrance_x: u32,
    flag_entrance_y: u32,
    flag_exit_x: Option<u32>,
    flag_exit_y: Option<u32>,
    flag_seed: Option<u64>,
    flag_show_steps: bool,
}

mod errors {
    // Error, ErrorKind, ResultExt and Result for the driver, with `?`
    // conversions from the engine's errors and docopt's.
    use error_chain::*;
    error_chain! {
        links {
            Engine(::stepmaze::errors::Error, ::stepmaze::errors::ErrorKind);
        }
        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let entrance = Cartesian2DCoordinate::new(args.flag_entrance_x, args.flag_entrance_y);
    let exit = Cartesian2DCoordinate::new(
        args.flag_exit_x.unwrap_or((args.flag_grid_width as u32).saturating_sub(1)),
        args.flag_exit_y.unwrap_or((args.flag_grid_height as u32).saturating_sub(1)));

    let mut maze = Maze::new(Width(args.flag_grid_width),
                             Height(args.flag_grid_height),
                             entrance,
                             exit)?;

    // The driver owns the cadence: each loop turn advances the algorithm by
    // exactly one step, which is where a visualizer would repaint.
    let rng = match args.flag_seed {
        Some(seed) => {
            XorShiftRng::from_seed([(seed as u32) | 1,
                                    (seed >> 32) as u32,
                                    0x9e37_79b9,
                                    0x7f4a_7c15])
        }
        None => rand::weak_rng(),
    };
    for step in RecursiveBacktracker::new(&mut maze, rng) {
        if args.flag_show_steps {
            println!("{:?}", step);
        }
    }

    let mut solver = BfsSolver::new(&maze);
    while let Some(step) = solver.next() {
        let step = step?;
        if args.flag_show_steps {
            println!("{:?}", step);
        }
    }

    println!("{}", maze);
    let path = solver.path();
    println!("Shortest path, {} hops: {}",
             path.len() - 1,
             path.iter().map(|cell| format!("({},{})", cell.x, cell.y)).join(" -> "));

    Ok(())
}
