use crate::cells::{Cartesian2DCoordinate, DIRECTIONS};
use crate::maze::Maze;

use rand::{self, Rng, XorShiftRng};

/// One step of the carving process, as observed by a driver.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GenerationStep {
    /// A wall pair between two adjacent cells was just removed and the
    /// depth-first walk moved on to `to`.
    Carve {
        from: Cartesian2DCoordinate,
        to: Cartesian2DCoordinate,
    },
    /// Every neighbour of `cell` was already visited, so the walk retreated
    /// one cell along its path.
    Backtrack(Cartesian2DCoordinate),
}

/// Randomized iterative depth-first carving of a perfect maze, one wall at a
/// time.
///
/// The generator is an `Iterator` over [`GenerationStep`] events: a driver
/// advances the algorithm exactly one carve or backtrack per `next` call and
/// may render the maze between calls. The sequence is finite - it ends when
/// the walk has retreated all the way out of the entrance - and once
/// exhausted it stays exhausted. It cannot be restarted; carve a fresh
/// `Maze` with a fresh generator instead.
///
/// Randomness is injected by the caller so that carving is reproducible
/// under test; it is used only to shuffle the neighbour scan order.
pub struct RecursiveBacktracker<'a, R: Rng> {
    maze: &'a mut Maze,
    rng: R,
    stack: Vec<Cartesian2DCoordinate>,
}

impl<'a, R: Rng> RecursiveBacktracker<'a, R> {
    /// A generator positioned at the maze's entrance, carving with the given
    /// randomness source.
    pub fn new(maze: &'a mut Maze, rng: R) -> RecursiveBacktracker<'a, R> {
        let entrance = maze.entrance();
        maze.mark_visited(entrance);
        RecursiveBacktracker {
            maze,
            rng,
            stack: vec![entrance],
        }
    }

    /// Has the carving walk retreated out of the entrance?
    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }
}

impl<'a> RecursiveBacktracker<'a, XorShiftRng> {
    /// A generator using the process-wide weak rng, for callers that do not
    /// care about reproducibility.
    pub fn with_default_rng(maze: &'a mut Maze) -> RecursiveBacktracker<'a, XorShiftRng> {
        RecursiveBacktracker::new(maze, rand::weak_rng())
    }
}

impl<'a, R: Rng> Iterator for RecursiveBacktracker<'a, R> {
    type Item = GenerationStep;

    fn next(&mut self) -> Option<GenerationStep> {
        let current = *self.stack.last()?;

        let mut directions = DIRECTIONS;
        self.rng.shuffle(&mut directions);

        for dir in &directions {
            if let Some(neighbour) = self.maze.neighbour_at_direction(current, *dir) {
                if !self.maze.is_visited(neighbour) {
                    self.maze
                        .connect(current, neighbour)
                        .expect("scanned neighbour is adjacent by construction");
                    self.maze.mark_visited(neighbour);
                    self.stack.push(neighbour);
                    return Some(GenerationStep::Carve {
                        from: current,
                        to: neighbour,
                    });
                }
            }
        }

        // All around is visited or out of bounds: retreat.
        self.stack.pop();
        Some(GenerationStep::Backtrack(current))
    }
}

/// Drain a whole carving run in one call, for callers that have no use for
/// the intermediate steps.
pub fn recursive_backtracker<R: Rng>(maze: &mut Maze, rng: R) {
    for _ in RecursiveBacktracker::new(maze, rng) {}
}
