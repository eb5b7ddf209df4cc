use crate::cells::{Cartesian2DCoordinate, DIRECTIONS};
use crate::errors::*;
use crate::maze::Maze;
use crate::utils;
use crate::utils::FnvHashMap;

use std::collections::VecDeque;

/// One step of the solving process, as observed by a driver.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum SolveStep {
    /// The breadth-first search expanded this cell.
    Visit(Cartesian2DCoordinate),
    /// The cell is part of the reconstructed entrance-to-exit path. All
    /// `Path` events follow all `Visit` events, in path order.
    Path(Cartesian2DCoordinate),
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
enum Phase {
    Visiting,
    Tracing,
    Done,
}

/// Breadth-first shortest-path search over a fully carved maze, one cell per
/// step.
///
/// The solver is an `Iterator` over [`SolveStep`] results: first a `Visit`
/// event per expanded cell, then - once the exit has been dequeued - a
/// `Path` event per cell of the shortest path in entrance-to-exit order.
/// Neighbours are scanned in the fixed canonical direction order, so the
/// search and the path it finds are deterministic for a given maze.
///
/// The maze must be fully carved before solving starts. If the frontier
/// empties without reaching the exit the maze was structurally broken and
/// the solver yields a single `Unreachable` error in place of any path
/// events. An exhausted solver keeps returning `None`.
pub struct BfsSolver<'a> {
    maze: &'a Maze,
    frontier: VecDeque<Cartesian2DCoordinate>,
    parents: FnvHashMap<Cartesian2DCoordinate, Option<Cartesian2DCoordinate>>,
    phase: Phase,
    path: Vec<Cartesian2DCoordinate>,
    path_cursor: usize,
}

impl<'a> BfsSolver<'a> {
    /// A solver positioned at the maze's entrance.
    pub fn new(maze: &'a Maze) -> BfsSolver<'a> {
        let entrance = maze.entrance();
        let mut frontier = VecDeque::new();
        frontier.push_back(entrance);
        let mut parents = utils::fnv_hashmap(maze.size());
        parents.insert(entrance, None);

        BfsSolver {
            maze,
            frontier,
            parents,
            phase: Phase::Visiting,
            path: Vec::new(),
            path_cursor: 0,
        }
    }

    /// The entrance-to-exit path. Empty until the solver's path phase has
    /// begun; complete once the sequence is drained.
    pub fn path(&self) -> &[Cartesian2DCoordinate] {
        &self.path
    }

    fn trace_path(&mut self) {
        let mut node = Some(self.maze.exit());
        while let Some(cell) = node {
            self.path.push(cell);
            node = *self.parents.get(&cell).expect("path cell has a parent entry");
        }
        self.path.reverse();
    }
}

impl<'a> Iterator for BfsSolver<'a> {
    type Item = Result<SolveStep>;

    fn next(&mut self) -> Option<Result<SolveStep>> {
        match self.phase {
            Phase::Visiting => {
                let current = match self.frontier.pop_front() {
                    Some(cell) => cell,
                    None => {
                        // Every reachable cell expanded without meeting the
                        // exit: the generator's spanning contract is broken.
                        self.phase = Phase::Done;
                        return Some(Err(ErrorKind::Unreachable.into()));
                    }
                };

                if current == self.maze.exit() {
                    self.trace_path();
                    self.phase = Phase::Tracing;
                } else {
                    for dir in &DIRECTIONS {
                        if !self.maze.is_walled(current, *dir) {
                            let neighbour = self.maze
                                                .neighbour_at_direction(current, *dir)
                                                .expect("unwalled side has a neighbour");
                            if !self.parents.contains_key(&neighbour) {
                                self.parents.insert(neighbour, Some(current));
                                self.frontier.push_back(neighbour);
                            }
                        }
                    }
                }

                Some(Ok(SolveStep::Visit(current)))
            }
            Phase::Tracing => {
                if self.path_cursor < self.path.len() {
                    let cell = self.path[self.path_cursor];
                    self.path_cursor += 1;
                    Some(Ok(SolveStep::Path(cell)))
                } else {
                    self.phase = Phase::Done;
                    None
                }
            }
            Phase::Done => None,
        }
    }
}

/// Drain a whole solving run in one call and return the shortest path in
/// entrance-to-exit order.
pub fn shortest_path(maze: &Maze) -> Result<Vec<Cartesian2DCoordinate>> {
    let mut solver = BfsSolver::new(maze);
    while let Some(step) = solver.next() {
        step?;
    }
    Ok(solver.path)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::recursive_backtracker;
    use crate::units::{Height, Width};

    use quickcheck::{quickcheck, TestResult};
    use rand::{SeedableRng, XorShiftRng};

    fn seeded_rng(seed: u32) -> XorShiftRng {
        XorShiftRng::from_seed([seed | 1, seed.wrapping_add(0x9e37), seed ^ 0x79b9, 0x7f4a_7c15])
    }

    fn carved_maze(w: usize,
                   h: usize,
                   entrance: (u32, u32),
                   exit: (u32, u32),
                   seed: u32)
                   -> Maze {
        let mut maze = Maze::new(Width(w),
                                 Height(h),
                                 Cartesian2DCoordinate::from(entrance),
                                 Cartesian2DCoordinate::from(exit))
            .expect("valid test maze dimensions");
        recursive_backtracker(&mut maze, seeded_rng(seed));
        maze
    }

    /// The path starts at the entrance, ends at the exit and every hop goes
    /// through a carved passage between adjacent cells.
    fn assert_valid_path(maze: &Maze, path: &[Cartesian2DCoordinate]) {
        assert_eq!(path.first(), Some(&maze.entrance()));
        assert_eq!(path.last(), Some(&maze.exit()));
        for pair in path.windows(2) {
            assert!(maze.is_passage(pair[0], pair[1]),
                    "no passage between consecutive path cells {:?} and {:?}",
                    pair[0],
                    pair[1]);
        }
    }

    /// Exit depth computed by an independent flood fill over the passages.
    fn bfs_depth_of_exit(maze: &Maze) -> Option<usize> {
        let mut depths = utils::fnv_hashmap(maze.size());
        let mut frontier = VecDeque::new();
        depths.insert(maze.entrance(), 0usize);
        frontier.push_back(maze.entrance());

        while let Some(cell) = frontier.pop_front() {
            let depth = depths[&cell];
            for dir in &DIRECTIONS {
                if !maze.is_walled(cell, *dir) {
                    let neighbour = maze.neighbour_at_direction(cell, *dir)
                                        .expect("unwalled side has a neighbour");
                    if !depths.contains_key(&neighbour) {
                        depths.insert(neighbour, depth + 1);
                        frontier.push_back(neighbour);
                    }
                }
            }
        }
        depths.get(&maze.exit()).cloned()
    }

    #[test]
    fn corridor_maze_solves_to_the_full_corridor() {
        for seed in 0..10 {
            let maze = carved_maze(3, 1, (0, 0), (2, 0), seed);
            let path = shortest_path(&maze).expect("corridor is solvable");
            assert_eq!(path,
                       vec![Cartesian2DCoordinate::new(0, 0),
                            Cartesian2DCoordinate::new(1, 0),
                            Cartesian2DCoordinate::new(2, 0)]);
        }
    }

    #[test]
    fn entrance_equal_to_exit_yields_a_one_cell_path() {
        let maze = carved_maze(4, 4, (2, 2), (2, 2), 11);
        let steps: Vec<SolveStep> = BfsSolver::new(&maze)
            .map(|step| step.expect("solvable maze"))
            .collect();

        let cell = Cartesian2DCoordinate::new(2, 2);
        assert_eq!(steps, vec![SolveStep::Visit(cell), SolveStep::Path(cell)]);
    }

    #[test]
    fn two_by_two_paths_have_the_expected_lengths() {
        for seed in 0..20 {
            // Diagonal corners: always two hops whichever wall pair remains.
            let diagonal = carved_maze(2, 2, (0, 0), (1, 1), seed);
            assert_eq!(diagonal.passage_count(), 3);
            let path = shortest_path(&diagonal).expect("diagonal is solvable");
            assert_valid_path(&diagonal, &path);
            assert_eq!(path.len(), 3);

            // Adjacent corners: one hop, or three around the horseshoe.
            let adjacent = carved_maze(2, 2, (0, 0), (0, 1), seed);
            let path = shortest_path(&adjacent).expect("adjacent is solvable");
            assert_valid_path(&adjacent, &path);
            assert!(path.len() == 2 || path.len() == 4, "got {} cells", path.len());
        }
    }

    #[test]
    fn all_visit_events_precede_all_path_events() {
        let maze = carved_maze(5, 4, (0, 0), (4, 3), 23);
        let steps: Vec<SolveStep> = BfsSolver::new(&maze)
            .map(|step| step.expect("solvable maze"))
            .collect();

        let first_path_event = steps.iter()
                                    .position(|step| match *step {
                                        SolveStep::Path(_) => true,
                                        _ => false,
                                    })
                                    .expect("a solvable maze has path events");
        assert!(steps[first_path_event..].iter().all(|step| match *step {
            SolveStep::Path(_) => true,
            _ => false,
        }));

        // The first visit is the entrance, the last path event the exit.
        assert_eq!(steps.first(), Some(&SolveStep::Visit(maze.entrance())));
        assert_eq!(steps.last(), Some(&SolveStep::Path(maze.exit())));
    }

    #[test]
    fn uncarved_maze_reports_the_exit_unreachable() {
        // No generation ran: every wall is still up, only the entrance is
        // ever expanded.
        let maze = Maze::new(Width(2),
                             Height(2),
                             Cartesian2DCoordinate::new(0, 0),
                             Cartesian2DCoordinate::new(1, 1))
            .expect("valid test maze dimensions");
        let mut solver = BfsSolver::new(&maze);

        assert_eq!(solver.next().expect("entrance visit").expect("visit is not an error"),
                   SolveStep::Visit(maze.entrance()));
        let failure = solver.next().expect("frontier exhaustion surfaces an error");
        match failure {
            Err(Error(ErrorKind::Unreachable, _)) => {}
            other => panic!("expected Unreachable, got {:?}", other),
        }
        assert!(solver.path().is_empty());

        // Terminal: the sequence is exhausted after the error.
        assert!(solver.next().is_none());
        assert!(solver.next().is_none());
    }

    #[test]
    fn exhausted_solver_stays_exhausted() {
        let maze = carved_maze(3, 3, (0, 0), (2, 2), 5);
        let mut solver = BfsSolver::new(&maze);
        while let Some(step) = solver.next() {
            step.expect("solvable maze");
        }
        assert!(solver.next().is_none());
        assert!(solver.next().is_none());
        assert_valid_path(&maze, solver.path());
    }

    #[test]
    fn quickcheck_path_is_shortest() {
        fn property(w: u8, h: u8, seed: u32, exit_pick: u16) -> TestResult {
            let (w, h) = ((w % 10) as usize + 1, (h % 10) as usize + 1);
            let exit_index = exit_pick as usize % (w * h);
            let exit = ((exit_index % w) as u32, (exit_index / w) as u32);

            let maze = carved_maze(w, h, (0, 0), exit, seed);
            let path = match shortest_path(&maze) {
                Ok(path) => path,
                Err(_) => return TestResult::failed(),
            };

            assert_valid_path(&maze, &path);
            let depth = bfs_depth_of_exit(&maze).expect("carved maze spans the grid");
            TestResult::from_bool(path.len() == depth + 1)
        }
        quickcheck(property as fn(u8, u8, u32, u16) -> TestResult);
    }
}
