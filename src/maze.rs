use crate::cells::{offset_coordinate, Cartesian2DCoordinate, CompassPrimary, CoordinateSmallVec,
                   DIRECTIONS};
use crate::errors::*;
use crate::units::{Height, Width};
use crate::utils;
use crate::utils::FnvHashSet;

use error_chain::bail;
use petgraph::graph;
use petgraph::{Graph, Undirected};
use std::fmt;

/// The maze model: a rectangular grid of cells with a wall on every side of
/// every cell until a passage is carved between two neighbours.
///
/// Passages are stored as edges of an undirected graph with one node per
/// cell. An edge has no sides, so a carved wall is gone from both cells at
/// once; a half-cleared wall is not representable.
///
/// Only the generator mutates a `Maze`. Once a generator's step sequence has
/// been drained the wall state is final and everything else reads it.
pub struct Maze {
    passages: Graph<(), (), Undirected>,
    width: Width,
    height: Height,
    entrance: Cartesian2DCoordinate,
    exit: Cartesian2DCoordinate,
    visited: FnvHashSet<Cartesian2DCoordinate>,
}

impl Maze {
    /// A fully walled maze. Fails with `InvalidConfiguration` for zero-sized
    /// dimensions or an entrance/exit outside the grid.
    pub fn new(width: Width,
               height: Height,
               entrance: Cartesian2DCoordinate,
               exit: Cartesian2DCoordinate)
               -> Result<Maze> {

        let (Width(w), Height(h)) = (width, height);
        if w == 0 || h == 0 {
            bail!(ErrorKind::InvalidConfiguration(format!("grid dimensions {}x{} are empty", w, h)));
        }
        let in_bounds = |c: Cartesian2DCoordinate| (c.x as usize) < w && (c.y as usize) < h;
        if !in_bounds(entrance) {
            bail!(ErrorKind::InvalidConfiguration(format!("entrance {:?} is outside the {}x{} grid",
                                                          entrance, w, h)));
        }
        if !in_bounds(exit) {
            bail!(ErrorKind::InvalidConfiguration(format!("exit {:?} is outside the {}x{} grid",
                                                          exit, w, h)));
        }

        let cells_count = w * h;
        // A finished perfect maze holds exactly one passage fewer than cells.
        let mut passages = Graph::with_capacity(cells_count, cells_count - 1);
        for _ in 0..cells_count {
            let _ = passages.add_node(());
        }

        Ok(Maze {
            passages,
            width,
            height,
            entrance,
            exit,
            visited: utils::fnv_hashset(cells_count),
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    /// Total cell count of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    #[inline]
    pub fn entrance(&self) -> Cartesian2DCoordinate {
        self.entrance
    }

    #[inline]
    pub fn exit(&self) -> Cartesian2DCoordinate {
        self.exit
    }

    /// How many wall pairs have been carved away so far.
    #[inline]
    pub fn passage_count(&self) -> usize {
        self.passages.edge_count()
    }

    /// Is the grid coordinate within this maze's dimensions?
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.height.0
    }

    /// The adjacent cell in the given direction, or None at the grid edge.
    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        offset_coordinate(coord, direction).filter(|&c| self.is_valid_coordinate(c))
    }

    /// All in-bounds cells bordering a particular cell, whether or not a
    /// passage joins them.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        DIRECTIONS.iter()
                  .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
                  .collect()
    }

    /// Is there still a wall on this side of the cell? The outer boundary of
    /// the grid always reports walled.
    pub fn is_walled(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        match self.neighbour_at_direction(coord, direction) {
            Some(neighbour) => !self.is_passage(coord, neighbour),
            None => true,
        }
    }

    /// Are two cells joined by a carved passage? Symmetric in its arguments.
    pub fn is_passage(&self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> bool {
        if self.is_valid_coordinate(a) && self.is_valid_coordinate(b) {
            self.passages
                .find_edge(self.graph_index(a), self.graph_index(b))
                .is_some()
        } else {
            false
        }
    }

    /// Carve the wall pair between two adjacent cells, joining them into a
    /// passage. Both sides open in one operation. Fails with
    /// `InvalidOperation` if `b` is not one of `a`'s four grid neighbours,
    /// which covers self-connections and out-of-bounds cells.
    pub fn connect(&mut self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> Result<()> {
        let adjacent = self.is_valid_coordinate(a) && self.neighbours(a).iter().any(|&c| c == b);
        if !adjacent {
            bail!(ErrorKind::InvalidOperation(format!("cells {:?} and {:?} are not adjacent",
                                                      a, b)));
        }
        // update_edge never creates parallel edges, so reconnecting is a no-op.
        let _ = self.passages.update_edge(self.graph_index(a), self.graph_index(b), ());
        Ok(())
    }

    /// Has the cell been reached by the carving process?
    #[inline]
    pub fn is_visited(&self, coord: Cartesian2DCoordinate) -> bool {
        self.visited.contains(&coord)
    }

    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    #[inline]
    pub(crate) fn mark_visited(&mut self, coord: Cartesian2DCoordinate) {
        self.visited.insert(coord);
    }

    /// Row-major graph node index of a coordinate. Callers validate first.
    #[inline]
    fn graph_index(&self, coord: Cartesian2DCoordinate) -> graph::NodeIndex {
        graph::NodeIndex::new(coord.y as usize * self.width.0 + coord.x as usize)
    }
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "Maze :: {:?} x {:?}, entrance: {:?}, exit: {:?}, passages: {}",
               self.width, self.height, self.entrance, self.exit, self.passage_count())
    }
}

impl fmt::Display for Maze {
    /// Plain text rendering of the wall state, one `+--+` lattice row per
    /// grid row, with the entrance marked `S` and the exit marked `E`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (w, h) = (self.width.0, self.height.0);
        let mut output = String::with_capacity((3 * w + 2) * (2 * h + 1));

        for y in 0..h {
            for x in 0..w {
                let cell = Cartesian2DCoordinate::new(x as u32, y as u32);
                output.push('+');
                output.push_str(if self.is_walled(cell, CompassPrimary::North) {
                    "--"
                } else {
                    "  "
                });
            }
            output.push_str("+\n");

            for x in 0..w {
                let cell = Cartesian2DCoordinate::new(x as u32, y as u32);
                output.push(if self.is_walled(cell, CompassPrimary::West) {
                    '|'
                } else {
                    ' '
                });
                output.push_str(if cell == self.entrance {
                    "S "
                } else if cell == self.exit {
                    "E "
                } else {
                    "  "
                });
            }
            output.push_str("|\n");
        }

        for _ in 0..w {
            output.push_str("+--");
        }
        output.push_str("+\n");

        write!(f, "{}", output)
    }
}
