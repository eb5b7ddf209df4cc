use smallvec::SmallVec;
use std::convert::From;

/// A cell location on the rectangular grid, zero indexed from the top-left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// One of the four sides of a grid cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    East,
    South,
    West,
}

/// The canonical direction scan order: top, right, bottom, left.
///
/// The solver expands neighbours in exactly this order, which keeps solving
/// fully deterministic for a given maze. The generator shuffles a copy.
pub const DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                             CompassPrimary::East,
                                             CompassPrimary::South,
                                             CompassPrimary::West];

impl CompassPrimary {
    /// The direction faced by the other side of the same wall.
    /// North pairs with South and East with West; both sides of a wall are
    /// always cleared together, which relies on this pairing.
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::West => CompassPrimary::East,
        }
    }
}

/// The coordinate one cell away in the given direction.
/// Returns None where the coordinate is not representable (above the top
/// row or left of the first column).
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary)
                         -> Option<Cartesian2DCoordinate> {
    let (x, y) = (coord.x, coord.y);
    match dir {
        CompassPrimary::North => {
            if y > 0 {
                Some(Cartesian2DCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        CompassPrimary::East => Some(Cartesian2DCoordinate { x: x + 1, y }),
        CompassPrimary::South => Some(Cartesian2DCoordinate { x, y: y + 1 }),
        CompassPrimary::West => {
            if x > 0 {
                Some(Cartesian2DCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn opposite_directions_pair_up() {
        assert_eq!(CompassPrimary::North.opposite(), CompassPrimary::South);
        assert_eq!(CompassPrimary::East.opposite(), CompassPrimary::West);
        assert_eq!(CompassPrimary::South.opposite(), CompassPrimary::North);
        assert_eq!(CompassPrimary::West.opposite(), CompassPrimary::East);

        for dir in &DIRECTIONS {
            assert_eq!(dir.opposite().opposite(), *dir);
            assert_ne!(dir.opposite(), *dir);
        }
    }

    #[test]
    fn offsets_move_one_cell() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        assert_eq!(offset_coordinate(gc(1, 1), CompassPrimary::North), Some(gc(1, 0)));
        assert_eq!(offset_coordinate(gc(1, 1), CompassPrimary::East), Some(gc(2, 1)));
        assert_eq!(offset_coordinate(gc(1, 1), CompassPrimary::South), Some(gc(1, 2)));
        assert_eq!(offset_coordinate(gc(1, 1), CompassPrimary::West), Some(gc(0, 1)));
    }

    #[test]
    fn offsets_at_the_origin_underflow_to_none() {
        let origin = Cartesian2DCoordinate::new(0, 0);
        assert_eq!(offset_coordinate(origin, CompassPrimary::North), None);
        assert_eq!(offset_coordinate(origin, CompassPrimary::West), None);
        assert_eq!(offset_coordinate(origin, CompassPrimary::East),
                   Some(Cartesian2DCoordinate::new(1, 0)));
        assert_eq!(offset_coordinate(origin, CompassPrimary::South),
                   Some(Cartesian2DCoordinate::new(0, 1)));
    }
}
