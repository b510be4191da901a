use std::fmt;

use bitflags::bitflags;

/// Position of a cell on a rectangular grid. `x` is the column, `y` the row.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Coordinate {
    pub x: u32,
    pub y: u32,
}

impl Coordinate {
    pub fn new(x: u32, y: u32) -> Coordinate {
        Coordinate { x, y }
    }

    /// Creates a new `Coordinate` offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable (moving north of row 0 or west of
    /// column 0). Whether the result lies inside a particular grid is for the grid to decide.
    pub fn offset(self, dir: CompassPrimary) -> Option<Coordinate> {
        let Coordinate { x, y } = self;
        match dir {
            CompassPrimary::North => y.checked_sub(1).map(|y| Coordinate::new(x, y)),
            CompassPrimary::South => y.checked_add(1).map(|y| Coordinate::new(x, y)),
            CompassPrimary::East => x.checked_add(1).map(|x| Coordinate::new(x, y)),
            CompassPrimary::West => x.checked_sub(1).map(|x| Coordinate::new(x, y)),
        }
    }

    /// The direction that leads from `self` to `other`, if the two are adjacent.
    pub fn direction_to(self, other: Coordinate) -> Option<CompassPrimary> {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        match (dx, dy) {
            (0, -1) => Some(CompassPrimary::North),
            (0, 1) => Some(CompassPrimary::South),
            (1, 0) => Some(CompassPrimary::East),
            (-1, 0) => Some(CompassPrimary::West),
            _ => None,
        }
    }

    #[inline]
    pub fn is_adjacent(self, other: Coordinate) -> bool {
        self.direction_to(other).is_some()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// The order in which neighbours are considered while carving and solving.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::West,
                                          CompassPrimary::South,
                                          CompassPrimary::East];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// The wall flag on a cell's side facing this direction.
    pub fn wall(self) -> Walls {
        match self {
            CompassPrimary::North => Walls::NORTH,
            CompassPrimary::South => Walls::SOUTH,
            CompassPrimary::East => Walls::EAST,
            CompassPrimary::West => Walls::WEST,
        }
    }

    /// Single letter used by the hex dump to spell out a route.
    pub fn letter(self) -> char {
        match self {
            CompassPrimary::North => 'N',
            CompassPrimary::South => 'S',
            CompassPrimary::East => 'E',
            CompassPrimary::West => 'W',
        }
    }
}

bitflags! {
    /// The walls standing around one cell. The bit layout is the one used by the hex dump.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Walls: u8 {
        const NORTH = 0b0001;
        const EAST  = 0b0010;
        const SOUTH = 0b0100;
        const WEST  = 0b1000;
    }
}

impl Default for Walls {
    fn default() -> Self {
        Walls::all()
    }
}

/// What a cell represents in the finished maze.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Default)]
pub enum CellRole {
    #[default]
    Open,
    Blocked,
    Path,
    Entry,
    Exit,
}

impl CellRole {
    /// Part of the solution route, endpoints included.
    #[inline]
    pub fn is_on_route(self) -> bool {
        matches!(self, CellRole::Path | CellRole::Entry | CellRole::Exit)
    }
}

/// One logical maze cell: a wall mask plus a role. Starts fully walled and open.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash, Default)]
pub struct Cell {
    pub walls: Walls,
    pub role: CellRole,
}

impl Cell {
    #[inline]
    pub fn has_wall(&self, dir: CompassPrimary) -> bool {
        self.walls.contains(dir.wall())
    }

    #[inline]
    pub fn set_wall(&mut self, dir: CompassPrimary, present: bool) {
        self.walls.set(dir.wall(), present);
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.role == CellRole::Blocked
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        let c = Coordinate::new(0, 0);
        assert_eq!(c.offset(CompassPrimary::North), None);
        assert_eq!(c.offset(CompassPrimary::West), None);
        assert_eq!(c.offset(CompassPrimary::South), Some(Coordinate::new(0, 1)));
        assert_eq!(c.offset(CompassPrimary::East), Some(Coordinate::new(1, 0)));

        let max = Coordinate::new(u32::MAX, u32::MAX);
        assert_eq!(max.offset(CompassPrimary::South), None);
        assert_eq!(max.offset(CompassPrimary::East), None);
    }

    #[test]
    fn adjacency() {
        let gc = |x, y| Coordinate::new(x, y);
        assert_eq!(gc(1, 1).direction_to(gc(1, 0)), Some(CompassPrimary::North));
        assert_eq!(gc(1, 1).direction_to(gc(1, 2)), Some(CompassPrimary::South));
        assert_eq!(gc(1, 1).direction_to(gc(2, 1)), Some(CompassPrimary::East));
        assert_eq!(gc(1, 1).direction_to(gc(0, 1)), Some(CompassPrimary::West));

        assert!(!gc(1, 1).is_adjacent(gc(1, 1)));
        assert!(!gc(1, 1).is_adjacent(gc(2, 2)));
        assert!(!gc(0, 0).is_adjacent(gc(2, 0)));
    }

    #[test]
    fn opposite_directions_face_each_other() {
        for dir in CompassPrimary::ALL.iter() {
            let from = Coordinate::new(5, 5);
            let to = from.offset(*dir).unwrap();
            assert_eq!(to.direction_to(from), Some(dir.opposite()));
        }
    }

    #[test]
    fn default_cell_is_walled_and_open() {
        let cell = Cell::default();
        assert_eq!(cell.walls, Walls::all());
        assert_eq!(cell.role, CellRole::Open);
        for dir in CompassPrimary::ALL.iter() {
            assert!(cell.has_wall(*dir));
        }
    }

    #[test]
    fn walls_and_role_are_independent() {
        let mut cell = Cell::default();
        cell.set_wall(CompassPrimary::East, false);
        cell.role = CellRole::Path;
        assert!(!cell.has_wall(CompassPrimary::East));
        assert!(cell.has_wall(CompassPrimary::West));
        assert_eq!(cell.role, CellRole::Path);
        assert_eq!(cell.walls.bits(), 0b1101);
    }

    #[test]
    fn route_roles() {
        assert!(CellRole::Path.is_on_route());
        assert!(CellRole::Entry.is_on_route());
        assert!(CellRole::Exit.is_on_route());
        assert!(!CellRole::Open.is_on_route());
        assert!(!CellRole::Blocked.is_on_route());
    }
}
