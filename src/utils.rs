use bit_set::BitSet;
use fnv::FnvHasher;
use std::{
    collections::HashMap,
    hash::{BuildHasherDefault, Hash}
};

use crate::cells::Coordinate;
use crate::grid::Grid;

pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Construct a hash map with the specified capacity. The hashing algorithm is much faster than the default
/// on short keys such as coordinates.
/// Note it is less robust against security attacks on key collisions.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashMap::<K, V, _>::with_capacity_and_hasher(capacity, fnv)
}

/// Set of cells of one particular grid, stored as bits indexed by the row-major cell index.
#[derive(Debug, Clone)]
pub struct CellSet {
    bits: BitSet,
    row_length: usize,
}

impl CellSet {
    pub fn for_grid(grid: &Grid) -> CellSet {
        CellSet {
            bits: BitSet::with_capacity(grid.size()),
            row_length: grid.width(),
        }
    }

    /// A set holding the grid's blocked cells.
    pub fn blocked(grid: &Grid) -> CellSet {
        let mut set = CellSet::for_grid(grid);
        for coord in grid.blocked_cells() {
            let _ = set.insert(coord);
        }
        set
    }

    /// Returns true if the cell was not already present.
    #[inline]
    pub fn insert(&mut self, coord: Coordinate) -> bool {
        let index = self.index(coord);
        self.bits.insert(index)
    }

    #[inline]
    pub fn contains(&self, coord: Coordinate) -> bool {
        (coord.x as usize) < self.row_length && self.bits.contains(self.index(coord))
    }

    #[inline]
    fn index(&self, coord: Coordinate) -> usize {
        coord.y as usize * self.row_length + coord.x as usize
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::CellRole;
    use crate::units::{ColumnLength, RowLength};

    #[test]
    fn cell_set_membership() {
        let g = Grid::new(RowLength(3), ColumnLength(3));
        let mut set = CellSet::for_grid(&g);
        assert!(g.iter().all(|coord| !set.contains(coord)));
        assert!(set.insert(Coordinate::new(2, 1)));
        assert!(!set.insert(Coordinate::new(2, 1)));
        assert!(set.contains(Coordinate::new(2, 1)));
        assert!(!set.contains(Coordinate::new(1, 2)));
        // would alias (2, 1) without the row length check
        assert!(!set.contains(Coordinate::new(5, 0)));
    }

    #[test]
    fn blocked_cell_set() {
        let mut g = Grid::new(RowLength(4), ColumnLength(2));
        g.set_role(Coordinate::new(3, 1), CellRole::Blocked).unwrap();
        let set = CellSet::blocked(&g);
        assert_eq!(g.iter().filter(|coord| set.contains(*coord)).count(), 1);
        assert!(set.contains(Coordinate::new(3, 1)));
    }

    #[test]
    fn fnv_map_capacity() {
        let map = fnv_hashmap::<Coordinate, u32>(16);
        assert!(map.capacity() >= 16);
    }
}
