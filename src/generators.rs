use std::collections::VecDeque;

use itertools::iproduct;
use rand::Rng;
use rand::seq::SliceRandom;
use smallvec::SmallVec;

use crate::cells::{CompassPrimary, Coordinate};
use crate::grid::{CellLinkError, Grid};
use crate::utils::CellSet;

/// Chance that the braiding pass tries to knock down any particular standing wall.
pub const BRAID_PROBABILITY: f64 = 0.1;

/// Side length of the smallest square room the braiding pass refuses to open up.
const ROOM_SIDE: u32 = 3;

type CellPairSmallVec = SmallVec<[(Coordinate, Coordinate); 4]>;

/// Carve a perfect maze into the grid, starting from `entry`.
///
/// A randomised depth first walk: the frontier holds (from, to) pairs and each newly visited cell
/// pushes its unvisited neighbours, in random order, onto the front of the frontier. The wall
/// between the pair is knocked down whenever `to` is reached for the first time, so every cell
/// reachable from the entry is visited exactly once and the passages form a spanning tree.
/// Blocked cells count as already visited and are never carved.
///
/// Returns the number of passages carved.
pub fn carve_passages<R: Rng>(grid: &mut Grid, entry: Coordinate, rng: &mut R) -> Result<usize, CellLinkError> {
    if !grid.is_valid_coordinate(entry) {
        return Err(CellLinkError::InvalidGridCoordinate);
    }

    let mut visited = CellSet::blocked(grid);
    let mut frontier = VecDeque::with_capacity(grid.size());
    frontier.push_back((entry, entry));
    let mut carved = 0;

    while let Some((previous, current)) = frontier.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        if previous != current {
            grid.set_wall(previous, current, false)?;
            carved += 1;
        }

        let mut neighbours = neighbour_pairs_outside(grid, current, &CompassPrimary::ALL, &visited);
        neighbours.shuffle(rng);
        // the shuffled batch goes ahead of the rest of the frontier, keeping its order
        for pair in neighbours.into_iter().rev() {
            frontier.push_front(pair);
        }
    }

    log::debug!("Carved {} passages from {}", carved, entry);
    Ok(carved)
}

/// Braid a perfect maze: knock down extra walls so the maze gets loops.
///
/// Every unblocked cell, in grid order, looks at the walls towards its southern and eastern
/// neighbours and removes each standing one with probability `BRAID_PROBABILITY`, unless that
/// would open up a 3 * 3 room (see `remove_wall_if_valid`). A single cell may lose both walls in
/// one pass.
///
/// Returns the number of walls removed.
pub fn braid<R: Rng>(grid: &mut Grid, rng: &mut R) -> Result<usize, CellLinkError> {
    let blocked = CellSet::blocked(grid);
    let mut removed = 0;

    for coord in grid.iter() {
        if blocked.contains(coord) {
            continue;
        }
        let mut candidates = neighbour_pairs_outside(grid,
                                                     coord,
                                                     &[CompassPrimary::South, CompassPrimary::East],
                                                     &blocked);
        candidates.shuffle(rng);

        for (from, to) in candidates {
            if grid.wall_between(from, to)? && rng.gen::<f64>() < BRAID_PROBABILITY &&
               remove_wall_if_valid(grid, from, to)? {
                removed += 1;
            }
        }
    }

    log::debug!("Braiding removed {} walls", removed);
    Ok(removed)
}

/// Remove the wall between `a` and `b` unless that leaves a fully open 3 * 3 block of cells.
///
/// Returns whether the wall stayed down.
pub fn remove_wall_if_valid(grid: &mut Grid, a: Coordinate, b: Coordinate) -> Result<bool, CellLinkError> {
    grid.set_wall(a, b, false)?;

    for origin in squares_containing(grid, a, b) {
        if inner_walls_count(grid, origin)? == 0 {
            grid.set_wall(a, b, true)?;
            return Ok(false);
        }
    }
    Ok(true)
}

/// Top left corners of every 3 * 3 window lying inside the grid that contains both cells.
pub fn squares_containing(grid: &Grid, a: Coordinate, b: Coordinate) -> Vec<Coordinate> {
    let (width, height) = (grid.width() as u32, grid.height() as u32);
    if width < ROOM_SIDE || height < ROOM_SIDE {
        return Vec::new();
    }

    let min_x = a.x.max(b.x).saturating_sub(ROOM_SIDE - 1);
    let max_x = a.x.min(b.x).min(width - ROOM_SIDE);
    let min_y = a.y.max(b.y).saturating_sub(ROOM_SIDE - 1);
    let max_y = a.y.min(b.y).min(height - ROOM_SIDE);
    if min_x > max_x || min_y > max_y {
        return Vec::new();
    }

    iproduct!(min_y..=max_y, min_x..=max_x)
        .map(|(y, x)| Coordinate::new(x, y))
        .collect()
}

/// Walls standing between the cells of the 3 * 3 window whose top left corner is `origin`.
/// There are twelve such edges; the outline of the window is not counted.
pub fn inner_walls_count(grid: &Grid, origin: Coordinate) -> Result<usize, CellLinkError> {
    let mut count = 0;
    for (dy, dx) in iproduct!(0..ROOM_SIDE, 0..ROOM_SIDE - 1) {
        let left = Coordinate::new(origin.x + dx, origin.y + dy);
        let right = Coordinate::new(origin.x + dx + 1, origin.y + dy);
        if grid.wall_between(left, right)? {
            count += 1;
        }
    }
    for (dx, dy) in iproduct!(0..ROOM_SIDE, 0..ROOM_SIDE - 1) {
        let upper = Coordinate::new(origin.x + dx, origin.y + dy);
        let lower = Coordinate::new(origin.x + dx, origin.y + dy + 1);
        if grid.wall_between(upper, lower)? {
            count += 1;
        }
    }
    Ok(count)
}

/// (coord, neighbour) pairs for the in-grid neighbours at `directions` that are not in `excluded`.
fn neighbour_pairs_outside(grid: &Grid,
                           coord: Coordinate,
                           directions: &[CompassPrimary],
                           excluded: &CellSet)
                           -> CellPairSmallVec {
    directions.iter()
        .filter_map(|dir| grid.neighbour_at_direction(coord, *dir))
        .filter(|neighbour| !excluded.contains(*neighbour))
        .map(|neighbour| (coord, neighbour))
        .collect()
}
