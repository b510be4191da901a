use std::collections::VecDeque;

use crate::cells::{CellRole, Coordinate};
use crate::errors::*;
use crate::grid::Grid;
use crate::utils;

/// Breadth first search from `entry` to `exit` through the maze passages.
///
/// Neighbours are explored north, west, south, east, so the same maze always gives the same
/// route. Returns None if either point is off the grid or no passage leads to the exit.
pub fn shortest_path(grid: &Grid, entry: Coordinate, exit: Coordinate) -> Option<Vec<Coordinate>> {
    if !(grid.is_valid_coordinate(entry) && grid.is_valid_coordinate(exit)) {
        return None;
    }

    // Every cell seen so far mapped to the cell it was reached from. The predecessor map doubles
    // as the visited set, the frontier is never deduplicated.
    let mut came_from = utils::fnv_hashmap::<Coordinate, Option<Coordinate>>(grid.size());
    let _ = came_from.insert(entry, None);
    let mut frontier = VecDeque::from(vec![entry]);

    while let Some(current) = frontier.pop_front() {
        if current == exit {
            break;
        }
        for neighbour in grid.neighbours(current).iter() {
            if !came_from.contains_key(neighbour) && grid.is_linked(current, *neighbour) {
                let _ = came_from.insert(*neighbour, Some(current));
                frontier.push_back(*neighbour);
            }
        }
    }

    if !came_from.contains_key(&exit) {
        return None;
    }

    let mut path = vec![exit];
    let mut current = exit;
    while let Some(&Some(previous)) = came_from.get(&current) {
        path.push(previous);
        current = previous;
    }
    path.reverse();
    Some(path)
}

/// Solve the maze: store the route on the grid and mark its cells.
///
/// Every route cell becomes `Path`, then the endpoints are overwritten with `Entry` and `Exit`.
/// Nothing on the grid changes if the exit cannot be reached.
pub fn solve(grid: &mut Grid, entry: Coordinate, exit: Coordinate) -> Result<()> {
    let path = shortest_path(grid, entry, exit).ok_or(ErrorKind::ExitUnreachable(entry, exit))?;

    for coord in &path {
        grid.set_role(*coord, CellRole::Path)?;
    }
    grid.set_role(entry, CellRole::Entry)?;
    grid.set_role(exit, CellRole::Exit)?;

    log::debug!("Solved in {} steps", path.len() - 1);
    grid.set_path(path);
    Ok(())
}
