//! Text file formats a maze is saved in.

use std::fs::File;
use std::io::prelude::*;
use std::path::Path;

use itertools::Itertools;
use petgraph::visit::EdgeRef;

use crate::cells::Coordinate;
use crate::errors::*;
use crate::grid::Grid;

/// The maze as rows of hex digits, one digit per cell encoding its standing walls (north = 1,
/// east = 2, south = 4, west = 8). After a blank line come the entry and exit as `x,y` and the
/// solution as one compass letter per step.
pub fn hex_dump(grid: &Grid, entry: Coordinate, exit: Coordinate) -> String {
    let mut dump = String::with_capacity((grid.width() + 1) * grid.height() + grid.path().len() + 32);

    for row in grid.iter_row() {
        for coord in row {
            let walls = grid.cell(coord).map_or(0, |cell| cell.walls.bits());
            dump.push_str(&format!("{:X}", walls));
        }
        dump.push('\n');
    }

    dump.push('\n');
    dump.push_str(&format!("{},{}\n", entry.x, entry.y));
    dump.push_str(&format!("{},{}\n", exit.x, exit.y));
    dump.push_str(&path_directions(grid.path()));
    dump.push('\n');
    dump
}

pub fn write_hex_dump<P: AsRef<Path>>(grid: &Grid, entry: Coordinate, exit: Coordinate, file_path: P) -> Result<()> {
    write_text_to_file(&hex_dump(grid, entry, exit), file_path)
}

/// The solution as compass letters, one per step between consecutive route cells.
pub fn path_directions(path: &[Coordinate]) -> String {
    path.iter()
        .tuple_windows()
        .filter_map(|(a, b)| a.direction_to(*b))
        .map(|dir| dir.letter())
        .collect()
}

/// The passage graph as text: `vertices edges` on the first line, then one line per passage
/// holding the 1-based row-major indices of the cells it joins.
pub fn edge_list(grid: &Grid) -> String {
    let graph = grid.passage_graph();
    let mut graph_data = format!("{} {}\n", graph.node_count(), graph.edge_count());
    for edge in graph.edge_references() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;
        graph_data.push_str(&format!("{} {}\n", src_as_1_based_index, dst_as_1_based_index));
    }
    graph_data
}

pub fn write_edge_list<P: AsRef<Path>>(grid: &Grid, file_path: P) -> Result<()> {
    write_text_to_file(&edge_list(grid), file_path)
}

fn write_text_to_file<P: AsRef<Path>>(data: &str, file_path: P) -> Result<()> {
    let mut f = File::create(file_path.as_ref())?;
    f.write_all(data.as_bytes())?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;

    use super::*;
    use crate::pathing::solve;
    use crate::units::{ColumnLength, RowLength};

    fn gc(x: u32, y: u32) -> Coordinate {
        Coordinate::new(x, y)
    }

    /// ```text
    /// +---+---+
    /// |       |
    /// +   +---+
    /// |       |
    /// +---+---+
    /// ```
    fn small_maze() -> Grid {
        let mut g = Grid::new(RowLength(2), ColumnLength(2));
        g.set_wall(gc(0, 0), gc(1, 0), false).unwrap();
        g.set_wall(gc(0, 0), gc(0, 1), false).unwrap();
        g.set_wall(gc(0, 1), gc(1, 1), false).unwrap();
        g
    }

    #[test]
    fn hex_digits_and_trailer() {
        let mut g = small_maze();
        solve(&mut g, gc(1, 1), gc(1, 0)).unwrap();
        assert_eq!(hex_dump(&g, gc(1, 1), gc(1, 0)), "97\nC7\n\n1,1\n1,0\nWNE\n");
    }

    #[test]
    fn unsolved_maze_has_empty_route() {
        let g = Grid::new(RowLength(3), ColumnLength(1));
        assert_eq!(hex_dump(&g, gc(0, 0), gc(2, 0)), "FFF\n\n0,0\n2,0\n\n");
    }

    #[test]
    fn directions_of_a_route() {
        assert_eq!(path_directions(&[gc(1, 1), gc(1, 2), gc(0, 2), gc(0, 1), gc(1, 1)]), "SWNE");
        assert_eq!(path_directions(&[gc(4, 4)]), "");
        assert_eq!(path_directions(&[]), "");
    }

    #[test]
    fn edges_are_one_based() {
        assert_eq!(edge_list(&small_maze()), "4 3\n1 2\n1 3\n3 4\n");
    }

    #[test]
    fn files_written() {
        let mut g = small_maze();
        solve(&mut g, gc(0, 0), gc(1, 1)).unwrap();
        let dir = env::temp_dir();
        let hex_path = dir.join(format!("mazegen_hex_dump_{}.txt", std::process::id()));
        let edges_path = dir.join(format!("mazegen_edges_{}.txt", std::process::id()));

        write_hex_dump(&g, gc(0, 0), gc(1, 1), &hex_path).unwrap();
        write_edge_list(&g, &edges_path).unwrap();
        assert_eq!(fs::read_to_string(&hex_path).unwrap(), hex_dump(&g, gc(0, 0), gc(1, 1)));
        assert_eq!(fs::read_to_string(&edges_path).unwrap(), edge_list(&g));

        fs::remove_file(hex_path).unwrap();
        fs::remove_file(edges_path).unwrap();
    }

    #[test]
    fn unwritable_path() {
        let g = small_maze();
        let missing_dir = env::temp_dir().join("mazegen_no_such_dir").join("maze.txt");
        assert!(write_hex_dump(&g, gc(0, 0), gc(1, 1), missing_dir).is_err());
    }
}
