use std::error;
use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cell, CellRole, CompassPrimary, Coordinate};
use crate::grid_iterators::{CellIter, RowIter};
use crate::units::{ColumnLength, ColumnsCount, RowLength, RowsCount};

pub type CoordinateSmallVec = SmallVec<[Coordinate; 4]>;

/// A rectangular maze grid. Cells are stored row-major, so index `y * width + x`.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    row_length: RowLength,
    column_length: ColumnLength,
    cells: Vec<Cell>,
    path: Vec<Coordinate>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotAdjacent,
}

impl fmt::Display for CellLinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CellLinkError::InvalidGridCoordinate => write!(f, "coordinate outside of the grid"),
            CellLinkError::SelfLink => write!(f, "a cell has no wall shared with itself"),
            CellLinkError::NotAdjacent => write!(f, "cells are not adjacent"),
        }
    }
}

impl error::Error for CellLinkError {}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: rows: {:?}, columns: {:?}, passages: {:?}, path length: {:?}",
               self.rows(), self.columns(), self.links_count(), self.path.len())
    }
}

impl Grid {
    /// Creates a grid where every cell is open and has all four walls.
    pub fn new(row_length: RowLength, column_length: ColumnLength) -> Grid {
        let RowLength(width) = row_length;
        let ColumnLength(height) = column_length;
        Grid {
            row_length,
            column_length,
            cells: vec![Cell::default(); width * height],
            path: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.row_length.0
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.column_length.0
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.height())
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.width())
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Coordinate) -> bool {
        (coord.x as usize) < self.width() && (coord.y as usize) < self.height()
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Coordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width() + coord.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn cell(&self, coord: Coordinate) -> Option<&Cell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    #[inline]
    pub fn cell_mut(&mut self, coord: Coordinate) -> Option<&mut Cell> {
        self.grid_coordinate_to_index(coord).map(move |index| &mut self.cells[index])
    }

    pub fn set_role(&mut self, coord: Coordinate, role: CellRole) -> Result<(), CellLinkError> {
        let cell = self.cell_mut(coord).ok_or(CellLinkError::InvalidGridCoordinate)?;
        cell.role = role;
        Ok(())
    }

    /// Is there a wall on the edge shared by two adjacent cells?
    pub fn wall_between(&self, a: Coordinate, b: Coordinate) -> Result<bool, CellLinkError> {
        let dir = self.shared_edge(a, b)?;
        let cell = self.cell(a).ok_or(CellLinkError::InvalidGridCoordinate)?;
        Ok(cell.has_wall(dir))
    }

    /// Build or knock down the wall between two adjacent cells. Both sides of the edge are
    /// updated together, so the wall state is always the same when seen from either cell.
    pub fn set_wall(&mut self, a: Coordinate, b: Coordinate, present: bool) -> Result<(), CellLinkError> {
        let dir = self.shared_edge(a, b)?;
        let a_index = self.grid_coordinate_to_index(a).ok_or(CellLinkError::InvalidGridCoordinate)?;
        let b_index = self.grid_coordinate_to_index(b).ok_or(CellLinkError::InvalidGridCoordinate)?;
        self.cells[a_index].set_wall(dir, present);
        self.cells[b_index].set_wall(dir.opposite(), present);
        Ok(())
    }

    /// Are two cells in the grid connected by a passage?
    pub fn is_linked(&self, a: Coordinate, b: Coordinate) -> bool {
        self.wall_between(a, b).map_or(false, |wall| !wall)
    }

    pub fn is_neighbour_linked(&self, coord: Coordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// Cells to the North, West, South or East of a particular cell (in that order), but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: Coordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
            .collect()
    }

    pub fn neighbour_at_direction(&self, coord: Coordinate, direction: CompassPrimary) -> Option<Coordinate> {
        coord.offset(direction).filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// All blocked cells, in grid order.
    pub fn blocked_cells(&self) -> Vec<Coordinate> {
        self.iter()
            .zip(self.cells.iter())
            .filter(|&(_, cell)| cell.is_blocked())
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Overwrite the cells of the rectangle starting at (`offset_x`, `offset_y`) with the cells
    /// of `source`. Nothing is copied if the rectangle does not fit inside this grid.
    pub fn copy_region(&mut self, source: &Grid, offset_x: u32, offset_y: u32) -> Result<(), CellLinkError> {
        let fits_x = (offset_x as usize).checked_add(source.width()).map_or(false, |end| end <= self.width());
        let fits_y = (offset_y as usize).checked_add(source.height()).map_or(false, |end| end <= self.height());
        if !(fits_x && fits_y) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }

        for (source_coord, source_cell) in source.iter().zip(source.cells.iter()) {
            let paste_coord = Coordinate::new(offset_x + source_coord.x, offset_y + source_coord.y);
            let cell = self.cell_mut(paste_coord).ok_or(CellLinkError::InvalidGridCoordinate)?;
            *cell = *source_cell;
        }
        Ok(())
    }

    #[inline]
    pub fn set_path(&mut self, path: Vec<Coordinate>) {
        self.path = path;
    }

    /// The solution route from entry to exit. Empty until the maze is solved.
    #[inline]
    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    /// Every coordinate, row by row (y-major, x-minor).
    #[inline]
    pub fn iter(&self) -> CellIter {
        CellIter::new(self.row_length, self.column_length)
    }

    #[inline]
    pub fn iter_row(&self) -> RowIter {
        RowIter::new(self.row_length, self.column_length)
    }

    /// Passages between cells, each reported once from its north-west end.
    pub fn iter_links(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.iter().flat_map(move |coord| {
            [CompassPrimary::East, CompassPrimary::South]
                .into_iter()
                .filter_map(move |dir| self.neighbour_at_direction(coord, dir))
                .filter(move |neighbour| self.is_linked(coord, *neighbour))
                .map(move |neighbour| (coord, neighbour))
        })
    }

    pub fn links_count(&self) -> usize {
        self.iter_links().count()
    }

    /// The maze as an undirected graph: one node per cell (node index == row-major cell index),
    /// one edge per passage.
    pub fn passage_graph(&self) -> UnGraph<Coordinate, ()> {
        let mut graph = UnGraph::with_capacity(self.size(), self.size());
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    fn shared_edge(&self, a: Coordinate, b: Coordinate) -> Result<CompassPrimary, CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        if !(self.is_valid_coordinate(a) && self.is_valid_coordinate(b)) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        a.direction_to(b).ok_or(CellLinkError::NotAdjacent)
    }
}
