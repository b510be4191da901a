use std::fmt;

use crate::cells::Coordinate;
use crate::units::{ColumnLength, RowLength};

/// Walks every coordinate of a rectangular grid, row by row.
#[derive(Clone)]
pub struct CellIter {
    row_length: usize,
    current_cell_number: usize,
    cells_count: usize,
}

impl CellIter {
    pub fn new(row_length: RowLength, column_length: ColumnLength) -> CellIter {
        CellIter {
            row_length: row_length.0,
            current_cell_number: 0,
            cells_count: row_length.0 * column_length.0,
        }
    }
}

impl fmt::Debug for CellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "CellIter :: current_cell_number: {:?}, cells_count: {:?}",
               self.current_cell_number,
               self.cells_count)
    }
}

impl ExactSizeIterator for CellIter {} // default impl using size_hint()
impl Iterator for CellIter {
    type Item = Coordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let x = self.current_cell_number % self.row_length;
            let y = self.current_cell_number / self.row_length;
            self.current_cell_number += 1;
            Some(Coordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}

/// Yields the coordinates of one grid row at a time, top row first.
#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_index: usize,
    row_length: RowLength,
    column_length: ColumnLength,
}

impl RowIter {
    pub fn new(row_length: RowLength, column_length: ColumnLength) -> RowIter {
        RowIter {
            current_index: 0,
            row_length,
            column_length,
        }
    }
}

impl ExactSizeIterator for RowIter {}
impl Iterator for RowIter {
    type Item = Vec<Coordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let ColumnLength(rows_count) = self.column_length;
        if self.current_index < rows_count {
            let RowLength(length) = self.row_length;
            let y = self.current_index as u32;
            let coords = (0..length)
                .map(|x| Coordinate::new(x as u32, y))
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.column_length.0 - self.current_index;
        (lower_bound, Some(lower_bound))
    }
}
