//! The decorative "42" drawn with blocked cells in the middle of large enough mazes.

use lazy_static::lazy_static;

use crate::cells::{CellRole, Coordinate};
use crate::grid::{CellLinkError, Grid};
use crate::units::{ColumnLength, RowLength};

/// Blocked cells of the 7 * 5 template, the "4" first then the "2".
const FORTY_TWO_BLOCKED: [(u32, u32); 20] = [
    (0, 0), (0, 1), (0, 2), (1, 2), (2, 0), (2, 1), (2, 2), (2, 3), (2, 4),
    (4, 0), (5, 0), (6, 0), (6, 1), (6, 2), (5, 2), (4, 2), (4, 3), (4, 4), (5, 4), (6, 4),
];

lazy_static! {
    pub static ref FORTY_TWO: Grid = {
        let mut template = Grid::new(RowLength(7), ColumnLength(5));
        for &(x, y) in FORTY_TWO_BLOCKED.iter() {
            if let Some(cell) = template.cell_mut(Coordinate::new(x, y)) {
                cell.role = CellRole::Blocked;
            }
        }
        template
    };
}

/// Where a template ended up, if anywhere.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Embedding {
    /// Top left corner of the template in the target grid.
    Embedded(Coordinate),
    /// The target grid is too small to leave a free border around the template.
    Skipped,
}

/// Copy `template` into the centre of `grid`, keeping at least one free cell around it.
pub fn embed_pattern(grid: &mut Grid, template: &Grid) -> Result<Embedding, CellLinkError> {
    if grid.width() < template.width() + 2 || grid.height() < template.height() + 2 {
        log::warn!("Maze size {}x{} doesn't allow drawing the {}x{} pattern.",
                   grid.width(), grid.height(), template.width(), template.height());
        return Ok(Embedding::Skipped);
    }

    let x = ((grid.width() - template.width()) / 2) as u32;
    let y = ((grid.height() - template.height()) / 2) as u32;
    grid.copy_region(template, x, y)?;
    log::debug!("Pattern embedded at ({}, {})", x, y);
    Ok(Embedding::Embedded(Coordinate::new(x, y)))
}
