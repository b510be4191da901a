//! Expansion of a logical maze into a grid of drawable pieces.
//!
//! Every logical cell (x, y) becomes a 2 * 2 block of render cells: the corner at (2x, 2y), the
//! north wall segment at (2x + 1, 2y), the west wall segment at (2x, 2y + 1) and the cell centre
//! at (2x + 1, 2y + 1). A trailing row and column hold the southern and eastern border, so a
//! `w` * `h` maze expands to `(2w + 1)` * `(2h + 1)` render cells.

use bitflags::bitflags;

use crate::cells::{CellRole, CompassPrimary, Coordinate};
use crate::grid::Grid;

/// The shape of the line junction drawn at a corner.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Junction {
    Horizontal,
    Vertical,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Lines to the left, right and up.
    TeeUp,
    /// Lines to the left, right and down.
    TeeDown,
    /// Lines up, down and to the left.
    TeeLeft,
    /// Lines up, down and to the right.
    TeeRight,
    Cross,
    /// Nothing to draw: no walls meet here, or only a single wall ends here.
    None,
}

impl Junction {
    /// Classify a corner from the wall segments that meet at it.
    pub fn from_segments(up: bool, down: bool, left: bool, right: bool) -> Junction {
        match (up, down, left, right) {
            (true, true, true, true) => Junction::Cross,
            (true, true, true, false) => Junction::TeeLeft,
            (true, true, false, true) => Junction::TeeRight,
            (false, true, true, true) => Junction::TeeDown,
            (true, false, true, true) => Junction::TeeUp,
            (false, false, true, true) => Junction::Horizontal,
            (true, true, false, false) => Junction::Vertical,
            (false, true, false, true) => Junction::TopLeft,
            (false, true, true, false) => Junction::TopRight,
            (true, false, false, true) => Junction::BottomLeft,
            (true, false, true, false) => Junction::BottomRight,
            _ => Junction::None,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum RenderCellKind {
    Corner(Junction),
    HorizontalWall,
    VerticalWall,
    Center,
}

bitflags! {
    /// What a render cell shows. A wall segment with no flags is a standing wall.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RenderFlags: u8 {
        const OPEN    = 0b0_0001;
        const BLOCKED = 0b0_0010;
        const PATH    = 0b0_0100;
        const ENTRY   = 0b0_1000;
        const EXIT    = 0b1_0000;
    }
}

impl From<CellRole> for RenderFlags {
    fn from(role: CellRole) -> RenderFlags {
        match role {
            CellRole::Open => RenderFlags::OPEN,
            CellRole::Blocked => RenderFlags::BLOCKED,
            CellRole::Path => RenderFlags::PATH,
            CellRole::Entry => RenderFlags::ENTRY,
            CellRole::Exit => RenderFlags::EXIT,
        }
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct RenderCell {
    pub kind: RenderCellKind,
    pub flags: RenderFlags,
}

impl RenderCell {
    pub fn new(kind: RenderCellKind, flags: RenderFlags) -> RenderCell {
        RenderCell { kind, flags }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderGrid {
    width: usize,
    height: usize,
    cells: Vec<RenderCell>,
}

impl RenderGrid {
    pub fn from_grid(grid: &Grid) -> RenderGrid {
        let width = 2 * grid.width() + 1;
        let height = 2 * grid.height() + 1;
        let expander = Expander { grid };

        let mut cells = Vec::with_capacity(width * height);
        for ry in 0..height {
            for rx in 0..width {
                cells.push(expander.render_cell(rx, ry));
            }
        }
        RenderGrid { width, height, cells }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&RenderCell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Render cells row by row, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[RenderCell]> + '_ {
        self.cells.chunks(self.width)
    }
}

/// Reads wall and role data for the render cells out of a logical grid.
struct Expander<'a> {
    grid: &'a Grid,
}

impl<'a> Expander<'a> {
    fn render_cell(&self, rx: usize, ry: usize) -> RenderCell {
        let (cx, cy) = ((rx / 2) as u32, (ry / 2) as u32);
        match (rx % 2, ry % 2) {
            (0, 0) => RenderCell::new(RenderCellKind::Corner(self.junction(cx, cy)), RenderFlags::empty()),
            (1, 0) => RenderCell::new(RenderCellKind::HorizontalWall, self.horizontal_flags(cx, cy)),
            (0, _) => RenderCell::new(RenderCellKind::VerticalWall, self.vertical_flags(cx, cy)),
            _ => {
                let role = self.grid.cell(Coordinate::new(cx, cy)).map_or(CellRole::Open, |c| c.role);
                RenderCell::new(RenderCellKind::Center, RenderFlags::from(role))
            }
        }
    }

    fn width(&self) -> u32 {
        self.grid.width() as u32
    }

    fn height(&self) -> u32 {
        self.grid.height() as u32
    }

    fn has_wall(&self, x: u32, y: u32, dir: CompassPrimary) -> bool {
        self.grid.cell(Coordinate::new(x, y)).map_or(true, |c| c.has_wall(dir))
    }

    /// The four segments meeting at corner (cx, cy), outer border included.
    fn junction(&self, cx: u32, cy: u32) -> Junction {
        let (w, h) = (self.width(), self.height());
        let on_vertical_border = cx == 0 || cx == w;
        let on_horizontal_border = cy == 0 || cy == h;

        let up = cy > 0 && (on_vertical_border || self.has_wall(cx, cy - 1, CompassPrimary::West));
        let down = cy < h && (on_vertical_border || self.has_wall(cx, cy, CompassPrimary::West));
        let left = cx > 0 && (on_horizontal_border || self.has_wall(cx - 1, cy, CompassPrimary::North));
        let right = cx < w && (on_horizontal_border || self.has_wall(cx, cy, CompassPrimary::North));
        Junction::from_segments(up, down, left, right)
    }

    /// Segment along the north side of cell (x, y); y == height is the southern border.
    fn horizontal_flags(&self, x: u32, y: u32) -> RenderFlags {
        if y == 0 || y == self.height() {
            return RenderFlags::empty();
        }
        let wall = self.has_wall(x, y, CompassPrimary::North);
        self.segment_flags(wall, Coordinate::new(x, y - 1), Coordinate::new(x, y))
    }

    /// Segment along the west side of cell (x, y); x == width is the eastern border.
    fn vertical_flags(&self, x: u32, y: u32) -> RenderFlags {
        if x == 0 || x == self.width() {
            return RenderFlags::empty();
        }
        let wall = self.has_wall(x, y, CompassPrimary::West);
        self.segment_flags(wall, Coordinate::new(x - 1, y), Coordinate::new(x, y))
    }

    fn segment_flags(&self, wall: bool, a: Coordinate, b: Coordinate) -> RenderFlags {
        let role = |coord| self.grid.cell(coord).map_or(CellRole::Open, |c| c.role);
        let (a_role, b_role) = (role(a), role(b));

        let mut flags = RenderFlags::empty();
        flags.set(RenderFlags::OPEN, !wall);
        flags.set(RenderFlags::BLOCKED, a_role == CellRole::Blocked && b_role == CellRole::Blocked);
        flags.set(RenderFlags::PATH, !wall && a_role.is_on_route() && b_role.is_on_route());
        flags
    }
}
