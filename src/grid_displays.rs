use std::fmt;

use crate::grid::Grid;
use crate::rendering::{Junction, RenderCell, RenderCellKind, RenderFlags, RenderGrid};

const CELL_WIDTH: usize = 3;
const RESET: &str = "\x1b[0m";

/// Wall colours: white, yellow, cyan.
const FOREGROUND_COLOURS: [&str; 3] = ["\x1b[37m", "\x1b[33m", "\x1b[36m"];

/// Region colours, in order path, pattern, entry, exit: blue, magenta, green, red.
const BACKGROUND_COLOURS: [&str; 4] = ["\x1b[44m", "\x1b[45m", "\x1b[42m", "\x1b[41m"];

const WALL_LR: char = '━';
const WALL_UD: char = '┃';
const WALL_RD: char = '┏';
const WALL_LD: char = '┓';
const WALL_RU: char = '┗';
const WALL_LU: char = '┛';
const WALL_LRU: char = '┻';
const WALL_LRD: char = '┳';
const WALL_LUD: char = '┫';
const WALL_RUD: char = '┣';
const WALL_LRUD: char = '╋';

const PLAIN_BLOCKED: char = '▓';

/// How one render cell gets filled in.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
enum Fill {
    Wall,
    Open,
    Blocked,
    Path,
    Entry,
    Exit,
}

/// Turns a maze into terminal text: box drawing walls, three character wide cells and optionally
/// ANSI colours for the embedded pattern, the solution path and its endpoints.
#[derive(Clone, Debug)]
pub struct TextRenderer {
    foreground_colours: Vec<&'static str>,
    background_colours: Vec<&'static str>,
    include_path: bool,
    plain: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        TextRenderer::new()
    }
}

impl TextRenderer {
    /// A colour renderer that hides the solution path.
    pub fn new() -> TextRenderer {
        TextRenderer {
            foreground_colours: FOREGROUND_COLOURS.to_vec(),
            background_colours: BACKGROUND_COLOURS.to_vec(),
            include_path: false,
            plain: false,
        }
    }

    /// A renderer without escape codes: the pattern is shaded, the route is dotted and the
    /// endpoints are lettered S and E.
    pub fn plain() -> TextRenderer {
        TextRenderer { plain: true, ..TextRenderer::new() }
    }

    pub fn toggle_path(&mut self) {
        self.include_path = !self.include_path;
    }

    pub fn shows_path(&self) -> bool {
        self.include_path
    }

    /// Move every colour one place to the left in its palette.
    pub fn rotate_colours(&mut self) {
        self.foreground_colours.rotate_left(1);
        self.background_colours.rotate_left(1);
    }

    pub fn render(&self, grid: &Grid) -> String {
        let render_grid = RenderGrid::from_grid(grid);
        let mut output = String::new();
        for row in render_grid.rows() {
            for cell in row {
                output.push_str(&self.render_cell(cell));
            }
            output.push('\n');
        }
        output
    }

    pub fn render_cell(&self, cell: &RenderCell) -> String {
        match cell.kind {
            RenderCellKind::Corner(Junction::None) => String::from(" "),
            RenderCellKind::Corner(junction) => self.paint_wall(&junction_glyph(junction).to_string()),
            RenderCellKind::HorizontalWall => self.fill_text(self.fill(cell), WALL_LR, CELL_WIDTH),
            RenderCellKind::VerticalWall => self.fill_text(self.fill(cell), WALL_UD, 1),
            RenderCellKind::Center => self.fill_text(self.fill(cell), ' ', CELL_WIDTH),
        }
    }

    fn fill(&self, cell: &RenderCell) -> Fill {
        let flags = cell.flags;
        if flags.contains(RenderFlags::BLOCKED) {
            Fill::Blocked
        } else if flags.contains(RenderFlags::PATH) {
            if self.include_path { Fill::Path } else { Fill::Open }
        } else if flags.contains(RenderFlags::EXIT) {
            Fill::Exit
        } else if flags.contains(RenderFlags::ENTRY) {
            Fill::Entry
        } else if flags.contains(RenderFlags::OPEN) || cell.kind == RenderCellKind::Center {
            Fill::Open
        } else {
            Fill::Wall
        }
    }

    fn fill_text(&self, fill: Fill, wall_glyph: char, width: usize) -> String {
        let blank = " ".repeat(width);
        match fill {
            Fill::Wall => self.paint_wall(&wall_glyph.to_string().repeat(width)),
            Fill::Open => blank,
            _ if self.plain => plain_region(fill, width),
            Fill::Path => self.paint_region(0, &blank),
            Fill::Blocked => self.paint_region(1, &blank),
            Fill::Entry => self.paint_region(2, &blank),
            Fill::Exit => self.paint_region(3, &blank),
        }
    }

    fn paint_wall(&self, text: &str) -> String {
        if self.plain {
            text.to_owned()
        } else {
            format!("{}{}{}", self.foreground_colours[0], text, RESET)
        }
    }

    fn paint_region(&self, palette_index: usize, text: &str) -> String {
        format!("{}{}{}", self.background_colours[palette_index], text, RESET)
    }
}

fn junction_glyph(junction: Junction) -> char {
    match junction {
        Junction::Horizontal => WALL_LR,
        Junction::Vertical => WALL_UD,
        Junction::TopLeft => WALL_RD,
        Junction::TopRight => WALL_LD,
        Junction::BottomLeft => WALL_RU,
        Junction::BottomRight => WALL_LU,
        Junction::TeeUp => WALL_LRU,
        Junction::TeeDown => WALL_LRD,
        Junction::TeeLeft => WALL_LUD,
        Junction::TeeRight => WALL_RUD,
        Junction::Cross => WALL_LRUD,
        Junction::None => ' ',
    }
}

fn plain_region(fill: Fill, width: usize) -> String {
    let centred = |mark: char| format!("{:^width$}", mark, width = width);
    match fill {
        Fill::Blocked => PLAIN_BLOCKED.to_string().repeat(width),
        Fill::Path => centred('.'),
        Fill::Entry => centred('S'),
        Fill::Exit => centred('E'),
        Fill::Wall | Fill::Open => " ".repeat(width),
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", TextRenderer::plain().render(self))
    }
}
