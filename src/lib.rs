//! **mazegen** generates rectangular mazes from a `KEY=VALUE` configuration, draws a "42" of
//! blocked cells into them, solves them and renders them as terminal text.

#![recursion_limit = "1024"]

pub mod cells;
pub mod config;
pub mod errors;
pub mod generation;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod output;
pub mod pathing;
pub mod pattern;
pub mod rendering;
pub mod units;
mod utils;
