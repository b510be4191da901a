use error_chain::bail;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::errors::*;
use crate::generators;
use crate::grid::Grid;
use crate::pathing;
use crate::pattern::{self, Embedding};
use crate::units::{ColumnLength, RowLength};

/// Seed used when the configuration does not name one.
pub const DEFAULT_SEED: u64 = 1;

/// Builds solved mazes from a configuration.
///
/// One random number generator lives as long as the generator, so consecutive `generate` calls
/// give different mazes while the whole sequence is reproducible from the seed.
#[derive(Debug)]
pub struct MazeGenerator {
    config: Config,
    rng: StdRng,
}

impl MazeGenerator {
    pub fn new(config: Config) -> MazeGenerator {
        let rng = StdRng::seed_from_u64(config.seed.unwrap_or(DEFAULT_SEED));
        MazeGenerator { config, rng }
    }

    /// Restart the random sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Generate and solve one maze.
    ///
    /// The "42" pattern is drawn first when the maze is large enough, then passages are carved
    /// from the entry. Imperfect mazes are braided before the route from entry to exit is marked.
    pub fn generate(&mut self) -> Result<Grid> {
        self.config.validate()?;
        let Config { width, height, entry, exit, perfect, .. } = self.config;

        let mut grid = Grid::new(RowLength(width), ColumnLength(height));
        if let Embedding::Embedded(origin) = pattern::embed_pattern(&mut grid, &pattern::FORTY_TWO)? {
            let blocked = grid.blocked_cells();
            if blocked.contains(&entry) || blocked.contains(&exit) {
                bail!(ErrorKind::EntryExitInPattern(blocked));
            }
            log::debug!("Pattern at {} blocks {} cells", origin, blocked.len());
        }

        let carved = generators::carve_passages(&mut grid, entry, &mut self.rng)?;
        log::debug!("Perfect maze of {}x{} with {} passages", width, height, carved);

        if !perfect {
            let removed = generators::braid(&mut grid, &mut self.rng)?;
            log::debug!("Braided maze, {} walls removed", removed);
        }

        pathing::solve(&mut grid, entry, exit)?;
        log::info!("Generated {}x{} maze, route from {} to {} is {} cells long",
                   width, height, entry, exit, grid.path().len());
        Ok(grid)
    }
}
