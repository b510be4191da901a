use docopt::Docopt;
use log::LevelFilter;
use serde_derive::Deserialize;
use simple_logger::SimpleLogger;

use mazegen::{
    config::Config,
    generation::MazeGenerator,
    grid_displays::TextRenderer,
    output,
};

const USAGE: &str = "Mazegen

Usage:
    mazegen_driver -h | --help
    mazegen_driver <config-file> [--seed=<n>] [--show-path] [--plain] [--count=<n>] [--save-edges=<path>] [--verbose]

Options:
    -h --help              Show this screen.
    --seed=<n>             Seed for the random maze sequence. Overrides any SEED in the configuration file.
    --show-path            Highlight the route from the entry to the exit.
    --plain                Print without ANSI colours.
    --count=<n>            Number of mazes to generate and print, the colours change between mazes [default: 1].
    --save-edges=<path>    Serialize the first maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --verbose              Log every generation step to stderr.

The hex dump of the first maze is written to the OUTPUT_FILE named in the configuration file.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    arg_config_file: String,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_plain: bool,
    flag_count: usize,
    flag_save_edges: String,
    flag_verbose: bool,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazegen::errors::Error, ::mazegen::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            LoggerFailure(::log::SetLoggerError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = match Docopt::new(USAGE).and_then(|d| d.deserialize()) {
        Ok(args) => args,
        Err(e) if e.fatal() => return Err(e.into()),
        // --help
        Err(e) => e.exit(),
    };

    SimpleLogger::new()
        .without_timestamps()
        .with_level(if args.flag_verbose { LevelFilter::Debug } else { LevelFilter::Warn })
        .init()?;

    let mut config = Config::load(&args.arg_config_file)
        .chain_err(|| format!("Failed to load maze configuration {}", args.arg_config_file))?;
    if args.flag_seed.is_some() {
        config.seed = args.flag_seed;
    }

    let mut generator = MazeGenerator::new(config);
    let mut renderer = if args.flag_plain { TextRenderer::plain() } else { TextRenderer::default() };
    if args.flag_show_path {
        renderer.toggle_path();
    }

    for maze_number in 0..args.flag_count.max(1) {
        let maze = generator.generate()?;

        if maze_number == 0 {
            let config = generator.config();
            output::write_hex_dump(&maze, config.entry, config.exit, &config.output_file)
                .chain_err(|| format!("Failed to write maze to text file {}", config.output_file.display()))?;

            if !args.flag_save_edges.is_empty() {
                output::write_edge_list(&maze, &args.flag_save_edges)
                    .chain_err(|| format!("Failed to write maze graph to text file {}", args.flag_save_edges))?;
            }
        } else {
            renderer.rotate_colours();
        }

        println!("{}", renderer.render(&maze));
    }

    Ok(())
}
