//! Crate wide error type.
//!
//! Other modules `use crate::errors::*;` to get the `Error`, `ErrorKind`, `ResultExt` and `Result`
//! types that `error_chain!` creates.

use error_chain::error_chain;
use itertools::Itertools;

use crate::cells::Coordinate;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
        CellLink(crate::grid::CellLinkError);
    }

    errors {
        ConfigFileNotFound(path: String) {
            description("configuration file not found")
            display("Wrong config file. '{}' doesn't exist.", path)
        }
        WrongValue(value: String) {
            description("configuration value is not a number")
            display("Value '{}' is not a number.", value)
        }
        KeyValue(line: String) {
            description("configuration line is not a KEY=VALUE pair")
            display("Configuration file must contain one 'KEY=VALUE' pair per line. Please check '{}'.", line)
        }
        InvalidParameter(parameter: String, value: String, condition: String) {
            description("invalid configuration parameter")
            display("{} with value {} not valid. Parameter must be {}.", parameter, value, condition)
        }
        Dimensions(parameter: String, value: i64) {
            description("maze dimension too small")
            display("Maze {} can't be {}, must be at least 2.", parameter, value)
        }
        PointBound(parameter: String, value: String) {
            description("coordinate outside of the maze")
            display("{} not valid. {} must be inside the maze bounds.", parameter, value)
        }
        EntryExitIdentical(entry: Coordinate, exit: Coordinate) {
            description("entry and exit are the same cell")
            display("Invalid entry {} and exit {}. Points must be different.", entry, exit)
        }
        MandatoryKey(key: String) {
            description("mandatory configuration key missing")
            display("Missing mandatory key '{}' in configuration file.", key)
        }
        EntryExitInPattern(blocked: Vec<Coordinate>) {
            description("entry or exit inside the embedded pattern")
            display("Entry/exit in '42' pattern. For this maze, entry/exit points can't be any of these coordinates: [{}]",
                    blocked.iter().join(", "))
        }
        ExitUnreachable(entry: Coordinate, exit: Coordinate) {
            description("no route from entry to exit")
            display("Exit {} can't be reached from entry {}.", exit, entry)
        }
    }
}
