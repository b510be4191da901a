//! `KEY=VALUE` maze configuration files.
//!
//! ```text
//! WIDTH=20
//! HEIGHT=15
//! ENTRY=0,0
//! EXIT=19,14
//! OUTPUT_FILE=maze.txt
//! PERFECT=True
//! SEED=42        # optional
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use error_chain::bail;
use itertools::Itertools;

use crate::cells::Coordinate;
use crate::errors::*;
use crate::utils::{self, FnvHashMap};

/// WIDTH, HEIGHT, ENTRY, EXIT, OUTPUT_FILE, PERFECT and SEED.
const KEYS_COUNT: usize = 7;
const MIN_SIDE: i64 = 2;

/// A validated maze configuration. Entry and exit are distinct and inside the maze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub entry: Coordinate,
    pub exit: Coordinate,
    pub output_file: PathBuf,
    pub perfect: bool,
    pub seed: Option<u64>,
}

impl Config {
    pub fn new(width: i64,
               height: i64,
               entry: (i64, i64),
               exit: (i64, i64),
               output_file: PathBuf,
               perfect: bool,
               seed: Option<u64>)
               -> Result<Config> {
        let width_u32 = side_length("WIDTH", width)?;
        let height_u32 = side_length("HEIGHT", height)?;
        let config = Config {
            width: width_u32 as usize,
            height: height_u32 as usize,
            entry: inside_maze("ENTRY", entry, width_u32, height_u32)?,
            exit: inside_maze("EXIT", exit, width_u32, height_u32)?,
            output_file,
            perfect,
            seed,
        };
        config.validate()?;
        Ok(config)
    }

    /// Re-check the rules `new` enforces, for configurations assembled field by field.
    pub fn validate(&self) -> Result<()> {
        for &(name, side) in &[("WIDTH", self.width), ("HEIGHT", self.height)] {
            if side < MIN_SIDE as usize {
                bail!(ErrorKind::Dimensions(name.to_owned(), side as i64));
            }
        }
        for &(name, point) in &[("ENTRY", self.entry), ("EXIT", self.exit)] {
            if point.x as usize >= self.width || point.y as usize >= self.height {
                bail!(ErrorKind::PointBound(name.to_owned(), point.to_string()));
            }
        }
        if self.entry == self.exit {
            bail!(ErrorKind::EntryExitIdentical(self.entry, self.exit));
        }
        if self.output_file.extension().map_or(true, |ext| ext != "txt") {
            bail!(ErrorKind::InvalidParameter("OUTPUT_FILE".to_owned(),
                                              self.output_file.display().to_string(),
                                              "of '.txt' extension".to_owned()));
        }
        Ok(())
    }

    /// Parse the text of a configuration file.
    ///
    /// Blank lines and `#` comments are skipped, keys and values trimmed, unknown keys ignored and
    /// a repeated key keeps its last value.
    pub fn parse(text: &str) -> Result<Config> {
        let data = key_values(text)?;

        let width = parse_number(mandatory(&data, "WIDTH")?)?;
        let height = parse_number(mandatory(&data, "HEIGHT")?)?;
        let entry = parse_coordinate("ENTRY", mandatory(&data, "ENTRY")?)?;
        let exit = parse_coordinate("EXIT", mandatory(&data, "EXIT")?)?;
        let output_file = PathBuf::from(mandatory(&data, "OUTPUT_FILE")?);
        let perfect = parse_bool("PERFECT", mandatory(&data, "PERFECT")?)?;
        // negative seeds are accepted, their bits are reused as the unsigned seed
        let seed = match data.get("SEED") {
            Some(seed) => Some(parse_number(seed)? as u64),
            None => None,
        };

        Config::new(width, height, entry, exit, output_file, perfect, seed)
    }

    pub fn load<P: AsRef<Path>>(file_path: P) -> Result<Config> {
        let file_path = file_path.as_ref();
        if !file_path.is_file() {
            bail!(ErrorKind::ConfigFileNotFound(file_path.display().to_string()));
        }
        let text = fs::read_to_string(file_path)?;
        let config = Config::parse(&text)?;
        log::debug!("Loaded configuration from {}: {:?}", file_path.display(), config);
        Ok(config)
    }
}

fn key_values(text: &str) -> Result<FnvHashMap<String, String>> {
    let mut data = utils::fnv_hashmap(KEYS_COUNT);
    for line in text.lines() {
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let (key, value) = content.split('=')
            .collect_tuple()
            .ok_or_else(|| ErrorKind::KeyValue(content.to_owned()))?;
        let _ = data.insert(key.trim().to_owned(), value.trim().to_owned());
    }
    Ok(data)
}

fn mandatory<'a>(data: &'a FnvHashMap<String, String>, key: &str) -> Result<&'a str> {
    data.get(key)
        .map(String::as_str)
        .ok_or_else(|| ErrorKind::MandatoryKey(key.to_owned()).into())
}

fn parse_number(value: &str) -> Result<i64> {
    value.trim()
        .parse::<i64>()
        .map_err(|_| ErrorKind::WrongValue(value.to_owned()).into())
}

fn parse_coordinate(parameter: &str, value: &str) -> Result<(i64, i64)> {
    let (x, y) = value.split(',').collect_tuple().ok_or_else(|| {
        ErrorKind::InvalidParameter(parameter.to_owned(), value.to_owned(), "in (x,y) format".to_owned())
    })?;
    Ok((parse_number(x)?, parse_number(y)?))
}

fn parse_bool(parameter: &str, value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        bail!(ErrorKind::InvalidParameter(parameter.to_owned(), value.to_owned(), "True or False".to_owned()))
    }
}

fn side_length(parameter: &str, value: i64) -> Result<u32> {
    if value < MIN_SIDE {
        bail!(ErrorKind::Dimensions(parameter.to_owned(), value));
    }
    u32::try_from(value).map_err(|_| {
        ErrorKind::InvalidParameter(parameter.to_owned(), value.to_string(), format!("at most {}", u32::MAX)).into()
    })
}

fn inside_maze(parameter: &str, (x, y): (i64, i64), width: u32, height: u32) -> Result<Coordinate> {
    match (u32::try_from(x), u32::try_from(y)) {
        (Ok(x), Ok(y)) if x < width && y < height => Ok(Coordinate::new(x, y)),
        _ => bail!(ErrorKind::PointBound(parameter.to_owned(), format!("({}, {})", x, y))),
    }
}


#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    const VALID: &str = "\
WIDTH=20
HEIGHT=15
ENTRY=0,0
EXIT=19,14
OUTPUT_FILE=maze.txt
PERFECT=True
";

    fn with_line(key: &str, value: &str) -> String {
        VALID.lines()
            .map(|line| if line.starts_with(&format!("{}=", key)) {
                format!("{}={}", key, value)
            } else {
                line.to_owned()
            })
            .chain(if VALID.contains(&format!("{}=", key)) { None } else { Some(format!("{}={}", key, value)) })
            .join("\n")
    }

    fn without_key(key: &str) -> String {
        VALID.lines().filter(|line| !line.starts_with(key)).join("\n")
    }

    fn error_text(text: &str) -> String {
        match Config::parse(text) {
            Ok(config) => panic!("expected an error, parsed {:?}", config),
            Err(e) => e.to_string(),
        }
    }

    #[test]
    fn valid_config() {
        let expected = Config {
            width: 20,
            height: 15,
            entry: Coordinate::new(0, 0),
            exit: Coordinate::new(19, 14),
            output_file: PathBuf::from("maze.txt"),
            perfect: true,
            seed: None,
        };
        assert_eq!(Config::parse(VALID).unwrap(), expected);
        assert_eq!(Config::parse(&with_line("SEED", "1")).unwrap(), Config { seed: Some(1), ..expected });
    }

    #[test]
    fn comments_blank_lines_and_spacing() {
        let text = "# a maze\n\n WIDTH = 4 # columns\nHEIGHT=3\nENTRY= 0, 0\nEXIT=3,2\n\
                    OUTPUT_FILE=out.txt\nPERFECT=false\nCOLOUR=blue\nWIDTH=5\n";
        let config = Config::parse(text).unwrap();
        assert_eq!(config.width, 5);
        assert_eq!(config.height, 3);
        assert_eq!(config.exit, Coordinate::new(3, 2));
        assert!(!config.perfect);
    }

    #[test]
    fn invalid_key_value() {
        assert_eq!(error_text(&with_line("WIDTH", "3=1")),
                   "Configuration file must contain one 'KEY=VALUE' pair per line. Please check 'WIDTH=3=1'.");
        assert_eq!(error_text(&format!("{}JUSTAKEY\n", VALID)),
                   "Configuration file must contain one 'KEY=VALUE' pair per line. Please check 'JUSTAKEY'.");
    }

    #[test]
    fn invalid_dimensions() {
        assert_eq!(error_text(&with_line("WIDTH", "a")), "Value 'a' is not a number.");
        assert_eq!(error_text(&with_line("WIDTH", "-1")), "Maze WIDTH can't be -1, must be at least 2.");
        assert_eq!(error_text(&with_line("WIDTH", "1")), "Maze WIDTH can't be 1, must be at least 2.");
        assert_eq!(error_text(&with_line("HEIGHT", "abc")), "Value 'abc' is not a number.");
        assert_eq!(error_text(&with_line("HEIGHT", "0")), "Maze HEIGHT can't be 0, must be at least 2.");
    }

    #[test]
    fn invalid_entry() {
        let cases = [
            ("k", "ENTRY with value k not valid. Parameter must be in (x,y) format."),
            ("4", "ENTRY with value 4 not valid. Parameter must be in (x,y) format."),
            ("a,1", "Value 'a' is not a number."),
            ("-1,1", "ENTRY not valid. (-1, 1) must be inside the maze bounds."),
            ("1,-1", "ENTRY not valid. (1, -1) must be inside the maze bounds."),
            ("20,10", "ENTRY not valid. (20, 10) must be inside the maze bounds."),
            ("10,15", "ENTRY not valid. (10, 15) must be inside the maze bounds."),
            ("19,14", "Invalid entry (19, 14) and exit (19, 14). Points must be different."),
        ];
        for &(entry, expected) in &cases {
            assert_eq!(error_text(&with_line("ENTRY", entry)), expected);
        }
    }

    #[test]
    fn invalid_exit() {
        assert_eq!(error_text(&with_line("EXIT", "4")),
                   "EXIT with value 4 not valid. Parameter must be in (x,y) format.");
        assert_eq!(error_text(&with_line("EXIT", "20,10")),
                   "EXIT not valid. (20, 10) must be inside the maze bounds.");
        assert_eq!(error_text(&with_line("EXIT", "0,0")),
                   "Invalid entry (0, 0) and exit (0, 0). Points must be different.");
    }

    #[test]
    fn invalid_output_file_and_perfect() {
        assert_eq!(error_text(&with_line("OUTPUT_FILE", "maze.xls")),
                   "OUTPUT_FILE with value maze.xls not valid. Parameter must be of '.txt' extension.");
        for perfect in &["Maybe", "0", "Tru"] {
            assert_eq!(error_text(&with_line("PERFECT", perfect)),
                       format!("PERFECT with value {} not valid. Parameter must be True or False.", perfect));
        }
        assert!(Config::parse(&with_line("PERFECT", "TRUE")).unwrap().perfect);
    }

    #[test]
    fn missing_keys_and_bad_seeds() {
        assert_eq!(error_text(&without_key("WIDTH")), "Missing mandatory key 'WIDTH' in configuration file.");
        assert_eq!(error_text(&without_key("PERFECT")), "Missing mandatory key 'PERFECT' in configuration file.");
        assert_eq!(error_text(&with_line("SEED", "a")), "Value 'a' is not a number.");
        assert_eq!(error_text(&with_line("SEED", "4.5")), "Value '4.5' is not a number.");
    }

    #[test]
    fn negative_seed() {
        let negative = Config::parse(&with_line("SEED", "-4")).unwrap();
        assert_eq!(negative.seed, Some(-4i64 as u64));
        assert_ne!(negative.seed, Config::parse(&with_line("SEED", "4")).unwrap().seed);
    }

    #[test]
    fn validating_assembled_configs() {
        let mut config = Config::parse(VALID).unwrap();
        assert!(config.validate().is_ok());
        config.exit = Coordinate::new(20, 0);
        assert!(config.validate().is_err());
        config.exit = Coordinate::new(0, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn loading_files() {
        let missing = env::temp_dir().join("mazegen_missing_config.txt");
        match Config::load(&missing) {
            Err(Error(ErrorKind::ConfigFileNotFound(path), _)) => assert_eq!(path, missing.display().to_string()),
            other => panic!("expected ConfigFileNotFound, got {:?}", other),
        }

        let config_path = env::temp_dir().join(format!("mazegen_config_{}.txt", std::process::id()));
        fs::write(&config_path, VALID).unwrap();
        assert_eq!(Config::load(&config_path).unwrap(), Config::parse(VALID).unwrap());
        fs::remove_file(config_path).unwrap();
    }
}
