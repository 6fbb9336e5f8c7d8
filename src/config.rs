use crate::consts;
use crate::game::{Direction, Grid, Rules};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

/// Program configuration read from a configuration file
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
pub(crate) struct Config {
    /// Size of the board
    #[serde(default)]
    pub(crate) grid: GridConfig,

    /// Letters to collect and speed curve
    #[serde(default)]
    pub(crate) rules: RulesConfig,

    /// Where to write log messages, if anywhere
    #[serde(default)]
    pub(crate) logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("letterquest").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read, if the file's contents
    /// could not be deserialized, or if the settings don't make a playable
    /// game.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        Config::parse(&content)
    }

    fn parse(content: &str) -> Result<Config, ConfigError> {
        let config = toml::from_str::<Config>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings that can't be checked one field at a time
    fn validate(&self) -> Result<(), ConfigError> {
        let needed = self.rules.sequence.len().saturating_add(2);
        if self.grid.as_grid().area() < needed {
            return Err(ConfigError::GridTooSmallForSequence {
                cols: self.grid.cols,
                rows: self.grid.rows,
                letters: self.rules.sequence.len(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawGridConfig")]
pub(crate) struct GridConfig {
    cols: u16,
    rows: u16,
}

impl GridConfig {
    pub(crate) fn as_grid(self) -> Grid {
        Grid::new(self.cols, self.rows)
    }
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            cols: consts::DEFAULT_COLS,
            rows: consts::DEFAULT_ROWS,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
struct RawGridConfig {
    cols: u16,
    rows: u16,
}

impl Default for RawGridConfig {
    fn default() -> RawGridConfig {
        RawGridConfig {
            cols: consts::DEFAULT_COLS,
            rows: consts::DEFAULT_ROWS,
        }
    }
}

impl TryFrom<RawGridConfig> for GridConfig {
    type Error = ConfigError;

    fn try_from(value: RawGridConfig) -> Result<GridConfig, ConfigError> {
        let RawGridConfig { cols, rows } = value;
        let max = consts::MAX_GRID_SIZE;
        if !(2..=max.width).contains(&cols) || !(2..=max.height).contains(&rows) {
            return Err(ConfigError::GridSize { cols, rows });
        }
        Ok(GridConfig { cols, rows })
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawRulesConfig")]
pub(crate) struct RulesConfig {
    sequence: Vec<char>,
    base_speed: NonZeroU32,
    length_divisor: NonZeroU32,
    start_direction: Direction,
}

impl RulesConfig {
    pub(crate) fn to_rules(&self) -> Rules {
        Rules {
            sequence: self.sequence.clone(),
            base_speed: self.base_speed,
            length_divisor: self.length_divisor,
            start_direction: self.start_direction,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> RulesConfig {
        let Rules {
            sequence,
            base_speed,
            length_divisor,
            start_direction,
        } = Rules::default();
        RulesConfig {
            sequence,
            base_speed,
            length_divisor,
            start_direction,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct RawRulesConfig {
    sequence: String,
    base_speed: NonZeroU32,
    length_divisor: NonZeroU32,
    start_direction: Direction,
}

impl Default for RawRulesConfig {
    fn default() -> RawRulesConfig {
        RawRulesConfig {
            sequence: String::from(consts::DEFAULT_SEQUENCE),
            base_speed: consts::BASE_SPEED,
            length_divisor: consts::LENGTH_DIVISOR,
            start_direction: Direction::Right,
        }
    }
}

impl TryFrom<RawRulesConfig> for RulesConfig {
    type Error = ConfigError;

    fn try_from(value: RawRulesConfig) -> Result<RulesConfig, ConfigError> {
        if let Some(c) = value
            .sequence
            .chars()
            .find(|&c| c.is_whitespace() || c.is_control() || c.width() != Some(1))
        {
            return Err(ConfigError::BadSymbol(c));
        }
        Ok(RulesConfig {
            sequence: value.sequence.chars().collect(),
            base_speed: value.base_speed,
            length_divisor: value.length_divisor,
            start_direction: value.start_direction,
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LoggingConfig {
    /// File to append log messages to.  Nothing is logged if this is unset,
    /// as the terminal is occupied by the game.
    pub(crate) file: Option<PathBuf>,

    /// Log filter in `env_logger` syntax, e.g., `"debug"`.  Overridden by the
    /// `RUST_LOG` environment variable.
    pub(crate) level: Option<String>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error(
        "grid size {cols}×{rows} is out of range; both sides must be at least 2, and at most {}×{}",
        consts::MAX_GRID_SIZE.width,
        consts::MAX_GRID_SIZE.height
    )]
    GridSize { cols: u16, rows: u16 },
    #[error("sequence symbols must each be one visible character one column wide; found {0:?}")]
    BadSymbol(char),
    #[error("a {cols}×{rows} grid is too small for a sequence of {letters} letters")]
    GridTooSmallForSequence { cols: u16, rows: u16, letters: usize },
}
