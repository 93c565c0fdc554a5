use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use serde::Deserialize;
use thiserror::Error;

use crate::board::Cell;
use crate::input::Direction;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default board edge length in cells.
pub const DEFAULT_BOARD_SIZE: u16 = 10;

/// Default tick interval in milliseconds.
pub const DEFAULT_TICK_PERIOD_MS: u64 = 100;

/// Default number of cells in a freshly started snake.
pub const DEFAULT_INITIAL_LENGTH: u16 = 4;

/// Default row the snake starts on.
pub const DEFAULT_START_ROW: u16 = 0;

/// Direction every game starts in.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Poll timeout while no game timer is armed.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Glyph pair painted for one snake cell (cells are two columns wide).
pub const GLYPH_SNAKE: &str = "██";

/// Glyph pair painted for food.
pub const GLYPH_FOOD: &str = "()";

/// Glyph pair painted for an empty cell.
pub const GLYPH_EMPTY: &str = " ·";

pub const COLOR_SNAKE: Color = Color::Green;
pub const COLOR_FOOD: Color = Color::Red;
pub const COLOR_EMPTY: Color = Color::DarkGray;
pub const COLOR_BORDER: Color = Color::White;
pub const COLOR_SCORE: Color = Color::Yellow;
pub const COLOR_MUTED: Color = Color::DarkGray;

/// Failure to produce a usable [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Settings that shape a game. Every field may be omitted from the file.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub board_size: u16,
    pub tick_period_ms: u64,
    pub initial_length: u16,
    pub start_row: u16,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            initial_length: DEFAULT_INITIAL_LENGTH,
            start_row: DEFAULT_START_ROW,
        }
    }
}

impl GameConfig {
    /// Loads the config from `path`, or from the platform config directory
    /// when `path` is `None`. A missing default file yields the defaults; a
    /// missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        serde_json::from_str::<Self>(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    /// Checks that a game can be set up from these settings.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.board_size < 2 {
            return Err(invalid("board_size", "must be at least 2"));
        }
        if self.tick_period_ms == 0 {
            return Err(invalid("tick_period_ms", "must be at least 1"));
        }
        if self.initial_length == 0 || self.initial_length > self.board_size {
            return Err(invalid(
                "initial_length",
                format!("must be between 1 and {}", self.board_size),
            ));
        }
        if self.start_row >= self.board_size {
            return Err(invalid(
                "start_row",
                format!("must be below {}", self.board_size),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Cells of a fresh snake, tail first: `start_row`, columns
    /// `0..initial_length`.
    pub fn initial_snake(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.initial_length).map(|col| Cell::new(self.start_row, col))
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Returns the platform-correct config file path.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}
