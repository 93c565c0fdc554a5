use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Anything that stops the binary from running a game.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
}
