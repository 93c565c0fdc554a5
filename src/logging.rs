use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Install(#[from] log::SetLoggerError),
}

/// Installs the global logger.
///
/// The terminal is in raw mode while the game runs, so records only go
/// somewhere useful when `log_file` is given; without it the filter defaults
/// to `off` unless `RUST_LOG` says otherwise.
pub fn init(log_file: Option<&Path>) -> Result<(), LoggingError> {
    let default_filter = if log_file.is_some() { "info" } else { "off" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));

    if let Some(path) = log_file {
        let file = File::create(path).map_err(|source| LoggingError::Open {
            path: path.to_owned(),
            source,
        })?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    log::debug!("logger ready");
    Ok(())
}
