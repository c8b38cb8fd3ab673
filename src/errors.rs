//! Typed error definitions for gitmig.
//! Covers the fatal configuration failures and user interruption; per-file
//! problems are logged where they happen and never surface here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitMigError {
    #[error("Source '{0}' is not a valid directory.")]
    SourceNotDirectory(PathBuf),

    #[error("Destination '{0}' exists but is not a directory.")]
    DestinationNotDirectory(PathBuf),

    #[error("Destination '{dest}' cannot be inside the source directory '{source_dir}'.")]
    DestinationInsideSource { dest: PathBuf, source_dir: PathBuf },

    #[error("Could not create destination directory '{path}': {reason}")]
    CreateDestination { path: PathBuf, reason: String },

    #[error("Invalid size format '{0}'. Use format like '10M', '500K', or '1G'.")]
    InvalidSize(String),

    #[error("Config file not found: {0}")]
    ConfigNotFound(PathBuf),

    #[error("Invalid config file {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Migration interrupted.")]
    Interrupted,
}

impl GitMigError {
    /// Process exit code for this failure.
    pub fn code(&self) -> i32 {
        match self {
            GitMigError::Interrupted => 130,
            _ => 1,
        }
    }
}
