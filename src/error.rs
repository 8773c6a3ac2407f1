// ABOUTME: Application-wide error types for rsync-deploy.
// ABOUTME: Uses thiserror for ergonomic error handling.

use crate::command::SyncPass;
use crate::spawn::SpawnError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid rsync arguments {args:?}: {reason}")]
    InvalidArgs { args: String, reason: String },

    #[error("{pass} failed: {source}")]
    Sync {
        pass: SyncPass,
        #[source]
        source: SpawnError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
