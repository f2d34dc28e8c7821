use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for config loading, DDL discovery and argument assembly.
///
/// Every failure aborts the operation that produced it; there are no
/// partial results and nothing is retried. A malformed filename or an
/// unreadable directory is an authoring error, not a transient condition.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid DDL filename: {0}")]
    InvalidFilename(String),

    #[error("failed to read DDL directory {}: {source}", .dir.display())]
    DirectoryRead {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("there are no DDL files to process in {}", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid connection URI: {0}")]
    Dsn(String),
}
