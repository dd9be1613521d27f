//! Error types for zconf-fs

use std::path::PathBuf;

/// Result type for zconf-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in zconf-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path is not absolute: {path}")]
    NotAbsolute { path: String },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
