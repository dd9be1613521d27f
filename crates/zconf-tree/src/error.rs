//! Error types for zconf-tree

use std::path::PathBuf;

/// Result type for zconf-tree operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in zconf-tree operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The engine could not be initialized
    #[error("Cannot initialize configuration tree at {root}: {reason}")]
    Init { root: PathBuf, reason: String },

    /// A load target was rejected at registration
    #[error("Cannot register {file} for lens {lens}: {reason}")]
    Register {
        lens: String,
        file: String,
        reason: String,
    },

    /// The load pass could not run at all
    #[error("Could not load configuration files: {reason}")]
    Load { reason: String },

    #[error(transparent)]
    Match(#[from] MatchError),

    /// A path expected to name exactly one node did not
    #[error("Bad path {path}")]
    BadPath { path: String },
}

/// Errors raised while evaluating a path pattern
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    #[error("Invalid path pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Multiple matches ({count}) for {path}")]
    Ambiguous { path: String, count: usize },
}

impl MatchError {
    pub fn invalid(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }
}
