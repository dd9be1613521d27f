//! Error types for zconf-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from zconf-core
    #[error(transparent)]
    Core(#[from] zconf_core::Error),

    /// The tracing subscriber could not be installed
    #[error("Failed to set up logging: {message}")]
    Logging { message: String },

    /// JSON output could not be produced
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
