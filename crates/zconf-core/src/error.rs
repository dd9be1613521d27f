//! Error types for zconf-core

/// Result type for zconf-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in zconf-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every selected source failed to load and at least one reported why
    #[error("Error parsing zypper.conf:\n{message}")]
    ConfigParse { message: String },

    /// An option identifier that is not `section/option`
    #[error("Invalid option {option:?}: expected 'section/option'")]
    InvalidOptionFormat { option: String },

    // Transparent wrappers for underlying crate errors
    /// Tree engine error from zconf-tree
    #[error(transparent)]
    Tree(#[from] zconf_tree::Error),
}
