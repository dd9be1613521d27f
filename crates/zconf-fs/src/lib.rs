//! Filesystem layer for zconf
//!
//! Provides slash-normalized paths and the small set of read operations the
//! tree engine needs to pull configuration files from disk.

pub mod error;
pub mod io;
pub mod path;

pub use error::{Error, Result};
pub use path::NormalizedPath;
