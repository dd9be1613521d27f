//! Read access to configuration files

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Read text content from a file that may legitimately be absent.
///
/// Returns `Ok(None)` when nothing exists at `path`. Any other failure
/// (permissions, invalid UTF-8, a directory in the way) is an error.
pub fn read_text_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::trace!(?path, "File not present");
            Ok(None)
        }
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Canonicalize a directory that is used as a filesystem root.
///
/// Uses `dunce` so Windows paths do not come back in UNC form.
pub fn canonical_dir(path: &Path) -> Result<PathBuf> {
    let canonical = dunce::canonicalize(path).map_err(|e| Error::io(path, e))?;
    if !canonical.is_dir() {
        return Err(Error::NotADirectory { path: canonical });
    }
    Ok(canonical)
}
