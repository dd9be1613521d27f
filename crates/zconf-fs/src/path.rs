//! Normalized path handling
//!
//! Configuration files are addressed by absolute, slash-delimited paths both
//! on disk and inside the tree (`/files/etc/zypp/zypper.conf`). Keeping one
//! canonical string form makes those two views line up exactly.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to forward slashes with `.`/`..` and repeated
/// separators resolved lexically.
///
/// Normalization never touches the filesystem; symlinks are not followed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// `..` never climbs above the root of an absolute path (`/../etc` is
    /// `/etc`); leading `..` segments of a relative path are kept (`a/../../b`
    /// is `../b`) so it can still be resolved against a working directory.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        let absolute = raw.starts_with('/');

        let mut parts: Vec<&str> = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => match parts.last() {
                    Some(&last) if last != ".." => {
                        parts.pop();
                    }
                    _ if absolute => {}
                    _ => parts.push(".."),
                },
                other => parts.push(other),
            }
        }

        let joined = parts.join("/");
        let inner = if absolute {
            format!("/{joined}")
        } else if joined.is_empty() && !raw.is_empty() {
            ".".to_string()
        } else {
            joined
        };
        Self { inner }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// True for the path built from an empty string.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    /// Join this path with a segment.
    pub fn join(&self, segment: &str) -> Self {
        Self::new(format!("{}/{}", self.inner, segment))
    }

    /// Make a relative path absolute by resolving it against `cwd`.
    ///
    /// Absolute paths are returned unchanged. Fails if the path is relative
    /// and `cwd` itself is not absolute.
    pub fn absolutize(&self, cwd: &NormalizedPath) -> Result<Self> {
        if self.is_absolute() {
            return Ok(self.clone());
        }
        if !cwd.is_absolute() {
            return Err(Error::NotAbsolute {
                path: cwd.inner.clone(),
            });
        }
        Ok(cwd.join(&self.inner))
    }

    /// Map this absolute path onto a filesystem root directory.
    ///
    /// `/etc/zypp/zypper.conf` under root `/tmp/sys` is
    /// `/tmp/sys/etc/zypp/zypper.conf`.
    pub fn under_root(&self, root: &Path) -> PathBuf {
        let relative = self.inner.trim_start_matches('/');
        if relative.is_empty() {
            root.to_path_buf()
        } else {
            root.join(relative)
        }
    }

    /// Iterate over the non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|s| !s.is_empty())
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
