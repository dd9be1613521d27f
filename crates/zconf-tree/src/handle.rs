//! Tree engine handle
//!
//! [`TreeHandle`] is the single access point to a loaded configuration tree.
//! Load targets are recorded inside the tree itself, under
//! `/augeas/load/<lens>/incl`, and `load()` turns each of them into a
//! `/files<path>` subtree or an `/augeas/files<path>/error` record.

use std::collections::HashSet;
use std::ops::BitOr;
use std::path::{Path, PathBuf};

use zconf_fs::NormalizedPath;

use crate::error::{Error, MatchError, Result};
use crate::lens::{self, Lens};
use crate::matches::MatchSet;
use crate::path::is_valid_label;
use crate::tree::{Node, Tree};

/// Top-level node holding engine metadata.
pub const META_ROOT: &str = "augeas";

/// Top-level node holding loaded file content.
pub const FILES_ROOT: &str = "files";

/// The system-wide zypper configuration file, included by the `ZYpper`
/// module transform.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/zypp/zypper.conf";

/// Transforms of the standard include table, skipped with
/// [`OpenFlags::NO_STDINC`].
const STANDARD_INCLUDES: &[(&str, &str)] = &[("Zypp", "/etc/zypp/zypp.conf")];

/// Initialization flags for [`TreeHandle::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenFlags(u8);

impl OpenFlags {
    pub const NONE: Self = Self(0);
    /// Do not register the standard include table.
    pub const NO_STDINC: Self = Self(1);
    /// Do not load files while opening; the caller invokes `load()`.
    pub const NO_LOAD: Self = Self(1 << 1);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for OpenFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Owner of one configuration tree.
///
/// The tree is released when the handle is dropped; there is no way to
/// obtain a handle whose initialization failed.
#[derive(Debug)]
pub struct TreeHandle {
    tree: Tree,
    root: PathBuf,
}

impl TreeHandle {
    /// Initialize a tree whose registered files are read relative to the
    /// filesystem directory `root`.
    ///
    /// The `ZYpper` module transform including [`SYSTEM_CONFIG_PATH`] is
    /// always registered.
    pub fn open(root: impl AsRef<Path>, flags: OpenFlags) -> Result<Self> {
        let requested = root.as_ref();
        let root = zconf_fs::io::canonical_dir(requested).map_err(|e| Error::Init {
            root: requested.to_path_buf(),
            reason: e.to_string(),
        })?;
        tracing::debug!(root = %root.display(), ?flags, "Opening configuration tree");

        let mut handle = Self {
            tree: Tree::new(),
            root,
        };
        handle.tree.ensure([META_ROOT, "root"]).value = Some(handle.root.display().to_string());

        handle.add_include(lens::ZYPPER.name(), SYSTEM_CONFIG_PATH);
        if !flags.contains(OpenFlags::NO_STDINC) {
            for (lens, file) in STANDARD_INCLUDES {
                handle.add_include(lens, file);
            }
        }

        if !flags.contains(OpenFlags::NO_LOAD) {
            handle.load()?;
        }
        Ok(handle)
    }

    /// Filesystem directory registered files are resolved under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read-only access to the whole tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Append `file_path` to the files parsed with `lens`.
    pub fn register_load_target(&mut self, lens: &str, file_path: &str) -> Result<()> {
        let file = validate_target(lens, file_path)?;
        tracing::debug!(lens, file = %file, "Registering load target");
        self.add_include(lens, file.as_str());
        Ok(())
    }

    /// Make `file_path` the only file parsed with `lens`, replacing its
    /// default includes.
    pub fn set_load_target(&mut self, lens: &str, file_path: &str) -> Result<()> {
        let file = validate_target(lens, file_path)?;
        tracing::debug!(lens, file = %file, "Replacing load targets");
        self.tree
            .ensure([META_ROOT, "load", lens])
            .remove_children("incl");
        self.add_include(lens, file.as_str());
        Ok(())
    }

    fn add_include(&mut self, lens: &str, file: &str) {
        let transform = self.tree.ensure([META_ROOT, "load", lens]);
        if transform.child("lens").is_none() {
            transform
                .children
                .insert(0, Node::with_value("lens", format!("@{lens}")));
        }
        transform.children.push(Node::with_value("incl", file));
    }

    /// Parse every registered target.
    ///
    /// Previously loaded content is discarded first. Files that do not
    /// exist are skipped; unreadable or malformed files are recorded under
    /// `/augeas/files<path>/error` and contribute no content.
    pub fn load(&mut self) -> Result<()> {
        let transforms = self.transforms()?;

        self.tree.remove(&[FILES_ROOT]);
        self.tree.remove(&[META_ROOT, "files"]);

        let mut seen = HashSet::new();
        for (lens, files) in transforms {
            for file in files {
                if seen.insert(file.clone()) {
                    self.load_file(lens, &file);
                }
            }
        }
        Ok(())
    }

    /// Collect `(lens, files)` pairs from `/augeas/load`.
    fn transforms(&self) -> Result<Vec<(&'static dyn Lens, Vec<NormalizedPath>)>> {
        let Some(load) = self.tree.lookup([META_ROOT, "load"]) else {
            return Ok(Vec::new());
        };

        load.children
            .iter()
            .map(|transform| -> Result<(&'static dyn Lens, Vec<NormalizedPath>)> {
                let name = transform
                    .child("lens")
                    .and_then(|n| n.value.as_deref())
                    .map(|v| v.trim_start_matches('@'))
                    .unwrap_or(transform.label.as_str());
                let lens = lens::lens_by_name(name).ok_or_else(|| Error::Load {
                    reason: format!("unknown lens {name:?}"),
                })?;
                let files = transform
                    .children
                    .iter()
                    .filter(|n| n.label == "incl")
                    .filter_map(|n| n.value.as_deref())
                    .map(NormalizedPath::new)
                    .collect();
                Ok((lens, files))
            })
            .collect()
    }

    fn load_file(&mut self, lens: &dyn Lens, file: &NormalizedPath) {
        let native = file.under_root(&self.root);
        let meta_labels: Vec<&str> = [META_ROOT, FILES_ROOT]
            .into_iter()
            .chain(file.segments())
            .collect();

        let content = match zconf_fs::io::read_text_if_exists(&native) {
            Ok(Some(content)) => content,
            Ok(None) => {
                tracing::debug!(file = %file, "Skipping missing file");
                return;
            }
            Err(e) => {
                tracing::warn!(file = %file, error = %e, "Cannot read file");
                let meta = self.tree.ensure(meta_labels);
                let mut error = Node::with_value("error", "read_failed");
                error.children.push(Node::with_value("message", e.to_string()));
                meta.children.push(error);
                return;
            }
        };

        match lens.parse(&content) {
            Ok(children) => {
                let mount = format!("/{FILES_ROOT}{file}");
                tracing::debug!(file = %file, lens = lens.name(), "Loaded file");
                let meta = self.tree.ensure(meta_labels);
                meta.children.push(Node::with_value("path", mount));
                meta.children
                    .push(Node::with_value("lens", format!("@{}", lens.name())));

                let node = self
                    .tree
                    .ensure(std::iter::once(FILES_ROOT).chain(file.segments()));
                node.children = children;
            }
            Err(e) => {
                tracing::warn!(file = %file, line = e.line, message = %e.message, "Parse error");
                let meta = self.tree.ensure(meta_labels);
                let mut error = Node::with_value("error", "parse_failed");
                error
                    .children
                    .push(Node::with_value("message", e.to_string()));
                error
                    .children
                    .push(Node::with_value("line", e.line.to_string()));
                meta.children.push(error);
            }
        }
    }

    /// Value at an exact path.
    ///
    /// Returns `None` when nothing matches or the single match has no value.
    /// More than one match is reported as [`MatchError::Ambiguous`].
    pub fn get(&self, path: &str) -> Result<Option<String>> {
        let found = self.tree.find(path)?;
        match found.as_slice() {
            [] => Ok(None),
            [(_, node)] => Ok(node.value.clone()),
            _ => Err(MatchError::Ambiguous {
                path: path.to_string(),
                count: found.len(),
            }
            .into()),
        }
    }

    /// True if at least one node matches `path`.
    pub fn exists(&self, path: &str) -> Result<bool> {
        Ok(!self.tree.find(path)?.is_empty())
    }

    /// Every path matching `pattern`, in document order.
    pub fn match_paths(&self, pattern: &str) -> Result<MatchSet<'_>> {
        Ok(MatchSet::new(self.tree.find(pattern)?))
    }

    /// Label of the single node at `path`.
    pub fn label(&self, path: &str) -> Result<&str> {
        self.single(path).map(|node| node.label.as_str())
    }

    /// Value of the single node at `path`, if it has one.
    pub fn value_if_present(&self, path: &str) -> Result<Option<&str>> {
        self.single(path).map(|node| node.value.as_deref())
    }

    fn single(&self, path: &str) -> Result<&Node> {
        match self.tree.find(path).as_deref() {
            Ok([(_, node)]) => Ok(*node),
            _ => Err(Error::BadPath {
                path: path.to_string(),
            }),
        }
    }

    /// Release the tree now instead of at end of scope.
    pub fn close(self) {}
}

impl Drop for TreeHandle {
    fn drop(&mut self) {
        tracing::debug!(
            root = %self.root.display(),
            nodes = self.tree.len(),
            "Closing configuration tree"
        );
    }
}

fn validate_target(lens: &str, file_path: &str) -> Result<NormalizedPath> {
    let reject = |reason: &str| Error::Register {
        lens: lens.to_string(),
        file: file_path.to_string(),
        reason: reason.to_string(),
    };

    if !is_valid_label(lens) {
        return Err(reject("invalid lens name"));
    }
    if !file_path.starts_with('/') {
        return Err(reject("path must be absolute"));
    }
    if file_path.contains(['*', '[', ']']) {
        return Err(reject("path contains reserved characters"));
    }

    let file = NormalizedPath::new(file_path);
    if file.segments().next().is_none() {
        return Err(reject("path names no file"));
    }
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn open_fails_for_missing_root() {
        let temp = TempDir::new().unwrap();
        let result = TreeHandle::open(temp.path().join("nope"), OpenFlags::NO_LOAD);
        assert!(matches!(result, Err(Error::Init { .. })));
    }

    #[test]
    fn open_registers_module_transform() {
        let temp = TempDir::new().unwrap();
        let handle =
            TreeHandle::open(temp.path(), OpenFlags::NO_STDINC | OpenFlags::NO_LOAD).unwrap();
        assert_eq!(
            handle.get("/augeas/load/ZYpper/incl").unwrap().as_deref(),
            Some(SYSTEM_CONFIG_PATH)
        );
        assert_eq!(
            handle.get("/augeas/load/ZYpper/lens").unwrap().as_deref(),
            Some("@ZYpper")
        );
        assert!(!handle.exists("/augeas/load/Zypp").unwrap());
    }

    #[test]
    fn open_without_nostdinc_registers_standard_includes() {
        let temp = TempDir::new().unwrap();
        let handle = TreeHandle::open(temp.path(), OpenFlags::NO_LOAD).unwrap();
        assert_eq!(
            handle.get("/augeas/load/Zypp/incl").unwrap().as_deref(),
            Some("/etc/zypp/zypp.conf")
        );
    }

    #[test]
    fn flags_combine() {
        let flags = OpenFlags::NO_STDINC | OpenFlags::NO_LOAD;
        assert!(flags.contains(OpenFlags::NO_STDINC));
        assert!(flags.contains(OpenFlags::NO_LOAD));
        assert!(!OpenFlags::NONE.contains(OpenFlags::NO_LOAD));
    }

    #[test]
    fn register_rejects_bad_targets() {
        let temp = TempDir::new().unwrap();
        let mut handle = TreeHandle::open(temp.path(), OpenFlags::NO_LOAD).unwrap();

        for (lens, file) in [
            ("ZYpper", "relative.conf"),
            ("ZYpper", "/etc/zypp/*.conf"),
            ("ZYpper", "/etc/zypp[1]"),
            ("ZYpper", "/"),
            ("", "/etc/zypp/zypper.conf"),
            ("Zy/pper", "/etc/zypp/zypper.conf"),
        ] {
            assert!(
                matches!(
                    handle.register_load_target(lens, file),
                    Err(Error::Register { .. })
                ),
                "expected rejection for ({lens:?}, {file:?})"
            );
        }
    }

    #[test]
    fn register_appends_and_set_replaces() {
        let temp = TempDir::new().unwrap();
        let mut handle =
            TreeHandle::open(temp.path(), OpenFlags::NO_STDINC | OpenFlags::NO_LOAD).unwrap();

        handle
            .register_load_target("ZYpper", "/home/u/.zypper.conf")
            .unwrap();
        assert_eq!(
            handle.get("/augeas/load/ZYpper/incl[2]").unwrap().as_deref(),
            Some("/home/u/.zypper.conf")
        );

        handle.set_load_target("ZYpper", "/srv/custom.conf").unwrap();
        assert_eq!(
            handle.get("/augeas/load/ZYpper/incl").unwrap().as_deref(),
            Some("/srv/custom.conf")
        );
    }

    #[test]
    fn load_fails_for_unknown_lens() {
        let temp = TempDir::new().unwrap();
        let mut handle = TreeHandle::open(temp.path(), OpenFlags::NO_LOAD).unwrap();
        handle.register_load_target("Nonexistent", "/etc/x.conf").unwrap();
        assert!(matches!(handle.load(), Err(Error::Load { .. })));
    }

    #[test]
    fn get_reports_ambiguous_paths() {
        let temp = TempDir::new().unwrap();
        let mut handle = TreeHandle::open(temp.path(), OpenFlags::NO_LOAD).unwrap();
        handle.register_load_target("ZYpper", "/a.conf").unwrap();

        let result = handle.get("/augeas/load/ZYpper/incl");
        assert!(matches!(
            result,
            Err(Error::Match(MatchError::Ambiguous { count: 2, .. }))
        ));
    }

    #[test]
    fn label_and_value_need_a_single_node() {
        let temp = TempDir::new().unwrap();
        let handle = TreeHandle::open(temp.path(), OpenFlags::NO_LOAD).unwrap();
        assert_eq!(handle.label("/augeas/root").unwrap(), "root");
        assert!(handle.value_if_present("/augeas/root").unwrap().is_some());
        assert_eq!(handle.value_if_present("/augeas").unwrap(), None);
        assert!(matches!(
            handle.label("/augeas/missing"),
            Err(Error::BadPath { .. })
        ));
        assert!(matches!(handle.label("bad"), Err(Error::BadPath { .. })));
    }
}
