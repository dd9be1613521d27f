//! [`TestSystem`] builder for configuration loading scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Home directory used by [`TestSystem::write_user`].
pub const DEFAULT_HOME: &str = "/home/tester";

/// A temporary directory standing in for the filesystem root.
///
/// Files are written at their absolute system paths beneath it, so
/// `/etc/zypp/zypper.conf` lands at `<root>/etc/zypp/zypper.conf`.
///
/// # Example
///
/// ```rust,no_run
/// use zconf_test_utils::TestSystem;
///
/// let system = TestSystem::new();
/// system.write_global("[main]\nshowAlias = no\n");
/// system.write_user("[main]\nshowAlias = yes\n");
/// system.assert_file_exists("/home/tester/.zypper.conf");
/// ```
pub struct TestSystem {
    temp_dir: TempDir,
}

impl Default for TestSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSystem {
    /// Create an empty root.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Host path of the absolute system path `path`.
    pub fn host_path(&self, path: &str) -> PathBuf {
        self.root().join(path.trim_start_matches('/'))
    }

    /// Write `content` at the absolute system path `path`, creating parents.
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.host_path(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Write `/etc/zypp/zypper.conf`.
    pub fn write_global(&self, content: &str) -> PathBuf {
        self.write_file("/etc/zypp/zypper.conf", content)
    }

    /// Write `.zypper.conf` in [`DEFAULT_HOME`].
    pub fn write_user(&self, content: &str) -> PathBuf {
        self.write_user_in(DEFAULT_HOME, content)
    }

    /// Write `.zypper.conf` in the given home directory.
    pub fn write_user_in(&self, home: &str, content: &str) -> PathBuf {
        self.write_file(&format!("{}/.zypper.conf", home.trim_end_matches('/')), content)
    }

    /// Create an empty directory at the absolute system path `path`.
    pub fn create_dir(&self, path: &str) -> PathBuf {
        let full_path = self.host_path(path);
        fs::create_dir_all(&full_path).unwrap();
        full_path
    }

    /// Assert that the absolute system path `path` exists under the root.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.host_path(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` still holds exactly `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or differs from `content`.
    pub fn assert_file_unchanged(&self, path: &str, content: &str) {
        let full_path = self.host_path(path);
        let actual = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert!(
            actual == content,
            "File {} was modified.\nExpected: {}\nActual: {}",
            full_path.display(),
            content,
            actual
        );
    }
}
