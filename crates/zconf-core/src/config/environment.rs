//! Process state the engine depends on

use std::path::PathBuf;

use zconf_fs::NormalizedPath;

/// Explicit process context for configuration loading.
///
/// The engine never reads environment variables itself; callers build an
/// `Environment` (usually with [`Environment::from_process`]) and pass it in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Filesystem root all configuration paths are resolved under
    pub root: PathBuf,

    /// Home directory of the invoking user, if known
    pub home: Option<NormalizedPath>,

    /// Working directory used to absolutize a relative explicit file
    pub cwd: Option<NormalizedPath>,
}

impl Environment {
    /// Context rooted at `root` with no home or working directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            home: None,
            cwd: None,
        }
    }

    /// Context of the running process: root `/`, `$HOME`, and `$PWD`
    /// (falling back to the process working directory).
    pub fn from_process() -> Self {
        let home = std::env::var_os("HOME")
            .filter(|v| !v.is_empty())
            .map(|v| NormalizedPath::new(PathBuf::from(v)));
        let cwd = std::env::var_os("PWD")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::current_dir().ok())
            .map(NormalizedPath::new);

        Self {
            root: PathBuf::from("/"),
            home,
            cwd,
        }
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_home(mut self, home: impl Into<NormalizedPath>) -> Self {
        self.home = Some(home.into());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<NormalizedPath>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}
