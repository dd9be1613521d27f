//! Configuration sources and their selection

use serde::Serialize;
use zconf_fs::NormalizedPath;
use zconf_tree::{FILES_ROOT, META_ROOT, SYSTEM_CONFIG_PATH, TreeHandle, ZYPPER, lens::Lens};

use super::environment::Environment;
use crate::Result;

/// File name of the per-user configuration inside the home directory.
pub const USER_CONFIG_NAME: &str = ".zypper.conf";

/// Where a source comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Explicit file supplied by the caller
    Custom,
    /// `<home>/.zypper.conf`
    User,
    /// `/etc/zypp/zypper.conf`
    Global,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Custom => "custom",
            Self::User => "user",
            Self::Global => "global",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One candidate configuration file and its load outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub kind: SourceKind,

    /// Absolute file path (relative to the engine root)
    #[serde(serialize_with = "serialize_path")]
    pub file: NormalizedPath,

    /// Whether the file produced a subtree
    pub loaded: bool,

    /// Parse or read error reported by the tree engine
    pub error: Option<String>,
}

fn serialize_path<S: serde::Serializer>(
    path: &NormalizedPath,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(path.as_str())
}

impl Source {
    pub fn new(kind: SourceKind, file: NormalizedPath) -> Self {
        Self {
            kind,
            file,
            loaded: false,
            error: None,
        }
    }

    /// Tree path the file's content is mounted at.
    pub fn root_path(&self) -> String {
        format!("/{FILES_ROOT}{}", self.file)
    }

    /// Tree path of the engine's error message for this file.
    pub fn error_message_path(&self) -> String {
        format!("/{META_ROOT}/{FILES_ROOT}{}/error/message", self.file)
    }

    /// Record the load outcome from the tree.
    pub fn probe(&mut self, handle: &TreeHandle) -> Result<()> {
        self.loaded = handle.exists(&self.root_path())?;
        self.error = handle
            .get(&self.error_message_path())?
            .filter(|message| !message.is_empty());
        Ok(())
    }
}

/// Chooses the sources that apply to one engine instance.
#[derive(Debug)]
pub struct SourceSelector<'a> {
    env: &'a Environment,
}

impl<'a> SourceSelector<'a> {
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }

    /// Sources in precedence order, highest first.
    ///
    /// An explicit file is honored only if it is non-empty and exists;
    /// otherwise the user (when a home directory is known) and global files
    /// are selected.
    pub fn select(&self, explicit: Option<&str>) -> Vec<Source> {
        if let Some(file) = explicit.and_then(|f| self.custom_file(f)) {
            tracing::debug!(file = %file, "Using custom config file");
            return vec![Source::new(SourceKind::Custom, file)];
        }

        let mut sources = Vec::with_capacity(2);
        match &self.env.home {
            Some(home) => {
                sources.push(Source::new(SourceKind::User, home.join(USER_CONFIG_NAME)))
            }
            None => {
                tracing::warn!("Cannot figure out user's home directory. Skipping user's config.")
            }
        }
        sources.push(Source::new(
            SourceKind::Global,
            NormalizedPath::new(SYSTEM_CONFIG_PATH),
        ));
        sources
    }

    fn custom_file(&self, explicit: &str) -> Option<NormalizedPath> {
        let requested = NormalizedPath::new(explicit);
        if requested.is_empty() {
            return None;
        }

        let absolute = match &self.env.cwd {
            Some(cwd) => requested.absolutize(cwd),
            None => requested.absolutize(&NormalizedPath::new("")),
        };
        let file = match absolute {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(file = explicit, error = %e, "Cannot resolve config file path");
                return None;
            }
        };

        if file.under_root(&self.env.root).exists() {
            Some(file)
        } else {
            tracing::warn!(file = %file, "Config file does not exist, using defaults");
            None
        }
    }

    /// Register the selected sources with the tree engine.
    ///
    /// A custom file replaces the engine's default include; the user file
    /// is appended to it; the global file is already included.
    pub fn register(&self, sources: &[Source], handle: &mut TreeHandle) -> Result<()> {
        for source in sources {
            match source.kind {
                SourceKind::Custom => handle.set_load_target(ZYPPER.name(), source.file.as_str())?,
                SourceKind::User => {
                    handle.register_load_target(ZYPPER.name(), source.file.as_str())?
                }
                SourceKind::Global => {}
            }
        }
        Ok(())
    }
}
