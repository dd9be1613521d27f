//! The configuration engine façade

use serde::Serialize;
use zconf_tree::{OpenFlags, TreeHandle};

use super::environment::Environment;
use super::resolver::{OptionId, PathResolver};
use super::source::{Source, SourceKind, SourceSelector};
use crate::{Error, Result};

/// An option value together with the source that provided it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedOption {
    pub value: String,
    pub source: SourceKind,
    /// Tree path of the node the value was read from
    pub path: String,
}

/// Loaded configuration for one process.
///
/// All file I/O happens in [`ConfigEngine::open`]; lookups afterwards only
/// read the in-memory tree.
#[derive(Debug)]
pub struct ConfigEngine {
    handle: TreeHandle,
    sources: Vec<Source>,
}

impl ConfigEngine {
    /// Select, register and load the configuration sources.
    ///
    /// Fails on tree engine errors, and with [`Error::ConfigParse`] when no
    /// source loaded while at least one reported an error. Absent files are
    /// never an error.
    pub fn open(explicit_file: Option<&str>, env: &Environment) -> Result<Self> {
        tracing::debug!(file = ?explicit_file, root = %env.root.display(), "Reading zypper config");

        let mut handle = TreeHandle::open(&env.root, OpenFlags::NO_STDINC | OpenFlags::NO_LOAD)?;

        let selector = SourceSelector::new(env);
        let mut sources = selector.select(explicit_file);
        selector.register(&sources, &mut handle)?;
        handle.load()?;

        for source in &mut sources {
            source.probe(&handle)?;
        }

        if !sources.iter().any(|s| s.loaded) {
            // Lowest precedence first: global before user
            let message = sources
                .iter()
                .rev()
                .filter_map(|s| s.error.as_ref().map(|e| format!("{}: {}", s.file, e)))
                .collect::<Vec<_>>()
                .join("\n");
            if !message.is_empty() {
                tracing::error!(%message, "No configuration file could be parsed");
                return Err(Error::ConfigParse { message });
            }
        }

        for source in &sources {
            if let Some(error) = &source.error {
                tracing::error!(
                    kind = %source.kind,
                    file = %source.file,
                    %error,
                    "Ignoring malformed config file"
                );
            }
            tracing::info!(
                "{} conf read: {}",
                source.kind,
                if source.loaded { "yes" } else { "no" }
            );
        }

        Ok(Self { handle, sources })
    }

    /// Selected sources in precedence order, with their load outcome.
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// Value of `id` from the highest-precedence loaded source that has it,
    /// or an empty string.
    pub fn get_option(&self, id: &OptionId) -> String {
        self.lookup(id).map(|o| o.value).unwrap_or_default()
    }

    /// Like [`get_option`](Self::get_option) for a raw `section/option`
    /// string.
    pub fn get_option_str(&self, option: &str) -> Result<String> {
        let id = OptionId::parse(option).inspect_err(|_| {
            tracing::error!(option, "Invalid option");
        })?;
        Ok(self.get_option(&id))
    }

    /// Resolve `id` and report which source supplied the value.
    pub fn lookup(&self, id: &OptionId) -> Option<ResolvedOption> {
        for candidate in PathResolver::new(&self.sources).option_paths(id) {
            match self.first_match(&candidate.pattern) {
                Ok(Some((path, value))) => {
                    tracing::debug!(%path, %value, "Got option");
                    return Some(ResolvedOption {
                        value,
                        source: candidate.source,
                        path,
                    });
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::error!(
                        pattern = %candidate.pattern,
                        error = %e,
                        "Option lookup failed"
                    );
                }
            }
        }
        None
    }

    /// Value at an exact tree path.
    ///
    /// Several matching nodes are tolerated with a warning; the first in
    /// document order wins.
    pub fn get(&self, path: &str) -> Result<Option<String>> {
        Ok(self.first_match(path)?.map(|(_, value)| value))
    }

    fn first_match(&self, pattern: &str) -> Result<Option<(String, String)>> {
        let matches = self.handle.match_paths(pattern)?;
        if matches.len() > 1 {
            tracing::warn!(pattern, count = matches.len(), "Multiple matches, using the first");
        }
        let Some(node) = matches.first() else {
            return Ok(None);
        };
        let value = node.value_if_present().unwrap_or_default().to_string();
        Ok(Some((node.path().to_string(), value)))
    }

    /// Full rendering of the loaded tree, for diagnostics.
    pub fn dump(&self) -> String {
        match self.handle.dump() {
            Ok(dump) => dump,
            Err(e) => {
                tracing::error!(error = %e, "Cannot render configuration tree");
                String::new()
            }
        }
    }
}
