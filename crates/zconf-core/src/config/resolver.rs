//! Option identifiers and their tree path patterns

use std::str::FromStr;

use serde::Serialize;
use zconf_tree::path::is_valid_label;

use super::source::{Source, SourceKind};
use crate::{Error, Result};

/// A `section/option` identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OptionId {
    pub section: String,
    pub option: String,
}

impl OptionId {
    /// Parse `section/option`.
    ///
    /// Both parts must be non-empty and usable as tree labels.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || Error::InvalidOptionFormat {
            option: raw.to_string(),
        };

        let mut parts = raw.split('/');
        let (Some(section), Some(option), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if !is_valid_label(section) || !is_valid_label(option) {
            return Err(invalid());
        }

        Ok(Self {
            section: section.to_string(),
            option: option.to_string(),
        })
    }
}

impl FromStr for OptionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.section, self.option)
    }
}

/// A tree pattern for one option in one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionPath {
    pub source: SourceKind,
    pub pattern: String,
}

/// Turns option identifiers into tree patterns, in source precedence order.
#[derive(Debug)]
pub struct PathResolver<'a> {
    sources: &'a [Source],
}

impl<'a> PathResolver<'a> {
    /// `sources` must already be in precedence order.
    pub fn new(sources: &'a [Source]) -> Self {
        Self { sources }
    }

    /// One `<sourceRoot>/<section>/*/<option>` pattern per loaded source.
    ///
    /// The wildcard level is the entry block the lens groups options into.
    pub fn option_paths(&self, id: &OptionId) -> Vec<OptionPath> {
        self.sources
            .iter()
            .filter(|source| source.loaded)
            .map(|source| OptionPath {
                source: source.kind,
                pattern: format!("{}/{}/*/{}", source.root_path(), id.section, id.option),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use zconf_fs::NormalizedPath;

    #[rstest]
    #[case("main/showAlias", "main", "showAlias")]
    #[case("download/max_concurrent", "download", "max_concurrent")]
    #[case("solver/solver.onlyRequires", "solver", "solver.onlyRequires")]
    fn parse_valid_ids(#[case] raw: &str, #[case] section: &str, #[case] option: &str) {
        let id = OptionId::parse(raw).unwrap();
        assert_eq!(id.section, section);
        assert_eq!(id.option, option);
        assert_eq!(id.to_string(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("main")]
    #[case("/showAlias")]
    #[case("main/")]
    #[case("a/b/c")]
    #[case("main/*")]
    #[case("main/key[1]")]
    fn parse_rejects_malformed_ids(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<OptionId>(),
            Err(Error::InvalidOptionFormat { .. })
        ));
    }

    fn source(kind: SourceKind, file: &str, loaded: bool) -> Source {
        let mut source = Source::new(kind, NormalizedPath::new(file));
        source.loaded = loaded;
        source
    }

    #[test]
    fn option_paths_follow_precedence_and_skip_unloaded() {
        let sources = vec![
            source(SourceKind::User, "/home/u/.zypper.conf", true),
            source(SourceKind::Global, "/etc/zypp/zypper.conf", true),
        ];
        let id = OptionId::parse("main/showAlias").unwrap();

        let paths = PathResolver::new(&sources).option_paths(&id);
        assert_eq!(
            paths,
            vec![
                OptionPath {
                    source: SourceKind::User,
                    pattern: "/files/home/u/.zypper.conf/main/*/showAlias".to_string(),
                },
                OptionPath {
                    source: SourceKind::Global,
                    pattern: "/files/etc/zypp/zypper.conf/main/*/showAlias".to_string(),
                },
            ]
        );

        let sources = vec![
            source(SourceKind::User, "/home/u/.zypper.conf", false),
            source(SourceKind::Global, "/etc/zypp/zypper.conf", true),
        ];
        let paths = PathResolver::new(&sources).option_paths(&id);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].source, SourceKind::Global);
    }
}
