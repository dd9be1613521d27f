//! Tree path parsing
//!
//! Tree paths are absolute and slash-delimited. When used as a query
//! pattern a path may contain:
//!
//! - Exact labels: `/files/etc/zypp/zypper.conf/main`
//! - Wildcard segments matching any immediate child: `/files/*/main`
//! - Positional predicates (1-based) among same-labeled siblings: `incl[2]`
//!
//! # Examples
//!
//! ```
//! use zconf_tree::path::{parse_pattern, PathSegment};
//!
//! let segments = parse_pattern("/augeas/load/ZYpper/incl[2]").unwrap();
//! assert_eq!(segments, vec![
//!     PathSegment::Label("augeas".to_string()),
//!     PathSegment::Label("load".to_string()),
//!     PathSegment::Label("ZYpper".to_string()),
//!     PathSegment::Indexed("incl".to_string(), 2),
//! ]);
//!
//! let segments = parse_pattern("/files/*/main").unwrap();
//! assert_eq!(segments[1], PathSegment::Wildcard);
//! ```

use crate::error::MatchError;

/// Characters that may never appear inside a label.
pub const RESERVED_CHARS: &[char] = &['/', '[', ']', '*'];

/// One step of a tree path pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Every child carrying this label
    Label(String),
    /// The n-th (1-based) child carrying this label
    Indexed(String, usize),
    /// Every child, whatever its label
    Wildcard,
}

impl PathSegment {
    /// Render the segment back to its pattern form.
    pub fn as_pattern(&self) -> String {
        match self {
            Self::Label(label) => label.clone(),
            Self::Indexed(label, idx) => format!("{label}[{idx}]"),
            Self::Wildcard => "*".to_string(),
        }
    }
}

/// Check whether `label` can be stored in the tree and addressed by a path.
pub fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && !label.contains(RESERVED_CHARS)
}

/// Parse a path pattern into segments.
///
/// The root path `/` parses to an empty segment list.
pub fn parse_pattern(pattern: &str) -> Result<Vec<PathSegment>, MatchError> {
    let Some(body) = pattern.strip_prefix('/') else {
        return Err(MatchError::invalid(pattern, "path must be absolute"));
    };
    if body.is_empty() {
        return Ok(Vec::new());
    }

    body.split('/')
        .map(|raw| parse_segment(pattern, raw))
        .collect()
}

fn parse_segment(pattern: &str, raw: &str) -> Result<PathSegment, MatchError> {
    if raw.is_empty() {
        return Err(MatchError::invalid(pattern, "empty path segment"));
    }
    if raw == "*" {
        return Ok(PathSegment::Wildcard);
    }

    let (label, index) = match raw.find('[') {
        Some(open) => {
            let Some(inner) = raw[open + 1..].strip_suffix(']') else {
                return Err(MatchError::invalid(
                    pattern,
                    format!("unterminated predicate in {raw:?}"),
                ));
            };
            let index = inner
                .parse::<usize>()
                .ok()
                .filter(|idx| *idx > 0)
                .ok_or_else(|| {
                    MatchError::invalid(
                        pattern,
                        format!("predicate {inner:?} is not a positive index"),
                    )
                })?;
            (&raw[..open], Some(index))
        }
        None => (raw, None),
    };

    if !is_valid_label(label) {
        return Err(MatchError::invalid(pattern, format!("invalid label {label:?}")));
    }

    Ok(match index {
        Some(idx) => PathSegment::Indexed(label.to_string(), idx),
        None => PathSegment::Label(label.to_string()),
    })
}

/// Append a child segment to an already resolved path.
pub fn child_path(parent: &str, segment: &str) -> String {
    if parent == "/" {
        format!("/{segment}")
    } else {
        format!("{parent}/{segment}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        assert_eq!(parse_pattern("/").unwrap(), Vec::<PathSegment>::new());
    }

    #[test]
    fn test_parse_option_pattern() {
        let segments = parse_pattern("/files/etc/zypp/zypper.conf/main/*/showAlias").unwrap();
        assert_eq!(segments.len(), 7);
        assert_eq!(segments[4], PathSegment::Label("main".to_string()));
        assert_eq!(segments[5], PathSegment::Wildcard);
        assert_eq!(segments[6], PathSegment::Label("showAlias".to_string()));
    }

    #[test]
    fn test_parse_comment_label() {
        let segments = parse_pattern("/files/a/#comment[3]").unwrap();
        assert_eq!(segments[2], PathSegment::Indexed("#comment".to_string(), 3));
    }

    #[test]
    fn test_relative_path_rejected() {
        assert!(matches!(
            parse_pattern("files/etc"),
            Err(MatchError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_bad_predicates_rejected() {
        assert!(parse_pattern("/incl[0]").is_err());
        assert!(parse_pattern("/incl[x]").is_err());
        assert!(parse_pattern("/incl[2").is_err());
        assert!(parse_pattern("/in*cl").is_err());
        assert!(parse_pattern("/files//etc").is_err());
    }

    #[test]
    fn test_child_path() {
        assert_eq!(child_path("/", "files"), "/files");
        assert_eq!(child_path("/files", "etc"), "/files/etc");
    }
}
