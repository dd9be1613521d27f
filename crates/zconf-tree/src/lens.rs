//! Lenses: parsers that map a file syntax onto tree nodes
//!
//! The `ZYpper` lens reads INI text such as:
//!
//! ```text
//! ## comment before any section
//! [main]
//! ## Show repo alias
//! showAlias = yes
//!
//! solver.onlyRequires = true
//! ```
//!
//! into
//!
//! ```text
//! #comment = "comment before any section"
//! main
//!   1
//!     #comment = "Show repo alias"
//!     showAlias = "yes"
//!   2
//!     solver.onlyRequires = "true"
//! ```
//!
//! Blank lines close an entry block, so the numbered level between a section
//! and its options groups an option with the comments documenting it.

use regex::Regex;
use std::sync::LazyLock;

use crate::path::is_valid_label;
use crate::tree::Node;

/// Label given to comment nodes.
pub const COMMENT_LABEL: &str = "#comment";

/// A parse failure, located by 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} on line {line}")]
pub struct LensError {
    pub line: usize,
    pub message: String,
}

impl LensError {
    fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// Trait for file-syntax parsers
pub trait Lens: Send + Sync {
    /// Lens identifier as used in `/augeas/load/<name>`
    fn name(&self) -> &str;

    /// Parse file content into the children of the file's tree node
    fn parse(&self, content: &str) -> Result<Vec<Node>, LensError>;
}

/// Section header, optionally followed by a comment.
static SECTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]*)\]\s*(?:[#;].*)?$").expect("Invalid section regex")
});

static COMMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[#;]+\s*(.*)$").expect("Invalid comment regex"));

static ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=]+?)\s*=\s*(.*)$").expect("Invalid entry regex"));

/// INI-style lens used for zypper and zypp configuration files.
#[derive(Debug)]
pub struct IniLens {
    name: &'static str,
}

/// Lens for `zypper.conf` files.
pub static ZYPPER: IniLens = IniLens { name: "ZYpper" };

/// Lens for the auxiliary `zypp.conf` file of the standard include table.
pub static ZYPP: IniLens = IniLens { name: "Zypp" };

/// Look up a built-in lens by name.
pub fn lens_by_name(name: &str) -> Option<&'static dyn Lens> {
    [&ZYPPER, &ZYPP]
        .into_iter()
        .find(|lens| lens.name == name)
        .map(|lens| lens as &'static dyn Lens)
}

impl Lens for IniLens {
    fn name(&self) -> &str {
        self.name
    }

    fn parse(&self, content: &str) -> Result<Vec<Node>, LensError> {
        let mut top: Vec<Node> = Vec::new();
        let mut section: Option<Node> = None;
        let mut block: Option<Node> = None;

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if line.is_empty() {
                close_block(&mut section, &mut block);
                continue;
            }

            if let Some(caps) = SECTION_REGEX.captures(line) {
                close_block(&mut section, &mut block);
                top.extend(section.take());

                let name = caps[1].trim();
                if !is_valid_label(name) {
                    return Err(LensError::new(
                        line_no,
                        format!("invalid section name {name:?}"),
                    ));
                }
                section = Some(Node::new(name));
                continue;
            }

            let entry = if let Some(caps) = COMMENT_REGEX.captures(line) {
                Node::with_value(COMMENT_LABEL, caps[1].trim_end())
            } else if let Some(caps) = ENTRY_REGEX.captures(line) {
                let key = &caps[1];
                if !is_valid_label(key) {
                    return Err(LensError::new(line_no, format!("invalid key {key:?}")));
                }
                Node::with_value(key, &caps[2])
            } else {
                return Err(LensError::new(
                    line_no,
                    "syntax error: expected '[section]', '# comment' or 'key = value'",
                ));
            };

            match section.as_mut() {
                Some(section) => block
                    .get_or_insert_with(|| Node::new((section.children.len() + 1).to_string()))
                    .children
                    .push(entry),
                None if entry.label == COMMENT_LABEL => top.push(entry),
                None => {
                    return Err(LensError::new(
                        line_no,
                        format!("entry {:?} outside of a section", entry.label),
                    ));
                }
            }
        }

        close_block(&mut section, &mut block);
        top.extend(section);
        Ok(top)
    }
}

fn close_block(section: &mut Option<Node>, block: &mut Option<Node>) {
    if let Some(section) = section.as_mut() {
        section.children.extend(block.take());
    }
}
