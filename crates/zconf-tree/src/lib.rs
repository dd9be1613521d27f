//! Labeled configuration tree with glob path queries
//!
//! Configuration files are parsed by a [`lens::Lens`] into a single tree
//! owned by a [`TreeHandle`]. The tree is then queried with absolute path
//! patterns:
//!
//! ```text
//! /files/etc/zypp/zypper.conf/main/*/showAlias
//! ```
//!
//! Load bookkeeping lives in the same tree under `/augeas`, so a parse
//! failure for a file is itself a node that can be queried.

mod dump;
pub mod error;
pub mod handle;
pub mod lens;
pub mod matches;
pub mod path;
pub mod tree;

pub use error::{Error, MatchError, Result};
pub use handle::{FILES_ROOT, META_ROOT, OpenFlags, SYSTEM_CONFIG_PATH, TreeHandle};
pub use lens::{Lens, LensError, ZYPPER};
pub use matches::{MatchSet, NodeRef};
pub use path::{PathSegment, parse_pattern};
pub use tree::{Node, Tree};
