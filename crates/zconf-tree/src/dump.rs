//! Diagnostic rendering of a tree
//!
//! One line per node, depth-first in native child order, indented two
//! spaces per level:
//!
//! ```text
//! /  -{}-  -""-
//!   /augeas  -{augeas}-  -""-
//!     /augeas/root  -{root}-  -"/"-
//! ```

use crate::error::Result;
use crate::handle::TreeHandle;
use crate::matches::NodeRef;

impl TreeHandle {
    /// Render the whole tree.
    pub fn dump(&self) -> Result<String> {
        self.dump_from("/")
    }

    /// Render every subtree matching `pattern`.
    pub fn dump_from(&self, pattern: &str) -> Result<String> {
        let mut out = String::new();
        render(self, pattern, 0, &mut out)?;
        Ok(out)
    }
}

fn render(handle: &TreeHandle, pattern: &str, depth: usize, out: &mut String) -> Result<()> {
    for node in &handle.match_paths(pattern)? {
        out.push_str(&format_line(&node, depth));
        out.push('\n');
        if node.child_count() > 0 {
            render(handle, &node.children_pattern(), depth + 1, out)?;
        }
    }
    Ok(())
}

fn format_line(node: &NodeRef<'_>, depth: usize) -> String {
    format!(
        "{}{}  -{{{}}}-  -\"{}\"-",
        "  ".repeat(depth),
        node.path(),
        node.label(),
        node.value_if_present().unwrap_or_default()
    )
}
