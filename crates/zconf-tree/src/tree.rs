//! In-memory labeled tree
//!
//! Every node carries a label and an optional value. Children are kept in
//! insertion order and labels may repeat among siblings, so a file with two
//! `[main]` sections keeps both, in file order.

use std::collections::HashMap;

use crate::error::MatchError;
use crate::path::{PathSegment, child_path, parse_pattern};

/// A single tree node with its ordered children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub label: String,
    pub value: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn with_value(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    /// First child carrying `label`.
    pub fn child(&self, label: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.label == label)
    }

    /// First child carrying `label`, created at the end if missing.
    pub fn child_or_insert(&mut self, label: &str) -> &mut Node {
        let idx = match self.children.iter().position(|c| c.label == label) {
            Some(idx) => idx,
            None => {
                self.children.push(Node::new(label));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }

    /// Remove every child carrying `label`.
    pub fn remove_children(&mut self, label: &str) {
        self.children.retain(|c| c.label != label);
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Node::subtree_len).sum::<usize>()
    }
}

/// A tree rooted at `/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    /// An empty tree: just the unlabeled root.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.root.subtree_len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }

    /// Walk `labels` from the root, creating missing nodes, and return the
    /// final node. Existing nodes are reused (first match per label).
    pub fn ensure<'a>(&mut self, labels: impl IntoIterator<Item = &'a str>) -> &mut Node {
        let mut node = &mut self.root;
        for label in labels {
            node = node.child_or_insert(label);
        }
        node
    }

    /// Node reached by following `labels` (first match per label).
    pub fn lookup<'a>(&self, labels: impl IntoIterator<Item = &'a str>) -> Option<&Node> {
        let mut node = &self.root;
        for label in labels {
            node = node.child(label)?;
        }
        Some(node)
    }

    /// Detach the subtree at `labels`. Returns `false` if it did not exist.
    pub fn remove(&mut self, labels: &[&str]) -> bool {
        let Some((last, parents)) = labels.split_last() else {
            return false;
        };
        let mut node = &mut self.root;
        for label in parents {
            match node.children.iter().position(|c| c.label == *label) {
                Some(idx) => node = &mut node.children[idx],
                None => return false,
            }
        }
        let before = node.children.len();
        node.remove_children(last);
        node.children.len() != before
    }

    /// Evaluate a pattern, returning every matching node with its
    /// unambiguous path, in depth-first document order.
    pub fn find(&self, pattern: &str) -> Result<Vec<(String, &Node)>, MatchError> {
        let segments = parse_pattern(pattern)?;
        let mut current: Vec<(String, &Node)> = vec![("/".to_string(), &self.root)];

        for segment in &segments {
            let mut next = Vec::new();
            for (path, node) in &current {
                collect_children(path, *node, segment, &mut next);
            }
            if next.is_empty() {
                return Ok(next);
            }
            current = next;
        }
        Ok(current)
    }
}

fn collect_children<'a>(
    parent_path: &str,
    parent: &'a Node,
    segment: &PathSegment,
    out: &mut Vec<(String, &'a Node)>,
) {
    let mut totals: HashMap<&str, usize> = HashMap::new();
    for child in &parent.children {
        *totals.entry(child.label.as_str()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(totals.len());
    for child in &parent.children {
        let label = child.label.as_str();
        let occurrence = seen.entry(label).or_default();
        *occurrence += 1;
        let occurrence = *occurrence;

        let selected = match segment {
            PathSegment::Wildcard => true,
            PathSegment::Label(wanted) => label == wanted,
            PathSegment::Indexed(wanted, n) => label == wanted && occurrence == *n,
        };
        if selected {
            let segment = if totals[label] > 1 {
                format!("{label}[{occurrence}]")
            } else {
                label.to_string()
            };
            out.push((child_path(parent_path, &segment), child));
        }
    }
}
