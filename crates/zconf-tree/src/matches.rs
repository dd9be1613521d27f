//! Ordered match sets over tree paths
//!
//! A [`MatchSet`] owns the paths produced by one pattern query together with
//! the nodes they resolved to. Its elements are [`NodeRef`]s; reading a
//! node's label or value never re-evaluates its path. A set can be iterated
//! any number of times.

use crate::tree::Node;

/// The ordered result of one pattern query.
#[derive(Debug)]
pub struct MatchSet<'a> {
    paths: Vec<String>,
    nodes: Vec<&'a Node>,
}

impl<'a> MatchSet<'a> {
    pub(crate) fn new(found: Vec<(String, &'a Node)>) -> Self {
        let (paths, nodes) = found.into_iter().unzip();
        Self { paths, nodes }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Node at `idx`, or `None` past the end.
    pub fn get(&self, idx: usize) -> Option<NodeRef<'_>> {
        Some(NodeRef {
            path: self.paths.get(idx)?,
            node: *self.nodes.get(idx)?,
        })
    }

    pub fn first(&self) -> Option<NodeRef<'_>> {
        self.get(0)
    }

    /// Resolved paths, in match order.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            paths: self.paths.iter(),
            nodes: self.nodes.iter(),
        }
    }
}

impl<'s> IntoIterator for &'s MatchSet<'_> {
    type Item = NodeRef<'s>;
    type IntoIter = Iter<'s>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the nodes of a [`MatchSet`].
#[derive(Debug, Clone)]
pub struct Iter<'s> {
    paths: std::slice::Iter<'s, String>,
    nodes: std::slice::Iter<'s, &'s Node>,
}

impl<'s> Iterator for Iter<'s> {
    type Item = NodeRef<'s>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(NodeRef {
            path: self.paths.next()?,
            node: *self.nodes.next()?,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.paths.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

/// One matched node and its resolved path.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'s> {
    path: &'s str,
    node: &'s Node,
}

impl<'s> NodeRef<'s> {
    pub fn path(&self) -> &'s str {
        self.path
    }

    /// Label of the node, without any `[n]` predicate.
    pub fn label(&self) -> &'s str {
        &self.node.label
    }

    /// The node's value, if it carries one.
    pub fn value_if_present(&self) -> Option<&'s str> {
        self.node.value.as_deref()
    }

    /// Number of immediate children.
    pub fn child_count(&self) -> usize {
        self.node.children.len()
    }

    /// Pattern selecting every immediate child of this node.
    pub fn children_pattern(&self) -> String {
        crate::path::child_path(self.path, "*")
    }
}
