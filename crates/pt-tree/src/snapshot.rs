//! Serializable and printable views of a subtree.

use std::fmt;

use serde::Serialize;

use crate::tree::{Node, PathTree, Resource};

/// Owned copy of a subtree's structure, without assets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    /// Segment name (empty for the root).
    pub name: String,
    /// Node path without extension (e.g., "/blog/posts/hello").
    pub path: String,
    /// Format variants stored at this node.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<FormatSnapshot>,
    /// Child nodes in insertion order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

/// One format variant in a [`NodeSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FormatSnapshot {
    /// Extension with leading dot, or empty.
    pub extension: String,
    /// Full request path.
    #[serde(rename = "requestPath")]
    pub request_path: String,
}

impl<A> Node<'_, A> {
    /// Capture this subtree for serialization.
    #[must_use]
    pub fn snapshot(&self) -> NodeSnapshot {
        let path = self.path();
        let formats = self
            .formats()
            .iter()
            .map(|variant| Resource::new(*self, variant))
            .map(|resource| FormatSnapshot {
                extension: resource.extension().to_owned(),
                request_path: resource.request_path(),
            })
            .collect();

        NodeSnapshot {
            name: self.name().to_owned(),
            path,
            formats,
            children: self.children().map(|child| child.snapshot()).collect(),
        }
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let name = if self.is_root() { "/" } else { self.name() };
        write!(f, "{:indent$}{name}", "", indent = depth * 2)?;

        if !self.formats().is_empty() {
            let extensions: Vec<&str> = self
                .formats()
                .extensions()
                .map(|ext| if ext.is_empty() { "(bare)" } else { ext })
                .collect();
            write!(f, " [{}]", extensions.join(", "))?;
        }
        writeln!(f)?;

        for child in self.children() {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Indented dump of the subtree, one node per line.
///
/// ```text
/// /
///   blog [.html]
///     hello [.html, .json]
/// ```
impl<A> fmt::Display for Node<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

impl<A> fmt::Display for PathTree<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root(), f)
    }
}
