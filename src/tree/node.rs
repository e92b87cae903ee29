//! `SecretNode` — a single folder/entry in the secret tree.
//!
//! A node carries a segment name, an insertion-ordered list of children,
//! and an optional secret value.  A node may hold both children and a
//! value at the same time (`work` can be a folder *and* have a password).
//!
//! Children are kept in a `Vec` rather than a map: insertion order is the
//! documented iteration order for rendering, and it survives the JSON
//! round-trip unchanged.

use serde::{Deserialize, Serialize};

use crate::errors::{KeyfoldError, Result};

/// Replacement token shown instead of a value when rendering securely.
pub const MASK: &str = "********";

/// One node of the secret tree.  The root node has an empty name and is
/// never matched against a path segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretNode {
    /// Segment identifier, unique among siblings.  Empty for the root.
    #[serde(default)]
    pub name: String,

    /// Child nodes, in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SecretNode>,

    /// The secret value, if this node actually holds one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl SecretNode {
    /// Create an empty root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Create an empty node with the given segment name.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Insert `value` at `path`, creating intermediate folders as needed.
    ///
    /// An existing value at the final node is overwritten.  Fails with
    /// `InvalidPath` when the path is empty or contains an empty segment.
    pub fn add(&mut self, path: &str, value: &str) -> Result<()> {
        let segments = split_path(path)?;

        let mut node = self;
        for segment in segments {
            let pos = match node.children.iter().position(|c| c.name == segment) {
                Some(i) => i,
                None => {
                    node.children.push(SecretNode::named(segment));
                    node.children.len() - 1
                }
            };
            node = &mut node.children[pos];
        }

        node.value = Some(value.to_string());
        Ok(())
    }

    /// Resolve `path` without creating anything.
    ///
    /// Returns `None` when any segment fails to resolve or the path is
    /// not well-formed.
    pub fn get(&self, path: &str) -> Option<&SecretNode> {
        let segments = split_path(path).ok()?;

        let mut node = self;
        for segment in segments {
            node = node.children.iter().find(|c| c.name == segment)?;
        }
        Some(node)
    }

    /// Remove the node at `path` from its parent, along with everything
    /// beneath it.
    ///
    /// Fails with `NotFound` when any segment fails to resolve.  The root
    /// itself cannot be deleted.
    pub fn delete(&mut self, path: &str) -> Result<()> {
        let segments = split_path(path).map_err(|_| KeyfoldError::NotFound(path.to_string()))?;

        let (last, parents) = segments
            .split_last()
            .ok_or_else(|| KeyfoldError::NotFound(path.to_string()))?;

        let mut node = self;
        for segment in parents {
            node = node
                .children
                .iter_mut()
                .find(|c| c.name == *segment)
                .ok_or_else(|| KeyfoldError::NotFound(path.to_string()))?;
        }

        let pos = node
            .children
            .iter()
            .position(|c| c.name == *last)
            .ok_or_else(|| KeyfoldError::NotFound(path.to_string()))?;
        node.children.remove(pos);
        Ok(())
    }

    /// Produce an indented listing of the whole tree.
    ///
    /// Values are replaced by [`MASK`] when `secure` is true.  Children
    /// are listed in insertion order.
    pub fn render(&self, secure: bool) -> String {
        let mut out = String::new();
        // The root node itself is anonymous; start with its children.
        for child in &self.children {
            child.render_into(&mut out, 0, secure);
        }
        out
    }

    fn render_into(&self, out: &mut String, depth: usize, secure: bool) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        out.push_str(&self.name);
        if let Some(ref value) = self.value {
            out.push_str(": ");
            out.push_str(if secure { MASK } else { value });
        }
        out.push('\n');

        for child in &self.children {
            child.render_into(out, depth + 1, secure);
        }
    }

    /// True when the tree holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.value.is_none()
    }
}

/// Split a slash-delimited path into segments.
///
/// Empty paths and empty segments (`"a//b"`, leading or trailing `/`) are
/// rejected — silently collapsing them would make `add` and `delete`
/// disagree about which node they touched.
fn split_path(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Err(KeyfoldError::InvalidPath("path is empty".to_string()));
    }

    let segments: Vec<&str> = path.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(KeyfoldError::InvalidPath(format!(
            "'{path}' contains an empty segment"
        )));
    }
    Ok(segments)
}
