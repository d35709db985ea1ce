//! Table-of-contents tree owned by the outline model.
//!
//! Consumers treat the tree as read-only. Node ids are expected to be
//! unique but nothing enforces it.

use serde::{Deserialize, Serialize};

use crate::error::{LecternError, Result};

/// A single table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Section identifier the document view reports on relocation.
    pub id: String,
    /// Display label.
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a leaf node.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style child attachment.
    pub fn with_children(mut self, children: Vec<OutlineNode>) -> Self {
        self.children = children;
        self
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// Index path from a top-level entry down to a node.
///
/// `[2, 0]` is the first child of the third top-level entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreePath(pub Vec<usize>);

impl TreePath {
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Every proper prefix of this path, shortest first.
    pub fn ancestors(&self) -> impl Iterator<Item = TreePath> + '_ {
        (1..self.0.len()).map(|n| TreePath(self.0[..n].to_vec()))
    }
}

/// A document's outline: an ordered forest of top-level entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outline {
    pub entries: Vec<OutlineNode>,
}

impl Outline {
    pub fn new(entries: Vec<OutlineNode>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse an outline from a JSON array of nodes.
    pub fn from_json(json: &str) -> Result<Self> {
        let outline: Outline = serde_json::from_str(json)?;
        outline.validate()?;
        Ok(outline)
    }

    /// Reject entries with an empty id at any depth; the document view never
    /// reports an empty section, so such a row could never be selected.
    pub fn validate(&self) -> Result<()> {
        let mut stack: Vec<&OutlineNode> = self.entries.iter().collect();
        while let Some(node) = stack.pop() {
            if node.id.is_empty() {
                return Err(LecternError::Outline(format!(
                    "entry '{}' has an empty id",
                    node.label
                )));
            }
            stack.extend(&node.children);
        }
        Ok(())
    }

    /// Total number of entries at every depth.
    pub fn node_count(&self) -> usize {
        self.entries.iter().map(OutlineNode::node_count).sum()
    }

    /// Resolve an index path to the nodes along it, top-level entry first.
    ///
    /// Returns `None` if any index is out of range.
    pub fn nodes_on(&self, path: &TreePath) -> Option<Vec<&OutlineNode>> {
        let (&first, rest) = path.0.split_first()?;
        let mut node = self.entries.get(first)?;
        let mut nodes = vec![node];
        for &i in rest {
            node = node.children.get(i)?;
            nodes.push(node);
        }
        Some(nodes)
    }

    /// The node an index path points at.
    pub fn node_at(&self, path: &TreePath) -> Option<&OutlineNode> {
        self.nodes_on(path).and_then(|nodes| nodes.last().copied())
    }
}
