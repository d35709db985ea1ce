//! Keeps the table-of-contents view in step with the reading position.
//!
//! On every relocation the current section id is searched for in the
//! outline. A hit expands the entry's ancestors, scrolls it to the middle
//! of the view and makes it the only selected row. A miss (front matter
//! without an outline entry, say) leaves the previous selection alone.

use lectern_types::config::OutlineConfig;
use lectern_types::outline::{Outline, OutlineNode, TreePath};

/// The widget presenting the outline.
pub trait OutlineView {
    /// Expand every ancestor of `path` so its row is visible.
    fn expand_to_path(&mut self, path: &TreePath);

    /// Scroll so the row at `path` sits at the vertical center.
    fn scroll_to_center(&mut self, path: &TreePath);

    /// Make the row at `path` the only selected row.
    fn select(&mut self, path: &TreePath);
}

/// Find `target_id` below `root`, returning the nodes from `root` down to
/// the match.
pub fn locate<'a>(root: &'a OutlineNode, target_id: &str) -> Option<Vec<&'a OutlineNode>> {
    let entries = std::slice::from_ref(root);
    let path = locate_in(entries, target_id, OutlineConfig::default().max_depth)?;
    nodes_along(entries, &path)
}

/// Pre-order search over a forest of entries.
///
/// The walk keeps an explicit stack of `(siblings, index)` frames, so the
/// index path of the current node is always the stack's indices. Nodes
/// nested deeper than `max_depth` are not visited.
pub fn locate_in(entries: &[OutlineNode], target_id: &str, max_depth: usize) -> Option<TreePath> {
    let mut stack: Vec<(&[OutlineNode], usize)> = Vec::new();
    if !entries.is_empty() {
        stack.push((entries, 0));
    }
    let mut truncated = false;

    while let Some(&(siblings, i)) = stack.last() {
        let node = &siblings[i];
        if node.id == target_id {
            return Some(TreePath(stack.iter().map(|&(_, i)| i).collect()));
        }

        if !node.children.is_empty() {
            if stack.len() < max_depth {
                stack.push((&node.children, 0));
                continue;
            }
            truncated = true;
        }

        // Next sibling, unwinding through exhausted levels.
        while let Some(frame) = stack.last_mut() {
            frame.1 += 1;
            if frame.1 < frame.0.len() {
                break;
            }
            stack.pop();
        }
    }

    if truncated {
        log::warn!("Outline deeper than {max_depth} levels; '{target_id}' not searched below it");
    }
    None
}

fn nodes_along<'a>(entries: &'a [OutlineNode], path: &TreePath) -> Option<Vec<&'a OutlineNode>> {
    let mut siblings = entries;
    let mut nodes = Vec::with_capacity(path.depth());
    for &i in path.indices() {
        let node = siblings.get(i)?;
        nodes.push(node);
        siblings = &node.children;
    }
    Some(nodes)
}

/// Owns the outline and the currently selected path.
#[derive(Debug, Clone)]
pub struct OutlineSynchronizer {
    outline: Outline,
    selected: Option<TreePath>,
    max_depth: usize,
}

impl OutlineSynchronizer {
    pub fn new(outline: Outline, config: &OutlineConfig) -> Self {
        Self {
            outline,
            selected: None,
            max_depth: config.max_depth,
        }
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Replace the outline (a new document was opened).
    ///
    /// The old selection refers to the old tree and is dropped.
    pub fn set_outline(&mut self, outline: Outline) {
        self.outline = outline;
        self.selected = None;
    }

    /// Path of the selected entry, if any.
    pub fn selected(&self) -> Option<&TreePath> {
        self.selected.as_ref()
    }

    /// Search for `target_id` and, if found, reveal and select it in `view`.
    ///
    /// Returns `true` on a hit. On a miss nothing changes.
    pub fn relocate(&mut self, target_id: &str, view: &mut dyn OutlineView) -> bool {
        let Some(path) = locate_in(&self.outline.entries, target_id, self.max_depth) else {
            log::debug!("No outline entry for '{target_id}'; keeping selection");
            return false;
        };
        view.expand_to_path(&path);
        view.scroll_to_center(&path);
        view.select(&path);
        self.selected = Some(path);
        true
    }

    /// Id of the entry at `path`, for navigating when a row is activated.
    pub fn activate(&self, path: &TreePath) -> Option<&str> {
        self.outline.node_at(path).map(|node| node.id.as_str())
    }
}
