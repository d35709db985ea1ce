//! Headless stand-ins for the window's widgets.
//!
//! They log what a real window would do and remember the resulting state so
//! the session summary can report it.

use std::collections::HashMap;

use lectern_types::outline::{Outline, TreePath};
use lectern_ui::outline::locate_in;
use lectern_ui::{ChromeMode, ChromeSurface, LabelResolver, OutlineView, RequestToken, RevealTarget};

/// Revealer widgets.
#[derive(Debug, Default)]
pub struct LogSurface {
    revealed: HashMap<RevealTarget, bool>,
    mode: Option<ChromeMode>,
    pub transitions: usize,
}

impl LogSurface {
    pub fn is_revealed(&self, target: RevealTarget) -> bool {
        self.revealed.get(&target).copied().unwrap_or(false)
    }

    pub fn mode(&self) -> ChromeMode {
        self.mode.unwrap_or(ChromeMode::Windowed)
    }
}

impl ChromeSurface for LogSurface {
    fn set_revealed(&mut self, target: RevealTarget, revealed: bool) {
        log::info!("{} {target:?}", if revealed { "Reveal" } else { "Hide" });
        self.revealed.insert(target, revealed);
        self.transitions += 1;
    }

    fn attach_menus(&mut self, mode: ChromeMode) {
        log::info!("Menus attached to {mode:?} header bar");
        self.mode = Some(mode);
    }
}

/// Table-of-contents tree view.
#[derive(Debug, Default)]
pub struct LogOutlineView {
    pub expanded: Vec<TreePath>,
    pub selected: Option<TreePath>,
}

impl OutlineView for LogOutlineView {
    fn expand_to_path(&mut self, path: &TreePath) {
        for ancestor in path.ancestors() {
            if !self.expanded.contains(&ancestor) {
                self.expanded.push(ancestor);
            }
        }
    }

    fn scroll_to_center(&mut self, path: &TreePath) {
        log::debug!("Scroll outline row {:?} to center", path.indices());
    }

    fn select(&mut self, path: &TreePath) {
        log::info!("Select outline row {:?}", path.indices());
        self.selected = Some(path.clone());
    }
}

/// Holds label lookups until the script says to deliver them.
///
/// A position is `"<section>/<offset>"`; its label is the outline label of
/// `<section>`, or the position itself when the outline has no entry.
#[derive(Debug)]
pub struct DeferredResolver {
    outline: Outline,
    pending: Vec<(RequestToken, String)>,
}

impl DeferredResolver {
    pub fn new(outline: Outline) -> Self {
        Self {
            outline,
            pending: Vec::new(),
        }
    }

    /// Resolve everything outstanding, newest request first, so older
    /// responses arrive late.
    pub fn drain(&mut self) -> Vec<(RequestToken, String)> {
        let pending = std::mem::take(&mut self.pending);
        pending
            .into_iter()
            .rev()
            .map(|(token, position)| (token, self.label_for(&position)))
            .collect()
    }

    fn label_for(&self, position: &str) -> String {
        let section = position.split('/').next().unwrap_or(position);
        locate_in(&self.outline.entries, section, usize::MAX)
            .and_then(|path| self.outline.node_at(&path))
            .map(|node| node.label.clone())
            .unwrap_or_else(|| position.to_string())
    }
}

impl LabelResolver for DeferredResolver {
    fn request(&mut self, token: RequestToken, position: &str) {
        log::debug!("Label lookup for '{position}'");
        self.pending.push((token, position.to_string()));
    }
}
