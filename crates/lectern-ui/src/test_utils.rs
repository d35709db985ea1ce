//! Recording fakes for the view-side traits.

use lectern_types::outline::TreePath;

use crate::chrome::{ChromeMode, ChromeSurface, RevealTarget};
use crate::labels::{LabelResolver, RequestToken};
use crate::outline::OutlineView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineCall {
    Expand(TreePath),
    Scroll(TreePath),
    Select(TreePath),
}

/// Records every call and tracks the single selected row.
#[derive(Debug, Default)]
pub struct RecordingOutlineView {
    pub calls: Vec<OutlineCall>,
    pub selected: Option<TreePath>,
}

impl OutlineView for RecordingOutlineView {
    fn expand_to_path(&mut self, path: &TreePath) {
        self.calls.push(OutlineCall::Expand(path.clone()));
    }

    fn scroll_to_center(&mut self, path: &TreePath) {
        self.calls.push(OutlineCall::Scroll(path.clone()));
    }

    fn select(&mut self, path: &TreePath) {
        self.calls.push(OutlineCall::Select(path.clone()));
        self.selected = Some(path.clone());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceCall {
    Reveal(RevealTarget, bool),
    Attach(ChromeMode),
}

/// Records reveal transitions and mirrors the last value per target.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    /// Last value applied to `target`, if any.
    pub fn revealed(&self, target: RevealTarget) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::Reveal(t, v) if *t == target => Some(*v),
            _ => None,
        })
    }

    pub fn reveal_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Reveal(..)))
            .count()
    }
}

impl ChromeSurface for RecordingSurface {
    fn set_revealed(&mut self, target: RevealTarget, revealed: bool) {
        self.calls.push(SurfaceCall::Reveal(target, revealed));
    }

    fn attach_menus(&mut self, mode: ChromeMode) {
        self.calls.push(SurfaceCall::Attach(mode));
    }
}

/// Queues requests; the test decides when and in what order they complete.
#[derive(Debug, Default)]
pub struct QueuedResolver {
    pub pending: Vec<(RequestToken, String)>,
}

impl LabelResolver for QueuedResolver {
    fn request(&mut self, token: RequestToken, position: &str) {
        self.pending.push((token, position.to_string()));
    }
}
