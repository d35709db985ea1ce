//! Contextual popover placement.
//!
//! Popovers (selection menu, footnotes, highlight editor) open next to an
//! anchor rectangle inside the document view. Vertical placement is
//! preferred when the popover fits above or below; otherwise the side with
//! the most free space wins.

use lectern_types::geometry::{AnchorRect, ContainerBounds, PlacementResult, Point};

use crate::layout::{Clearance, clearance};

/// Decide which side of `anchor` a popover of `popover_height` opens on.
///
/// Rules, in order:
/// 1. Below, if the space below exceeds the popover height.
/// 2. Above, if the space above exceeds it.
/// 3. Otherwise the side with the largest clearance, ties going to the
///    earlier side in `Side::ALL`.
///
/// Each axis of the anchor point is replaced with `0` unless it lies in
/// `(0, bound]`. Surfaces sometimes report garbage geometry mid-layout and
/// a popover at the origin is still visible.
pub fn place(
    anchor: &AnchorRect,
    bounds: &ContainerBounds,
    popover_height: f32,
) -> PlacementResult {
    let sides = clearance(anchor, bounds);
    let [_, _, top, bottom] = sides;
    let chosen = if bottom.space > popover_height {
        bottom
    } else if top.space > popover_height {
        top
    } else {
        widest(&sides)
    };
    PlacementResult {
        anchor_point: Point::new(
            clamp_axis(chosen.point.x, bounds.width),
            clamp_axis(chosen.point.y, bounds.height),
        ),
        side: chosen.side,
    }
}

/// First entry with the maximum space.
fn widest(sides: &[Clearance; 4]) -> Clearance {
    sides
        .iter()
        .skip(1)
        .fold(sides[0], |best, c| if c.space > best.space { *c } else { best })
}

fn clamp_axis(v: f32, bound: f32) -> f32 {
    if v > 0.0 && v <= bound { v } else { 0.0 }
}

/// Which contextual popover is being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopoverKind {
    /// Selection menu (copy, highlight, look up, ...).
    Selection,
    /// Footnote preview.
    Footnote,
    /// Editor for an existing highlight.
    Highlight,
}

/// What happens to the document's text selection when a popover opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// Keep the selection highlighted until the popover closes.
    KeepUntilClosed,
    /// Clear the selection as soon as the popover opens.
    ClearNow,
    /// The popover is unrelated to the selection.
    Untouched,
}

impl PopoverKind {
    pub fn selection_policy(self) -> SelectionPolicy {
        match self {
            Self::Selection => SelectionPolicy::KeepUntilClosed,
            Self::Highlight => SelectionPolicy::ClearNow,
            Self::Footnote => SelectionPolicy::Untouched,
        }
    }
}

/// A shown popover and its current placement.
///
/// The popover's real height is unknown until its first layout pass, so the
/// first placement uses an estimate. The host forwards every size
/// allocation to [`PopoverAnchor::on_size_allocate`] and moves the popover
/// only when a new placement comes back.
#[derive(Debug, Clone)]
pub struct PopoverAnchor {
    kind: PopoverKind,
    anchor: AnchorRect,
    placement: PlacementResult,
}

impl PopoverAnchor {
    /// Place a popover using an estimated height.
    pub fn new(
        kind: PopoverKind,
        anchor: AnchorRect,
        bounds: &ContainerBounds,
        estimated_height: f32,
    ) -> Self {
        let placement = place(&anchor, bounds, estimated_height);
        log::debug!(
            "{kind:?} popover placed {:?} at {:?}",
            placement.side,
            placement.anchor_point
        );
        Self {
            kind,
            anchor,
            placement,
        }
    }

    pub fn kind(&self) -> PopoverKind {
        self.kind
    }

    /// Placement currently applied to the popover.
    pub fn placement(&self) -> PlacementResult {
        self.placement
    }

    /// Re-place with the measured height and current bounds.
    ///
    /// Returns the new placement if it differs from the applied one.
    pub fn on_size_allocate(
        &mut self,
        bounds: &ContainerBounds,
        measured_height: f32,
    ) -> Option<PlacementResult> {
        let next = place(&self.anchor, bounds, measured_height);
        if next == self.placement {
            return None;
        }
        log::debug!(
            "{:?} popover re-placed {:?} -> {:?} (height {measured_height})",
            self.kind,
            self.placement.side,
            next.side
        );
        self.placement = next;
        Some(next)
    }
}
