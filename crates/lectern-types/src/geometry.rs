//! Container-local geometry: anchor rectangles, container bounds, sides.
//!
//! All coordinates are in the placement surface's local space, origin at
//! the top-left corner, y growing downward.

use serde::{Deserialize, Serialize};

/// A point in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The region a popover points at.
///
/// Invariant: `left <= right` and `top <= bottom`. Deserialization goes
/// through [`AnchorRect::new`] so the invariant holds for scripted input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawAnchorRect")]
pub struct AnchorRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl AnchorRect {
    /// Create an anchor rect, swapping edges that were reported in reverse.
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left: left.min(right),
            right: left.max(right),
            top: top.min(bottom),
            bottom: top.max(bottom),
        }
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    /// Vertical center.
    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }
}

/// Edges as reported, possibly in reverse.
#[derive(Deserialize)]
struct RawAnchorRect {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
}

impl From<RawAnchorRect> for AnchorRect {
    fn from(raw: RawAnchorRect) -> Self {
        Self::new(raw.left, raw.right, raw.top, raw.bottom)
    }
}

/// Current size of the placement surface.
///
/// Not validated: a surface mid-layout may report zero or negative sizes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerBounds {
    pub width: f32,
    pub height: f32,
}

impl ContainerBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Which side of the anchor a popover opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    /// All sides in tie-breaking order.
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];
}

/// Where a popover points and which side it opens on.
///
/// Produced fresh for every placement request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementResult {
    pub anchor_point: Point,
    pub side: Side,
}
