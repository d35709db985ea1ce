//! Layout helpers: per-side clearance around an anchor region.

use lectern_types::geometry::{AnchorRect, ContainerBounds, Point, Side};

/// Free space on one side of an anchor and the point a popover on that
/// side would aim at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Clearance {
    /// Distance from the anchor edge to the container edge.
    pub space: f32,
    pub side: Side,
    /// Midpoint of the anchor edge facing `side`.
    pub point: Point,
}

/// Compute the clearance on every side, in `Side::ALL` order.
pub fn clearance(anchor: &AnchorRect, bounds: &ContainerBounds) -> [Clearance; 4] {
    let mid_x = anchor.center_x();
    let mid_y = anchor.center_y();
    [
        Clearance {
            space: anchor.left,
            side: Side::Left,
            point: Point::new(anchor.left, mid_y),
        },
        Clearance {
            space: bounds.width - anchor.right,
            side: Side::Right,
            point: Point::new(anchor.right, mid_y),
        },
        Clearance {
            space: anchor.top,
            side: Side::Top,
            point: Point::new(mid_x, anchor.top),
        },
        Clearance {
            space: bounds.height - anchor.bottom,
            side: Side::Bottom,
            point: Point::new(mid_x, anchor.bottom),
        },
    ]
}
