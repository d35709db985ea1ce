//! lectern-ui: chrome coordination for a document reader.
//!
//! This crate decides where contextual popovers open relative to an anchor
//! region, when the header and navigation bars are revealed, and which
//! outline entry is selected for the current reading position. All widget
//! work goes through the `ChromeSurface`, `OutlineView` and `LabelResolver`
//! traits -- no toolkit-specific code.

pub mod chrome;
pub mod labels;
pub mod layout;
pub mod outline;
pub mod popover;
pub mod signal;

#[cfg(test)]
pub(crate) mod test_utils;

pub use chrome::{ChromeCoordinator, ChromeMode, ChromeSurface, RevealTarget, RevealTriggers};
pub use labels::{
    AnnotationLabels, DistractionFreeLabels, LabelRequests, LabelResolver, PositionRow,
    RequestToken,
};
pub use outline::{OutlineSynchronizer, OutlineView};
pub use popover::{PopoverAnchor, PopoverKind, SelectionPolicy, place};
pub use signal::{Signal, SubscriptionId};
