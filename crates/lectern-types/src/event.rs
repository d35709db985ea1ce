//! Toolkit-agnostic event types.
//!
//! The hosting view maps its native signals (document view notifications,
//! pointer crossings, popover menu visibility, window state) to these enums.
//! The coordination core never sees raw toolkit events.

use serde::{Deserialize, Serialize};

use crate::geometry::AnchorRect;

/// A persistent chrome region whose visibility is coordinated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromeRegion {
    /// Header bar with the side, find and main menu buttons.
    HeaderBar,
    /// Bottom navigation bar with the location menu.
    NavBar,
}

/// An area whose hover state influences chrome visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Event area over the windowed header bar.
    HeaderBar,
    /// Thin strip at the top edge used while fullscreen.
    FullscreenEdge,
    /// Event area over the navigation bar.
    NavBar,
}

impl Zone {
    /// Region this zone controls.
    pub fn region(self) -> ChromeRegion {
        match self {
            Self::HeaderBar | Self::FullscreenEdge => ChromeRegion::HeaderBar,
            Self::NavBar => ChromeRegion::NavBar,
        }
    }
}

/// A popover menu anchored to a chrome region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Menu {
    /// Contents / annotations / bookmarks side menu.
    Side,
    Find,
    Main,
    /// Location menu on the navigation bar.
    Location,
}

impl Menu {
    /// Region the menu's button lives in.
    pub fn region(self) -> ChromeRegion {
        match self {
            Self::Side | Self::Find | Self::Main => ChromeRegion::HeaderBar,
            Self::Location => ChromeRegion::NavBar,
        }
    }
}

/// Notifications emitted by the document view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DocumentEvent {
    /// The reading position changed.
    Relocated {
        /// Identifier of the current section, matched against outline ids.
        section_href: String,
        /// Position identifier of the end of the visible range.
        end_position: String,
        /// Zero-based location index, if locations have been generated.
        #[serde(default)]
        location: Option<u32>,
        /// Zero-based index of the last location.
        #[serde(default)]
        location_total: Option<u32>,
    },
    /// A document started loading.
    BookLoading,
    /// The document finished loading and is displayed.
    BookDisplayed,
    /// Loading failed.
    BookError,
    /// Plain click on the document content.
    Click,
    /// Text was selected; `rect` covers the selection.
    Selection { rect: AnchorRect },
    /// A footnote link was activated.
    Footnote { rect: AnchorRect },
    /// An existing highlight was clicked.
    HighlightMenu { rect: AnchorRect },
}

/// Pointer, menu and window notifications from the chrome widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ChromeEvent {
    PointerEnter { zone: Zone },
    PointerLeave { zone: Zone },
    MenuOpened { menu: Menu },
    MenuClosed { menu: Menu },
    Fullscreen { enabled: bool },
    /// Pin or unpin the navigation bar.
    ToggleNavBar,
    ToggleLocationMenu,
}
