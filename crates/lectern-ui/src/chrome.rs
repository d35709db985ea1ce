//! Header bar and navigation bar reveal coordination.
//!
//! Several inputs overlap: the pointer entering a trigger zone, popover
//! menus anchored to a bar, the navigation bar being pinned by a click on
//! the page, a document loading, fullscreen, and the always-reveal display
//! setting. The coordinator keeps the raw inputs and derives each bar's
//! visibility from them on every change, then pushes only actual
//! transitions to the [`ChromeSurface`].

use std::collections::{HashMap, HashSet};

use lectern_types::config::DisplaySnapshot;
use lectern_types::event::{ChromeEvent, ChromeRegion, DocumentEvent, Menu, Zone};

use crate::popover::PopoverKind;

/// A physical revealer widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RevealTarget {
    /// Header bar of the normal window.
    HeaderBar,
    /// Overlay header bar used while fullscreen.
    FullscreenHeaderBar,
    NavBar,
}

/// Which set of header widgets the menus hang off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeMode {
    Windowed,
    Fullscreen,
}

/// Widget side of the coordinator.
pub trait ChromeSurface {
    /// Show or hide a revealer. Only called on transitions.
    fn set_revealed(&mut self, target: RevealTarget, revealed: bool);

    /// Re-parent the header menus to the buttons of `mode`'s header bar.
    fn attach_menus(&mut self, mode: ChromeMode);
}

/// Inputs for one region's reveal decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RevealTriggers {
    /// Pointer is inside the region's trigger zone.
    pub hovering: bool,
    /// A menu anchored to the region is open.
    pub any_menu_open: bool,
    pub loading: bool,
    /// The user pinned the bars open.
    pub pinned: bool,
}

/// Whether a region is revealed.
///
/// Always-reveal wins over everything. Otherwise hovering reveals, loading
/// keeps the bar up after the pointer leaves, and with neither the bar
/// stays up only while pinned or while one of its menus is open.
pub fn decide(triggers: &RevealTriggers, display: &DisplaySnapshot) -> bool {
    if display.always_reveal || triggers.hovering || triggers.loading {
        return true;
    }
    triggers.pinned || triggers.any_menu_open
}

/// Owns the trigger inputs for the header and navigation bars.
#[derive(Debug)]
pub struct ChromeCoordinator {
    display: DisplaySnapshot,
    fullscreen: bool,
    loading: bool,
    nav_pinned: bool,
    hovering: HashSet<Zone>,
    open_menus: HashSet<Menu>,
    highlight_popover_open: bool,
    applied: HashMap<RevealTarget, bool>,
}

impl ChromeCoordinator {
    pub fn new(display: DisplaySnapshot) -> Self {
        Self {
            display,
            fullscreen: false,
            loading: false,
            nav_pinned: false,
            hovering: HashSet::new(),
            open_menus: HashSet::new(),
            highlight_popover_open: false,
            applied: HashMap::new(),
        }
    }

    // -- Queries --------------------------------------------------------------

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn nav_bar_pinned(&self) -> bool {
        self.nav_pinned
    }

    pub fn is_menu_open(&self, menu: Menu) -> bool {
        self.open_menus.contains(&menu)
    }

    /// The zone whose hover currently drives the header bar.
    pub fn active_header_zone(&self) -> Zone {
        if self.fullscreen {
            Zone::FullscreenEdge
        } else {
            Zone::HeaderBar
        }
    }

    /// Revealer currently showing the header.
    pub fn header_target(&self) -> RevealTarget {
        if self.fullscreen {
            RevealTarget::FullscreenHeaderBar
        } else {
            RevealTarget::HeaderBar
        }
    }

    pub fn triggers(&self, region: ChromeRegion) -> RevealTriggers {
        match region {
            ChromeRegion::HeaderBar => RevealTriggers {
                hovering: self.hovering.contains(&self.active_header_zone()),
                any_menu_open: self.menu_open_in(ChromeRegion::HeaderBar),
                loading: self.loading,
                pinned: self.nav_pinned,
            },
            ChromeRegion::NavBar => RevealTriggers {
                hovering: self.hovering.contains(&Zone::NavBar),
                any_menu_open: self.menu_open_in(ChromeRegion::NavBar),
                loading: false,
                pinned: self.nav_pinned,
            },
        }
    }

    /// Derived visibility of `region`.
    pub fn revealed(&self, region: ChromeRegion) -> bool {
        let display = match region {
            ChromeRegion::HeaderBar => self.display,
            // The navigation bar has no always-reveal mode.
            ChromeRegion::NavBar => DisplaySnapshot::default(),
        };
        decide(&self.triggers(region), &display)
    }

    fn menu_open_in(&self, region: ChromeRegion) -> bool {
        self.open_menus.iter().any(|m| m.region() == region)
    }

    // -- Inputs ---------------------------------------------------------------

    pub fn pointer_enter(&mut self, zone: Zone, surface: &mut dyn ChromeSurface) {
        if !self.zone_is_live(zone) {
            return;
        }
        self.hovering.insert(zone);
        self.apply(surface);
    }

    pub fn pointer_leave(&mut self, zone: Zone, surface: &mut dyn ChromeSurface) {
        if !self.zone_is_live(zone) {
            return;
        }
        self.hovering.remove(&zone);
        self.apply(surface);
    }

    /// Crossings from the header zone of the other mode come from a hidden
    /// widget and are ignored.
    fn zone_is_live(&self, zone: Zone) -> bool {
        zone.region() == ChromeRegion::NavBar || zone == self.active_header_zone()
    }

    pub fn menu_opened(&mut self, menu: Menu, surface: &mut dyn ChromeSurface) {
        self.open_menus.insert(menu);
        self.apply(surface);
    }

    pub fn menu_closed(&mut self, menu: Menu, surface: &mut dyn ChromeSurface) {
        self.open_menus.remove(&menu);
        self.apply(surface);
    }

    pub fn set_loading(&mut self, loading: bool, surface: &mut dyn ChromeSurface) {
        self.loading = loading;
        self.apply(surface);
    }

    /// New settings snapshot (the display mode changed).
    pub fn set_display(&mut self, display: DisplaySnapshot, surface: &mut dyn ChromeSurface) {
        self.display = display;
        self.apply(surface);
    }

    /// Enter or leave fullscreen.
    ///
    /// The header zone and menu anchors move to the other header bar, the
    /// header bar that is going away is hidden, and the one taking over is
    /// evaluated from scratch.
    pub fn set_fullscreen(&mut self, fullscreen: bool, surface: &mut dyn ChromeSurface) {
        if self.fullscreen == fullscreen {
            return;
        }
        let outgoing = self.header_target();
        let stale_zone = self.active_header_zone();
        self.hovering.remove(&stale_zone);
        self.fullscreen = fullscreen;
        log::debug!("Chrome fullscreen = {fullscreen}");

        surface.attach_menus(if fullscreen {
            ChromeMode::Fullscreen
        } else {
            ChromeMode::Windowed
        });
        self.set_target(outgoing, false, surface);
        self.apply(surface);
    }

    /// Pin or unpin the bars. Returns the new pinned state.
    pub fn toggle_nav_bar(&mut self, surface: &mut dyn ChromeSurface) -> bool {
        self.nav_pinned = !self.nav_pinned;
        self.apply(surface);
        self.nav_pinned
    }

    /// Open the location menu (revealing the navigation bar) or close it.
    /// Returns whether the menu is now open.
    pub fn toggle_location_menu(&mut self, surface: &mut dyn ChromeSurface) -> bool {
        if self.is_menu_open(Menu::Location) {
            self.menu_closed(Menu::Location, surface);
            false
        } else {
            self.menu_opened(Menu::Location, surface);
            true
        }
    }

    /// Track contextual popovers that change how page clicks behave.
    pub fn popover_visibility(&mut self, kind: PopoverKind, visible: bool) {
        if kind == PopoverKind::Highlight {
            self.highlight_popover_open = visible;
        }
    }

    pub fn handle_chrome(&mut self, event: &ChromeEvent, surface: &mut dyn ChromeSurface) {
        match *event {
            ChromeEvent::PointerEnter { zone } => self.pointer_enter(zone, surface),
            ChromeEvent::PointerLeave { zone } => self.pointer_leave(zone, surface),
            ChromeEvent::MenuOpened { menu } => self.menu_opened(menu, surface),
            ChromeEvent::MenuClosed { menu } => self.menu_closed(menu, surface),
            ChromeEvent::Fullscreen { enabled } => self.set_fullscreen(enabled, surface),
            ChromeEvent::ToggleNavBar => {
                self.toggle_nav_bar(surface);
            },
            ChromeEvent::ToggleLocationMenu => {
                self.toggle_location_menu(surface);
            },
        }
    }

    /// React to document view notifications.
    ///
    /// A click on the page pins or unpins the bars, unless it landed while
    /// a highlight popover was open (the click just dismisses it).
    pub fn handle_document(&mut self, event: &DocumentEvent, surface: &mut dyn ChromeSurface) {
        match event {
            DocumentEvent::BookLoading => self.set_loading(true, surface),
            DocumentEvent::BookDisplayed => self.set_loading(false, surface),
            DocumentEvent::Click => {
                if self.highlight_popover_open {
                    return;
                }
                self.toggle_nav_bar(surface);
            },
            _ => {},
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Push the derived state to the surface.
    pub fn apply(&mut self, surface: &mut dyn ChromeSurface) {
        let header = self.revealed(ChromeRegion::HeaderBar);
        let nav = self.revealed(ChromeRegion::NavBar);
        let target = self.header_target();
        self.set_target(target, header, surface);
        self.set_target(RevealTarget::NavBar, nav, surface);
    }

    /// Push the derived state even where it matches what was last applied,
    /// for a surface that was just (re)built.
    pub fn resync(&mut self, surface: &mut dyn ChromeSurface) {
        self.applied.clear();
        let inactive = if self.fullscreen {
            RevealTarget::HeaderBar
        } else {
            RevealTarget::FullscreenHeaderBar
        };
        self.set_target(inactive, false, surface);
        self.apply(surface);
    }

    fn set_target(
        &mut self,
        target: RevealTarget,
        revealed: bool,
        surface: &mut dyn ChromeSurface,
    ) {
        if self.applied.get(&target) == Some(&revealed) {
            return;
        }
        log::debug!("Reveal {target:?} = {revealed}");
        self.applied.insert(target, revealed);
        surface.set_revealed(target, revealed);
    }
}
