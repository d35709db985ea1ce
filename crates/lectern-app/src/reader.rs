//! Reader window: wires the document view's notifications to the chrome
//! coordinator, the outline synchronizer, the footer labels, the annotation
//! rows and the contextual popovers.
//!
//! Each component subscribes to the document signal independently and owns
//! its own state; none of them reaches into another's.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use lectern_types::config::{DisplaySnapshot, LecternConfig};
use lectern_types::event::{ChromeEvent, DocumentEvent, Menu};
use lectern_types::geometry::{AnchorRect, ContainerBounds, PlacementResult};
use lectern_types::outline::Outline;
use lectern_ui::{
    AnnotationLabels, ChromeCoordinator, ChromeMode, DistractionFreeLabels, OutlineSynchronizer,
    PopoverAnchor, PopoverKind, RevealTarget, SelectionPolicy, Signal,
};
use serde::Serialize;

use crate::host::{DeferredResolver, LogOutlineView, LogSurface};
use crate::script::{HostStep, Step};

struct ChromeHost {
    coordinator: ChromeCoordinator,
    surface: LogSurface,
}

struct OutlineHost {
    sync: OutlineSynchronizer,
    view: LogOutlineView,
}

struct LabelHost {
    labels: DistractionFreeLabels,
    resolver: DeferredResolver,
}

struct AnnotationHost {
    rows: AnnotationLabels,
    resolver: DeferredResolver,
}

struct PopoverHost {
    estimated_height: f32,
    bounds: ContainerBounds,
    current: Option<PopoverAnchor>,
    /// Whether the document currently shows a text selection.
    selection_shown: bool,
}

impl PopoverHost {
    fn show(&mut self, kind: PopoverKind, rect: AnchorRect, chrome: &mut ChromeHost) {
        if let Some(old) = self.current.take() {
            chrome.coordinator.popover_visibility(old.kind(), false);
        }
        let popover = PopoverAnchor::new(kind, rect, &self.bounds, self.estimated_height);
        log::info!(
            "Show {kind:?} popover on {:?} at {:?}",
            popover.placement().side,
            popover.placement().anchor_point
        );
        match kind.selection_policy() {
            SelectionPolicy::KeepUntilClosed => self.selection_shown = true,
            SelectionPolicy::ClearNow => self.selection_shown = false,
            SelectionPolicy::Untouched => {},
        }
        chrome.coordinator.popover_visibility(kind, true);
        self.current = Some(popover);
    }

    fn close(&mut self, chrome: &mut ChromeHost) {
        let Some(popover) = self.current.take() else {
            return;
        };
        if popover.kind().selection_policy() == SelectionPolicy::KeepUntilClosed {
            self.selection_shown = false;
        }
        chrome.coordinator.popover_visibility(popover.kind(), false);
        log::info!("Closed {:?} popover", popover.kind());
    }
}

/// End-of-session state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub fullscreen: bool,
    pub header_revealed: bool,
    pub nav_bar_revealed: bool,
    pub menus_in_fullscreen_header: bool,
    pub nav_bar_pinned: bool,
    pub reveal_transitions: usize,
    /// Outline ids from the top-level entry down to the selected one.
    pub outline_selection: Option<Vec<String>>,
    pub expanded_rows: usize,
    pub page_label: String,
    pub section_label: String,
    pub popover: Option<PlacementResult>,
    pub selection_shown: bool,
    /// Section label of every annotation row, by row id.
    pub annotation_sections: BTreeMap<u64, String>,
    /// Last position the reader was asked to go to from the side menu.
    pub navigated_to: Option<String>,
}

/// The headless reader window.
pub struct Reader {
    document: Signal<DocumentEvent>,
    chrome: Rc<RefCell<ChromeHost>>,
    outline: Rc<RefCell<OutlineHost>>,
    labels: Rc<RefCell<LabelHost>>,
    annotations: Rc<RefCell<AnnotationHost>>,
    popovers: Rc<RefCell<PopoverHost>>,
    navigated_to: Option<String>,
}

impl Reader {
    pub fn new(config: &LecternConfig, outline: Outline, bounds: ContainerBounds) -> Self {
        let chrome = Rc::new(RefCell::new(ChromeHost {
            coordinator: ChromeCoordinator::new(config.chrome.display_snapshot()),
            surface: LogSurface::default(),
        }));
        let outline_host = Rc::new(RefCell::new(OutlineHost {
            sync: OutlineSynchronizer::new(outline.clone(), &config.outline),
            view: LogOutlineView::default(),
        }));
        let labels = Rc::new(RefCell::new(LabelHost {
            labels: DistractionFreeLabels::new(),
            resolver: DeferredResolver::new(outline.clone()),
        }));
        let annotations = Rc::new(RefCell::new(AnnotationHost {
            rows: AnnotationLabels::new(),
            resolver: DeferredResolver::new(outline),
        }));
        let popovers = Rc::new(RefCell::new(PopoverHost {
            estimated_height: config.popover.estimated_height,
            bounds,
            current: None,
            selection_shown: false,
        }));

        {
            let mut c = chrome.borrow_mut();
            let ChromeHost {
                coordinator,
                surface,
            } = &mut *c;
            coordinator.resync(surface);
        }

        let mut document = Signal::new();

        let c = Rc::clone(&chrome);
        document.connect(move |event: &DocumentEvent| {
            let mut c = c.borrow_mut();
            let ChromeHost {
                coordinator,
                surface,
            } = &mut *c;
            coordinator.handle_document(event, surface);
        });

        let o = Rc::clone(&outline_host);
        document.connect(move |event: &DocumentEvent| {
            if let DocumentEvent::Relocated { section_href, .. } = event {
                let mut o = o.borrow_mut();
                let OutlineHost { sync, view } = &mut *o;
                sync.relocate(section_href, view);
            }
        });

        let l = Rc::clone(&labels);
        document.connect(move |event: &DocumentEvent| {
            let mut l = l.borrow_mut();
            let LabelHost { labels, resolver } = &mut *l;
            match event {
                DocumentEvent::BookLoading => labels.on_loading(),
                DocumentEvent::Relocated {
                    end_position,
                    location,
                    location_total,
                    ..
                } => labels.on_relocated(*location, *location_total, end_position, resolver),
                _ => {},
            }
        });

        let a = Rc::clone(&annotations);
        document.connect(move |event: &DocumentEvent| {
            if let DocumentEvent::BookLoading = event {
                a.borrow_mut().rows.clear();
            }
        });

        let p = Rc::clone(&popovers);
        let c = Rc::clone(&chrome);
        document.connect(move |event: &DocumentEvent| {
            let (kind, rect) = match event {
                DocumentEvent::Selection { rect } => (PopoverKind::Selection, *rect),
                DocumentEvent::Footnote { rect } => (PopoverKind::Footnote, *rect),
                DocumentEvent::HighlightMenu { rect } => (PopoverKind::Highlight, *rect),
                DocumentEvent::BookLoading => {
                    p.borrow_mut().close(&mut c.borrow_mut());
                    return;
                },
                _ => return,
            };
            p.borrow_mut().show(kind, rect, &mut c.borrow_mut());
        });

        Self {
            document,
            chrome,
            outline: outline_host,
            labels,
            annotations,
            popovers,
            navigated_to: None,
        }
    }

    /// Run one script step.
    pub fn step(&mut self, step: &Step) {
        match step {
            Step::Document(event) => self.document.emit(event),
            Step::Chrome(event) => self.chrome_event(event),
            Step::Host(host) => self.host_step(host),
        }
    }

    fn chrome_event(&mut self, event: &ChromeEvent) {
        let mut c = self.chrome.borrow_mut();
        let ChromeHost {
            coordinator,
            surface,
        } = &mut *c;
        coordinator.handle_chrome(event, surface);
    }

    /// Go to `position` from a side-menu row; the side menu pops down.
    fn navigate(&mut self, position: String) {
        log::info!("Go to '{position}'");
        self.navigated_to = Some(position);
        let mut c = self.chrome.borrow_mut();
        let ChromeHost {
            coordinator,
            surface,
        } = &mut *c;
        coordinator.menu_closed(Menu::Side, surface);
    }

    fn host_step(&mut self, step: &HostStep) {
        match step {
            HostStep::Resize { width, height } => {
                self.popovers.borrow_mut().bounds = ContainerBounds::new(*width, *height);
            },
            HostStep::PopoverAllocated { height } => {
                let mut p = self.popovers.borrow_mut();
                let bounds = p.bounds;
                if let Some(popover) = p.current.as_mut()
                    && let Some(moved) = popover.on_size_allocate(&bounds, *height)
                {
                    log::info!("Move popover to {:?} at {:?}", moved.side, moved.anchor_point);
                }
            },
            HostStep::PopoverClosed => {
                self.popovers
                    .borrow_mut()
                    .close(&mut self.chrome.borrow_mut());
            },
            HostStep::CompleteLabels => {
                let mut l = self.labels.borrow_mut();
                let completed = l.resolver.drain();
                for (token, label) in completed {
                    l.labels.on_label_resolved(token, &label);
                }
                let mut a = self.annotations.borrow_mut();
                let completed = a.resolver.drain();
                for (token, label) in completed {
                    a.rows.on_label_resolved(token, &label);
                }
            },
            HostStep::AlwaysReveal { enabled } => {
                let mut c = self.chrome.borrow_mut();
                let ChromeHost {
                    coordinator,
                    surface,
                } = &mut *c;
                coordinator.set_display(
                    DisplaySnapshot {
                        always_reveal: *enabled,
                    },
                    surface,
                );
            },
            HostStep::AddAnnotation { id, position } => {
                let mut a = self.annotations.borrow_mut();
                let AnnotationHost { rows, resolver } = &mut *a;
                rows.add(*id, position, resolver);
            },
            HostStep::RemoveAnnotation { id } => {
                if !self.annotations.borrow_mut().rows.remove(*id) {
                    log::warn!("No annotation row {id} to remove");
                }
            },
            HostStep::ActivateRow { path } => {
                let target = self.outline.borrow().sync.activate(path).map(str::to_string);
                match target {
                    Some(target) => self.navigate(target),
                    None => log::warn!("No contents row at {:?}", path.indices()),
                }
            },
            HostStep::ActivateAnnotation { id } => {
                let target = self
                    .annotations
                    .borrow()
                    .rows
                    .row(*id)
                    .map(|row| row.position.clone());
                match target {
                    Some(target) => self.navigate(target),
                    None => log::warn!("No annotation row {id} to activate"),
                }
            },
        }
    }

    pub fn summary(&self) -> Summary {
        let c = self.chrome.borrow();
        let o = self.outline.borrow();
        let l = self.labels.borrow();
        let a = self.annotations.borrow();
        let p = self.popovers.borrow();
        let outline_selection = o
            .view
            .selected
            .as_ref()
            .and_then(|path| o.sync.outline().nodes_on(path))
            .map(|nodes| nodes.iter().map(|n| n.id.clone()).collect());
        Summary {
            fullscreen: c.coordinator.is_fullscreen(),
            header_revealed: c.surface.is_revealed(c.coordinator.header_target()),
            nav_bar_revealed: c.surface.is_revealed(RevealTarget::NavBar),
            menus_in_fullscreen_header: c.surface.mode() == ChromeMode::Fullscreen,
            nav_bar_pinned: c.coordinator.nav_bar_pinned(),
            reveal_transitions: c.surface.transitions,
            outline_selection,
            expanded_rows: o.view.expanded.len(),
            page_label: l.labels.page().to_string(),
            section_label: l.labels.section().to_string(),
            popover: p.current.as_ref().map(PopoverAnchor::placement),
            selection_shown: p.selection_shown,
            annotation_sections: a
                .rows
                .rows()
                .map(|(id, row)| (id, row.section.clone()))
                .collect(),
            navigated_to: self.navigated_to.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use lectern_types::event::Zone;
    use lectern_types::geometry::Side;
    use lectern_types::outline::{OutlineNode, TreePath};

    use super::*;

    fn outline() -> Outline {
        Outline::new(vec![
            OutlineNode::new("intro", "Introduction"),
            OutlineNode::new("part1", "Part One").with_children(vec![
                OutlineNode::new("ch1", "Chapter 1"),
                OutlineNode::new("ch2", "Chapter 2"),
            ]),
        ])
    }

    fn reader() -> Reader {
        Reader::new(
            &LecternConfig::default(),
            outline(),
            ContainerBounds::new(400.0, 300.0),
        )
    }

    fn relocated(section: &str, location: u32) -> Step {
        Step::Document(DocumentEvent::Relocated {
            section_href: section.into(),
            end_position: format!("{section}/1"),
            location: Some(location),
            location_total: Some(99),
        })
    }

    #[test]
    fn load_then_read() {
        let mut r = reader();
        r.step(&Step::Document(DocumentEvent::BookLoading));
        let s = r.summary();
        assert!(s.header_revealed);
        assert_eq!(s.page_label, "…");

        r.step(&Step::Document(DocumentEvent::BookDisplayed));
        r.step(&relocated("ch2", 41));
        r.step(&Step::Host(HostStep::CompleteLabels));
        let s = r.summary();
        assert!(!s.header_revealed);
        assert_eq!(
            s.outline_selection,
            Some(vec!["part1".to_string(), "ch2".to_string()])
        );
        assert_eq!(s.expanded_rows, 1);
        assert_eq!(s.page_label, "42 / 100");
        assert_eq!(s.section_label, "Chapter 2");
    }

    #[test]
    fn relocation_without_outline_entry_keeps_selection() {
        let mut r = reader();
        r.step(&relocated("ch1", 0));
        r.step(&relocated("colophon", 5));
        assert_eq!(
            r.summary().outline_selection,
            Some(vec!["part1".to_string(), "ch1".to_string()])
        );
    }

    #[test]
    fn late_label_is_ignored() {
        let mut r = reader();
        r.step(&relocated("ch1", 0));
        r.step(&relocated("intro", 1));
        // Newest completes first; the ch1 response arrives late.
        r.step(&Step::Host(HostStep::CompleteLabels));
        assert_eq!(r.summary().section_label, "Introduction");
    }

    #[test]
    fn selection_popover_is_placed_and_replaced() {
        let mut r = reader();
        let rect = AnchorRect::new(10.0, 30.0, 5.0, 15.0);
        r.step(&Step::Document(DocumentEvent::Selection { rect }));
        let s = r.summary();
        assert_eq!(s.popover.unwrap().side, Side::Bottom);
        assert!(s.selection_shown);

        r.step(&Step::Host(HostStep::Resize {
            width: 400.0,
            height: 20.0,
        }));
        r.step(&Step::Host(HostStep::PopoverAllocated { height: 50.0 }));
        assert_eq!(r.summary().popover.unwrap().side, Side::Right);

        r.step(&Step::Host(HostStep::PopoverClosed));
        let s = r.summary();
        assert!(s.popover.is_none());
        assert!(!s.selection_shown);
    }

    #[test]
    fn highlight_popover_swallows_page_click() {
        let mut r = reader();
        let rect = AnchorRect::new(10.0, 30.0, 5.0, 15.0);
        r.step(&Step::Document(DocumentEvent::HighlightMenu { rect }));
        r.step(&Step::Document(DocumentEvent::Click));
        assert!(!r.summary().nav_bar_pinned);

        r.step(&Step::Host(HostStep::PopoverClosed));
        r.step(&Step::Document(DocumentEvent::Click));
        let s = r.summary();
        assert!(s.nav_bar_pinned);
        assert!(s.header_revealed);
        assert!(s.nav_bar_revealed);
    }

    #[test]
    fn fullscreen_menu_session() {
        let mut r = reader();
        r.step(&Step::Chrome(ChromeEvent::Fullscreen { enabled: true }));
        r.step(&Step::Chrome(ChromeEvent::PointerEnter {
            zone: Zone::FullscreenEdge,
        }));
        r.step(&Step::Chrome(ChromeEvent::MenuOpened { menu: Menu::Side }));
        r.step(&Step::Chrome(ChromeEvent::PointerLeave {
            zone: Zone::FullscreenEdge,
        }));
        let s = r.summary();
        assert!(s.fullscreen);
        assert!(s.menus_in_fullscreen_header);
        assert!(s.header_revealed);

        r.step(&Step::Chrome(ChromeEvent::MenuClosed { menu: Menu::Side }));
        assert!(!r.summary().header_revealed);
    }

    #[test]
    fn always_reveal_setting_toggles() {
        let mut r = reader();
        r.step(&Step::Host(HostStep::AlwaysReveal { enabled: true }));
        assert!(r.summary().header_revealed);
        r.step(&Step::Host(HostStep::AlwaysReveal { enabled: false }));
        assert!(!r.summary().header_revealed);
    }

    fn add_annotation(id: u64, position: &str) -> Step {
        Step::Host(HostStep::AddAnnotation {
            id,
            position: position.into(),
        })
    }

    #[test]
    fn annotation_rows_get_their_own_section_labels() {
        let mut r = reader();
        r.step(&add_annotation(1, "ch1/40"));
        r.step(&add_annotation(2, "intro/2"));
        r.step(&relocated("ch2", 3));
        r.step(&Step::Host(HostStep::CompleteLabels));
        let s = r.summary();
        assert_eq!(s.annotation_sections[&1], "Chapter 1");
        assert_eq!(s.annotation_sections[&2], "Introduction");
        assert_eq!(s.section_label, "Chapter 2");
    }

    #[test]
    fn removed_annotation_drops_late_label() {
        let mut r = reader();
        r.step(&add_annotation(1, "ch1/40"));
        r.step(&add_annotation(2, "ch2/7"));
        r.step(&Step::Host(HostStep::RemoveAnnotation { id: 1 }));
        r.step(&Step::Host(HostStep::CompleteLabels));
        let s = r.summary();
        assert!(!s.annotation_sections.contains_key(&1));
        assert_eq!(s.annotation_sections[&2], "Chapter 2");
    }

    #[test]
    fn loading_a_book_clears_annotation_rows() {
        let mut r = reader();
        r.step(&add_annotation(5, "ch1/1"));
        r.step(&Step::Document(DocumentEvent::BookLoading));
        r.step(&Step::Host(HostStep::CompleteLabels));
        assert!(r.summary().annotation_sections.is_empty());
    }

    #[test]
    fn activating_contents_row_navigates_and_closes_side_menu() {
        let mut r = reader();
        r.step(&Step::Chrome(ChromeEvent::MenuOpened { menu: Menu::Side }));
        assert!(r.summary().header_revealed);

        r.step(&Step::Host(HostStep::ActivateRow {
            path: TreePath(vec![1, 1]),
        }));
        let s = r.summary();
        assert_eq!(s.navigated_to.as_deref(), Some("ch2"));
        assert!(!s.header_revealed);
    }

    #[test]
    fn activating_missing_row_changes_nothing() {
        let mut r = reader();
        r.step(&Step::Chrome(ChromeEvent::MenuOpened { menu: Menu::Side }));
        r.step(&Step::Host(HostStep::ActivateRow {
            path: TreePath(vec![7]),
        }));
        let s = r.summary();
        assert!(s.navigated_to.is_none());
        assert!(s.header_revealed);
    }

    #[test]
    fn activating_annotation_row_navigates_to_its_position() {
        let mut r = reader();
        r.step(&add_annotation(3, "ch1/40"));
        r.step(&Step::Chrome(ChromeEvent::MenuOpened { menu: Menu::Side }));
        r.step(&Step::Host(HostStep::ActivateAnnotation { id: 3 }));
        let s = r.summary();
        assert_eq!(s.navigated_to.as_deref(), Some("ch1/40"));
        assert!(!s.header_revealed);
    }

    #[test]
    fn reversed_selection_rect_places_like_normalised_one() {
        let json = r#"{"event": "selection",
            "rect": {"left": 30.0, "right": 10.0, "top": 15.0, "bottom": 5.0}}"#;
        let event: DocumentEvent = serde_json::from_str(json).unwrap();
        let mut r = reader();
        r.step(&Step::Document(event));
        let placed = r.summary().popover.unwrap();
        assert_eq!(placed.side, Side::Bottom);
        assert_eq!((placed.anchor_point.x, placed.anchor_point.y), (20.0, 15.0));
    }

    #[test]
    fn huge_location_total_does_not_panic() {
        let mut r = reader();
        r.step(&Step::Document(DocumentEvent::Relocated {
            section_href: "ch1".into(),
            end_position: "ch1/1".into(),
            location: Some(u32::MAX),
            location_total: Some(u32::MAX),
        }));
        assert_eq!(r.summary().page_label, "4294967296 / 4294967296");
    }
}
