//! Session scripts: a container size, an outline, and a list of steps.

use std::path::Path;

use lectern_types::error::{LecternError, Result};
use lectern_types::event::{ChromeEvent, DocumentEvent};
use lectern_types::geometry::ContainerBounds;
use lectern_types::outline::{Outline, TreePath};
use serde::Deserialize;

/// A recorded reading session.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Initial size of the document view.
    pub bounds: ContainerBounds,
    #[serde(default)]
    pub outline: Outline,
    pub steps: Vec<Step>,
}

/// One step. Every variant carries an `"event"` tag.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Document(DocumentEvent),
    Chrome(ChromeEvent),
    Host(HostStep),
}

/// Things the hosting window does on its own.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HostStep {
    /// The document view was resized.
    Resize { width: f32, height: f32 },
    /// The open popover finished a layout pass at this height.
    PopoverAllocated { height: f32 },
    PopoverClosed,
    /// Deliver outstanding label lookups, newest first.
    CompleteLabels,
    /// The display-mode setting changed.
    AlwaysReveal { enabled: bool },
    /// An annotation or bookmark row was added to the side menu.
    AddAnnotation { id: u64, position: String },
    RemoveAnnotation { id: u64 },
    /// A contents row was activated.
    ActivateRow { path: TreePath },
    /// An annotation or bookmark row was activated.
    ActivateAnnotation { id: u64 },
}

impl Session {
    pub fn from_json(json: &str) -> Result<Self> {
        let session: Session = serde_json::from_str(json)?;
        if session.steps.is_empty() {
            return Err(LecternError::Script("session has no steps".into()));
        }
        session.outline.validate()?;
        Ok(session)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use lectern_types::event::{Menu, Zone};

    use super::*;

    #[test]
    fn steps_of_every_kind_parse() {
        let json = r#"{
            "bounds": {"width": 800.0, "height": 600.0},
            "outline": [{"id": "ch1", "label": "One"}],
            "steps": [
                {"event": "book_loading"},
                {"event": "pointer_enter", "zone": "header_bar"},
                {"event": "menu_opened", "menu": "main"},
                {"event": "popover_allocated", "height": 120.0},
                {"event": "complete_labels"},
                {"event": "add_annotation", "id": 3, "position": "ch1/20"},
                {"event": "activate_row", "path": [0]}
            ]
        }"#;
        let session = Session::from_json(json).unwrap();
        assert_eq!(session.outline.entries.len(), 1);
        assert_eq!(
            session.steps,
            vec![
                Step::Document(DocumentEvent::BookLoading),
                Step::Chrome(ChromeEvent::PointerEnter {
                    zone: Zone::HeaderBar
                }),
                Step::Chrome(ChromeEvent::MenuOpened { menu: Menu::Main }),
                Step::Host(HostStep::PopoverAllocated { height: 120.0 }),
                Step::Host(HostStep::CompleteLabels),
                Step::Host(HostStep::AddAnnotation {
                    id: 3,
                    position: "ch1/20".into()
                }),
                Step::Host(HostStep::ActivateRow {
                    path: TreePath(vec![0])
                }),
            ]
        );
    }

    #[test]
    fn outline_is_optional() {
        let json = r#"{"bounds": {"width": 1.0, "height": 1.0},
            "steps": [{"event": "click"}]}"#;
        assert!(Session::from_json(json).unwrap().outline.is_empty());
    }

    #[test]
    fn empty_session_is_rejected() {
        let json = r#"{"bounds": {"width": 1.0, "height": 1.0}, "steps": []}"#;
        assert!(matches!(
            Session::from_json(json),
            Err(LecternError::Script(_))
        ));
    }

    #[test]
    fn outline_with_blank_nested_id_is_rejected() {
        let json = r#"{"bounds": {"width": 1.0, "height": 1.0},
            "outline": [{"id": "p", "label": "P", "children": [{"id": "", "label": "X"}]}],
            "steps": [{"event": "click"}]}"#;
        assert!(matches!(
            Session::from_json(json),
            Err(LecternError::Outline(_))
        ));
    }

    #[test]
    fn reversed_selection_rect_is_normalised() {
        let json = r#"{"bounds": {"width": 400.0, "height": 300.0}, "steps": [
            {"event": "selection",
             "rect": {"left": 30.0, "right": 10.0, "top": 15.0, "bottom": 5.0}}
        ]}"#;
        let session = Session::from_json(json).unwrap();
        let Step::Document(DocumentEvent::Selection { rect }) = &session.steps[0] else {
            panic!("expected a selection step, got {:?}", session.steps[0]);
        };
        assert_eq!((rect.left, rect.right), (10.0, 30.0));
        assert_eq!((rect.top, rect.bottom), (5.0, 15.0));
    }

    #[test]
    fn unknown_step_is_rejected() {
        let json = r#"{"bounds": {"width": 1.0, "height": 1.0},
            "steps": [{"event": "teleport"}]}"#;
        assert!(matches!(Session::from_json(json), Err(LecternError::Json(_))));
    }

    #[test]
    fn bundled_demo_parses() {
        let session = Session::from_json(include_str!("../demo/session.json")).unwrap();
        assert!(!session.outline.is_empty());
    }
}
