//! Asynchronous label lookups and stale-completion filtering.
//!
//! Resolving the display label for a position (the section title under a
//! bookmark, the chapter shown in the distraction-free footer) is a
//! request/response round trip through the document view. The response
//! can arrive after the requester has moved on, so every request carries a
//! [`RequestToken`] and only the newest token of each slot is honoured.

use std::collections::{BTreeMap, HashMap};

/// Identifies one outstanding label request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    slot: u64,
    generation: u64,
}

impl RequestToken {
    /// UI element the request belongs to.
    pub fn slot(&self) -> u64 {
        self.slot
    }
}

/// Issues a label lookup; the host later reports the result together with
/// the token it was given.
pub trait LabelResolver {
    fn request(&mut self, token: RequestToken, position: &str);
}

/// Tracks the newest request per slot.
#[derive(Debug, Default)]
pub struct LabelRequests {
    current: HashMap<u64, u64>,
    next_generation: u64,
}

impl LabelRequests {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `slot`, superseding any outstanding one.
    pub fn issue(&mut self, slot: u64) -> RequestToken {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.current.insert(slot, generation);
        RequestToken { slot, generation }
    }

    /// Drop the outstanding request for `slot` (element torn down or reset).
    pub fn invalidate(&mut self, slot: u64) {
        self.current.remove(&slot);
    }

    pub fn invalidate_all(&mut self) {
        self.current.clear();
    }

    /// Whether `token` is still the outstanding request of its slot.
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.current.get(&token.slot) == Some(&token.generation)
    }

    /// Accept a completion. Consumes the token on success, so a duplicate
    /// delivery is rejected.
    pub fn accept(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.current.remove(&token.slot);
        true
    }
}

const SECTION_SLOT: u64 = 0;

/// Placeholder shown while a document loads.
pub const LOADING_PLACEHOLDER: &str = "…";

/// Footer labels shown when the chrome is hidden: the page counter and the
/// current section title.
#[derive(Debug)]
pub struct DistractionFreeLabels {
    page: String,
    section: String,
    requests: LabelRequests,
}

impl DistractionFreeLabels {
    pub fn new() -> Self {
        Self {
            page: String::new(),
            section: String::new(),
            requests: LabelRequests::new(),
        }
    }

    /// Page counter, `"12 / 240"`.
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Title of the section at the end of the visible range.
    pub fn section(&self) -> &str {
        &self.section
    }

    /// A document started loading: show placeholders and forget the
    /// outstanding lookup.
    pub fn on_loading(&mut self) {
        self.page = LOADING_PLACEHOLDER.to_string();
        self.section = LOADING_PLACEHOLDER.to_string();
        self.requests.invalidate(SECTION_SLOT);
    }

    /// The reading position changed.
    ///
    /// Locations are zero-based; the counter is shown one-based and only
    /// once locations exist.
    pub fn on_relocated(
        &mut self,
        location: Option<u32>,
        location_total: Option<u32>,
        end_position: &str,
        resolver: &mut dyn LabelResolver,
    ) {
        if let (Some(location), Some(total)) = (location, location_total) {
            if total > 0 {
                self.page = format!(
                    "{} / {}",
                    u64::from(location) + 1,
                    u64::from(total) + 1
                );
            }
        }
        let token = self.requests.issue(SECTION_SLOT);
        resolver.request(token, end_position);
    }

    /// A section-label lookup completed. Returns whether it was applied.
    pub fn on_label_resolved(&mut self, token: RequestToken, label: &str) -> bool {
        if !self.requests.accept(token) {
            log::debug!("Discarding stale section label '{label}'");
            return false;
        }
        self.section = label.to_string();
        true
    }
}

impl Default for DistractionFreeLabels {
    fn default() -> Self {
        Self::new()
    }
}

/// One annotation or bookmark row in the side menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionRow {
    /// Position the row points at; activating the row navigates there.
    pub position: String,
    /// Title of the section containing `position`, empty until resolved.
    pub section: String,
}

/// Annotation and bookmark rows, each resolving its own section label.
///
/// The row id doubles as the request slot, so a completion only ever lands
/// on the row that asked for it, and only while that row still exists.
#[derive(Debug, Default)]
pub struct AnnotationLabels {
    rows: BTreeMap<u64, PositionRow>,
    requests: LabelRequests,
}

impl AnnotationLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) row `id` and look up its section label.
    pub fn add(&mut self, id: u64, position: &str, resolver: &mut dyn LabelResolver) {
        self.rows.insert(
            id,
            PositionRow {
                position: position.to_string(),
                section: String::new(),
            },
        );
        let token = self.requests.issue(id);
        resolver.request(token, position);
    }

    /// Tear down row `id`. Returns whether it existed.
    pub fn remove(&mut self, id: u64) -> bool {
        self.requests.invalidate(id);
        self.rows.remove(&id).is_some()
    }

    /// Drop every row (another document was opened).
    pub fn clear(&mut self) {
        self.requests.invalidate_all();
        self.rows.clear();
    }

    pub fn row(&self, id: u64) -> Option<&PositionRow> {
        self.rows.get(&id)
    }

    /// Rows in id order.
    pub fn rows(&self) -> impl Iterator<Item = (u64, &PositionRow)> + '_ {
        self.rows.iter().map(|(&id, row)| (id, row))
    }

    /// A section-label lookup completed. Returns whether it was applied.
    pub fn on_label_resolved(&mut self, token: RequestToken, label: &str) -> bool {
        if !self.requests.accept(token) {
            log::debug!("Discarding label '{label}' for row {}", token.slot());
            return false;
        }
        match self.rows.get_mut(&token.slot()) {
            Some(row) => {
                row.section = label.to_string();
                true
            },
            None => false,
        }
    }
}
