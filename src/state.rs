use std::sync::Arc;

use serde::Serialize;

use crate::data::Dataset;
use crate::views::{derive_views, DerivedViews};

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Outcome of trying to change the selected sector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// The selection moved to a different known sector.
    Changed { previous: String, current: String },
    /// The requested sector was already selected.
    Unchanged,
    /// The requested value is not a sector of the dataset; nothing changed.
    Rejected,
}

impl SelectionEvent {
    pub fn is_changed(&self) -> bool {
        matches!(self, SelectionEvent::Changed { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, SelectionEvent::Rejected)
    }
}

/// The currently selected sector, always one of `options`.
#[derive(Debug, Clone)]
pub struct Selection {
    current: String,
    options: Vec<String>,
}

impl Selection {
    /// Start at `preferred` if the dataset has it, otherwise at the first
    /// sector in source order.
    pub fn new(dataset: &Dataset, preferred: &str) -> Self {
        let options = dataset.sectors().to_vec();
        let current = if dataset.has_sector(preferred) {
            preferred.to_string()
        } else {
            let fallback = options.first().cloned().unwrap_or_default();
            log::warn!("Default sector '{preferred}' not in data, starting at '{fallback}'");
            fallback
        };
        Selection { current, options }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Values the control may take, in dropdown order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn set(&mut self, value: &str) -> SelectionEvent {
        if !self.options.iter().any(|o| o == value) {
            log::debug!("Ignoring unknown sector '{value}'");
            return SelectionEvent::Rejected;
        }
        if self.current == value {
            return SelectionEvent::Unchanged;
        }
        let previous = std::mem::replace(&mut self.current, value.to_string());
        log::debug!("Sector changed: '{previous}' -> '{value}'");
        SelectionEvent::Changed {
            previous,
            current: value.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// The full state of one dashboard session, independent of rendering.
pub struct DashboardState {
    /// Shared, read-only dataset.
    dataset: Arc<Dataset>,

    selection: Selection,

    /// Views for the current selection (cached).
    views: DerivedViews,

    /// Table page currently shown (0-based).
    table_page: usize,
}

impl DashboardState {
    pub fn new(dataset: Arc<Dataset>, default_sector: &str) -> Self {
        let selection = Selection::new(&dataset, default_sector);
        let views = derive_views(&dataset, selection.current());
        Self {
            dataset,
            selection,
            views,
            table_page: 0,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn views(&self) -> &DerivedViews {
        &self.views
    }

    /// Change the selected sector and recompute the views if it moved.
    pub fn select(&mut self, sector: &str) -> SelectionEvent {
        let event = self.selection.set(sector);
        if event.is_changed() {
            self.views = derive_views(&self.dataset, self.selection.current());
            self.table_page = 0;
        }
        event
    }

    pub fn table_page(&self) -> usize {
        self.table_page
    }

    /// Move to table page `page`, clamped to the last page.
    pub fn set_table_page(&mut self, page: usize) {
        self.table_page = page.min(self.views.table.page_count() - 1);
    }
}
