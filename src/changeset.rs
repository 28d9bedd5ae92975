//! Changeset - change notification for the sales view
//!
//! Every completed intent (record added, records deleted, filter, sort,
//! selection or page change) produces one `ViewChange`. Changes are:
//!
//! 1. buffered in the view's `Changeset`, so a renderer can drain them and
//!    redraw only what was affected, and
//! 2. pushed to registered `ViewObserver`s after the mutation and the
//!    recomputation of derived state have both finished.
//!
//! Observers therefore never see a master list that disagrees with its
//! aggregates.

use crate::record::RecordId;
use crate::view::SalesView;
use serde::Serialize;

/// A single completed change to the view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ViewChange {
    /// A record was stored
    RecordAdded { id: RecordId },

    /// Records were removed from the master list
    RecordsDeleted { ids: Vec<RecordId> },

    /// The predicate set or global text changed
    FiltersChanged,

    /// The sort spec changed
    SortChanged,

    /// The selection was replaced
    SelectionChanged,

    /// The current page or page size changed
    PageChanged { page: usize, page_size: usize },
}

impl ViewChange {
    /// Returns true if the master record set changed, so aggregates moved
    pub fn affects_aggregates(&self) -> bool {
        matches!(self, ViewChange::RecordAdded { .. } | ViewChange::RecordsDeleted { .. })
    }

    /// Returns true if the visible rows may have changed
    pub fn affects_rows(&self) -> bool {
        !matches!(self, ViewChange::SelectionChanged | ViewChange::PageChanged { .. })
    }
}

/// Buffered changes since the last drain
#[derive(Debug, Clone, Default)]
pub struct Changeset {
    changes: Vec<ViewChange>,
    /// Incremented each time the buffer is drained or cleared
    generation: u64,
}

impl Changeset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, change: ViewChange) {
        self.changes.push(change);
    }

    pub fn changes(&self) -> &[ViewChange] {
        &self.changes
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn clear(&mut self) {
        self.changes.clear();
        self.generation += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Take all buffered changes and start a new generation
    pub fn drain(&mut self) -> Vec<ViewChange> {
        self.generation += 1;
        std::mem::take(&mut self.changes)
    }
}

/// Receives each completed change together with the updated view.
pub trait ViewObserver {
    fn on_change(&mut self, change: &ViewChange, view: &SalesView);
}

impl<F> ViewObserver for F
where
    F: FnMut(&ViewChange, &SalesView),
{
    fn on_change(&mut self, change: &ViewChange, view: &SalesView) {
        self(change, view)
    }
}
