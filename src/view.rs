//! SalesView - the derived state behind the sales dashboard
//!
//! `SalesView` owns the master record list and everything derived from it:
//! the visible rows (filtered, then stably sorted), the selection, the current
//! page, and the aggregate series. Display surfaces only read snapshots and
//! submit intents; every intent runs to completion (mutation and recompute)
//! before observers are told about it.
//!
//! The visible rows are stored as a mapping from view position to store
//! position, so records are never copied by filtering or sorting.

use crate::aggregate::{Aggregates, ChartSeries, Summary};
use crate::changeset::{Changeset, ViewChange, ViewObserver};
use crate::config::DashboardConfig;
use crate::filter::{Constraint, FieldFilter, FilterOperator, FilterSet};
use crate::pagination::{PageInfo, Paginator};
use crate::record::{Field, RecordId, SaleCandidate, SaleRecord};
use crate::seed;
use crate::sort::SortSpec;
use crate::store::RecordStore;
use crate::validation::{self, ValidSale, ValidationError};
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

/// Rejected view intents that carry no record data
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("page {page} out of range [0, {page_count})")]
    PageOutOfRange { page: usize, page_count: usize },

    #[error("page size {0} is not one of the configured options")]
    UnsupportedPageSize(usize),

    #[error("constraint {index} out of range for {field} ({len} constraints)")]
    ConstraintOutOfRange { field: Field, index: usize, len: usize },
}

/// Everything a display surface needs to render one frame.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub revision: u64,
    /// Rows of the current page
    pub rows: Vec<SaleRecord>,
    pub page: PageInfo,
    pub visible_count: usize,
    /// Selected ids, in visible order
    pub selection: Vec<RecordId>,
    pub filters: FilterSet,
    pub sort: SortSpec,
    pub aggregates: Aggregates,
    pub summary: Summary,
    pub charts: Vec<ChartSeries>,
    pub region_options: Vec<String>,
    pub product_options: Vec<String>,
}

/// Filter, sort, selection and aggregation state over the sale records.
///
/// # Examples
///
/// ```
/// use salesview::{DashboardConfig, Field, FieldFilter, MatchMode, SalesView, SaleCandidate};
///
/// let mut view = SalesView::with_demo_data(DashboardConfig::default());
/// assert_eq!(view.aggregates().by_region.get("Asia"), Some(135.0));
///
/// view.set_field_filter(Field::Region, FieldFilter::single(MatchMode::Equals, "Asia"));
/// let products: Vec<&str> = view.visible_rows().iter().map(|r| r.product()).collect();
/// assert_eq!(products, vec!["Tablet", "Camera"]);
///
/// let speaker = view
///     .add_record(&SaleCandidate::new("2025-04-28", "Asia", "Speaker", 50.0))
///     .unwrap();
/// view.set_selection([speaker.id()]);
/// assert_eq!(view.delete_selected(), 1);
/// assert_eq!(view.aggregates().by_region.get("Asia"), Some(135.0));
/// ```
pub struct SalesView {
    config: DashboardConfig,
    store: RecordStore,
    filters: FilterSet,
    sort: SortSpec,
    selection: HashSet<RecordId>,
    /// visible[view_pos] = store position
    visible: Vec<usize>,
    aggregates: Aggregates,
    summary: Summary,
    paginator: Paginator,
    changeset: Changeset,
    observers: Vec<Box<dyn ViewObserver>>,
    /// Incremented after every committed intent
    revision: u64,
}

impl SalesView {
    /// An empty view.
    pub fn new(config: DashboardConfig) -> Self {
        let paginator = Paginator::new(config.page_size);
        SalesView {
            config,
            store: RecordStore::new(),
            filters: FilterSet::default(),
            sort: SortSpec::default(),
            selection: HashSet::new(),
            visible: Vec::new(),
            aggregates: Aggregates::default(),
            summary: Summary::default(),
            paginator,
            changeset: Changeset::new(),
            observers: Vec::new(),
            revision: 0,
        }
    }

    /// A view seeded with already validated sales. Seeding emits no changes.
    pub fn with_records(config: DashboardConfig, sales: Vec<ValidSale>) -> Self {
        let mut view = SalesView::new(config);
        for sale in sales {
            view.store.append(sale);
        }
        view.recompute_aggregates();
        view.refresh_visible();
        view
    }

    /// A view seeded with the six demo sales.
    pub fn with_demo_data(config: DashboardConfig) -> Self {
        Self::with_records(config, seed::demo_records())
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    // ========================================================================
    // Derived state
    // ========================================================================

    /// Master records in insertion order
    pub fn records(&self) -> &[SaleRecord] {
        self.store.as_slice()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&SaleRecord> {
        self.store.get(id)
    }

    /// Records passing every active predicate, in sorted order.
    pub fn visible_rows(&self) -> Vec<&SaleRecord> {
        let records = self.store.as_slice();
        self.visible.iter().map(|&pos| &records[pos]).collect()
    }

    pub fn visible_ids(&self) -> Vec<RecordId> {
        let records = self.store.as_slice();
        self.visible.iter().map(|&pos| records[pos].id()).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn aggregates(&self) -> &Aggregates {
        &self.aggregates
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    pub fn charts(&self) -> Vec<ChartSeries> {
        self.aggregates.charts()
    }

    /// Distinct regions, sorted; feeds the filter and editor dropdowns.
    pub fn region_options(&self) -> Vec<String> {
        self.store.distinct(Field::Region)
    }

    /// Distinct products, sorted.
    pub fn product_options(&self) -> Vec<String> {
        self.store.distinct(Field::Product)
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sort_spec(&self) -> &SortSpec {
        &self.sort
    }

    pub fn selection(&self) -> &HashSet<RecordId> {
        &self.selection
    }

    /// Selected records in visible order.
    pub fn selected_rows(&self) -> Vec<&SaleRecord> {
        self.visible_rows()
            .into_iter()
            .filter(|r| self.selection.contains(&r.id()))
            .collect()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    pub fn set_global_filter(&mut self, text: impl Into<String>) {
        self.filters.global = text.into();
        self.refresh_visible();
        self.commit(ViewChange::FiltersChanged);
    }

    /// Replace the predicate of one field.
    pub fn set_field_filter(&mut self, field: Field, filter: FieldFilter) {
        self.filters.set(field, filter);
        self.refresh_visible();
        self.commit(ViewChange::FiltersChanged);
    }

    pub fn set_field_operator(&mut self, field: Field, operator: FilterOperator) {
        self.filters.get_mut(field).operator = operator;
        self.refresh_visible();
        self.commit(ViewChange::FiltersChanged);
    }

    /// Append a constraint to a field's predicate.
    pub fn add_constraint(&mut self, field: Field, constraint: Constraint) {
        self.filters.get_mut(field).constraints.push(constraint);
        self.refresh_visible();
        self.commit(ViewChange::FiltersChanged);
    }

    /// Remove one constraint. The last remaining constraint is reset to a
    /// null operand instead, so the field always keeps a predicate.
    pub fn remove_constraint(&mut self, field: Field, index: usize) -> Result<(), ViewError> {
        let filter = self.filters.get_mut(field);
        let len = filter.constraints.len();
        if index >= len {
            return Err(ViewError::ConstraintOutOfRange { field, index, len });
        }

        if len == 1 {
            filter.constraints[0].value = None;
        } else {
            filter.constraints.remove(index);
        }

        self.refresh_visible();
        self.commit(ViewChange::FiltersChanged);
        Ok(())
    }

    /// Reset every predicate and the global text to their no-op defaults.
    pub fn clear_filters(&mut self) {
        self.filters = FilterSet::default();
        self.refresh_visible();
        self.commit(ViewChange::FiltersChanged);
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    pub fn set_sort(&mut self, spec: SortSpec) {
        self.sort = spec;
        self.refresh_visible();
        self.commit(ViewChange::SortChanged);
    }

    /// Cycle one column through ascending, descending and unsorted.
    pub fn toggle_sort(&mut self, field: Field) {
        self.sort.toggle(field);
        self.refresh_visible();
        self.commit(ViewChange::SortChanged);
    }

    // ========================================================================
    // Selection and records
    // ========================================================================

    /// Replace the selection. Ids that are not currently visible are dropped.
    pub fn set_selection<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = RecordId>,
    {
        let visible: HashSet<RecordId> = self.visible_ids().into_iter().collect();
        let mut dropped = 0;
        let mut selection = HashSet::new();
        for id in ids {
            if visible.contains(&id) {
                selection.insert(id);
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            log::debug!("ignored {} selected id(s) that are not visible", dropped);
        }

        self.selection = selection;
        self.commit(ViewChange::SelectionChanged);
    }

    /// Validate and store a new record.
    ///
    /// On failure nothing changes and one error per invalid field is returned.
    pub fn add_record(&mut self, candidate: &SaleCandidate) -> Result<SaleRecord, Vec<ValidationError>> {
        let sale = validation::validate(candidate).map_err(|errors| {
            log::debug!("rejected sale candidate with {} invalid field(s)", errors.len());
            errors
        })?;

        let record = self.store.append(sale).clone();
        self.recompute_aggregates();
        self.refresh_visible();

        log::debug!(
            "added sale {} ({} / {} / {})",
            record.id(),
            record.region(),
            record.product(),
            record.sales()
        );
        self.commit(ViewChange::RecordAdded { id: record.id() });
        Ok(record)
    }

    /// Delete every selected record and clear the selection.
    ///
    /// Returns the number of records removed; an empty selection is a no-op.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }

        let selection = std::mem::take(&mut self.selection);
        let removed = self.store.remove_ids(&selection);
        self.recompute_aggregates();
        self.refresh_visible();

        log::debug!("deleted {} sale(s)", removed.len());
        self.commit(ViewChange::RecordsDeleted {
            ids: removed.iter().map(|r| r.id()).collect(),
        });
        removed.len()
    }

    // ========================================================================
    // Paging
    // ========================================================================

    /// Rows of the current page.
    pub fn page(&self) -> Vec<&SaleRecord> {
        let records = self.store.as_slice();
        self.visible[self.paginator.bounds(self.visible.len())]
            .iter()
            .map(|&pos| &records[pos])
            .collect()
    }

    pub fn page_info(&self) -> PageInfo {
        self.paginator.info(self.visible.len())
    }

    pub fn set_page(&mut self, page: usize) -> Result<(), ViewError> {
        let total = self.visible.len();
        let page_count = self.paginator.page_count(total);
        self.paginator
            .go_to(page, total)
            .map_err(|_| ViewError::PageOutOfRange { page, page_count })?;
        self.commit_page_change();
        Ok(())
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<(), ViewError> {
        if !self.config.allows_page_size(size) {
            return Err(ViewError::UnsupportedPageSize(size));
        }
        self.paginator.resize(size, self.visible.len());
        self.commit_page_change();
        Ok(())
    }

    // ========================================================================
    // Observation
    // ========================================================================

    /// Register an observer called after every committed intent.
    pub fn subscribe<O>(&mut self, observer: O)
    where
        O: ViewObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn changeset(&self) -> &Changeset {
        &self.changeset
    }

    pub fn drain_changes(&mut self) -> Vec<ViewChange> {
        self.changeset.drain()
    }

    pub fn snapshot(&self) -> Snapshot {
        let selection = self
            .visible_ids()
            .into_iter()
            .filter(|id| self.selection.contains(id))
            .collect();

        Snapshot {
            revision: self.revision,
            rows: self.page().into_iter().cloned().collect(),
            page: self.page_info(),
            visible_count: self.visible.len(),
            selection,
            filters: self.filters.clone(),
            sort: self.sort.clone(),
            aggregates: self.aggregates.clone(),
            summary: self.summary,
            charts: self.charts(),
            region_options: self.region_options(),
            product_options: self.product_options(),
        }
    }

    // ========================================================================
    // Recompute
    // ========================================================================

    /// Filter, sort, prune the selection and clamp the page.
    fn refresh_visible(&mut self) {
        let records = self.store.as_slice();
        let global_fields = &self.config.global_filter_fields;
        let case_sensitive = self.config.case_sensitive_search;

        let mut visible: Vec<usize> = (0..records.len())
            .filter(|&pos| self.filters.matches(&records[pos], global_fields, case_sensitive))
            .collect();
        self.sort.sort_positions(&mut visible, records);

        if !self.selection.is_empty() {
            let visible_ids: HashSet<RecordId> = visible.iter().map(|&pos| records[pos].id()).collect();
            let before = self.selection.len();
            self.selection.retain(|id| visible_ids.contains(id));
            if self.selection.len() != before {
                log::debug!(
                    "dropped {} selected row(s) no longer visible",
                    before - self.selection.len()
                );
            }
        }

        self.paginator.clamp(visible.len());
        self.visible = visible;
    }

    /// Rebuild aggregates and summary from the full master list.
    fn recompute_aggregates(&mut self) {
        self.aggregates = Aggregates::compute(&self.store);
        self.summary = Summary::compute(&self.store);
    }

    fn commit_page_change(&mut self) {
        let change = ViewChange::PageChanged {
            page: self.paginator.current(),
            page_size: self.paginator.page_size(),
        };
        self.commit(change);
    }

    /// Record a completed change and notify observers.
    fn commit(&mut self, change: ViewChange) {
        self.revision += 1;
        log::debug!(
            "revision {}: {:?} ({} of {} rows visible)",
            self.revision,
            change,
            self.visible.len(),
            self.store.len()
        );

        let mut observers = std::mem::take(&mut self.observers);
        for observer in observers.iter_mut() {
            observer.on_change(&change, &*self);
        }
        self.observers = observers;

        self.changeset.push(change);
    }
}

impl Default for SalesView {
    fn default() -> Self {
        SalesView::new(DashboardConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{MatchMode, Operand};
    use crate::sort::SortKey;
    use chrono::NaiveDate;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn demo() -> SalesView {
        SalesView::with_demo_data(DashboardConfig::default())
    }

    fn products(rows: &[&SaleRecord]) -> Vec<String> {
        rows.iter().map(|r| r.product().to_string()).collect()
    }

    fn id_of(view: &SalesView, product: &str) -> RecordId {
        view.records()
            .iter()
            .find(|r| r.product() == product)
            .map(|r| r.id())
            .unwrap()
    }

    #[test]
    fn test_seeded_view() {
        let view = demo();
        assert_eq!(view.len(), 6);
        assert_eq!(view.visible_len(), 6);
        assert_eq!(view.revision(), 0);
        assert!(view.changeset().is_empty());
        assert_eq!(view.summary().orders, 6);
    }

    #[test]
    fn test_field_filter_keeps_relative_order() {
        let mut view = demo();
        view.set_field_filter(Field::Region, FieldFilter::single(MatchMode::Equals, "Asia"));
        assert_eq!(products(&view.visible_rows()), vec!["Tablet", "Camera"]);
        // aggregates ignore filters
        assert_eq!(view.aggregates().by_region.get("Europe"), Some(140.0));
    }

    #[test]
    fn test_sales_and_date_filters() {
        let mut view = demo();
        view.set_field_filter(Field::Sales, FieldFilter::single(MatchMode::GreaterThan, 60.0));
        assert_eq!(products(&view.visible_rows()), vec!["Laptop", "Smartphone", "Tablet"]);

        view.set_field_filter(
            Field::Date,
            FieldFilter::single(MatchMode::DateIs, NaiveDate::from_ymd_opt(2025, 4, 26).unwrap()),
        );
        assert_eq!(products(&view.visible_rows()), vec!["Tablet"]);
    }

    #[test]
    fn test_in_filter_and_or_constraints() {
        let mut view = demo();
        view.set_field_filter(
            Field::Product,
            FieldFilter::single(MatchMode::In, Operand::set(["Camera", "Laptop"])),
        );
        assert_eq!(products(&view.visible_rows()), vec!["Laptop", "Camera"]);

        view.clear_filters();
        view.add_constraint(Field::Region, Constraint::new(MatchMode::Equals, "Europe"));
        view.add_constraint(Field::Region, Constraint::new(MatchMode::StartsWith, "North"));
        assert_eq!(
            products(&view.visible_rows()),
            vec!["Laptop", "Smartphone", "Monitor", "Headphones"]
        );

        view.set_field_operator(Field::Region, FilterOperator::And);
        assert!(view.visible_rows().is_empty());
    }

    #[test]
    fn test_remove_constraint() {
        let mut view = demo();
        view.set_field_filter(Field::Region, FieldFilter::single(MatchMode::Equals, "Asia"));
        view.remove_constraint(Field::Region, 0).unwrap();
        assert_eq!(view.visible_len(), 6);
        assert_eq!(view.filters().get(Field::Region).constraints.len(), 1);

        let err = view.remove_constraint(Field::Region, 3).unwrap_err();
        assert_eq!(
            err,
            ViewError::ConstraintOutOfRange {
                field: Field::Region,
                index: 3,
                len: 1
            }
        );
    }

    #[test]
    fn test_global_filter() {
        let mut view = demo();
        view.set_global_filter("EUROPE");
        assert_eq!(products(&view.visible_rows()), vec!["Smartphone", "Headphones"]);

        view.set_global_filter("04-27");
        assert_eq!(products(&view.visible_rows()), vec!["Headphones", "Camera"]);

        view.set_global_filter("");
        assert_eq!(view.visible_len(), 6);
    }

    #[test]
    fn test_case_sensitive_global_filter() {
        let config = DashboardConfig {
            case_sensitive_search: true,
            ..DashboardConfig::default()
        };
        let mut view = SalesView::with_demo_data(config);
        view.set_global_filter("europe");
        assert!(view.visible_rows().is_empty());
        view.set_global_filter("Europe");
        assert_eq!(view.visible_len(), 2);
    }

    #[test]
    fn test_sort_after_filter() {
        let mut view = demo();
        view.set_field_filter(Field::Sales, FieldFilter::single(MatchMode::GreaterThan, 40.0));
        view.set_sort(SortSpec::new(vec![SortKey::ascending(Field::Sales)]));
        assert_eq!(
            products(&view.visible_rows()),
            vec!["Headphones", "Camera", "Tablet", "Smartphone", "Laptop"]
        );

        view.toggle_sort(Field::Sales);
        assert_eq!(view.visible_rows()[0].product(), "Laptop");
        view.toggle_sort(Field::Sales);
        assert!(view.sort_spec().is_empty());
        assert_eq!(view.visible_rows()[0].product(), "Laptop");
        assert_eq!(view.visible_rows()[1].product(), "Smartphone");
    }

    #[test]
    fn test_selection_intersects_visible() {
        let mut view = demo();
        view.set_field_filter(Field::Region, FieldFilter::single(MatchMode::Equals, "Asia"));

        let tablet = id_of(&view, "Tablet");
        let laptop = id_of(&view, "Laptop");
        view.set_selection([tablet, laptop, RecordId::new()]);

        assert_eq!(view.selection().len(), 1);
        assert!(view.selection().contains(&tablet));
    }

    #[test]
    fn test_filter_change_prunes_selection() {
        let mut view = demo();
        let tablet = id_of(&view, "Tablet");
        let laptop = id_of(&view, "Laptop");
        view.set_selection([tablet, laptop]);
        assert_eq!(view.selection().len(), 2);

        view.set_field_filter(Field::Region, FieldFilter::single(MatchMode::Equals, "Asia"));
        assert_eq!(view.selection().len(), 1);
        assert!(view.selection().contains(&tablet));

        // clearing only widens the visible rows, so the selection survives
        view.clear_filters();
        assert_eq!(view.selection().len(), 1);
    }

    #[test]
    fn test_delete_selected() {
        let mut view = demo();
        let camera = id_of(&view, "Camera");
        let monitor = id_of(&view, "Monitor");
        view.set_selection([camera, monitor]);

        assert_eq!(view.delete_selected(), 2);
        assert_eq!(view.len(), 4);
        assert!(view.selection().is_empty());
        assert!(view.get(camera).is_none());
        assert_eq!(view.aggregates().by_region.get("Asia"), Some(75.0));
        assert_eq!(view.aggregates().by_region.get("North America"), Some(120.0));
        assert_eq!(view.summary().total_sales, 335.0);
    }

    #[test]
    fn test_delete_with_empty_selection_is_noop() {
        let mut view = demo();
        assert_eq!(view.delete_selected(), 0);
        assert_eq!(view.len(), 6);
        assert_eq!(view.revision(), 0);
    }

    #[test]
    fn test_add_record_rejects_without_mutation() {
        let mut view = demo();
        let errors = view
            .add_record(&SaleCandidate::new("2025-04-28", "", "X", 10.0))
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::Region);
        assert_eq!(view.len(), 6);
        assert_eq!(view.revision(), 0);
    }

    #[test]
    fn test_add_record_respects_active_filter() {
        let mut view = demo();
        view.set_field_filter(Field::Region, FieldFilter::single(MatchMode::Equals, "Asia"));
        view.add_record(&SaleCandidate::new("2025-04-28", "Europe", "Speaker", 50.0))
            .unwrap();
        assert_eq!(view.visible_len(), 2);
        assert_eq!(view.len(), 7);
        assert_eq!(view.aggregates().by_region.get("Europe"), Some(190.0));
    }

    #[test]
    fn test_options_are_sorted_and_distinct() {
        let view = demo();
        assert_eq!(view.region_options(), vec!["Asia", "Europe", "North America"]);
        assert_eq!(
            view.product_options(),
            vec!["Camera", "Headphones", "Laptop", "Monitor", "Smartphone", "Tablet"]
        );
    }

    #[test]
    fn test_paging() {
        let mut view = demo();
        assert_eq!(view.page().len(), 5);
        assert_eq!(view.page_info().page_count, 2);

        view.set_page(1).unwrap();
        assert_eq!(products(&view.page()), vec!["Camera"]);

        assert_eq!(
            view.set_page(2).unwrap_err(),
            ViewError::PageOutOfRange { page: 2, page_count: 2 }
        );
        assert_eq!(view.set_page_size(7).unwrap_err(), ViewError::UnsupportedPageSize(7));

        // filtering down to one page pulls the current page back
        view.set_global_filter("Asia");
        assert_eq!(view.page_info().index, 0);
        assert_eq!(products(&view.page()), vec!["Tablet", "Camera"]);

        view.clear_filters();
        view.set_page_size(10).unwrap();
        assert_eq!(view.page().len(), 6);
    }

    #[test]
    fn test_observers_see_consistent_state() {
        let mut view = demo();
        let seen: Rc<RefCell<Vec<(ViewChange, usize, f64)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        view.subscribe(move |change: &ViewChange, view: &SalesView| {
            sink.borrow_mut()
                .push((change.clone(), view.len(), view.aggregates().by_region.total()));
        });

        let record = view
            .add_record(&SaleCandidate::new("2025-04-28", "Asia", "Speaker", 50.0))
            .unwrap();
        view.set_selection([record.id()]);
        view.delete_selected();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], (ViewChange::RecordAdded { id: record.id() }, 7, 475.0));
        assert_eq!(seen[1].0, ViewChange::SelectionChanged);
        assert_eq!(seen[2], (ViewChange::RecordsDeleted { ids: vec![record.id()] }, 6, 425.0));
    }

    #[test]
    fn test_changeset_buffers_changes() {
        let mut view = demo();
        view.set_global_filter("Asia");
        view.toggle_sort(Field::Sales);

        assert_eq!(view.changeset().len(), 2);
        let drained = view.drain_changes();
        assert_eq!(drained, vec![ViewChange::FiltersChanged, ViewChange::SortChanged]);
        assert!(view.changeset().is_empty());
        assert_eq!(view.changeset().generation(), 1);
        assert_eq!(view.revision(), 2);
    }

    #[test]
    fn test_snapshot() {
        let mut view = demo();
        view.toggle_sort(Field::Sales);
        let top = view.visible_ids()[0];
        view.set_selection([top]);

        let snapshot = view.snapshot();
        assert_eq!(snapshot.rows.len(), 5);
        assert_eq!(snapshot.rows[0].product(), "Monitor");
        assert_eq!(snapshot.selection, vec![top]);
        assert_eq!(snapshot.visible_count, 6);
        assert_eq!(snapshot.charts.len(), 3);
        assert_eq!(snapshot.revision, 2);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["summary"]["orders"], 6);
        assert_eq!(json["sort"][0]["field"], "sales");
    }
}
