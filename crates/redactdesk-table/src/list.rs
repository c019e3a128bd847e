//! Per-mount list state.
//!
//! A [`ListState`] owns the sort, pagination, selection, filter query and
//! preferences of one mounted list. It never owns the records: callers
//! pass the latest fetched slice to [`ListState::derive`] and friends.

use std::fmt;

use crate::Record;
use crate::column::{ColumnDescriptor, ColumnOverride, ColumnSet, FilterProperty, RowAction};
use crate::engine::{
    Collection, CollectionState, Derived, PaginationState, SortState, matches_text, sort_label,
};
use crate::error::Result;
use crate::filter::{FilterQuery, FilterToken, Operation};
use crate::preferences::Preferences;
use crate::selection::{Selection, SelectionType};

/// Static configuration of a list.
pub struct ListOptions<R> {
    /// Plural title, e.g. "Folders".
    pub title: String,
    /// Selection cardinality.
    pub selection_type: SelectionType,
    /// Whether selection survives a refetch.
    pub keep_selection: bool,
    /// Column ids that never appear in the filter menu.
    pub filter_exclusions: Vec<String>,
    /// Whether free text filters when no tokens are set.
    pub free_text_filtering: bool,
    /// Sort applied at mount.
    pub default_sort: SortState,
    /// Records that can never be selected.
    pub is_item_disabled: fn(&R) -> bool,
    /// Placeholder shown when there are no records; defaults to "No {title}".
    pub empty_title: Option<String>,
}

impl<R> ListOptions<R> {
    /// Creates options with multiple selection and no default sort.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            selection_type: SelectionType::Multiple,
            keep_selection: true,
            filter_exclusions: Vec::new(),
            free_text_filtering: false,
            default_sort: SortState::default(),
            is_item_disabled: |_| false,
            empty_title: None,
        }
    }

    /// Sets the selection cardinality.
    #[must_use]
    pub const fn selection_type(mut self, selection_type: SelectionType) -> Self {
        self.selection_type = selection_type;
        self
    }

    /// Sets whether selection survives a refetch.
    #[must_use]
    pub const fn keep_selection(mut self, keep: bool) -> Self {
        self.keep_selection = keep;
        self
    }

    /// Excludes columns from the filter menu.
    #[must_use]
    pub fn filter_exclusions(mut self, ids: &[&str]) -> Self {
        self.filter_exclusions = ids.iter().map(ToString::to_string).collect();
        self
    }

    /// Enables the free-text fallback.
    #[must_use]
    pub const fn free_text_filtering(mut self, enabled: bool) -> Self {
        self.free_text_filtering = enabled;
        self
    }

    /// Sets the sort applied at mount.
    #[must_use]
    pub fn default_sort(mut self, sort: SortState) -> Self {
        self.default_sort = sort;
        self
    }

    /// Marks records that can never be selected.
    #[must_use]
    pub const fn disabled_when(mut self, predicate: fn(&R) -> bool) -> Self {
        self.is_item_disabled = predicate;
        self
    }

    /// Replaces the empty-list placeholder.
    #[must_use]
    pub fn empty_title(mut self, title: impl Into<String>) -> Self {
        self.empty_title = Some(title.into());
        self
    }
}

impl<R> Clone for ListOptions<R> {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            selection_type: self.selection_type,
            keep_selection: self.keep_selection,
            filter_exclusions: self.filter_exclusions.clone(),
            free_text_filtering: self.free_text_filtering,
            default_sort: self.default_sort.clone(),
            is_item_disabled: self.is_item_disabled,
            empty_title: self.empty_title.clone(),
        }
    }
}

impl<R> fmt::Debug for ListOptions<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListOptions")
            .field("title", &self.title)
            .field("selection_type", &self.selection_type)
            .field("keep_selection", &self.keep_selection)
            .field("filter_exclusions", &self.filter_exclusions)
            .finish_non_exhaustive()
    }
}

/// Sort, pagination, selection, filter and preferences of one list.
pub struct ListState<R> {
    columns: ColumnSet<R>,
    options: ListOptions<R>,
    preferences: Preferences,
    query: FilterQuery,
    sort: SortState,
    pagination: PaginationState,
    selection: Selection,
}

impl<R: Record> ListState<R> {
    /// Mounts a list over `columns`.
    #[must_use]
    pub fn new(columns: ColumnSet<R>, options: ListOptions<R>) -> Self {
        let preferences = Preferences::from_columns(&columns);
        let selection =
            Selection::new(options.selection_type).keep_selection(options.keep_selection);
        Self {
            sort: options.default_sort.clone(),
            columns,
            options,
            preferences,
            query: FilterQuery::default(),
            pagination: PaginationState::default(),
            selection,
        }
    }

    /// Merges caller overrides into the columns and the display order.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &[ColumnOverride<R>]) -> Self {
        self.columns = self.columns.with_overrides(overrides);
        let page_size = self.preferences.page_size;
        self.preferences = Preferences {
            page_size,
            ..Preferences::from_columns(&self.columns)
        };
        self
    }

    /// Adds a trailing actions column for the given row actions.
    #[must_use]
    pub fn with_row_actions(mut self, actions: Vec<RowAction<R>>) -> Self {
        self.columns = self.columns.with_actions(actions);
        self.preferences.ensure_initialized(&self.columns);
        self
    }

    /// Plural title of the list.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.options.title
    }

    /// Whether the free-text search input is offered.
    #[must_use]
    pub const fn free_text_enabled(&self) -> bool {
        self.options.free_text_filtering
    }

    /// Column descriptors.
    #[must_use]
    pub const fn columns(&self) -> &ColumnSet<R> {
        &self.columns
    }

    /// Current preferences.
    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Current filter query.
    #[must_use]
    pub const fn query(&self) -> &FilterQuery {
        &self.query
    }

    /// Current sort.
    #[must_use]
    pub const fn sort(&self) -> &SortState {
        &self.sort
    }

    /// Current pagination.
    #[must_use]
    pub const fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Derives the visible page of `records`.
    pub fn derive<'a>(&self, records: &'a [R]) -> Derived<'a, R> {
        let searchable = self.preferences.visible_ids();
        Collection::new(&self.columns)
            .free_text(self.options.free_text_filtering)
            .searchable(&searchable)
            .derive(records, &self.query, &self.sort, &self.pagination)
    }

    /// Every filtered and sorted record across all pages.
    pub fn matching<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        let searchable = self.preferences.visible_ids();
        let collection = Collection::new(&self.columns)
            .free_text(self.options.free_text_filtering)
            .searchable(&searchable);
        let mut items = collection.filter(records, &self.query);
        collection.sort(&mut items, &self.sort);
        items
    }

    /// Placeholder state for `records`.
    pub fn collection_state(&self, records: &[R]) -> CollectionState {
        self.derive(records).state
    }

    /// Whether pagination, filter and preferences controls are shown.
    #[must_use]
    pub const fn shows_controls(&self, records: &[R]) -> bool {
        !records.is_empty()
    }

    /// Placeholder text for an empty list.
    #[must_use]
    pub fn empty_text(&self) -> String {
        self.options
            .empty_title
            .clone()
            .unwrap_or_else(|| format!("No {}", self.options.title))
    }

    /// "N matches" label, only while a filter is active.
    pub fn matches_label(&self, records: &[R]) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(matches_text(self.derive(records).total_matches))
        }
    }

    /// Header counter: selected count if any, else total.
    pub fn header_counter(&self, records: &[R]) -> String {
        if self.selection.is_empty() {
            format!("({})", records.len())
        } else {
            format!("({})", self.selection.len())
        }
    }

    /// Shown columns in display order.
    #[must_use]
    pub fn visible_columns(&self) -> Vec<&ColumnDescriptor<R>> {
        if self.preferences.content_display.is_empty() {
            return self
                .columns
                .by_sort_order()
                .into_iter()
                .filter(|c| c.visible)
                .collect();
        }
        self.preferences
            .content_display
            .iter()
            .filter(|item| item.visible)
            .filter_map(|item| self.columns.get(&item.id))
            .collect()
    }

    /// Property filter menu for the shown columns.
    #[must_use]
    pub fn filter_properties(&self) -> Vec<FilterProperty> {
        self.columns
            .filter_properties(self.options.filter_exclusions.as_slice(), |c| {
                self.preferences.is_visible(&c.id)
            })
    }

    /// Header label describing a column's sort state.
    #[must_use]
    pub fn sort_label(&self, column_id: &str) -> String {
        let header = self
            .columns
            .get(column_id)
            .map_or(column_id, |c| c.header.as_str());
        sort_label(
            header,
            self.sort.is_sorted_by(column_id),
            self.sort.descending,
        )
    }

    /// Adds a filter token and returns to page 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the token's property or operator is not declared.
    pub fn add_token(&mut self, token: FilterToken) -> Result<()> {
        self.query = self.query.clone().with_token(&self.columns, token)?;
        self.pagination.reset();
        Ok(())
    }

    /// Removes the token at `index`, if any, and returns to page 1.
    pub fn remove_token(&mut self, index: usize) {
        if index < self.query.tokens.len() {
            self.query.tokens.remove(index);
            self.pagination.reset();
        }
    }

    /// Sets how tokens combine and returns to page 1.
    pub fn set_operation(&mut self, operation: Operation) {
        self.query.operation = operation;
        self.pagination.reset();
    }

    /// Sets the free text and returns to page 1.
    pub fn set_free_text(&mut self, text: impl Into<String>) {
        self.query.free_text = text.into();
        self.pagination.reset();
    }

    /// Replaces the whole query and returns to page 1.
    ///
    /// # Errors
    ///
    /// Returns an error if any token is not declared by the columns.
    pub fn set_query(&mut self, query: FilterQuery) -> Result<()> {
        query.validate(&self.columns)?;
        self.query = query;
        self.pagination.reset();
        Ok(())
    }

    /// Resets the query to `{tokens: [], operation: or}`.
    pub fn clear_filter(&mut self) {
        self.query = FilterQuery::default();
        self.pagination.reset();
    }

    /// Header click: sort ascending by `field`, or flip direction if it is
    /// already the sort field. Returns false for unknown or unsortable ids.
    pub fn sort_by(&mut self, field: &str) -> bool {
        if !self.columns.get(field).is_some_and(|c| c.sortable) {
            return false;
        }
        if self.sort.is_sorted_by(field) {
            self.sort.descending = !self.sort.descending;
        } else {
            self.sort = SortState::ascending(field);
        }
        true
    }

    /// Replaces the sort state.
    pub fn set_sort(&mut self, sort: SortState) {
        self.sort = sort;
    }

    /// Moves to a page.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is 0.
    pub fn set_page(&mut self, index: usize) -> Result<()> {
        self.pagination = PaginationState::new(self.pagination.page_size(), index)?;
        Ok(())
    }

    /// Applies edited preferences without refetching.
    ///
    /// # Errors
    ///
    /// Returns an error if the page size is zero.
    pub fn apply_preferences(&mut self, mut preferences: Preferences) -> Result<()> {
        preferences.validate()?;
        preferences.ensure_initialized(&self.columns);
        self.pagination = PaginationState::new(preferences.page_size, 1)?;
        self.preferences = preferences;
        Ok(())
    }

    /// Returns true if the record can never be selected.
    pub fn is_item_disabled(&self, record: &R) -> bool {
        (self.options.is_item_disabled)(record)
    }

    /// Returns true if the record is selected.
    pub fn is_selected(&self, record: &R) -> bool {
        self.selection.contains(&record.key())
    }

    /// Selects `record` alone, replacing any previous selection.
    /// Disabled records leave the selection empty.
    pub fn select(&mut self, record: &R) {
        self.set_selection(&[record]);
    }

    /// Toggles one record's selection.
    pub fn toggle_selection(&mut self, record: &R) {
        self.selection.toggle(record, self.options.is_item_disabled);
    }

    /// Replaces the selection.
    pub fn set_selection(&mut self, items: &[&R]) {
        self.selection.set(items, self.options.is_item_disabled);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected records resolved against `records`.
    pub fn selected_items<'a>(&self, records: &'a [R]) -> Vec<&'a R> {
        self.selection.selected_items(records)
    }

    /// Called after a refetch: reconciles the selection and returns to
    /// page 1.
    pub fn reconcile_selection(&mut self, records: &[R]) {
        self.selection.reconcile(records);
        self.pagination.reset();
    }
}

impl<R> fmt::Debug for ListState<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListState")
            .field("options", &self.options)
            .field("query", &self.query)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
