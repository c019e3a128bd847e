//! The pure filter, sort and paginate step behind every list.
//!
//! [`Collection::derive`] owns no state: the same records, query, sort and
//! page always yield the same visible page.

use std::cmp::Ordering;

use crate::column::ColumnSet;
use crate::error::{Error, Result};
use crate::filter::FilterQuery;
use crate::preferences::DEFAULT_PAGE_SIZE;

/// Single-column sort state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    /// Column id to sort by; `None` keeps input order.
    pub sorting_field: Option<String>,
    /// Sort direction.
    pub descending: bool,
}

impl SortState {
    /// Sorts ascending by a column.
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            sorting_field: Some(field.into()),
            descending: false,
        }
    }

    /// Sorts descending by a column.
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            sorting_field: Some(field.into()),
            descending: true,
        }
    }

    /// Returns true if `field` is the active sort column.
    #[must_use]
    pub fn is_sorted_by(&self, field: &str) -> bool {
        self.sorting_field.as_deref() == Some(field)
    }
}

/// Page size and 1-based current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_size: usize,
    current_page_index: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page_index: 1,
        }
    }
}

impl PaginationState {
    /// Creates a pagination state.
    ///
    /// # Errors
    ///
    /// Returns an error if `page_size` is zero or `current_page_index` is
    /// below 1.
    pub const fn new(page_size: usize, current_page_index: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::ZeroPageSize);
        }
        if current_page_index == 0 {
            return Err(Error::InvalidPageIndex(current_page_index));
        }
        Ok(Self {
            page_size,
            current_page_index,
        })
    }

    /// Records per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current 1-based page index.
    #[must_use]
    pub const fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    /// Returns to page 1.
    pub const fn reset(&mut self) {
        self.current_page_index = 1;
    }

    /// Number of pages needed for `total` records; at least 1.
    #[must_use]
    pub const fn pages_count(&self, total: usize) -> usize {
        let pages = total.div_ceil(self.page_size);
        if pages == 0 { 1 } else { pages }
    }

    fn window(&self, total: usize) -> (usize, usize) {
        let start = (self.current_page_index - 1).saturating_mul(self.page_size);
        let start = start.min(total);
        let end = start.saturating_add(self.page_size).min(total);
        (start, end)
    }
}

/// Which placeholder, if any, a list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionState {
    /// No records at all: show the "No {title}" placeholder.
    Empty,
    /// Records exist but none pass the filter: show "No matches" with a
    /// clear-filter button.
    NoMatches,
    /// At least one record passes.
    Populated,
}

/// Output of [`Collection::derive`].
#[derive(Debug)]
pub struct Derived<'a, R> {
    /// Records on the current page, sorted.
    pub visible_page: Vec<&'a R>,
    /// Records passing the filter, before pagination.
    pub total_matches: usize,
    /// Page count for the pagination control.
    pub pages_count: usize,
    /// Placeholder selection.
    pub state: CollectionState,
}

/// Filter, sort and paginate over one column set.
pub struct Collection<'c, R> {
    columns: &'c ColumnSet<R>,
    free_text: bool,
    searchable: Option<&'c [String]>,
}

impl<'c, R> Collection<'c, R> {
    /// Creates an engine over `columns` with free-text filtering disabled.
    #[must_use]
    pub const fn new(columns: &'c ColumnSet<R>) -> Self {
        Self {
            columns,
            free_text: false,
            searchable: None,
        }
    }

    /// Enables or disables the free-text fallback.
    #[must_use]
    pub const fn free_text(mut self, enabled: bool) -> Self {
        self.free_text = enabled;
        self
    }

    /// Restricts free-text search to these column ids.
    ///
    /// Without this, columns whose descriptor is visible are searched.
    #[must_use]
    pub const fn searchable(mut self, ids: &'c [String]) -> Self {
        self.searchable = Some(ids);
        self
    }

    /// Filters, sorts and paginates `records`.
    pub fn derive<'a>(
        &self,
        records: &'a [R],
        query: &FilterQuery,
        sort: &SortState,
        page: &PaginationState,
    ) -> Derived<'a, R> {
        let mut matches = self.filter(records, query);
        self.sort(&mut matches, sort);

        let total_matches = matches.len();
        let (start, end) = page.window(total_matches);
        let visible_page = matches[start..end].to_vec();

        let state = if records.is_empty() {
            CollectionState::Empty
        } else if total_matches == 0 {
            CollectionState::NoMatches
        } else {
            CollectionState::Populated
        };

        Derived {
            visible_page,
            total_matches,
            pages_count: page.pages_count(total_matches),
            state,
        }
    }

    /// Returns the records passing `query`, in input order.
    pub fn filter<'a>(&self, records: &'a [R], query: &FilterQuery) -> Vec<&'a R> {
        let text = query.free_text.trim().to_lowercase();
        let use_text = self.free_text && query.tokens.is_empty() && !text.is_empty();

        records
            .iter()
            .filter(|&record| {
                if use_text {
                    self.matches_text(record, &text)
                } else {
                    query.matches_tokens(self.columns, record)
                }
            })
            .collect()
    }

    /// Stable sort by the active column's accessor.
    ///
    /// Unknown or unsortable fields leave the order unchanged. Records
    /// lacking the attribute sort before those that have it.
    pub fn sort(&self, items: &mut [&R], sort: &SortState) {
        let Some(column) = sort
            .sorting_field
            .as_deref()
            .and_then(|field| self.columns.get(field))
            .filter(|c| c.sortable)
        else {
            return;
        };

        items.sort_by(|a, b| {
            let ordering = match (column.value_of(a), column.value_of(b)) {
                (Some(x), Some(y)) => x.compare(&y),
                (None, Some(_)) => Ordering::Less,
                (Some(_), None) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            if sort.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
    }

    fn matches_text(&self, record: &R, needle: &str) -> bool {
        self.columns
            .iter()
            .filter(|c| !c.is_actions())
            .filter(|c| match self.searchable {
                Some(ids) => ids.iter().any(|id| *id == c.id),
                None => c.visible,
            })
            .filter_map(|c| c.value_of(record))
            .any(|v| v.to_string().to_lowercase().contains(needle))
    }
}

/// Pluralized match count: "1 match" or "N matches".
#[must_use]
pub fn matches_text(count: usize) -> String {
    if count == 1 {
        "1 match".to_string()
    } else {
        format!("{count} matches")
    }
}

/// Accessible label for a sortable column header.
#[must_use]
pub fn sort_label(header: &str, sorted: bool, descending: bool) -> String {
    if sorted {
        let direction = if descending { "descending" } else { "ascending" };
        format!("{header}, sorted {direction}.")
    } else {
        format!("{header}, not sorted.")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::column::ColumnDescriptor;
    use crate::filter::{FilterOperator, FilterToken};
    use crate::value::Value;

    #[derive(Debug, PartialEq)]
    struct Row {
        id: i64,
        name: &'static str,
    }

    fn columns() -> ColumnSet<Row> {
        ColumnSet::new(vec![
            ColumnDescriptor::new("id", "Id", |r: &Row| Some(Value::from(r.id))),
            ColumnDescriptor::new("Name", "Name", |r: &Row| Some(Value::from(r.name))),
        ])
        .unwrap()
    }

    fn rows(n: i64) -> Vec<Row> {
        (1..=n).map(|id| Row { id, name: "row" }).collect()
    }

    #[test]
    fn test_sort_by_name_ascending() {
        let records = vec![Row { id: 1, name: "B" }, Row { id: 2, name: "A" }];
        let cols = columns();
        let derived = Collection::new(&cols).derive(
            &records,
            &FilterQuery::default(),
            &SortState::ascending("Name"),
            &PaginationState::default(),
        );
        let ids: Vec<_> = derived.visible_page.iter().map(|r| r.id).collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn test_sort_descending_is_stable() {
        let records = vec![
            Row { id: 1, name: "A" },
            Row { id: 2, name: "B" },
            Row { id: 3, name: "A" },
        ];
        let cols = columns();
        let mut items: Vec<_> = records.iter().collect();
        Collection::new(&cols).sort(&mut items, &SortState::descending("Name"));
        let ids: Vec<_> = items.iter().map(|r| r.id).collect();
        assert_eq!(ids, [2, 1, 3]);
    }

    #[test]
    fn test_unknown_sort_field_keeps_order() {
        let records = vec![Row { id: 2, name: "B" }, Row { id: 1, name: "A" }];
        let cols = columns();
        let mut items: Vec<_> = records.iter().collect();
        Collection::new(&cols).sort(&mut items, &SortState::ascending("missing"));
        assert_eq!(items[0].id, 2);
    }

    #[test]
    fn test_pagination_boundary() {
        let records = rows(25);
        let cols = columns();
        let engine = Collection::new(&cols);
        let query = FilterQuery::default();
        let sort = SortState::default();

        let page3 = engine.derive(&records, &query, &sort, &PaginationState::new(10, 3).unwrap());
        assert_eq!(page3.visible_page.len(), 5);
        assert_eq!(page3.total_matches, 25);
        assert_eq!(page3.pages_count, 3);

        let page4 = engine.derive(&records, &query, &sort, &PaginationState::new(10, 4).unwrap());
        assert!(page4.visible_page.is_empty());
    }

    #[test]
    fn test_empty_vs_no_matches() {
        let cols = columns();
        let engine = Collection::new(&cols);
        let sort = SortState::default();
        let page = PaginationState::default();

        let empty: Vec<Row> = Vec::new();
        let derived = engine.derive(&empty, &FilterQuery::default(), &sort, &page);
        assert_eq!(derived.state, CollectionState::Empty);
        assert_eq!(derived.total_matches, 0);

        let records = rows(3);
        let query = FilterQuery::default()
            .with_token(&cols, FilterToken::new("Name", FilterOperator::Equals, "zzz"))
            .unwrap();
        let derived = engine.derive(&records, &query, &sort, &page);
        assert_eq!(derived.state, CollectionState::NoMatches);
        assert_eq!(derived.pages_count, 1);
    }

    #[test]
    fn test_free_text_is_case_insensitive() {
        let records = vec![Row { id: 1, name: "Quarterly Report" }, Row { id: 2, name: "x" }];
        let cols = columns();
        let query = FilterQuery {
            free_text: "REPORT".to_string(),
            ..FilterQuery::default()
        };
        let matched = Collection::new(&cols).free_text(true).filter(&records, &query);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, 1);
    }

    #[test]
    fn test_free_text_ignored_when_disabled() {
        let records = rows(2);
        let cols = columns();
        let query = FilterQuery {
            free_text: "nothing".to_string(),
            ..FilterQuery::default()
        };
        assert_eq!(Collection::new(&cols).filter(&records, &query).len(), 2);
    }

    #[test]
    fn test_free_text_respects_searchable_columns() {
        let records = vec![Row { id: 7, name: "x" }];
        let cols = columns();
        let only_name = vec!["Name".to_string()];
        let query = FilterQuery {
            free_text: "7".to_string(),
            ..FilterQuery::default()
        };
        let engine = Collection::new(&cols).free_text(true).searchable(&only_name);
        assert!(engine.filter(&records, &query).is_empty());
    }

    #[test]
    fn test_pagination_rejects_invalid_state() {
        assert_eq!(PaginationState::new(0, 1), Err(Error::ZeroPageSize));
        assert_eq!(PaginationState::new(10, 0), Err(Error::InvalidPageIndex(0)));
    }

    #[test]
    fn test_matches_text() {
        assert_eq!(matches_text(1), "1 match");
        assert_eq!(matches_text(0), "0 matches");
        assert_eq!(matches_text(12), "12 matches");
    }

    #[test]
    fn test_sort_label() {
        assert_eq!(sort_label("Name", true, false), "Name, sorted ascending.");
        assert_eq!(sort_label("Name", true, true), "Name, sorted descending.");
        assert_eq!(sort_label("Name", false, false), "Name, not sorted.");
    }
}
