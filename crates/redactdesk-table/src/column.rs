//! Column descriptors: one source of truth for rendering and filtering.
//!
//! A [`ColumnSet`] is never mutated once built. Caller overrides and the
//! synthesized actions column both produce a new set, and the filter menu
//! and display order are read-only projections of it.

use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::filter::FilterOperator;
use crate::value::{Value, locale_cmp};

/// Reads the raw attribute behind a column.
pub type Accessor<R> = fn(&R) -> Option<Value>;

/// Renders a cell as display text.
pub type CellRenderer<R> = fn(&R) -> String;

/// Id of the synthesized row-actions column.
pub const ACTIONS_COLUMN_ID: &str = "actions";

/// Sort order of the synthesized row-actions column, after any data column.
pub const ACTIONS_SORT_ORDER: u32 = 1000;

/// A named operation bound to one row.
pub struct RowAction<R> {
    /// Stable identifier passed back when the action fires.
    pub id: String,
    /// Button label, computed per row (e.g. "Enable" vs "Disable").
    pub label: fn(&R) -> String,
}

impl<R> RowAction<R> {
    /// Creates a row action.
    #[must_use]
    pub fn new(id: impl Into<String>, label: fn(&R) -> String) -> Self {
        Self {
            id: id.into(),
            label,
        }
    }
}

impl<R> Clone for RowAction<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label,
        }
    }
}

impl<R> fmt::Debug for RowAction<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowAction").field("id", &self.id).finish()
    }
}

/// How the actions column lays out its buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionsLayout {
    /// A single inline button.
    Single,
    /// A vertical stack of buttons.
    Stack,
}

/// Declarative metadata for one displayed field.
pub struct ColumnDescriptor<R> {
    /// Unique id within the set; also the filter property key.
    pub id: String,
    /// Header label.
    pub header: String,
    /// Attribute accessor used for sorting and filtering.
    pub value: Accessor<R>,
    /// Optional custom renderer; defaults to the accessor's string form.
    pub cell: Option<CellRenderer<R>>,
    /// Whether the header can be clicked to sort.
    pub sortable: bool,
    /// Default visibility.
    pub visible: bool,
    /// Display order and default preference order.
    pub sort_order: u32,
    /// Operators the filter bar offers for this column.
    pub operators: Vec<FilterOperator>,
    /// Row actions; only the synthesized actions column has any.
    pub actions: Vec<RowAction<R>>,
}

impl<R> ColumnDescriptor<R> {
    /// Creates a visible, sortable column accepting every operator.
    #[must_use]
    pub fn new(id: impl Into<String>, header: impl Into<String>, value: Accessor<R>) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            value,
            cell: None,
            sortable: true,
            visible: true,
            sort_order: 0,
            operators: FilterOperator::ALL.to_vec(),
            actions: Vec::new(),
        }
    }

    /// Sets the display order.
    #[must_use]
    pub const fn sort_order(mut self, order: u32) -> Self {
        self.sort_order = order;
        self
    }

    /// Sets a custom cell renderer.
    #[must_use]
    pub fn cell(mut self, renderer: CellRenderer<R>) -> Self {
        self.cell = Some(renderer);
        self
    }

    /// Restricts the filter operators.
    #[must_use]
    pub fn operators(mut self, operators: &[FilterOperator]) -> Self {
        self.operators = operators.to_vec();
        self
    }

    /// Hides the column by default.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Disables header sorting.
    #[must_use]
    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Reads the column's attribute from a record.
    pub fn value_of(&self, record: &R) -> Option<Value> {
        (self.value)(record)
    }

    /// Renders the cell text for a record.
    pub fn render(&self, record: &R) -> String {
        match self.cell {
            Some(cell) => cell(record),
            None => self
                .value_of(record)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }

    /// Returns true for the synthesized actions column.
    #[must_use]
    pub fn is_actions(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Returns the button layout of an actions column.
    #[must_use]
    pub fn actions_layout(&self) -> Option<ActionsLayout> {
        match self.actions.len() {
            0 => None,
            1 => Some(ActionsLayout::Single),
            _ => Some(ActionsLayout::Stack),
        }
    }
}

impl<R> Clone for ColumnDescriptor<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            value: self.value,
            cell: self.cell,
            sortable: self.sortable,
            visible: self.visible,
            sort_order: self.sort_order,
            operators: self.operators.clone(),
            actions: self.actions.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("visible", &self.visible)
            .field("sort_order", &self.sort_order)
            .finish_non_exhaustive()
    }
}

/// Caller-supplied replacement for parts of one column.
pub struct ColumnOverride<R> {
    /// Id of the column to override.
    pub id: String,
    /// Replacement header.
    pub header: Option<String>,
    /// Replacement cell renderer.
    pub cell: Option<CellRenderer<R>>,
    /// Replacement default visibility.
    pub visible: Option<bool>,
    /// Replacement display order.
    pub sort_order: Option<u32>,
}

impl<R> ColumnOverride<R> {
    /// Creates an override that changes nothing yet.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: None,
            cell: None,
            visible: None,
            sort_order: None,
        }
    }

    /// Overrides the header.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Overrides the cell renderer.
    #[must_use]
    pub fn cell(mut self, renderer: CellRenderer<R>) -> Self {
        self.cell = Some(renderer);
        self
    }

    /// Overrides default visibility.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// Overrides the display order.
    #[must_use]
    pub const fn sort_order(mut self, order: u32) -> Self {
        self.sort_order = Some(order);
        self
    }

    fn apply(&self, column: &mut ColumnDescriptor<R>) {
        if let Some(header) = &self.header {
            column.header.clone_from(header);
        }
        if let Some(cell) = self.cell {
            column.cell = Some(cell);
        }
        if let Some(visible) = self.visible {
            column.visible = visible;
        }
        if let Some(order) = self.sort_order {
            column.sort_order = order;
        }
    }
}

/// One entry of the property filter menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterProperty {
    /// Column id.
    pub key: String,
    /// Column header.
    pub label: String,
    /// Operators offered for the property.
    pub operators: Vec<FilterOperator>,
}

/// One entry of the column visibility panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisplayOption {
    /// Column id.
    pub id: String,
    /// Column header.
    pub label: String,
    /// Whether the user may hide the column.
    pub always_visible: bool,
}

/// An ordered set of column descriptors with unique ids.
pub struct ColumnSet<R> {
    columns: Vec<ColumnDescriptor<R>>,
}

impl<R> ColumnSet<R> {
    /// Builds a column set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateColumn`] if two descriptors share an id.
    pub fn new(columns: Vec<ColumnDescriptor<R>>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id.as_str()) {
                return Err(Error::DuplicateColumn(column.id.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// Looks up a column by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ColumnDescriptor<R>> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Iterates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnDescriptor<R>> {
        self.columns.iter()
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns ordered by `sort_order`, ties kept in declaration order.
    #[must_use]
    pub fn by_sort_order(&self) -> Vec<&ColumnDescriptor<R>> {
        let mut ordered: Vec<_> = self.columns.iter().collect();
        ordered.sort_by_key(|c| c.sort_order);
        ordered
    }

    /// Returns a new set with the overrides merged in.
    ///
    /// Overrides naming an unknown id are ignored.
    #[must_use]
    pub fn with_overrides(&self, overrides: &[ColumnOverride<R>]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|column| {
                let mut merged = column.clone();
                for o in overrides.iter().filter(|o| o.id == column.id) {
                    o.apply(&mut merged);
                }
                merged
            })
            .collect();
        Self { columns }
    }

    /// Returns a new set with a trailing actions column.
    ///
    /// Does nothing when `actions` is empty or the set already has an
    /// actions column.
    #[must_use]
    pub fn with_actions(&self, actions: Vec<RowAction<R>>) -> Self {
        let mut columns = self.columns.clone();
        if !actions.is_empty() && self.get(ACTIONS_COLUMN_ID).is_none() {
            let mut column = ColumnDescriptor::new(ACTIONS_COLUMN_ID, "Actions", |_| None)
                .sort_order(ACTIONS_SORT_ORDER)
                .unsortable()
                .operators(&[]);
            column.actions = actions;
            columns.push(column);
        }
        Self { columns }
    }

    /// Builds the property filter menu.
    ///
    /// Only columns for which `is_visible` holds appear, minus the
    /// `exclusions` and the actions column, sorted by id.
    pub fn filter_properties<S: AsRef<str>>(
        &self,
        exclusions: &[S],
        is_visible: impl Fn(&ColumnDescriptor<R>) -> bool,
    ) -> Vec<FilterProperty> {
        let mut properties: Vec<_> = self
            .columns
            .iter()
            .filter(|c| !c.is_actions() && !c.operators.is_empty())
            .filter(|c| is_visible(c))
            .filter(|c| !exclusions.iter().any(|e| e.as_ref() == c.id))
            .map(|c| FilterProperty {
                key: c.id.clone(),
                label: c.header.clone(),
                operators: c.operators.clone(),
            })
            .collect();
        properties.sort_by(|a, b| locale_cmp(&a.key, &b.key));
        properties
    }

    /// Builds the column visibility panel entries in display order.
    #[must_use]
    pub fn content_display_options(&self) -> Vec<ContentDisplayOption> {
        self.by_sort_order()
            .into_iter()
            .map(|c| ContentDisplayOption {
                id: c.id.clone(),
                label: c.header.clone(),
                always_visible: false,
            })
            .collect()
    }
}

impl<R> Clone for ColumnSet<R> {
    fn clone(&self) -> Self {
        Self {
            columns: self.columns.clone(),
        }
    }
}

impl<R> Default for ColumnSet<R> {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
        }
    }
}

impl<R> fmt::Debug for ColumnSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.columns).finish()
    }
}
