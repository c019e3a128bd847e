//! Page size and column visibility preferences.
//!
//! Preferences live for one mounted list and are never sent to the server.

use crate::column::ColumnSet;
use crate::error::{Error, Result};

/// Page size used until the user picks another.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered in the preferences panel.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 20, 50, 100];

/// Visibility of one column, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDisplayItem {
    /// Column id.
    pub id: String,
    /// Whether the column is shown.
    pub visible: bool,
}

/// User-chosen page size and column layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Records per page.
    pub page_size: usize,
    /// Column ids in display order with their visibility.
    pub content_display: Vec<ContentDisplayItem>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            content_display: Vec::new(),
        }
    }
}

impl Preferences {
    /// Derives preferences from column defaults, ordered by `sort_order`.
    #[must_use]
    pub fn from_columns<R>(columns: &ColumnSet<R>) -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            content_display: display_from(columns),
        }
    }

    /// Fills an empty content display list from the column defaults.
    ///
    /// Columns added to the set after the preferences were captured are
    /// appended so that every column has an entry.
    pub fn ensure_initialized<R>(&mut self, columns: &ColumnSet<R>) {
        if self.content_display.is_empty() {
            self.content_display = display_from(columns);
            return;
        }
        for item in display_from(columns) {
            if !self.content_display.iter().any(|c| c.id == item.id) {
                self.content_display.push(item);
            }
        }
    }

    /// Checks the page size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroPageSize`] for a page size of zero.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            Err(Error::ZeroPageSize)
        } else {
            Ok(())
        }
    }

    /// Returns true if the column is shown.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.content_display
            .iter()
            .any(|item| item.id == id && item.visible)
    }

    /// Ids of shown columns, in display order.
    #[must_use]
    pub fn visible_ids(&self) -> Vec<String> {
        self.content_display
            .iter()
            .filter(|item| item.visible)
            .map(|item| item.id.clone())
            .collect()
    }

    /// Shows or hides a column.
    pub fn set_visible(&mut self, id: &str, visible: bool) {
        if let Some(item) = self.content_display.iter_mut().find(|item| item.id == id) {
            item.visible = visible;
        }
    }

    /// Moves a column to a new display position.
    pub fn move_column(&mut self, id: &str, to: usize) {
        if let Some(from) = self.content_display.iter().position(|item| item.id == id) {
            let item = self.content_display.remove(from);
            let to = to.min(self.content_display.len());
            self.content_display.insert(to, item);
        }
    }
}

fn display_from<R>(columns: &ColumnSet<R>) -> Vec<ContentDisplayItem> {
    columns
        .by_sort_order()
        .into_iter()
        .map(|c| ContentDisplayItem {
            id: c.id.clone(),
            visible: c.visible,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::column::ColumnDescriptor;

    fn columns() -> ColumnSet<()> {
        ColumnSet::new(vec![
            ColumnDescriptor::new("b", "B", |_: &()| None).sort_order(2),
            ColumnDescriptor::new("a", "A", |_: &()| None).sort_order(1),
            ColumnDescriptor::new("c", "C", |_: &()| None)
                .sort_order(3)
                .hidden(),
        ])
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.page_size, 10);
        assert!(prefs.content_display.is_empty());
        assert!(PAGE_SIZE_OPTIONS.contains(&prefs.page_size));
    }

    #[test]
    fn test_from_columns_follows_sort_order() {
        let prefs = Preferences::from_columns(&columns());
        assert_eq!(prefs.visible_ids(), ["a", "b"]);
        assert!(!prefs.is_visible("c"));
    }

    #[test]
    fn test_ensure_initialized_fills_empty_list() {
        let mut prefs = Preferences::default();
        prefs.ensure_initialized(&columns());
        assert_eq!(prefs.content_display.len(), 3);
        assert_eq!(prefs.content_display[0].id, "a");
    }

    #[test]
    fn test_ensure_initialized_keeps_user_order() {
        let mut prefs = Preferences::from_columns(&columns());
        prefs.move_column("b", 0);
        prefs.content_display.truncate(2);
        prefs.ensure_initialized(&columns());
        let ids: Vec<_> = prefs.content_display.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[test]
    fn test_set_visible() {
        let mut prefs = Preferences::from_columns(&columns());
        prefs.set_visible("c", true);
        prefs.set_visible("a", false);
        assert_eq!(prefs.visible_ids(), ["b", "c"]);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let prefs = Preferences {
            page_size: 0,
            ..Preferences::default()
        };
        assert_eq!(prefs.validate(), Err(Error::ZeroPageSize));
    }
}
