//! Row selection with single and multiple modes.

use crate::Record;

/// Selection cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionType {
    /// At most one selected record.
    Single,
    /// Any number of selected records.
    #[default]
    Multiple,
}

/// Keys of the selected records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    selection_type: SelectionType,
    keep_selection: bool,
    keys: Vec<String>,
}

impl Selection {
    /// Creates an empty selection that survives refetches.
    #[must_use]
    pub const fn new(selection_type: SelectionType) -> Self {
        Self {
            selection_type,
            keep_selection: true,
            keys: Vec::new(),
        }
    }

    /// Sets whether the selection survives a refetch.
    #[must_use]
    pub const fn keep_selection(mut self, keep: bool) -> Self {
        self.keep_selection = keep;
        self
    }

    /// Selection cardinality.
    #[must_use]
    pub const fn selection_type(&self) -> SelectionType {
        self.selection_type
    }

    /// Selected keys in selection order.
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of selected records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns true if the key is selected.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Clears the selection.
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Replaces the selection, as a selection-change event does.
    ///
    /// Disabled records are dropped. Under single selection only the last
    /// record is kept.
    pub fn set<R: Record>(&mut self, items: &[&R], is_disabled: impl Fn(&R) -> bool) {
        let mut keys: Vec<String> = Vec::new();
        for &item in items {
            if is_disabled(item) {
                continue;
            }
            let key = item.key();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        if self.selection_type == SelectionType::Single {
            keys = keys.pop().into_iter().collect();
        }
        self.keys = keys;
    }

    /// Toggles one record.
    ///
    /// Under single selection a new record replaces the previous one and
    /// re-toggling the selected record clears it.
    pub fn toggle<R: Record>(&mut self, record: &R, is_disabled: impl Fn(&R) -> bool) {
        if is_disabled(record) {
            return;
        }
        let key = record.key();
        if let Some(pos) = self.keys.iter().position(|k| *k == key) {
            self.keys.remove(pos);
            return;
        }
        if self.selection_type == SelectionType::Single {
            self.keys.clear();
        }
        self.keys.push(key);
    }

    /// Applies the refetch rule: keep keys still present when
    /// `keep_selection` is set, otherwise clear.
    pub fn reconcile<R: Record>(&mut self, records: &[R]) {
        if self.keep_selection {
            self.keys.retain(|key| records.iter().any(|r| r.key() == *key));
        } else {
            self.keys.clear();
        }
    }

    /// Resolves the selected keys against `records`, in selection order.
    pub fn selected_items<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        self.keys
            .iter()
            .filter_map(|key| records.iter().find(|r| r.key() == *key))
            .collect()
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(SelectionType::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(&'static str);

    impl Record for Item {
        fn key(&self) -> String {
            self.0.to_string()
        }
    }

    const fn never(_: &Item) -> bool {
        false
    }

    #[test]
    fn test_single_keeps_at_most_one() {
        let items = [Item("a"), Item("b"), Item("c")];
        let refs: Vec<_> = items.iter().collect();
        let mut selection = Selection::new(SelectionType::Single);

        selection.set(&refs, never);
        assert_eq!(selection.keys(), ["c"]);

        selection.toggle(&items[0], never);
        assert_eq!(selection.keys(), ["a"]);

        selection.toggle(&items[0], never);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_multiple_toggle() {
        let items = [Item("a"), Item("b")];
        let mut selection = Selection::new(SelectionType::Multiple);
        selection.toggle(&items[0], never);
        selection.toggle(&items[1], never);
        assert_eq!(selection.len(), 2);
        selection.toggle(&items[0], never);
        assert_eq!(selection.keys(), ["b"]);
    }

    #[test]
    fn test_disabled_items_cannot_be_selected() {
        let items = [Item("general_inbox"), Item("work")];
        let refs: Vec<_> = items.iter().collect();
        let disabled = |i: &Item| i.0 == "general_inbox";
        let mut selection = Selection::new(SelectionType::Multiple);

        selection.set(&refs, disabled);
        assert_eq!(selection.keys(), ["work"]);

        selection.clear();
        selection.toggle(&items[0], disabled);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_reconcile_keeps_present_keys() {
        let before = [Item("a"), Item("b")];
        let after = [Item("b"), Item("c")];
        let mut selection = Selection::new(SelectionType::Multiple);
        selection.set(&before.iter().collect::<Vec<_>>(), never);

        selection.reconcile(&after);
        assert_eq!(selection.keys(), ["b"]);
    }

    #[test]
    fn test_reconcile_without_keep_selection_clears() {
        let records = [Item("a")];
        let mut selection = Selection::new(SelectionType::Single).keep_selection(false);
        selection.toggle(&records[0], never);

        selection.reconcile(&records);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_selected_items_resolves_records() {
        let records = [Item("a"), Item("b")];
        let mut selection = Selection::new(SelectionType::Multiple);
        selection.toggle(&records[1], never);
        assert_eq!(selection.selected_items(&records), [&Item("b")]);
    }
}
