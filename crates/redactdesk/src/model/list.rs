//! State behind one mounted list screen.

use std::fmt;

use redactdesk_table::{
    FilterOperator, FilterToken, ListState, Operation, Preferences, Record,
};
use tracing::{debug, warn};

use crate::message::ListMessage;

/// A filterable property offered in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyChoice {
    /// Column id.
    pub key: String,
    /// Column header.
    pub label: String,
    /// Operators the column declares.
    pub operators: Vec<FilterOperator>,
}

impl fmt::Display for PropertyChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// The token being composed in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDraft {
    /// Chosen property.
    pub property: Option<PropertyChoice>,
    /// Chosen operator.
    pub operator: FilterOperator,
    /// Typed value.
    pub value: String,
}

impl Default for FilterDraft {
    fn default() -> Self {
        Self {
            property: None,
            operator: FilterOperator::Contains,
            value: String::new(),
        }
    }
}

impl FilterDraft {
    /// Operators valid for the chosen property.
    pub fn operators(&self) -> Vec<FilterOperator> {
        self.property
            .as_ref()
            .map_or_else(|| FilterOperator::ALL.to_vec(), |p| p.operators.clone())
    }

    fn token(&self) -> Option<FilterToken> {
        let property = self.property.as_ref()?;
        let value = self.value.trim();
        if value.is_empty() {
            return None;
        }
        Some(FilterToken::new(&property.key, self.operator, value))
    }
}

/// Records, loading flag and list state of one screen.
///
/// Records are replaced wholesale on every successful load; a failed load
/// keeps the previous records on screen.
pub struct ListScreen<R> {
    /// Filter, sort, pagination, selection and preferences.
    pub list: ListState<R>,
    /// Last successfully loaded records.
    pub records: Vec<R>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Filter bar draft.
    pub draft: FilterDraft,
    /// Preferences being edited, while the panel is open.
    pub editing_preferences: Option<Preferences>,
}

impl<R: Record> ListScreen<R> {
    /// Wraps a list state with no records loaded yet.
    pub fn new(list: ListState<R>) -> Self {
        Self {
            list,
            records: Vec::new(),
            loading: false,
            draft: FilterDraft::default(),
            editing_preferences: None,
        }
    }

    /// Marks a fetch as started.
    pub const fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Applies a fetch result. Errors are handed back for the banner.
    pub fn finish_loading(&mut self, result: Result<Vec<R>, String>) -> Result<(), String> {
        self.loading = false;
        let records = result?;
        debug!("{}: {} records", self.list.title(), records.len());
        self.list.reconcile_selection(&records);
        self.records = records;
        Ok(())
    }

    /// The single selected record, if any.
    pub fn selected(&self) -> Option<&R> {
        self.list.selected_items(&self.records).first().copied()
    }

    /// Properties the filter bar offers.
    pub fn property_choices(&self) -> Vec<PropertyChoice> {
        self.list
            .filter_properties()
            .into_iter()
            .map(|p| PropertyChoice {
                key: p.key,
                label: p.label,
                operators: p.operators,
            })
            .collect()
    }

    /// Applies a list interaction. Returns true when the selection changed.
    pub fn update(&mut self, message: ListMessage) -> bool {
        match message {
            ListMessage::FreeTextChanged(text) => self.list.set_free_text(text),
            ListMessage::PropertyChosen(property) => {
                if !property.operators.contains(&self.draft.operator)
                    && let Some(first) = property.operators.first()
                {
                    self.draft.operator = *first;
                }
                self.draft.property = Some(property);
            }
            ListMessage::OperatorChosen(operator) => self.draft.operator = operator,
            ListMessage::ValueChanged(value) => self.draft.value = value,
            ListMessage::AddToken => {
                if let Some(token) = self.draft.token() {
                    match self.list.add_token(token) {
                        Ok(()) => self.draft.value.clear(),
                        Err(e) => warn!("Rejected filter token: {}", e),
                    }
                }
            }
            ListMessage::RemoveToken(index) => self.list.remove_token(index),
            ListMessage::ToggleOperation => {
                let next = match self.list.query().operation {
                    Operation::And => Operation::Or,
                    Operation::Or => Operation::And,
                };
                self.list.set_operation(next);
            }
            ListMessage::ClearFilter => {
                self.list.clear_filter();
                self.draft = FilterDraft::default();
            }
            ListMessage::SortBy(column) => {
                self.list.sort_by(&column);
            }
            ListMessage::Page(index) => {
                if let Err(e) = self.list.set_page(index) {
                    warn!("Ignoring page change: {}", e);
                }
            }
            ListMessage::Select(key) => {
                if let Some(record) = self.records.iter().find(|r| r.key() == key) {
                    self.list.toggle_selection(record);
                    return true;
                }
            }
            ListMessage::OpenPreferences => {
                let mut preferences = self.list.preferences().clone();
                preferences.ensure_initialized(self.list.columns());
                self.editing_preferences = Some(preferences);
            }
            ListMessage::PageSizeChosen(size) => {
                if let Some(preferences) = self.editing_preferences.as_mut() {
                    preferences.page_size = size;
                }
            }
            ListMessage::ColumnToggled(id, visible) => {
                if let Some(preferences) = self.editing_preferences.as_mut() {
                    preferences.set_visible(&id, visible);
                }
            }
            ListMessage::ApplyPreferences => {
                if let Some(preferences) = self.editing_preferences.take()
                    && let Err(e) = self.list.apply_preferences(preferences)
                {
                    warn!("Ignoring preferences: {}", e);
                }
            }
            ListMessage::CancelPreferences => self.editing_preferences = None,
        }
        false
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use redactdesk_core::columns::folder_list;
    use redactdesk_core::{Folder, FolderId};

    fn folder(id: &str, name: &str) -> Folder {
        Folder {
            id: FolderId::new(id),
            name: name.to_string(),
            ..Folder::default()
        }
    }

    fn screen() -> ListScreen<Folder> {
        let mut screen = ListScreen::new(folder_list());
        screen.start_loading();
        screen
            .finish_loading(Ok(vec![
                folder("general_inbox", "General Inbox"),
                folder("f1", "Claims"),
                folder("f2", "Billing"),
            ]))
            .unwrap();
        screen
    }

    #[test]
    fn test_failed_load_keeps_records() {
        let mut screen = screen();
        screen.start_loading();
        let err = screen.finish_loading(Err("boom".to_string())).unwrap_err();
        assert_eq!(err, "boom");
        assert!(!screen.loading);
        assert_eq!(screen.records.len(), 3);
    }

    #[test]
    fn test_select_by_key() {
        let mut screen = screen();
        assert!(screen.update(ListMessage::Select("f1".to_string())));
        assert_eq!(screen.selected().map(|f| f.name.as_str()), Some("Claims"));
        assert!(!screen.update(ListMessage::Select("missing".to_string())));
    }

    #[test]
    fn test_general_inbox_cannot_be_selected() {
        let mut screen = screen();
        screen.update(ListMessage::Select("general_inbox".to_string()));
        assert!(screen.selected().is_none());
    }

    #[test]
    fn test_draft_token_filters_and_clears_value() {
        let mut screen = screen();
        let name = screen
            .property_choices()
            .into_iter()
            .find(|p| p.key == "Name")
            .unwrap();
        screen.update(ListMessage::PropertyChosen(name));
        screen.update(ListMessage::OperatorChosen(FilterOperator::Equals));
        screen.update(ListMessage::ValueChanged("Billing".to_string()));
        screen.update(ListMessage::AddToken);

        assert!(screen.draft.value.is_empty());
        let derived = screen.list.derive(&screen.records);
        assert_eq!(derived.total_matches, 1);

        screen.update(ListMessage::ClearFilter);
        assert_eq!(screen.list.derive(&screen.records).total_matches, 3);
    }

    #[test]
    fn test_blank_draft_adds_nothing() {
        let mut screen = screen();
        screen.update(ListMessage::AddToken);
        assert!(screen.list.query().tokens.is_empty());
    }

    #[test]
    fn test_preferences_apply_only_on_confirm() {
        let mut screen = screen();
        screen.update(ListMessage::OpenPreferences);
        screen.update(ListMessage::PageSizeChosen(1));
        assert_eq!(screen.list.preferences().page_size, 10);

        screen.update(ListMessage::ApplyPreferences);
        assert!(screen.editing_preferences.is_none());
        assert_eq!(screen.list.derive(&screen.records).visible_page.len(), 1);
    }
}
