//! Column sets and list options for the three console lists.

use redactdesk_table::{
    ColumnDescriptor, ColumnSet, FilterOperator, ListOptions, ListState, RowAction,
    SelectionType, SortState, Value,
};

use tracing::error;

use crate::format;
use crate::model::{EmailMessage, Folder, Rule};

/// Id of the rule enable/disable row action.
pub const TOGGLE_RULE_ACTION: &str = "toggle";

fn text(value: &str) -> Option<Value> {
    Some(Value::from(value))
}

/// Columns of the message card list.
///
/// Only the four text attributes are visible and filterable; the case id and
/// receive time exist for sorting.
#[must_use]
pub fn message_columns() -> ColumnSet<EmailMessage> {
    let columns = vec![
        ColumnDescriptor::new("FromAddress", "From", |m: &EmailMessage| {
            text(&m.from_address)
        })
        .sort_order(10),
        ColumnDescriptor::new("EmailSubject", "Subject", |m: &EmailMessage| {
            text(&m.email_subject)
        })
        .sort_order(20),
        ColumnDescriptor::new("RedactedBody", "Body", |m: &EmailMessage| {
            text(&m.redacted_body)
        })
        .sort_order(30),
        ColumnDescriptor::new("DominantLanguage", "Primary Language", |m: &EmailMessage| {
            text(&m.dominant_language)
        })
        .sort_order(40),
        ColumnDescriptor::new("EmailReceiveTime", "Received", |m: &EmailMessage| {
            text(&m.email_receive_time)
        })
        .sort_order(50)
        .hidden(),
        ColumnDescriptor::new("CaseID", "Case", |m: &EmailMessage| text(m.case_id.as_str()))
            .sort_order(60)
            .hidden(),
    ];
    build(columns)
}

/// Columns of the folders table.
#[must_use]
pub fn folder_columns() -> ColumnSet<Folder> {
    let columns = vec![
        ColumnDescriptor::new("Name", "Name", |f: &Folder| text(&f.name)).sort_order(20),
        ColumnDescriptor::new("Description", "Description", |f: &Folder| {
            text(&f.description)
        })
        .sort_order(30),
        ColumnDescriptor::new("Creator", "Creator", |f: &Folder| text(&f.creator)).sort_order(40),
        ColumnDescriptor::new("CreatedAt", "Created", |f: &Folder| text(&f.created_at))
            .sort_order(50)
            .cell(|f: &Folder| format::format_created(&f.created_at))
            .operators(&FilterOperator::EXACT),
        ColumnDescriptor::new("MessagesCount", "Messages", |f: &Folder| {
            i64::try_from(f.messages_count).ok().map(Value::from)
        })
        .sort_order(60)
        .hidden(),
    ];
    build(columns)
}

/// Columns of the rules table.
#[must_use]
pub fn rule_columns() -> ColumnSet<Rule> {
    let columns = vec![
        ColumnDescriptor::new("Description", "Description", |r: &Rule| text(&r.description))
            .sort_order(20),
        ColumnDescriptor::new("Criteria", "Rule Criteria", |r: &Rule| text(&r.criteria))
            .sort_order(30)
            .cell(|r: &Rule| r.criteria_lines().join("\n")),
        ColumnDescriptor::new("FolderName", "Folder", |r: &Rule| text(&r.folder_name))
            .sort_order(40),
        ColumnDescriptor::new("Creator", "Creator", |r: &Rule| text(&r.creator)).sort_order(50),
        ColumnDescriptor::new("CreatedAt", "Created At", |r: &Rule| text(&r.created_at))
            .sort_order(60)
            .cell(|r: &Rule| format::format_created(&r.created_at))
            .operators(&FilterOperator::EXACT),
        ColumnDescriptor::new("Enabled", "Enabled", |r: &Rule| Some(Value::from(r.enabled)))
            .sort_order(70)
            .cell(|r: &Rule| r.enabled_label().to_string())
            .hidden(),
        ColumnDescriptor::new("ID", "ID", |r: &Rule| text(r.id.as_str()))
            .sort_order(80)
            .hidden(),
    ];
    build(columns)
}

fn build<R>(columns: Vec<ColumnDescriptor<R>>) -> ColumnSet<R> {
    ColumnSet::new(columns).unwrap_or_else(|e| {
        error!("Invalid column set: {}", e);
        ColumnSet::default()
    })
}

/// Message card list: single selection, newest first, free text enabled.
#[must_use]
pub fn message_list() -> ListState<EmailMessage> {
    ListState::new(
        message_columns(),
        ListOptions::new("messages")
            .selection_type(SelectionType::Single)
            .filter_exclusions(&["EmailReceiveTime", "CaseID"])
            .free_text_filtering(true)
            .default_sort(SortState::descending("EmailReceiveTime"))
            .empty_title("No emails are available"),
    )
}

/// Folders table: single selection, by name, the general inbox locked.
#[must_use]
pub fn folder_list() -> ListState<Folder> {
    ListState::new(
        folder_columns(),
        ListOptions::new("Folders")
            .selection_type(SelectionType::Single)
            .filter_exclusions(&["CreatedAt"])
            .default_sort(SortState::ascending("Name"))
            .disabled_when(Folder::is_general_inbox)
            .empty_title("Folders not available"),
    )
}

/// Rules table: single selection, by id, with an Enable/Disable row action.
#[must_use]
pub fn rule_list() -> ListState<Rule> {
    ListState::new(
        rule_columns(),
        ListOptions::new("Email Filtering Rules")
            .selection_type(SelectionType::Single)
            .filter_exclusions(&["CreatedAt"])
            .default_sort(SortState::ascending("ID"))
            .empty_title("Rules not available"),
    )
    .with_row_actions(vec![RowAction::new(TOGGLE_RULE_ACTION, |r: &Rule| {
        if r.enabled { "Disable" } else { "Enable" }.to_string()
    })])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{FolderId, RuleId};
    use redactdesk_table::{ACTIONS_COLUMN_ID, FilterToken};

    fn folder(id: &str, name: &str) -> Folder {
        Folder {
            id: FolderId::new(id),
            name: name.to_string(),
            ..Folder::default()
        }
    }

    #[test]
    fn test_folder_filter_menu() {
        let keys: Vec<_> = folder_list()
            .filter_properties()
            .into_iter()
            .map(|p| p.key)
            .collect();
        assert_eq!(keys, ["Creator", "Description", "Name"]);
    }

    #[test]
    fn test_message_filter_menu() {
        let labels: Vec<_> = message_list()
            .filter_properties()
            .into_iter()
            .map(|p| p.label)
            .collect();
        assert_eq!(labels, ["Primary Language", "Subject", "From", "Body"]);
    }

    #[test]
    fn test_general_inbox_is_locked() {
        let list = folder_list();
        assert!(list.is_item_disabled(&folder("general_inbox", "General Inbox")));
        assert!(!list.is_item_disabled(&folder("f1", "Claims")));
        assert_eq!(list.empty_text(), "Folders not available");
    }

    #[test]
    fn test_messages_newest_first() {
        let records = vec![
            EmailMessage {
                case_id: crate::CaseId::new("1"),
                email_receive_time: "2024-01-01T09:00:00".into(),
                ..EmailMessage::default()
            },
            EmailMessage {
                case_id: crate::CaseId::new("2"),
                email_receive_time: "2024-02-01T09:00:00".into(),
                ..EmailMessage::default()
            },
        ];
        let list = message_list();
        let keys: Vec<_> = list
            .derive(&records)
            .visible_page
            .iter()
            .map(|m| m.case_id.to_string())
            .collect();
        assert_eq!(keys, ["2", "1"]);
    }

    #[test]
    fn test_rule_toggle_action_label() {
        let list = rule_list();
        let actions = list.columns().get(ACTIONS_COLUMN_ID).unwrap();
        let enabled = Rule {
            id: RuleId::new("r1"),
            enabled: true,
            ..Rule::default()
        };
        assert_eq!((actions.actions[0].label)(&enabled), "Disable");
        assert_eq!((actions.actions[0].label)(&Rule::default()), "Enable");
    }

    #[test]
    fn test_created_at_offers_exact_operators_only() {
        let mut list = rule_list();
        let err = list.add_token(FilterToken::new("CreatedAt", FilterOperator::Contains, "2024"));
        assert!(err.is_err());
    }
}
