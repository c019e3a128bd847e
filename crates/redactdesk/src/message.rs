//! Message types for application events.
//!
//! Every async result crosses back into `update` as `Result<T, String>`.

use std::path::PathBuf;

use redactdesk_core::{
    EmailMessage, FeatureSet, FieldCondition, Folder, FolderId, Resources, Route, Rule,
    RuleField, RuleId,
};
use redactdesk_table::FilterOperator;

use crate::model::{AppSettings, FolderChoice, PropertyChoice};

/// Application messages (events).
#[derive(Debug, Clone)]
pub enum Message {
    // Startup
    /// Config loaded, token resolved and client built.
    Connected(Result<(Resources, FeatureSet), String>),
    /// Settings loaded.
    SettingsLoaded(Result<AppSettings, String>),
    /// Settings saved.
    SettingsSaved(Result<(), String>),
    /// Switch between light and dark.
    ToggleTheme,

    // Shell
    /// Follow a sidebar entry or breadcrumb.
    Navigate(Route),
    /// Dismiss every banner.
    DismissNotifications,
    /// Close the open drawer.
    CloseDrawer,
    /// Reload the active screen, bypassing the cache.
    Refresh,
    /// Sidebar folders loaded.
    NavFoldersLoaded(Result<Vec<Folder>, String>),

    // Lists
    /// Interaction with one of the three lists.
    List(ListKind, ListMessage),
    /// Message list loaded for the given folder scope.
    MessagesLoaded(Option<FolderId>, Result<Vec<EmailMessage>, String>),
    /// Folder shown in the messages header.
    FolderHeaderLoaded(Option<FolderId>, Option<Folder>),
    /// Folders table loaded.
    FoldersLoaded(Result<Vec<Folder>, String>),
    /// Rules table loaded.
    RulesLoaded(Result<Vec<Rule>, String>),

    // Messages screen
    /// Full message loaded for the detail drawer.
    MessageDetailLoaded(Result<Option<EmailMessage>, String>),
    /// Export every filtered message as CSV.
    Export,
    /// Export written to disk.
    Exported(Result<PathBuf, String>),
    /// Open an attachment link in the system handler.
    OpenLink(String),

    // Rules screen
    /// Enable or disable a rule from its row action.
    ToggleRule(RuleId, bool),
    /// Toggle request settled.
    RuleToggled(Result<Option<Rule>, String>),

    // Forms
    /// Create folder form.
    CreateFolder(FolderFormMessage),
    /// Create folder request settled.
    FolderCreated(Result<Option<Folder>, String>),
    /// Create rule form.
    CreateRule(RuleFormMessage),
    /// Create rule request settled.
    RuleCreated(Result<Option<Rule>, String>),

    // Modals
    /// Open the forward modal for the selected message.
    OpenForward,
    /// Forward modal.
    Forward(ForwardMessage),
    /// Forward request settled.
    Forwarded(Result<(), String>),
    /// Open the delete modal for the selected folder or rule.
    OpenDelete(ListKind),
    /// Delete modal.
    Delete(DeleteMessage),
    /// Delete request settled.
    Deleted(Result<(), String>),

    // Keyboard
    /// Keyboard shortcut pressed.
    KeyPressed(KeyboardAction),
    /// Key with no binding.
    Ignored,
}

/// Which list an interaction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// Message cards.
    Messages,
    /// Folders table.
    Folders,
    /// Rules table.
    Rules,
}

/// Interactions shared by every list.
#[derive(Debug, Clone)]
pub enum ListMessage {
    /// Free-text filter edited.
    FreeTextChanged(String),
    /// Filter bar property picked.
    PropertyChosen(PropertyChoice),
    /// Filter bar operator picked.
    OperatorChosen(FilterOperator),
    /// Filter bar value edited.
    ValueChanged(String),
    /// Add the drafted token.
    AddToken,
    /// Remove a token.
    RemoveToken(usize),
    /// Switch between AND and OR.
    ToggleOperation,
    /// Reset the query.
    ClearFilter,
    /// Header clicked.
    SortBy(String),
    /// Page picked.
    Page(usize),
    /// Row or card clicked.
    Select(String),
    /// Open the preferences panel.
    OpenPreferences,
    /// Page size picked in the panel.
    PageSizeChosen(usize),
    /// Column shown or hidden in the panel.
    ColumnToggled(String, bool),
    /// Confirm the panel.
    ApplyPreferences,
    /// Dismiss the panel.
    CancelPreferences,
}

/// Keyboard actions that can be triggered by shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardAction {
    /// Reload the active list (F5).
    Refresh,
    /// Close the open modal or drawer (Escape).
    Close,
}

/// Create folder form events.
#[derive(Debug, Clone)]
pub enum FolderFormMessage {
    /// Name edited.
    NameChanged(String),
    /// Description edited.
    DescriptionChanged(String),
    /// Submit.
    Submit,
    /// Back to the folders table.
    Cancel,
}

/// Create rule form events.
#[derive(Debug, Clone)]
pub enum RuleFormMessage {
    /// Description edited.
    DescriptionChanged(String),
    /// Target folder picked.
    FolderChosen(FolderChoice),
    /// Add an empty condition.
    AddLineItem,
    /// Remove a condition.
    RemoveLineItem(usize),
    /// Condition field picked.
    FieldChosen(usize, RuleField),
    /// Condition operator picked.
    ConditionChosen(usize, FieldCondition),
    /// Condition value edited.
    ValueChanged(usize, String),
    /// Range start edited.
    StartChanged(String),
    /// Range end edited.
    EndChanged(String),
    /// Submit.
    Submit,
    /// Back to the rules table.
    Cancel,
}

/// Forward modal events.
#[derive(Debug, Clone)]
pub enum ForwardMessage {
    /// Recipient text edited.
    InputChanged(String),
    /// Enter pressed in the recipient field.
    CommitInput,
    /// Recipient chip removed.
    RemoveRecipient(usize),
    /// Send.
    Submit,
    /// Close without sending.
    Cancel,
}

/// Delete modal events.
#[derive(Debug, Clone)]
pub enum DeleteMessage {
    /// Confirmation text edited.
    ConfirmChanged(String),
    /// Delete.
    Submit,
    /// Close without deleting.
    Cancel,
}
