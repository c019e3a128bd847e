//! Typed-confirmation delete modal for folders and rules.

use std::fmt::Display;

use tracing::warn;

use super::{FormPhase, SubmitOutcome};
use crate::model::{Folder, FolderId, Rule, RuleId};
use crate::notification::Notification;

/// Text that must be typed before a delete is allowed.
pub const CONFIRM_TEXT: &str = "delete me";

/// What is being deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    /// A folder, named by its name.
    Folder {
        /// Folder id.
        id: FolderId,
        /// Folder name.
        name: String,
    },
    /// A rule, named by its description.
    Rule {
        /// Rule id.
        id: RuleId,
        /// Rule description.
        description: String,
    },
}

impl DeleteTarget {
    /// Entity type in lower case.
    #[must_use]
    pub const fn entity_type(&self) -> &'static str {
        match self {
            Self::Folder { .. } => "folder",
            Self::Rule { .. } => "rule",
        }
    }

    /// Entity type capitalised.
    #[must_use]
    pub const fn entity_label(&self) -> &'static str {
        match self {
            Self::Folder { .. } => "Folder",
            Self::Rule { .. } => "Rule",
        }
    }

    /// Name shown in the prompt.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Folder { name, .. } => name,
            Self::Rule { description, .. } => description,
        }
    }

    /// Modal header and button label, e.g. "Delete Folder".
    #[must_use]
    pub fn action_label(&self) -> String {
        format!("Delete {}", self.entity_label())
    }

    /// Confirmation prompt.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!(
            "Permanently delete {} {}? You can't undo this action.",
            self.entity_type(),
            self.name()
        )
    }

    /// Extra notice shown under the prompt.
    #[must_use]
    pub const fn note(&self) -> Option<&'static str> {
        match self {
            Self::Folder { .. } => Some(
                "Deleting this folder will not delete the emails that are stored in it. \
                 They will be re-assigned to the General Inbox folder",
            ),
            Self::Rule { .. } => None,
        }
    }
}

impl From<&Folder> for DeleteTarget {
    fn from(folder: &Folder) -> Self {
        Self::Folder {
            id: folder.id.clone(),
            name: folder.name.clone(),
        }
    }
}

impl From<&Rule> for DeleteTarget {
    fn from(rule: &Rule) -> Self {
        Self::Rule {
            id: rule.id.clone(),
            description: rule.description.clone(),
        }
    }
}

/// Delete modal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    target: DeleteTarget,
    /// Text typed into the confirmation field.
    pub confirm: String,
    phase: FormPhase,
}

impl DeleteConfirmation {
    /// Opens the modal for `target`.
    #[must_use]
    pub const fn new(target: DeleteTarget) -> Self {
        Self {
            target,
            confirm: String::new(),
            phase: FormPhase::Editing,
        }
    }

    /// What is being deleted.
    #[must_use]
    pub const fn target(&self) -> &DeleteTarget {
        &self.target
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Whether the delete button is enabled.
    #[must_use]
    pub fn can_confirm(&self) -> bool {
        self.confirm == CONFIRM_TEXT && !self.phase.is_pending()
    }

    /// Starts the delete; returns the target only when confirmed.
    pub fn submit(&mut self) -> Option<DeleteTarget> {
        if !self.can_confirm() {
            return None;
        }
        self.phase = FormPhase::Submitting;
        Some(self.target.clone())
    }

    /// Finishes the delete. The modal closes and the list refetches either way.
    pub fn settle<E: Display>(&mut self, result: Result<(), E>) -> SubmitOutcome {
        let notification = match result {
            Ok(()) => {
                self.phase = FormPhase::Succeeded;
                Notification::success(format!(
                    "{} was deleted successfully",
                    self.target.entity_label()
                ))
            }
            Err(e) => {
                warn!("Error deleting {} {}: {}", self.target.entity_type(), self.target.name(), e);
                self.phase = FormPhase::Failed;
                Notification::error(format!("Not able to delete {}", self.target.entity_type()))
            }
        };
        self.confirm.clear();
        SubmitOutcome {
            notification,
            navigate_to: None,
            reset: true,
            refetch_folders: matches!(self.target, DeleteTarget::Folder { .. }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn folder_modal() -> DeleteConfirmation {
        DeleteConfirmation::new(DeleteTarget::Folder {
            id: FolderId::new("f2"),
            name: "Inbox2".to_string(),
        })
    }

    #[test]
    fn test_only_exact_phrase_enables_delete() {
        let mut modal = folder_modal();
        for attempt in ["", "delete", "Delete me", "delete me ", "Inbox2"] {
            modal.confirm = attempt.to_string();
            assert!(!modal.can_confirm(), "{attempt:?}");
            assert!(modal.submit().is_none());
        }
        modal.confirm = "delete me".to_string();
        assert!(modal.can_confirm());
    }

    #[test]
    fn test_pending_disables_delete() {
        let mut modal = folder_modal();
        modal.confirm = CONFIRM_TEXT.to_string();
        assert!(modal.submit().is_some());
        assert!(!modal.can_confirm());
        assert!(modal.submit().is_none());
    }

    #[test]
    fn test_texts() {
        let modal = folder_modal();
        assert_eq!(
            modal.target().prompt(),
            "Permanently delete folder Inbox2? You can't undo this action."
        );
        assert_eq!(modal.target().action_label(), "Delete Folder");
        assert!(modal.target().note().is_some());

        let rule = DeleteTarget::from(&Rule {
            id: RuleId::new("r1"),
            description: "Claims".to_string(),
            ..Rule::default()
        });
        assert_eq!(rule.action_label(), "Delete Rule");
        assert!(rule.note().is_none());
    }

    #[test]
    fn test_settle_messages() {
        let mut modal = folder_modal();
        modal.confirm = CONFIRM_TEXT.to_string();
        modal.submit().unwrap();
        let outcome = modal.settle::<String>(Ok(()));
        assert_eq!(outcome.notification.content, "Folder was deleted successfully");
        assert!(outcome.refetch_folders);

        let mut rule = DeleteConfirmation::new(DeleteTarget::Rule {
            id: RuleId::new("r1"),
            description: "Claims".to_string(),
        });
        rule.confirm = CONFIRM_TEXT.to_string();
        rule.submit().unwrap();
        let outcome = rule.settle(Err("404"));
        assert_eq!(outcome.notification.content, "Not able to delete rule");
        assert_eq!(rule.phase(), FormPhase::Failed);
        assert!(rule.confirm.is_empty());
    }
}
