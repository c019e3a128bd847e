//! Form state machines: create folder, create rule, forward message and
//! delete confirmation.
//!
//! Every form moves `Editing → Validating → Submitting → Succeeded | Failed`.
//! `submit()` hands out the request payload only when validation passes;
//! `settle()` turns the request result into a [`SubmitOutcome`] the shell
//! applies.

mod delete;
mod folder;
mod forward;
mod rule;

pub use delete::{CONFIRM_TEXT, DeleteConfirmation, DeleteTarget};
pub use folder::CreateFolderForm;
pub use forward::ForwardMessageForm;
pub use rule::{CreateRuleForm, DateRange};

use crate::notification::Notification;
use crate::shell::{Route, Shell};

/// Client-side validation error. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Folder name shorter than three characters.
    NameTooShort,
    /// Rule description shorter than three characters.
    DescriptionRequired,
    /// No target folder chosen.
    FolderRequired,
    /// Neither a filtering condition nor a date range given.
    MissingConditions,
    /// A date range bound is not `YYYY-MM-DD`.
    InvalidDate,
    /// No recipient to forward to.
    NoRecipients,
    /// Recipient is not an email address.
    InvalidEmail,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NameTooShort => {
                "This field is required and has to have a minimum of 3 characters"
            }
            Self::DescriptionRequired | Self::FolderRequired => "This field is required",
            Self::MissingConditions => {
                "You must specify either a date range or at least 1 filtering condition"
            }
            Self::InvalidDate => "Enter dates as YYYY-MM-DD",
            Self::NoRecipients => "Enter at least one email address",
            Self::InvalidEmail => "Enter a valid email address",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NameTooShort => "name",
            Self::DescriptionRequired => "description",
            Self::FolderRequired => "folder_id",
            Self::MissingConditions => "conditions",
            Self::InvalidDate => "date_range",
            Self::NoRecipients => "emails",
            Self::InvalidEmail => "email",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating a form.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Lifecycle of a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// Accepting input.
    #[default]
    Editing,
    /// Checking fields before submitting.
    Validating,
    /// Request in flight.
    Submitting,
    /// Request succeeded.
    Succeeded,
    /// Request failed; values are kept for correction.
    Failed,
}

impl FormPhase {
    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// What the shell should do once a submission settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Banner to show.
    pub notification: Notification,
    /// Screen to move to, if any.
    pub navigate_to: Option<Route>,
    /// Whether the form (or modal) was reset and should close.
    pub reset: bool,
    /// Whether sidebar folders should be reloaded.
    pub refetch_folders: bool,
}

impl SubmitOutcome {
    fn new(notification: Notification) -> Self {
        Self {
            notification,
            navigate_to: None,
            reset: false,
            refetch_folders: false,
        }
    }

    /// Shows the banner, requests a folder reload and navigates.
    pub fn apply(self, shell: &mut Shell) {
        shell.notify(self.notification);
        if self.refetch_folders {
            shell.request_folder_refetch();
        }
        if let Some(route) = self.navigate_to {
            shell.navigate(route);
        }
    }
}

/// Collects errors into a [`ValidationResult`].
fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Runs validation for a submit: `Validating`, then `Submitting` or back to
/// `Editing` with the errors kept. A pending form refuses a second submit.
fn begin_submit(
    phase: &mut FormPhase,
    errors: &mut Vec<ValidationError>,
    validate: impl FnOnce() -> ValidationResult,
) -> bool {
    if phase.is_pending() {
        return false;
    }
    *phase = FormPhase::Validating;
    match validate() {
        Ok(()) => {
            errors.clear();
            *phase = FormPhase::Submitting;
            true
        }
        Err(found) => {
            *errors = found;
            *phase = FormPhase::Editing;
            false
        }
    }
}

/// Basic email validation.
pub(crate) fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    // at least one dot, no empty labels
    domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email(" user.name@sub.example.com "));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("user"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("us er@example.com"));
        assert!(!is_valid_email("user@example..com"));
    }

    #[test]
    fn test_begin_submit_keeps_errors_and_refuses_double_submit() {
        let mut phase = FormPhase::Editing;
        let mut errors = Vec::new();
        assert!(!begin_submit(&mut phase, &mut errors, || {
            Err(vec![ValidationError::NameTooShort])
        }));
        assert_eq!(phase, FormPhase::Editing);
        assert_eq!(errors, vec![ValidationError::NameTooShort]);

        assert!(begin_submit(&mut phase, &mut errors, || Ok(())));
        assert_eq!(phase, FormPhase::Submitting);
        assert!(errors.is_empty());
        assert!(!begin_submit(&mut phase, &mut errors, || Ok(())));
    }

    #[test]
    fn test_outcome_apply() {
        let mut shell = Shell::default();
        SubmitOutcome {
            notification: Notification::success("done"),
            navigate_to: Some(Route::Rules),
            reset: true,
            refetch_folders: true,
        }
        .apply(&mut shell);
        assert_eq!(shell.route(), &Route::Rules);
        assert!(shell.take_folder_refetch());
        assert_eq!(shell.notifications.items()[0].content, "done");
    }
}
