//! Create folder form.

use std::fmt::Display;

use tracing::warn;

use super::{FormPhase, SubmitOutcome, ValidationError, ValidationResult, begin_submit, finish};
use crate::model::Folder;
use crate::notification::Notification;
use crate::resource::NewFolder;
use crate::shell::Route;

const MIN_NAME_CHARS: usize = 3;

/// Create folder form state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateFolderForm {
    /// Folder name, at least three characters.
    pub name: String,
    /// Optional description.
    pub description: String,
    phase: FormPhase,
    errors: Vec<ValidationError>,
}

impl CreateFolderForm {
    /// An empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Errors from the last validation.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Error for one field, if any.
    #[must_use]
    pub fn error_for(&self, field: &str) -> Option<&ValidationError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    /// Validates every field.
    ///
    /// # Errors
    ///
    /// Returns all field errors.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        if self.name.chars().count() < MIN_NAME_CHARS {
            errors.push(ValidationError::NameTooShort);
        }
        finish(errors)
    }

    /// Re-validates after an edit, surfacing errors without submitting.
    pub fn revalidate(&mut self) {
        self.errors = self.validate().err().unwrap_or_default();
    }

    /// Starts submitting; returns the request body when the form is valid.
    pub fn submit(&mut self) -> Option<NewFolder> {
        let valid = self.validate();
        if !begin_submit(&mut self.phase, &mut self.errors, || valid) {
            return None;
        }
        Some(NewFolder {
            name: self.name.clone(),
            description: self.description.clone(),
        })
    }

    /// Finishes a submission.
    ///
    /// Success names the folder the server echoed (or the submitted name) and
    /// leads to the folders table. Failure keeps the values on screen.
    pub fn settle<E: Display>(&mut self, result: Result<Option<Folder>, E>) -> SubmitOutcome {
        match result {
            Ok(created) => {
                let name = created
                    .map(|folder| folder.name)
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| self.name.clone());
                *self = Self {
                    phase: FormPhase::Succeeded,
                    ..Self::default()
                };
                SubmitOutcome {
                    navigate_to: Some(Route::Folders),
                    reset: true,
                    ..SubmitOutcome::new(Notification::success(format!(
                        "Folder {name} was created successfully"
                    )))
                }
            }
            Err(e) => {
                warn!("Error creating folder: {}", e);
                self.phase = FormPhase::Failed;
                SubmitOutcome::new(Notification::error("Not able to create folder"))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_short_name_is_rejected() {
        let mut form = CreateFolderForm {
            name: "ab".to_string(),
            ..CreateFolderForm::new()
        };
        assert!(form.submit().is_none());
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(
            form.error_for("name").unwrap().message(),
            "This field is required and has to have a minimum of 3 characters"
        );
    }

    #[test]
    fn test_submit_and_succeed() {
        let mut form = CreateFolderForm {
            name: "Claims".to_string(),
            ..CreateFolderForm::new()
        };
        let payload = form.submit().unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"Name": "Claims", "Description": ""})
        );
        assert!(form.phase().is_pending());
        assert!(form.submit().is_none());

        let outcome = form.settle::<String>(Ok(None));
        assert_eq!(outcome.notification.content, "Folder Claims was created successfully");
        assert_eq!(outcome.navigate_to, Some(Route::Folders));
        assert_eq!(form.phase(), FormPhase::Succeeded);
        assert!(form.name.is_empty());
    }

    #[test]
    fn test_failure_keeps_values() {
        let mut form = CreateFolderForm {
            name: "Claims".to_string(),
            description: "Insurance".to_string(),
            ..CreateFolderForm::new()
        };
        form.submit().unwrap();
        let outcome = form.settle(Err("500"));
        assert_eq!(outcome.notification.content, "Not able to create folder");
        assert_eq!(outcome.navigate_to, None);
        assert_eq!(form.phase(), FormPhase::Failed);
        assert_eq!(form.description, "Insurance");
        assert!(form.submit().is_some());
    }
}
