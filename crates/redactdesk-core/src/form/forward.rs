//! Forward message modal.

use std::fmt::Display;

use tracing::warn;

use super::{
    FormPhase, SubmitOutcome, ValidationError, ValidationResult, begin_submit, finish,
    is_valid_email,
};
use crate::model::CaseId;
use crate::notification::Notification;
use crate::resource::ForwardRequest;

/// Forward modal state: a text input that turns into recipient tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardMessageForm {
    case_id: CaseId,
    /// Address being typed.
    pub input: String,
    recipients: Vec<String>,
    phase: FormPhase,
    errors: Vec<ValidationError>,
}

impl ForwardMessageForm {
    /// An empty form for one message.
    #[must_use]
    pub fn new(case_id: CaseId) -> Self {
        Self {
            case_id,
            ..Self::default()
        }
    }

    /// Message being forwarded.
    #[must_use]
    pub const fn case_id(&self) -> &CaseId {
        &self.case_id
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

    /// Confirmed recipient tokens.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.recipients
    }

    /// Replaces the typed text.
    ///
    /// A trailing comma commits the address before it, like pressing Enter.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        if self.input.ends_with(',') {
            self.commit_input();
        }
    }

    /// Turns the typed text into a token.
    ///
    /// Returns false and records an error when the text is not an address;
    /// blank input is ignored.
    pub fn commit_input(&mut self) -> bool {
        let address = self.input.replace(',', "").trim().to_string();
        if address.is_empty() {
            self.input.clear();
            return false;
        }
        if !is_valid_email(&address) {
            self.input = address;
            self.errors = vec![ValidationError::InvalidEmail];
            return false;
        }
        self.recipients.push(address);
        self.input.clear();
        self.errors.clear();
        true
    }

    /// Removes a token; out-of-range indices are ignored.
    pub fn remove_token(&mut self, index: usize) {
        if index < self.recipients.len() {
            self.recipients.remove(index);
        }
    }

    /// Addresses the message goes to.
    ///
    /// With no tokens, a valid address still in the input counts.
    #[must_use]
    pub fn recipients(&self) -> Vec<String> {
        let typed = self.input.trim();
        if self.recipients.is_empty() && !typed.is_empty() && is_valid_email(typed) {
            vec![typed.to_string()]
        } else {
            self.recipients.clone()
        }
    }

    /// Validates the typed text and the recipient list.
    ///
    /// # Errors
    ///
    /// Returns all field errors.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        let typed = self.input.trim();
        if !typed.is_empty() && !is_valid_email(typed) {
            errors.push(ValidationError::InvalidEmail);
        }
        if self.recipients().is_empty() {
            errors.push(ValidationError::NoRecipients);
        }
        finish(errors)
    }

    /// Starts submitting; returns the request body when the form is valid.
    pub fn submit(&mut self) -> Option<ForwardRequest> {
        let valid = self.validate();
        if !begin_submit(&mut self.phase, &mut self.errors, || valid) {
            return None;
        }
        Some(ForwardRequest {
            emails: self.recipients(),
            case_id: self.case_id.clone(),
        })
    }

    /// Finishes a submission. Either way the modal closes and resets.
    pub fn settle<E: Display>(&mut self, result: Result<(), E>) -> SubmitOutcome {
        let notification = match result {
            Ok(()) => Notification::success("Email forwarded successfully."),
            Err(e) => {
                warn!("Error forwarding email: {}", e);
                Notification::error("Not able to forward email.")
            }
        };
        self.reset();
        SubmitOutcome {
            reset: true,
            ..SubmitOutcome::new(notification)
        }
    }

    /// Clears input, tokens, errors and phase.
    pub fn reset(&mut self) {
        *self = Self::new(self.case_id.clone());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> ForwardMessageForm {
        ForwardMessageForm::new(CaseId::new("c1"))
    }

    #[test]
    fn test_comma_commits_token() {
        let mut form = form();
        form.set_input("a@example.com,");
        assert_eq!(form.tokens(), ["a@example.com"]);
        assert!(form.input.is_empty());
    }

    #[test]
    fn test_invalid_token_is_rejected() {
        let mut form = form();
        form.set_input("nope");
        assert!(!form.commit_input());
        assert!(form.tokens().is_empty());
        assert_eq!(
            form.error_for("email").unwrap().message(),
            "Enter a valid email address"
        );
    }

    #[test]
    fn test_typed_address_used_without_tokens() {
        let mut form = form();
        form.set_input("b@example.com");
        let request = form.submit().unwrap();
        assert_eq!(request.emails, vec!["b@example.com"]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"emails": ["b@example.com"], "case_id": "c1"})
        );
    }

    #[test]
    fn test_no_recipients() {
        let mut form = form();
        assert!(form.submit().is_none());
        assert_eq!(
            form.error_for("emails").unwrap().message(),
            "Enter at least one email address"
        );
    }

    #[test]
    fn test_settle_resets_either_way() {
        let mut form = form();
        form.set_input("a@example.com,");
        form.submit().unwrap();
        let outcome = form.settle(Err("timeout"));
        assert_eq!(outcome.notification.content, "Not able to forward email.");
        assert!(outcome.reset);
        assert!(form.tokens().is_empty());
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.case_id().as_str(), "c1");
    }
}
