//! Create rule form.

use std::fmt::Display;

use chrono::NaiveDate;
use tracing::warn;

use super::{FormPhase, SubmitOutcome, ValidationError, ValidationResult, begin_submit, finish};
use crate::model::{FieldCondition, FolderId, Rule, RuleField, RuleLineItem};
use crate::notification::Notification;
use crate::resource::NewRule;
use crate::shell::Route;

const MIN_DESCRIPTION_CHARS: usize = 3;

/// Optional received-date bounds, as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    /// First day, inclusive.
    pub start: String,
    /// Last day, inclusive.
    pub end: String,
}

impl DateRange {
    /// Whether neither bound is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start.trim().is_empty() && self.end.trim().is_empty()
    }

    fn bounds_parse(&self) -> bool {
        [&self.start, &self.end].into_iter().all(|bound| {
            let bound = bound.trim();
            bound.is_empty() || NaiveDate::parse_from_str(bound, "%Y-%m-%d").is_ok()
        })
    }

    /// The criterion appended for a range with a start date.
    fn criterion(&self) -> Option<RuleLineItem> {
        let start = self.start.trim();
        if start.is_empty() {
            return None;
        }
        Some(RuleLineItem::new(
            "date_sent",
            FieldCondition::Between.as_str(),
            format!("{start}-{}", self.end.trim()),
        ))
    }
}

/// Create rule form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRuleForm {
    /// Rule description, at least three characters.
    pub description: String,
    /// Folder matching messages move to.
    pub folder_id: String,
    /// Conditions being edited; starts with one empty item.
    pub line_items: Vec<RuleLineItem>,
    /// Optional received-date range.
    pub date_range: DateRange,
    phase: FormPhase,
    errors: Vec<ValidationError>,
}

impl Default for CreateRuleForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            folder_id: String::new(),
            line_items: vec![RuleLineItem::default()],
            date_range: DateRange::default(),
            phase: FormPhase::Editing,
            errors: Vec::new(),
        }
    }
}

impl CreateRuleForm {
    /// A form with one empty condition.
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

    /// Appends an empty condition.
    pub fn add_line_item(&mut self) {
        self.line_items.push(RuleLineItem::default());
    }

    /// Removes a condition; out-of-range indices are ignored.
    pub fn remove_line_item(&mut self, index: usize) {
        if index < self.line_items.len() {
            self.line_items.remove(index);
        }
    }

    /// Picks the field of a condition, dropping a condition it does not allow.
    pub fn set_field(&mut self, index: usize, field: RuleField) {
        if let Some(item) = self.line_items.get_mut(index) {
            item.field_name = field.as_str().to_string();
            let allowed = FieldCondition::parse(&item.field_condition)
                .is_some_and(|c| field.conditions().contains(&c));
            if !allowed {
                item.field_condition.clear();
            }
        }
    }

    /// Picks the comparison of a condition.
    pub fn set_condition(&mut self, index: usize, condition: FieldCondition) {
        if let Some(item) = self.line_items.get_mut(index) {
            item.field_condition = condition.as_str().to_string();
        }
    }

    /// Sets the compared value of a condition.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(item) = self.line_items.get_mut(index) {
            item.field_value = value.into();
        }
    }

    /// Validates every field, including the conditions-or-dates check.
    ///
    /// # Errors
    ///
    /// Returns all field errors.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        if self.description.chars().count() < MIN_DESCRIPTION_CHARS {
            errors.push(ValidationError::DescriptionRequired);
        }
        if self.folder_id.is_empty() {
            errors.push(ValidationError::FolderRequired);
        }
        if !self.date_range.bounds_parse() {
            errors.push(ValidationError::InvalidDate);
        }
        let no_conditions = self.line_items.iter().all(|i| i.field_name.is_empty());
        if no_conditions && self.date_range.is_empty() {
            errors.push(ValidationError::MissingConditions);
        }
        finish(errors)
    }

    /// Re-validates after an edit, surfacing errors without submitting.
    pub fn revalidate(&mut self) {
        self.errors = self.validate().err().unwrap_or_default();
    }

    /// The request body: complete conditions plus the date criterion.
    #[must_use]
    pub fn payload(&self) -> NewRule {
        let mut criteria: Vec<RuleLineItem> = self
            .line_items
            .iter()
            .filter(|item| item.is_complete())
            .cloned()
            .collect();
        criteria.extend(self.date_range.criterion());
        NewRule {
            description: self.description.clone(),
            folder_id: FolderId::new(self.folder_id.clone()),
            criteria,
        }
    }

    /// Starts submitting; returns the request body when the form is valid.
    pub fn submit(&mut self) -> Option<NewRule> {
        let valid = self.validate();
        if !begin_submit(&mut self.phase, &mut self.errors, || valid) {
            return None;
        }
        Some(self.payload())
    }

    /// Finishes a submission.
    ///
    /// Success reloads the sidebar folders and leads to the rules table.
    pub fn settle<E: Display>(&mut self, result: Result<Option<Rule>, E>) -> SubmitOutcome {
        match result {
            Ok(created) => {
                let description = created
                    .map(|rule| rule.description)
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| self.description.clone());
                *self = Self {
                    phase: FormPhase::Succeeded,
                    ..Self::default()
                };
                SubmitOutcome {
                    navigate_to: Some(Route::Rules),
                    reset: true,
                    refetch_folders: true,
                    ..SubmitOutcome::new(Notification::success(format!(
                        "Rule {description} was created successfully"
                    )))
                }
            }
            Err(e) => {
                warn!("Error creating rule: {}", e);
                self.phase = FormPhase::Failed;
                SubmitOutcome::new(Notification::error("Not able to create rule"))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid() -> CreateRuleForm {
        CreateRuleForm {
            description: "Claims".to_string(),
            folder_id: "f1".to_string(),
            ..CreateRuleForm::new()
        }
    }

    #[test]
    fn test_no_conditions_fails_on_conditions_only() {
        let form = valid();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingConditions]);
        assert_eq!(errors[0].field(), "conditions");

        let mut empty = valid();
        empty.remove_line_item(0);
        assert_eq!(empty.validate().unwrap_err(), vec![ValidationError::MissingConditions]);
    }

    #[test]
    fn test_required_fields() {
        let mut form = CreateRuleForm::new();
        form.set_field(0, RuleField::FromAddress);
        assert!(form.submit().is_none());
        assert_eq!(form.error_for("description").unwrap().message(), "This field is required");
        assert_eq!(form.error_for("folder_id").unwrap().message(), "This field is required");
        assert!(form.error_for("conditions").is_none());
    }

    #[test]
    fn test_date_range_alone_is_enough() {
        let mut form = valid();
        form.date_range = DateRange {
            start: "2024-01-01".to_string(),
            end: "2024-01-31".to_string(),
        };
        let payload = form.submit().unwrap();
        assert_eq!(
            payload.criteria,
            vec![RuleLineItem::new("date_sent", "between", "2024-01-01-2024-01-31")]
        );
    }

    #[test]
    fn test_payload_drops_incomplete_items() {
        let mut form = valid();
        form.set_field(0, RuleField::EmailSubject);
        form.set_condition(0, FieldCondition::Contains);
        form.set_value(0, "claim");
        form.add_line_item();
        form.set_field(1, RuleField::FromAddress);

        let json = serde_json::to_value(form.submit().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "description": "Claims",
                "folderId": "f1",
                "criteria": [
                    {"fieldName": "EmailSubject", "fieldCondition": "contains", "fieldValue": "claim"}
                ]
            })
        );
    }

    #[test]
    fn test_body_field_drops_equals() {
        let mut form = valid();
        form.set_condition(0, FieldCondition::Equals);
        form.set_field(0, RuleField::RedactedBody);
        assert_eq!(form.line_items[0].field_condition, "");
    }

    #[test]
    fn test_invalid_date() {
        let mut form = valid();
        form.date_range.start = "01/02/2024".to_string();
        assert!(
            form.validate()
                .unwrap_err()
                .contains(&ValidationError::InvalidDate)
        );
    }

    #[test]
    fn test_settle() {
        let mut form = valid();
        form.set_field(0, RuleField::FromAddress);
        form.set_value(0, "a@b.c");
        form.submit().unwrap();
        let outcome = form.settle::<String>(Ok(None));
        assert_eq!(outcome.notification.content, "Rule Claims was created successfully");
        assert!(outcome.refetch_folders);
        assert_eq!(outcome.navigate_to, Some(Route::Rules));
        assert_eq!(form.line_items.len(), 1);

        let mut failing = valid();
        failing.date_range.start = "2024-01-01".to_string();
        failing.submit().unwrap();
        let outcome = failing.settle(Err("boom"));
        assert_eq!(outcome.notification.content, "Not able to create rule");
        assert_eq!(failing.phase(), FormPhase::Failed);
    }
}
