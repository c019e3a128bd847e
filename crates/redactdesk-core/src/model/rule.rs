//! Email filtering rules.

use redactdesk_table::Record;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use super::{FolderId, loose_id, nullable};

/// Unique identifier for a rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for RuleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        loose_id(deserializer).map(Self)
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message attribute a rule condition can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleField {
    /// Sender address.
    FromAddress,
    /// Subject line.
    EmailSubject,
    /// Redacted body.
    RedactedBody,
    /// Whether the message carries attachments.
    HasAttachments,
    /// Date the message was received.
    SentDate,
}

impl RuleField {
    /// Fields offered in the rule editor's field picker.
    pub const SELECTABLE: [Self; 4] = [
        Self::FromAddress,
        Self::EmailSubject,
        Self::RedactedBody,
        Self::HasAttachments,
    ];

    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FromAddress => "FromAddress",
            Self::EmailSubject => "EmailSubject",
            Self::RedactedBody => "RedactedBody",
            Self::HasAttachments => "has_attachments",
            Self::SentDate => "sent_date",
        }
    }

    /// Label shown in the editor.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::FromAddress => "From",
            Self::EmailSubject => "Subject",
            Self::RedactedBody => "Body",
            Self::HasAttachments => "Has Attachments",
            Self::SentDate => "Date Received",
        }
    }

    /// Parse a wire name. Both `sent_date` and `date_sent` name the date field.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "FromAddress" => Some(Self::FromAddress),
            "EmailSubject" => Some(Self::EmailSubject),
            "RedactedBody" => Some(Self::RedactedBody),
            "has_attachments" => Some(Self::HasAttachments),
            "sent_date" | "date_sent" => Some(Self::SentDate),
            _ => None,
        }
    }

    /// Label used when listing a stored criterion.
    ///
    /// Only the text and date fields have one; anything else renders empty.
    #[must_use]
    pub fn readable_name(name: &str) -> &'static str {
        match Self::parse(name) {
            Some(
                field @ (Self::FromAddress | Self::EmailSubject | Self::RedactedBody | Self::SentDate),
            ) => field.display_name(),
            Some(Self::HasAttachments) | None => "",
        }
    }

    /// Conditions the editor offers for this field.
    #[must_use]
    pub const fn conditions(self) -> &'static [FieldCondition] {
        match self {
            Self::RedactedBody => &[FieldCondition::Contains],
            Self::SentDate => &[],
            Self::FromAddress | Self::EmailSubject | Self::HasAttachments => {
                &[FieldCondition::Equals, FieldCondition::Contains]
            }
        }
    }

    /// The condition picker is disabled for the date field.
    #[must_use]
    pub const fn condition_editable(self) -> bool {
        !matches!(self, Self::SentDate)
    }
}

impl std::fmt::Display for RuleField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Comparison applied by a rule condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldCondition {
    /// Exact match.
    Equals,
    /// Substring match.
    Contains,
    /// Date range, used only by the appended date criterion.
    Between,
}

impl FieldCondition {
    /// Wire name of the condition.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::Contains => "contains",
            Self::Between => "between",
        }
    }

    /// Label shown in the editor.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::Contains => "Contains",
            Self::Between => "Between",
        }
    }

    /// Parse a wire name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "equals" => Some(Self::Equals),
            "contains" => Some(Self::Contains),
            "between" => Some(Self::Between),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One condition of a rule, as stored in `Criteria` and sent on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleLineItem {
    /// Field wire name, empty while unset.
    #[serde(default, deserialize_with = "nullable")]
    pub field_name: String,
    /// Condition wire name, empty while unset.
    #[serde(default, deserialize_with = "nullable")]
    pub field_condition: String,
    /// Value to compare against.
    #[serde(default, deserialize_with = "nullable")]
    pub field_value: String,
}

impl RuleLineItem {
    /// Create a line item from its wire parts.
    #[must_use]
    pub fn new(
        field_name: impl Into<String>,
        field_condition: impl Into<String>,
        field_value: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            field_condition: field_condition.into(),
            field_value: field_value.into(),
        }
    }

    /// Parsed field, when the name is known.
    #[must_use]
    pub fn field(&self) -> Option<RuleField> {
        RuleField::parse(&self.field_name)
    }

    /// Whether both the field name and the value are filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.field_name.is_empty() && !self.field_value.is_empty()
    }

    /// Human-readable line: "{field} {condition} {value}".
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "{} {} {}",
            RuleField::readable_name(&self.field_name),
            self.field_condition,
            self.field_value
        )
    }
}

/// A stored filtering rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Unique id.
    #[serde(rename = "ID", default)]
    pub id: RuleId,
    /// Target folder id.
    #[serde(rename = "FolderID", default)]
    pub folder_id: FolderId,
    /// Target folder name.
    #[serde(rename = "FolderName", default, deserialize_with = "nullable")]
    pub folder_name: String,
    /// JSON-encoded list of [`RuleLineItem`].
    #[serde(rename = "Criteria", default, deserialize_with = "nullable")]
    pub criteria: String,
    /// Description shown in lists and confirmations.
    #[serde(rename = "Description", default, deserialize_with = "nullable")]
    pub description: String,
    /// Whether the rule is applied to incoming mail.
    #[serde(rename = "Enabled", default, deserialize_with = "flexible_bool")]
    pub enabled: bool,
    /// Who created the rule.
    #[serde(rename = "Creator", default, deserialize_with = "nullable")]
    pub creator: String,
    /// Creation timestamp as sent by the server.
    #[serde(rename = "CreatedAt", default, deserialize_with = "nullable")]
    pub created_at: String,
}

impl Rule {
    /// Parsed criteria. Malformed JSON yields an empty list.
    #[must_use]
    pub fn criteria(&self) -> Vec<RuleLineItem> {
        if self.criteria.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str::<Option<Vec<RuleLineItem>>>(&self.criteria) {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                debug!("Rule {} has unreadable criteria: {}", self.id, e);
                Vec::new()
            }
        }
    }

    /// Criteria rendered one condition per line.
    #[must_use]
    pub fn criteria_lines(&self) -> Vec<String> {
        self.criteria().iter().map(RuleLineItem::describe).collect()
    }

    /// "Yes" or "No" for the enabled flag.
    #[must_use]
    pub const fn enabled_label(&self) -> &'static str {
        if self.enabled { "Yes" } else { "No" }
    }
}

impl Record for Rule {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseBool {
    Bool(bool),
    Number(i64),
    Text(String),
}

/// Accepts `true`, `1`, `"true"`, `"yes"` and friends; everything else is false.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<LooseBool>::deserialize(deserializer)? {
        Some(LooseBool::Bool(value)) => value,
        Some(LooseBool::Number(value)) => value != 0,
        Some(LooseBool::Text(text)) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "y"
        ),
        None => false,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rule(criteria: &str) -> Rule {
        Rule {
            id: RuleId::new("r1"),
            criteria: criteria.to_string(),
            ..Rule::default()
        }
    }

    #[test]
    fn test_readable_names() {
        assert_eq!(RuleField::readable_name("RedactedBody"), "Body");
        assert_eq!(RuleField::readable_name("EmailSubject"), "Subject");
        assert_eq!(RuleField::readable_name("FromAddress"), "From");
        assert_eq!(RuleField::readable_name("sent_date"), "Date Received");
        assert_eq!(RuleField::readable_name("has_attachments"), "");
        assert_eq!(RuleField::readable_name("Unknown"), "");
    }

    #[test]
    fn test_body_only_offers_contains() {
        assert_eq!(RuleField::RedactedBody.conditions(), &[FieldCondition::Contains]);
        assert_eq!(RuleField::FromAddress.conditions().len(), 2);
        assert!(!RuleField::SentDate.condition_editable());
    }

    #[test]
    fn test_criteria_lines() {
        let rule = rule(
            r#"[{"fieldName":"FromAddress","fieldCondition":"equals","fieldValue":"a@b.c"},
                {"fieldName":"RedactedBody","fieldCondition":"contains","fieldValue":"claim"}]"#,
        );
        assert_eq!(
            rule.criteria_lines(),
            vec!["From equals a@b.c", "Body contains claim"]
        );
    }

    #[test]
    fn test_malformed_criteria_is_empty() {
        assert!(rule("{not json").criteria().is_empty());
        assert!(rule("").criteria().is_empty());
        assert!(rule("null").criteria().is_empty());
    }

    #[test]
    fn test_enabled_accepts_strings_and_bools() {
        let cases = [
            (r#"{"ID":"1","Enabled":true}"#, true),
            (r#"{"ID":"1","Enabled":"true"}"#, true),
            (r#"{"ID":"1","Enabled":"False"}"#, false),
            (r#"{"ID":"1","Enabled":1}"#, true),
            (r#"{"ID":"1","Enabled":null}"#, false),
            (r#"{"ID":"1"}"#, false),
        ];
        for (json, expected) in cases {
            let rule: Rule = serde_json::from_str(json).unwrap();
            assert_eq!(rule.enabled, expected, "{json}");
        }
    }

    #[test]
    fn test_line_item_wire_names() {
        let item = RuleLineItem::new("date_sent", "between", "2024-01-01-2024-01-31");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["fieldName"], "date_sent");
        assert_eq!(json["fieldCondition"], "between");
        assert_eq!(item.field(), Some(RuleField::SentDate));
    }
}
