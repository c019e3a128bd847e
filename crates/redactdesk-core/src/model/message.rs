//! Redacted email messages.

use redactdesk_table::Record;
use serde::{Deserialize, Deserializer, Serialize};

use super::{FolderRef, loose_id, nullable};

/// Unique case id assigned to every received email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CaseId(pub String);

impl CaseId {
    /// Create a new case ID.
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

impl<'de> Deserialize<'de> for CaseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        loose_id(deserializer).map(Self)
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A downloadable attachment of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// File name.
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    /// Pre-signed download URL.
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
}

/// A received email after redaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Unique case id.
    #[serde(rename = "CaseID", default)]
    pub case_id: CaseId,
    /// Raw email object key.
    #[serde(rename = "RawFilePath", default, deserialize_with = "nullable")]
    pub raw_file_path: String,
    /// Bucket holding raw emails.
    #[serde(rename = "RawBucketName", default, deserialize_with = "nullable")]
    pub raw_bucket_name: String,
    /// Redacted subject.
    #[serde(rename = "EmailSubject", default, deserialize_with = "nullable")]
    pub email_subject: String,
    /// First characters of the redacted body.
    #[serde(rename = "EmailBody", default, deserialize_with = "nullable")]
    pub email_body: String,
    /// When the email arrived.
    #[serde(rename = "EmailReceiveTime", default, deserialize_with = "nullable")]
    pub email_receive_time: String,
    /// Sender address.
    #[serde(rename = "FromAddress", default, deserialize_with = "nullable")]
    pub from_address: String,
    /// Dominant language of the body.
    #[serde(rename = "DominantLanguage", default, deserialize_with = "nullable")]
    pub dominant_language: String,
    /// Bucket holding processed emails.
    #[serde(rename = "ProcessedBucketName", default, deserialize_with = "nullable")]
    pub processed_bucket_name: String,
    /// Processed email object key.
    #[serde(rename = "ProcessedFilePath", default, deserialize_with = "nullable")]
    pub processed_file_path: String,
    /// Folder the message is filed in.
    #[serde(rename = "FolderID", default, deserialize_with = "nullable")]
    pub folder_id: String,
    /// When body redaction finished.
    #[serde(rename = "BodyProcessedTime", default, deserialize_with = "nullable")]
    pub body_processed_time: String,
    /// Body redaction status.
    #[serde(rename = "BodyStatus", default, deserialize_with = "nullable")]
    pub body_status: String,
    /// When attachment redaction finished.
    #[serde(rename = "AttachmentProcessedTime", default, deserialize_with = "nullable")]
    pub attachment_processed_time: String,
    /// Attachment redaction status (Open, Failed, Processed).
    #[serde(rename = "AttachmentStatus", default, deserialize_with = "nullable")]
    pub attachment_status: String,
    /// Full redacted body.
    #[serde(rename = "RedactedBody", default, deserialize_with = "nullable")]
    pub redacted_body: String,
    /// Folder summary, present on single-message reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderRef>,
    /// Attachment links, present on single-message reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<Attachment>>,
}

impl EmailMessage {
    /// Attachments, or an empty slice when the server sent none.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        self.files.as_deref().unwrap_or_default()
    }

    /// Body text for previews: the redacted body, else the stored excerpt.
    #[must_use]
    pub fn preview_body(&self) -> &str {
        if self.redacted_body.is_empty() {
            &self.email_body
        } else {
            &self.redacted_body
        }
    }
}

impl Record for EmailMessage {
    fn key(&self) -> String {
        self.case_id.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_case_id_accepts_numbers_and_strings() {
        let numeric: EmailMessage = serde_json::from_str(r#"{"CaseID": 42}"#).unwrap();
        assert_eq!(numeric.case_id.as_str(), "42");

        let text: EmailMessage = serde_json::from_str(r#"{"CaseID": "c-7"}"#).unwrap();
        assert_eq!(text.key(), "c-7");
    }

    #[test]
    fn test_nulls_become_empty() {
        let message: EmailMessage = serde_json::from_str(
            r#"{"CaseID": "1", "EmailSubject": null, "FromAddress": "a@b.c"}"#,
        )
        .unwrap();
        assert_eq!(message.email_subject, "");
        assert_eq!(message.from_address, "a@b.c");
        assert!(message.attachments().is_empty());
    }

    #[test]
    fn test_folder_and_files() {
        let message: EmailMessage = serde_json::from_str(
            r#"{
                "CaseID": "1",
                "RedactedBody": "Hello [NAME]",
                "folder": {"FolderID": "f1", "Name": "Claims"},
                "files": [{"name": "a.pdf", "url": "https://x/a.pdf"}]
            }"#,
        )
        .unwrap();
        assert_eq!(message.folder.as_ref().unwrap().name, "Claims");
        assert_eq!(message.attachments()[0].name, "a.pdf");
        assert_eq!(message.preview_body(), "Hello [NAME]");
    }

    #[test]
    fn test_serializes_case_id_as_string() {
        let json = serde_json::to_value(CaseId::new("9")).unwrap();
        assert_eq!(json, serde_json::json!("9"));
    }
}
