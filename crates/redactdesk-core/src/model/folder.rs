//! Folders that group messages.

use redactdesk_table::Record;
use serde::{Deserialize, Deserializer, Serialize};

use super::{loose_id, nullable};

/// Unique identifier for a folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FolderId(pub String);

impl FolderId {
    /// Id of the default folder every unfiled message lands in.
    pub const GENERAL_INBOX: &'static str = "general_inbox";

    /// Create a new folder ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The default folder.
    #[must_use]
    pub fn general_inbox() -> Self {
        Self::new(Self::GENERAL_INBOX)
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the default folder.
    #[must_use]
    pub fn is_general_inbox(&self) -> bool {
        self.0 == Self::GENERAL_INBOX
    }
}

impl<'de> Deserialize<'de> for FolderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        loose_id(deserializer).map(Self)
    }
}

impl std::fmt::Display for FolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A folder as listed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique id.
    #[serde(rename = "ID", default)]
    pub id: FolderId,
    /// Display name.
    #[serde(rename = "Name", default, deserialize_with = "nullable")]
    pub name: String,
    /// Free-form description.
    #[serde(rename = "Description", default, deserialize_with = "nullable")]
    pub description: String,
    /// Who created the folder.
    #[serde(rename = "Creator", default, deserialize_with = "nullable")]
    pub creator: String,
    /// Creation timestamp as sent by the server.
    #[serde(rename = "CreatedAt", default, deserialize_with = "nullable")]
    pub created_at: String,
    /// Number of messages filed here.
    #[serde(rename = "MessagesCount", default, deserialize_with = "nullable")]
    pub messages_count: u64,
}

impl Folder {
    /// The default folder can be neither selected for deletion nor deleted.
    #[must_use]
    pub fn is_general_inbox(&self) -> bool {
        self.id.is_general_inbox()
    }
}

impl Record for Folder {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// Folder summary embedded in a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    /// Folder id.
    #[serde(rename = "FolderID", default)]
    pub folder_id: FolderId,
    /// Folder name.
    #[serde(rename = "Name", default, deserialize_with = "nullable")]
    pub name: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_folder() {
        let folder: Folder = serde_json::from_str(
            r#"{"ID": "general_inbox", "Name": "General Inbox", "Description": null,
                "Creator": "system", "CreatedAt": "2024-03-01T10:00:00+00:00", "MessagesCount": 4}"#,
        )
        .unwrap();
        assert!(folder.is_general_inbox());
        assert_eq!(folder.description, "");
        assert_eq!(folder.messages_count, 4);
        assert_eq!(folder.key(), "general_inbox");
    }

    #[test]
    fn test_missing_count_is_zero() {
        let folder: Folder = serde_json::from_str(r#"{"ID": 12, "Name": "Claims"}"#).unwrap();
        assert_eq!(folder.id.as_str(), "12");
        assert_eq!(folder.messages_count, 0);
        assert!(!folder.is_general_inbox());
    }
}
