//! Records returned by the console API.
//!
//! Field names follow the server's JSON (`CaseID`, `FolderID`, ...) through
//! `serde(rename)`; nulls and omitted fields fall back to their defaults.

mod folder;
mod message;
mod rule;

pub use folder::{Folder, FolderId, FolderRef};
pub use message::{Attachment, CaseId, EmailMessage};
pub use rule::{FieldCondition, Rule, RuleField, RuleId, RuleLineItem};

use serde::{Deserialize, Deserializer};

/// Deserializes `null` as the type's default.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An identifier the server sends either as a JSON string or a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseId {
    Text(String),
    Number(serde_json::Number),
}

impl LooseId {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// Deserializes a string-or-number identifier into its string form.
pub(crate) fn loose_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<LooseId>::deserialize(deserializer)?
        .map(LooseId::into_string)
        .unwrap_or_default())
}
