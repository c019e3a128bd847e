//! Screen state for the console.

mod list;
mod messages;
mod settings;

use std::fmt;

use redactdesk_core::{DeleteConfirmation, Folder, FolderId, ForwardMessageForm};

pub use list::{ListScreen, PropertyChoice};
pub use messages::MessagesScreen;
pub use settings::AppSettings;

/// Dialog shown over the current screen.
pub enum Modal {
    /// Forward the selected message.
    Forward(ForwardMessageForm),
    /// Confirm deleting a folder or rule.
    Delete(DeleteConfirmation),
}

/// Entry of the rule form's folder picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderChoice {
    /// Folder id.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
}

impl From<&Folder> for FolderChoice {
    fn from(folder: &Folder) -> Self {
        Self {
            id: folder.id.clone(),
            name: folder.name.clone(),
        }
    }
}

impl fmt::Display for FolderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
