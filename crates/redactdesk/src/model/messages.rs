//! Messages screen state.

use redactdesk_core::columns::message_list;
use redactdesk_core::{CaseId, EmailMessage, Folder, FolderId};

use super::ListScreen;

/// Card list, folder header and detail drawer content.
pub struct MessagesScreen {
    /// Card list.
    pub cards: ListScreen<EmailMessage>,
    /// Folder the list is scoped to; `None` is every message.
    pub scope: Option<FolderId>,
    /// Header folder, once looked up.
    pub folder: Option<Folder>,
    /// Message shown in the detail drawer.
    pub detail: Option<EmailMessage>,
    /// Whether the detail is being fetched.
    pub detail_loading: bool,
    /// Whether an export is in flight.
    pub exporting: bool,
}

impl Default for MessagesScreen {
    fn default() -> Self {
        Self {
            cards: ListScreen::new(message_list()),
            scope: None,
            folder: None,
            detail: None,
            detail_loading: false,
            exporting: false,
        }
    }
}

impl MessagesScreen {
    /// Points the screen at a folder scope.
    ///
    /// Changing scope drops the selection, the detail and the header folder.
    /// Returns true if the scope changed.
    pub fn enter(&mut self, scope: Option<FolderId>) -> bool {
        if self.scope == scope {
            return false;
        }
        self.scope = scope;
        self.folder = None;
        self.detail = None;
        self.detail_loading = false;
        self.cards.list.clear_selection();
        self.cards.records.clear();
        true
    }

    /// Header title: the folder name, or "Inbox".
    pub fn title(&self) -> String {
        self.folder
            .as_ref()
            .filter(|f| !f.name.is_empty())
            .map_or_else(|| "Inbox".to_string(), |f| f.name.clone())
    }

    /// The selected message's case id.
    pub fn selected_case(&self) -> Option<CaseId> {
        self.cards.selected().map(|m| m.case_id.clone())
    }

    /// Export is offered only when records are loaded and nothing is pending.
    pub fn can_export(&self) -> bool {
        !self.cards.loading && !self.exporting && !self.cards.records.is_empty()
    }

    /// Case ids of every message passing the filter, across all pages.
    pub fn export_ids(&self) -> Vec<CaseId> {
        self.cards
            .list
            .matching(&self.cards.records)
            .into_iter()
            .map(|m| m.case_id.clone())
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::message::ListMessage;

    fn message(id: &str, subject: &str) -> EmailMessage {
        EmailMessage {
            case_id: CaseId::new(id),
            email_subject: subject.to_string(),
            ..EmailMessage::default()
        }
    }

    fn loaded() -> MessagesScreen {
        let mut screen = MessagesScreen::default();
        screen
            .cards
            .finish_loading(Ok(vec![message("1", "Claim"), message("2", "Invoice")]))
            .unwrap();
        screen
    }

    #[test]
    fn test_title_defaults_to_inbox() {
        let mut screen = MessagesScreen::default();
        assert_eq!(screen.title(), "Inbox");
        screen.folder = Some(Folder {
            name: "Claims".to_string(),
            ..Folder::default()
        });
        assert_eq!(screen.title(), "Claims");
    }

    #[test]
    fn test_changing_scope_clears_selection() {
        let mut screen = loaded();
        screen.cards.update(ListMessage::Select("1".to_string()));
        assert_eq!(screen.selected_case(), Some(CaseId::new("1")));

        assert!(!screen.enter(None));
        assert!(screen.selected_case().is_some());

        assert!(screen.enter(Some(FolderId::new("f1"))));
        assert!(screen.selected_case().is_none());
        assert!(screen.cards.records.is_empty());
    }

    #[test]
    fn test_export_gating() {
        let mut screen = loaded();
        assert!(screen.can_export());
        screen.exporting = true;
        assert!(!screen.can_export());
        screen.exporting = false;
        screen.cards.start_loading();
        assert!(!screen.can_export());
    }

    #[test]
    fn test_export_ids_follow_filter() {
        let mut screen = loaded();
        screen
            .cards
            .update(ListMessage::FreeTextChanged("invoice".to_string()));
        assert_eq!(screen.export_ids(), vec![CaseId::new("2")]);
    }
}
