//! Flash notifications shown above the active screen.

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// A mutation succeeded.
    Success,
    /// A mutation failed.
    Error,
    /// Neutral information.
    Info,
}

impl NotificationKind {
    /// Banner header for this kind.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Success => "Success!",
            Self::Error => "Error!",
            Self::Info => "Info",
        }
    }
}

/// A single banner message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Severity.
    pub kind: NotificationKind,
    /// Header line.
    pub header: String,
    /// Body text.
    pub content: String,
}

impl Notification {
    /// A success banner.
    #[must_use]
    pub fn success(content: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, content)
    }

    /// An error banner.
    #[must_use]
    pub fn error(content: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, content)
    }

    /// An informational banner.
    #[must_use]
    pub fn info(content: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, content)
    }

    fn new(kind: NotificationKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            header: kind.header().to_string(),
            content: content.into(),
        }
    }
}

/// The banner stack. Setting replaces the stack; dismissing clears all of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    /// Replaces the current banners with `notification`.
    pub fn set(&mut self, notification: Notification) {
        self.items = vec![notification];
    }

    /// Adds a banner below the current ones.
    pub fn push(&mut self, notification: Notification) {
        self.items.push(notification);
    }

    /// Dismisses every banner.
    pub fn dismiss(&mut self) {
        self.items.clear();
    }

    /// Current banners, oldest first.
    #[must_use]
    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_and_dismiss_clears() {
        let mut notifications = Notifications::default();
        notifications.push(Notification::info("one"));
        notifications.push(Notification::info("two"));
        notifications.set(Notification::error("Not able to create folder"));
        assert_eq!(notifications.items().len(), 1);
        assert_eq!(notifications.items()[0].header, "Error!");

        notifications.dismiss();
        assert!(notifications.is_empty());
    }
}
