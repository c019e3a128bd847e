//! Navigation, breadcrumbs, drawers and banners shared by every screen.
//!
//! Screens receive the [`Shell`] by `&mut` from the application's update loop
//! instead of reaching for global state.

use redactdesk_table::locale_cmp;

use crate::config::FeatureSet;
use crate::model::{Folder, FolderId};
use crate::notification::{Notification, Notifications};

/// A screen of the console.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Inbox: every message.
    #[default]
    Home,
    /// Messages of one folder.
    Messages {
        /// Folder being viewed.
        folder: FolderId,
    },
    /// Folders table.
    Folders,
    /// Create folder form.
    CreateFolder,
    /// Rules table.
    Rules,
    /// Create rule form.
    CreateRule,
}

impl Route {
    /// Location of the screen, for logs and links.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Messages { folder } => format!("/folders/{folder}"),
            Self::Folders => "/folders".to_string(),
            Self::CreateFolder => "/folders/create".to_string(),
            Self::Rules => "/rules".to_string(),
            Self::CreateRule => "/rules/create".to_string(),
        }
    }

    /// Folder whose messages the screen lists, if any.
    #[must_use]
    pub const fn folder(&self) -> Option<&FolderId> {
        match self {
            Self::Messages { folder } => Some(folder),
            _ => None,
        }
    }

    /// Whether the screen lists messages.
    #[must_use]
    pub const fn is_messages(&self) -> bool {
        matches!(self, Self::Home | Self::Messages { .. })
    }

    /// Breadcrumb trail, ending with `detail` when one is set.
    #[must_use]
    pub fn breadcrumbs(&self, detail: Option<&str>) -> Vec<Breadcrumb> {
        let mut trail = vec![Breadcrumb::new("Home", Self::Home)];
        match self {
            Self::Home => {}
            Self::Messages { .. } | Self::Folders => {
                trail.push(Breadcrumb::new("Folders", Self::Folders));
            }
            Self::CreateFolder => {
                trail.push(Breadcrumb::new("Folders", Self::Folders));
                trail.push(Breadcrumb::new("Create", Self::CreateFolder));
            }
            Self::Rules => trail.push(Breadcrumb::new("Rules", Self::Rules)),
            Self::CreateRule => {
                trail.push(Breadcrumb::new("Rules", Self::Rules));
                trail.push(Breadcrumb::new("Create", Self::CreateRule));
            }
        }
        if let Some(detail) = detail.filter(|d| !d.is_empty()) {
            trail.push(Breadcrumb::new(detail, self.clone()));
        }
        trail
    }
}

/// One step of the breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Text shown.
    pub label: String,
    /// Where clicking leads.
    pub route: Route,
}

impl Breadcrumb {
    fn new(label: impl Into<String>, route: Route) -> Self {
        Self {
            label: label.into(),
            route,
        }
    }
}

/// Side drawers a screen can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drawer {
    /// Full view of the selected message.
    MessageDetail,
}

/// Sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    /// Text shown.
    pub label: String,
    /// Destination.
    pub route: Route,
    /// Message count badge; only folders with messages carry one.
    pub badge: Option<u64>,
}

/// Sidebar: Home, Folders and Rules, then every folder by name.
#[must_use]
pub fn nav_items(folders: &[Folder]) -> Vec<NavItem> {
    let mut items = vec![
        NavItem {
            label: "Home".to_string(),
            route: Route::Home,
            badge: None,
        },
        NavItem {
            label: "Folders".to_string(),
            route: Route::Folders,
            badge: None,
        },
        NavItem {
            label: "Rules".to_string(),
            route: Route::Rules,
            badge: None,
        },
    ];

    let mut sorted: Vec<&Folder> = folders.iter().collect();
    sorted.sort_by(|a, b| locale_cmp(&a.name, &b.name));
    items.extend(sorted.into_iter().map(|folder| NavItem {
        label: folder.name.clone(),
        route: Route::Messages {
            folder: folder.id.clone(),
        },
        badge: (folder.messages_count > 0).then_some(folder.messages_count),
    }));
    items
}

/// Capability struct handed to screen handlers.
#[derive(Debug, Clone, Default)]
pub struct Shell {
    /// Banner stack.
    pub notifications: Notifications,
    breadcrumb_detail: Option<String>,
    active_drawer: Option<Drawer>,
    route: Route,
    folders_stale: bool,
    features: FeatureSet,
}

impl Shell {
    /// Shell on the home screen with the given features.
    #[must_use]
    pub fn new(features: FeatureSet) -> Self {
        Self {
            features,
            ..Self::default()
        }
    }

    /// Enabled features.
    #[must_use]
    pub const fn features(&self) -> FeatureSet {
        self.features
    }

    /// Replaces the banners with `notification`.
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.set(notification);
    }

    /// Current screen.
    #[must_use]
    pub const fn route(&self) -> &Route {
        &self.route
    }

    /// Moves to `route`, keeping banners so an outcome survives the move.
    pub fn navigate(&mut self, route: Route) {
        if self.route != route {
            self.breadcrumb_detail = None;
        }
        self.route = route;
    }

    /// Follows a sidebar or breadcrumb link: banners are cleared first.
    pub fn follow(&mut self, route: Route) {
        self.notifications.dismiss();
        self.navigate(route);
    }

    /// Sets the trailing breadcrumb, e.g. the open folder's name.
    pub fn set_breadcrumb_detail(&mut self, detail: Option<String>) {
        self.breadcrumb_detail = detail;
    }

    /// Trailing breadcrumb, if set.
    #[must_use]
    pub fn breadcrumb_detail(&self) -> Option<&str> {
        self.breadcrumb_detail.as_deref()
    }

    /// Breadcrumb trail of the current screen.
    #[must_use]
    pub fn breadcrumbs(&self) -> Vec<Breadcrumb> {
        self.route.breadcrumbs(self.breadcrumb_detail())
    }

    /// Opens a side drawer.
    pub fn set_active_drawer(&mut self, drawer: Drawer) {
        self.active_drawer = Some(drawer);
    }

    /// Closes the side drawer.
    pub fn close_drawer(&mut self) {
        self.active_drawer = None;
    }

    /// Open side drawer.
    #[must_use]
    pub const fn active_drawer(&self) -> Option<Drawer> {
        self.active_drawer
    }

    /// Asks the sidebar to reload folders.
    pub fn request_folder_refetch(&mut self) {
        self.folders_stale = true;
    }

    /// Returns and clears a pending folder reload request.
    pub fn take_folder_refetch(&mut self) -> bool {
        std::mem::take(&mut self.folders_stale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folder(id: &str, name: &str, count: u64) -> Folder {
        Folder {
            id: FolderId::new(id),
            name: name.to_string(),
            messages_count: count,
            ..Folder::default()
        }
    }

    #[test]
    fn test_nav_items_sort_folders_and_badge() {
        let items = nav_items(&[
            folder("f2", "claims", 0),
            folder("general_inbox", "General Inbox", 3),
            folder("f1", "Appeals", 1),
        ]);
        let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            ["Home", "Folders", "Rules", "Appeals", "claims", "General Inbox"]
        );
        assert_eq!(items[3].badge, Some(1));
        assert_eq!(items[4].badge, None);
        assert_eq!(
            items[5].route,
            Route::Messages {
                folder: FolderId::general_inbox()
            }
        );
    }

    #[test]
    fn test_breadcrumbs_end_with_detail() {
        let mut shell = Shell::default();
        shell.navigate(Route::Messages {
            folder: FolderId::new("f1"),
        });
        shell.set_breadcrumb_detail(Some("Claims".to_string()));
        let labels: Vec<_> = shell.breadcrumbs().into_iter().map(|b| b.label).collect();
        assert_eq!(labels, ["Home", "Folders", "Claims"]);

        shell.navigate(Route::CreateRule);
        let labels: Vec<_> = shell.breadcrumbs().into_iter().map(|b| b.label).collect();
        assert_eq!(labels, ["Home", "Rules", "Create"]);
    }

    #[test]
    fn test_navigate_keeps_banners_follow_clears_them() {
        let mut shell = Shell::default();
        shell.notify(Notification::success("Folder Claims was created successfully"));
        shell.navigate(Route::Folders);
        assert!(!shell.notifications.is_empty());

        shell.follow(Route::Rules);
        assert!(shell.notifications.is_empty());
        assert_eq!(shell.route(), &Route::Rules);
    }

    #[test]
    fn test_folder_refetch_is_taken_once() {
        let mut shell = Shell::default();
        shell.request_folder_refetch();
        assert!(shell.take_folder_refetch());
        assert!(!shell.take_folder_refetch());
    }

    #[test]
    fn test_drawer() {
        let mut shell = Shell::new(FeatureSet { email: true });
        assert!(shell.features().email);
        shell.set_active_drawer(Drawer::MessageDetail);
        assert_eq!(shell.active_drawer(), Some(Drawer::MessageDetail));
        shell.close_drawer();
        assert_eq!(shell.active_drawer(), None);
    }
}
