//! View components for the console.

mod forms;
mod header;
mod list;
mod messages;
mod modals;
mod notifications;
mod sidebar;
mod tables;

pub use forms::{view_create_folder, view_create_rule};
pub use header::view_header;
pub use messages::{view_message_drawer, view_messages};
pub use modals::{view_delete_modal, view_forward_modal, view_overlay};
pub use notifications::view_notifications;
pub use sidebar::view_sidebar;
pub use tables::{view_folders, view_rules};

/// Semibold text for titles and headers.
const SEMIBOLD: iced::Font = iced::Font {
    weight: iced::font::Weight::Semibold,
    ..iced::Font::DEFAULT
};

/// Bold text for section captions.
const BOLD: iced::Font = iced::Font {
    weight: iced::font::Weight::Bold,
    ..iced::Font::DEFAULT
};
