//! Container styles.

use iced::widget::container::Style;
use iced::{Background, Border, Color, Theme};

use redactdesk_core::NotificationKind;

use super::palette;
use super::shadows;
use super::shadows::radius;

/// Filled, outlined panel with no shadow.
fn panel(fill: Color, outline: Color, corner: f32) -> Style {
    Style {
        background: Some(Background::Color(fill)),
        border: Border {
            color: outline,
            width: 1.0,
            radius: corner.into(),
        },
        ..Style::default()
    }
}

/// Top bar.
pub fn header_style(_theme: &Theme) -> Style {
    let p = palette::current();
    panel(p.surface, p.border_subtle, radius::NONE)
}

/// Navigation sidebar.
pub fn sidebar_style(_theme: &Theme) -> Style {
    let p = palette::current();
    panel(p.sidebar, p.border_subtle, radius::NONE)
}

/// Main content area behind screens.
pub fn page_style(_theme: &Theme) -> Style {
    let p = palette::current();
    Style {
        background: Some(Background::Color(p.background)),
        text_color: Some(p.text_primary),
        ..Style::default()
    }
}

/// Panel holding a form or the preferences editor.
pub fn card_style(_theme: &Theme) -> Style {
    let p = palette::current();
    Style {
        shadow: shadows::subtle(),
        ..panel(p.surface, p.border_subtle, radius::LARGE)
    }
}

/// Column header strip of a table.
pub fn table_header_style(_theme: &Theme) -> Style {
    let p = palette::current();
    panel(p.surface_raised, p.border_subtle, radius::SMALL)
}

/// Message detail drawer on the right edge.
pub fn drawer_style(_theme: &Theme) -> Style {
    let p = palette::current();
    Style {
        shadow: shadows::floating(),
        ..panel(p.surface, p.border_strong, radius::NONE)
    }
}

/// Dimmed layer behind a dialog.
pub fn backdrop_style(_theme: &Theme) -> Style {
    Style {
        background: Some(Background::Color(palette::current().backdrop)),
        ..Style::default()
    }
}

/// Dialog box.
pub fn dialog_style(_theme: &Theme) -> Style {
    let p = palette::current();
    Style {
        text_color: Some(p.text_primary),
        shadow: shadows::floating(),
        ..panel(p.surface, p.border_strong, radius::LARGE)
    }
}

/// Redacted body block in the detail drawer.
pub fn body_block_style(_theme: &Theme) -> Style {
    let p = palette::current();
    panel(p.background, p.border_subtle, radius::MEDIUM)
}

/// Notification banner, colored by kind.
pub fn banner_style(kind: NotificationKind) -> impl Fn(&Theme) -> Style {
    move |_theme| {
        let p = palette::current();
        let accent = match kind {
            NotificationKind::Success => p.success,
            NotificationKind::Error => p.danger,
            NotificationKind::Info => p.info,
        };
        Style {
            text_color: Some(Color::WHITE),
            ..panel(accent, accent, radius::MEDIUM)
        }
    }
}

/// Count badge next to a sidebar folder.
pub fn badge_style(_theme: &Theme) -> Style {
    let p = palette::current();
    Style {
        text_color: Some(p.text_on_primary),
        border: Border {
            radius: radius::PILL.into(),
            ..Border::default()
        },
        background: Some(Background::Color(p.primary)),
        ..Style::default()
    }
}
