//! Text input and scrollable styles.

use iced::widget::{container, scrollable, text_input};
use iced::{Background, Border, Color, Theme};

use super::palette::{self, Palette};
use super::shadows;
use super::shadows::radius;

fn field(p: &Palette, status: text_input::Status, invalid: bool) -> text_input::Style {
    let (fill, value) = match status {
        text_input::Status::Active => (p.surface_raised, p.text_primary),
        text_input::Status::Hovered | text_input::Status::Focused { .. } => {
            (p.surface, p.text_primary)
        }
        text_input::Status::Disabled => (p.background, p.text_muted),
    };
    let outline = if invalid {
        p.danger
    } else if matches!(status, text_input::Status::Focused { .. }) {
        p.primary
    } else {
        p.border_strong
    };

    text_input::Style {
        background: Background::Color(fill),
        border: Border {
            color: outline,
            width: 1.0,
            radius: radius::MEDIUM.into(),
        },
        icon: p.text_muted,
        placeholder: p.text_muted,
        value,
        selection: p.selected,
    }
}

/// Form field and filter bar input.
pub fn input_style(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    field(&palette::current(), status, false)
}

/// Input whose field failed validation; the outline stays red while focused.
pub fn invalid_input_style(_theme: &Theme, status: text_input::Status) -> text_input::Style {
    field(&palette::current(), status, true)
}

/// Scrollable style; the vertical scroller picks up the accent while in use.
pub fn scrollable_style(_theme: &Theme, status: scrollable::Status) -> scrollable::Style {
    let p = palette::current();

    let scroller = match status {
        scrollable::Status::Hovered {
            is_vertical_scrollbar_hovered: true,
            ..
        } => p.primary_hover,
        scrollable::Status::Dragged {
            is_vertical_scrollbar_dragged: true,
            ..
        } => p.primary,
        _ => p.border_strong,
    };

    scrollable::Style {
        container: container::Style::default(),
        vertical_rail: rail(scroller),
        horizontal_rail: rail(p.border_strong),
        gap: None,
        auto_scroll: scrollable::AutoScroll {
            background: Background::Color(p.surface),
            border: Border::default(),
            shadow: shadows::none(),
            icon: p.text_muted,
        },
    }
}

fn rail(scroller: Color) -> scrollable::Rail {
    scrollable::Rail {
        background: Some(Background::Color(Color::TRANSPARENT)),
        border: Border::default(),
        scroller: scrollable::Scroller {
            background: Background::Color(scroller),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: radius::SMALL.into(),
            },
        },
    }
}
