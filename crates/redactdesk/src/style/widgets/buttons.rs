//! Button styles.
//!
//! Every style starts from a [`styled`] base and overrides per status.

use iced::widget::button::{Status, Style};
use iced::{Background, Border, Color, Shadow, Theme};

use super::palette;
use super::shadows;
use super::shadows::radius;

fn styled(fill: Color, text: Color, outline: Color, width: f32, corner: f32) -> Style {
    Style {
        background: Some(Background::Color(fill)),
        text_color: text,
        border: Border {
            color: outline,
            width,
            radius: corner.into(),
        },
        shadow: shadows::none(),
        snap: false,
    }
}

const fn with_fill(style: Style, fill: Color) -> Style {
    Style {
        background: Some(Background::Color(fill)),
        ..style
    }
}

const fn with_shadow(style: Style, shadow: Shadow) -> Style {
    Style { shadow, ..style }
}

/// Filled call-to-action button.
pub fn primary_button_style(_theme: &Theme, status: Status) -> Style {
    let p = palette::current();
    let base = with_shadow(
        styled(p.primary, p.text_on_primary, p.primary, 1.0, radius::MEDIUM),
        shadows::glow(p.primary),
    );

    match status {
        Status::Active => base,
        Status::Hovered => with_fill(base, p.primary_hover),
        Status::Pressed => with_shadow(with_fill(base, p.primary_pressed), shadows::none()),
        Status::Disabled => styled(
            p.border_strong,
            p.surface,
            p.border_strong,
            1.0,
            radius::MEDIUM,
        ),
    }
}

/// Outlined button for secondary toolbar actions.
pub fn secondary_button_style(_theme: &Theme, status: Status) -> Style {
    let p = palette::current();
    let base = styled(p.surface, p.text_primary, p.border_strong, 1.0, radius::MEDIUM);

    match status {
        Status::Active => base,
        Status::Hovered => with_fill(base, p.hover),
        Status::Pressed => with_fill(base, p.selected),
        Status::Disabled => styled(p.surface, p.text_muted, p.border_subtle, 1.0, radius::MEDIUM),
    }
}

/// Destructive action.
pub fn danger_button_style(_theme: &Theme, status: Status) -> Style {
    let p = palette::current();
    let base = styled(p.danger, Color::WHITE, p.danger, 1.0, radius::MEDIUM);

    match status {
        Status::Active | Status::Hovered => base,
        Status::Pressed => with_shadow(base, shadows::subtle()),
        Status::Disabled => styled(
            p.border_subtle,
            p.text_muted,
            p.border_subtle,
            1.0,
            radius::MEDIUM,
        ),
    }
}

/// Borderless button: header icons, breadcrumbs, links.
pub fn ghost_button_style(_theme: &Theme, status: Status) -> Style {
    let p = palette::current();
    let base = styled(
        Color::TRANSPARENT,
        p.text_secondary,
        Color::TRANSPARENT,
        0.0,
        radius::SMALL,
    );

    match status {
        Status::Active | Status::Disabled => base,
        Status::Hovered => Style {
            text_color: p.text_primary,
            ..with_fill(base, p.hover)
        },
        Status::Pressed => with_fill(base, p.selected),
    }
}

/// Sidebar entry.
pub fn nav_button_style(_theme: &Theme, status: Status) -> Style {
    let p = palette::current();
    let base = styled(
        Color::TRANSPARENT,
        p.text_primary,
        Color::TRANSPARENT,
        0.0,
        radius::MEDIUM,
    );

    match status {
        Status::Active | Status::Disabled => base,
        Status::Hovered => with_fill(base, p.hover),
        Status::Pressed => with_fill(base, p.selected),
    }
}

/// Sidebar entry for the current screen.
pub fn nav_button_active_style(_theme: &Theme, status: Status) -> Style {
    let p = palette::current();
    let base = styled(p.selected, p.primary, p.selected_border, 1.0, radius::MEDIUM);

    if status == Status::Hovered {
        with_fill(base, p.hover)
    } else {
        base
    }
}

/// Clickable table row or message card.
pub fn row_button_style(_theme: &Theme, status: Status) -> Style {
    let p = palette::current();
    let base = styled(p.surface, p.text_primary, p.border_subtle, 1.0, radius::SMALL);

    match status {
        Status::Active => base,
        Status::Hovered => with_fill(base, p.hover),
        Status::Pressed => with_fill(base, p.selected),
        // General Inbox and other rows that can never be selected.
        Status::Disabled => Style {
            text_color: p.text_muted,
            ..with_fill(base, p.background)
        },
    }
}

/// Selected table row or message card.
pub fn row_button_selected_style(_theme: &Theme, _status: Status) -> Style {
    let p = palette::current();
    with_shadow(
        styled(p.selected, p.text_primary, p.selected_border, 2.0, radius::SMALL),
        shadows::subtle(),
    )
}

/// Removable filter token or recipient chip.
pub fn chip_button_style(_theme: &Theme, status: Status) -> Style {
    let p = palette::current();

    let (fill, outline) = match status {
        Status::Hovered | Status::Pressed => (p.hover, p.danger),
        Status::Active | Status::Disabled => (p.surface_raised, p.border_strong),
    };
    styled(fill, p.text_primary, outline, 1.0, radius::PILL)
}
