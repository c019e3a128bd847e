//! Shadow presets and corner radii.

use iced::{Color, Shadow, Vector};

use super::palette;

/// Corner radii.
pub mod radius {
    pub const NONE: f32 = 0.0;
    pub const SMALL: f32 = 4.0;
    pub const MEDIUM: f32 = 6.0;
    pub const LARGE: f32 = 10.0;
    pub const PILL: f32 = 999.0;
}

pub fn none() -> Shadow {
    Shadow::default()
}

/// One-pixel lift for cards.
pub fn subtle() -> Shadow {
    Shadow {
        color: palette::current().shadow,
        offset: Vector::new(0.0, 1.0),
        blur_radius: 3.0,
    }
}

/// Deep shadow for drawers and dialogs floating over content.
pub fn floating() -> Shadow {
    Shadow {
        color: palette::current().shadow,
        offset: Vector::new(0.0, 8.0),
        blur_radius: 24.0,
    }
}

/// Colored halo around the primary button.
pub const fn glow(color: Color) -> Shadow {
    Shadow {
        color: Color::from_rgba(color.r, color.g, color.b, 0.3),
        offset: Vector::new(0.0, 2.0),
        blur_radius: 10.0,
    }
}
