//! Color palette with light and dark variants.
//!
//! Slate surfaces with an amber accent; amber is also the color redaction
//! markers use in the reviewed documents, so selection reads as "under review".

use iced::Color;

/// Console theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl ThemeMode {
    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Name stored in `settings.json`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parses a stored name; anything unknown is light.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("dark") {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

/// Colors used by every widget style.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub primary: Color,
    pub primary_hover: Color,
    pub primary_pressed: Color,

    pub background: Color,
    pub surface: Color,
    pub surface_raised: Color,
    pub sidebar: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,
    pub text_on_primary: Color,

    pub success: Color,
    pub danger: Color,
    pub info: Color,

    pub selected: Color,
    pub selected_border: Color,
    pub hover: Color,

    pub border_subtle: Color,
    pub border_strong: Color,

    pub shadow: Color,
    pub backdrop: Color,
}

impl Palette {
    /// Light palette.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::from_rgb(0.85, 0.50, 0.05),
            primary_hover: Color::from_rgb(0.93, 0.58, 0.10),
            primary_pressed: Color::from_rgb(0.72, 0.42, 0.03),

            background: Color::from_rgb(0.96, 0.97, 0.98),
            surface: Color::WHITE,
            surface_raised: Color::from_rgb(0.99, 0.99, 1.0),
            sidebar: Color::from_rgb(0.93, 0.94, 0.96),

            text_primary: Color::from_rgb(0.11, 0.13, 0.17),
            text_secondary: Color::from_rgb(0.36, 0.40, 0.47),
            text_muted: Color::from_rgb(0.56, 0.60, 0.66),
            text_on_primary: Color::WHITE,

            success: Color::from_rgb(0.12, 0.60, 0.32),
            danger: Color::from_rgb(0.82, 0.18, 0.20),
            info: Color::from_rgb(0.10, 0.45, 0.80),

            selected: Color::from_rgb(1.0, 0.96, 0.88),
            selected_border: Color::from_rgb(0.85, 0.50, 0.05),
            hover: Color::from_rgb(0.95, 0.96, 0.97),

            border_subtle: Color::from_rgb(0.88, 0.90, 0.92),
            border_strong: Color::from_rgb(0.74, 0.77, 0.81),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.08),
            backdrop: Color::from_rgba(0.05, 0.07, 0.10, 0.55),
        }
    }

    /// Dark palette.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::from_rgb(1.0, 0.68, 0.20),
            primary_hover: Color::from_rgb(1.0, 0.76, 0.35),
            primary_pressed: Color::from_rgb(0.86, 0.56, 0.12),

            background: Color::from_rgb(0.07, 0.08, 0.10),
            surface: Color::from_rgb(0.11, 0.12, 0.15),
            surface_raised: Color::from_rgb(0.14, 0.15, 0.18),
            sidebar: Color::from_rgb(0.09, 0.10, 0.12),

            text_primary: Color::from_rgb(0.91, 0.92, 0.94),
            text_secondary: Color::from_rgb(0.66, 0.69, 0.74),
            text_muted: Color::from_rgb(0.48, 0.51, 0.56),
            text_on_primary: Color::from_rgb(0.07, 0.08, 0.10),

            success: Color::from_rgb(0.30, 0.80, 0.50),
            danger: Color::from_rgb(1.0, 0.42, 0.42),
            info: Color::from_rgb(0.40, 0.68, 1.0),

            selected: Color::from_rgb(0.22, 0.18, 0.10),
            selected_border: Color::from_rgb(1.0, 0.68, 0.20),
            hover: Color::from_rgb(0.16, 0.17, 0.20),

            border_subtle: Color::from_rgb(0.20, 0.22, 0.25),
            border_strong: Color::from_rgb(0.34, 0.36, 0.40),

            shadow: Color::from_rgba(0.0, 0.0, 0.0, 0.30),
            backdrop: Color::from_rgba(0.0, 0.0, 0.0, 0.65),
        }
    }

    /// Palette for a theme mode.
    #[must_use]
    pub const fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }
}

/// Active palette; style functions read it on every draw.
pub static CURRENT: std::sync::LazyLock<std::sync::RwLock<Palette>> =
    std::sync::LazyLock::new(|| std::sync::RwLock::new(Palette::light()));

/// Switches the active palette.
pub fn set_theme(mode: ThemeMode) {
    if let Ok(mut palette) = CURRENT.write() {
        *palette = Palette::for_mode(mode);
    }
}

/// Copy of the active palette.
#[must_use]
pub fn current() -> Palette {
    CURRENT.read().map_or_else(|_| Palette::light(), |p| *p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_mode_round_trip_names() {
        assert_eq!(ThemeMode::parse(ThemeMode::Dark.as_str()), ThemeMode::Dark);
        assert_eq!(ThemeMode::parse("LIGHT"), ThemeMode::Light);
        assert_eq!(ThemeMode::parse("sepia"), ThemeMode::Light);
    }

    #[test]
    fn test_toggled() {
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggled(), ThemeMode::Light);
    }
}
