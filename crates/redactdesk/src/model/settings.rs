//! Console settings persisted across sessions.

use serde::{Deserialize, Serialize};

use crate::style::widgets::palette::ThemeMode;

/// Settings saved to `settings.json` next to the API config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Light or dark palette.
    #[serde(with = "theme_mode_serde")]
    pub theme_mode: ThemeMode,
}

/// `ThemeMode` lives with the styles, so it is stored by name.
mod theme_mode_serde {
    use super::ThemeMode;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)] // Required by serde with= signature
    pub fn serialize<S>(mode: &ThemeMode, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(mode.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<ThemeMode, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(ThemeMode::parse(&name))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_json() {
        let settings = AppSettings {
            theme_mode: ThemeMode::Dark,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"theme_mode":"dark"}"#);

        let parsed: AppSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_missing_theme_defaults_to_light() {
        let parsed: AppSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.theme_mode, ThemeMode::Light);
    }
}
