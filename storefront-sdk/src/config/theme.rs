//! Theme section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeSettings {
    pub primary_color: String,
    pub secondary_color: String,
    pub dark_mode: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            primary_color: "#ffd60a".to_string(),
            secondary_color: "#003566".to_string(),
            dark_mode: false,
        }
    }
}

/// Partial theme change. Absent fields keep their current value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

impl ThemeSettings {
    /// Return a new theme with `patch` applied over `self`.
    pub fn merged(&self, patch: ThemePatch) -> ThemeSettings {
        ThemeSettings {
            primary_color: patch
                .primary_color
                .unwrap_or_else(|| self.primary_color.clone()),
            secondary_color: patch
                .secondary_color
                .unwrap_or_else(|| self.secondary_color.clone()),
            dark_mode: patch.dark_mode.unwrap_or(self.dark_mode),
        }
    }
}
