//! Application Settings Model

use serde::{Deserialize, Serialize};

/// UI theme
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Application settings (singleton)
///
/// Every field defaults on deserialize so partially-written settings
/// blobs from older versions still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// 'default' or an image reference
    #[serde(default = "default_app_logo")]
    pub app_logo: String,
    #[serde(default)]
    pub theme_mode: ThemeMode,
    #[serde(default)]
    pub is_snowing: bool,
}

fn default_app_name() -> String {
    "Till".to_string()
}

fn default_app_logo() -> String {
    "default".to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            app_logo: default_app_logo(),
            theme_mode: ThemeMode::default(),
            is_snowing: false,
        }
    }
}
