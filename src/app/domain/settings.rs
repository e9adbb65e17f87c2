use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::app::infrastructure::error::AppError;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "NEXTGENEDIT_API_KEY";

pub const DEFAULT_ENDPOINT: &str = "https://textgears-textgears-v1.p.rapidapi.com/correct";
pub const DEFAULT_API_HOST: &str = "textgears-textgears-v1.p.rapidapi.com";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThemeMode {
    Light,
    Dark,
    SystemDefault,
}

/// Where and how to reach the correction service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellCheckConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_api_host")]
    pub api_host: String,

    #[serde(default)]
    pub api_key: Option<String>,

    /// Seconds before the request is abandoned; `None` keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_api_host() -> String {
    DEFAULT_API_HOST.to_string()
}

impl Default for SpellCheckConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_host: default_api_host(),
            api_key: None,
            timeout_secs: None,
        }
    }
}

impl SpellCheckConfig {
    /// The key to send, preferring the environment over the settings file.
    pub fn resolved_api_key(&self) -> Option<String> {
        Self::pick_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.clone())
    }

    fn pick_api_key(from_env: Option<String>, from_file: Option<String>) -> Option<String> {
        from_env
            .into_iter()
            .chain(from_file)
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_line_numbers")]
    pub line_numbers_enabled: bool,

    #[serde(default = "default_word_wrap")]
    pub word_wrap_enabled: bool,

    #[serde(default = "default_theme_mode")]
    pub theme_mode: ThemeMode,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default)]
    pub spell_check: SpellCheckConfig,
}

fn default_line_numbers() -> bool {
    false
}

fn default_word_wrap() -> bool {
    true
}

fn default_theme_mode() -> ThemeMode {
    ThemeMode::SystemDefault
}

fn default_font_size() -> u32 {
    16  // Medium size
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            line_numbers_enabled: default_line_numbers(),
            word_wrap_enabled: default_word_wrap(),
            theme_mode: default_theme_mode(),
            font_size: default_font_size(),
            spell_check: SpellCheckConfig::default(),
        }
    }
}

impl AppSettings {
    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        let config_path = Self::get_config_path();

        match fs::read_to_string(&config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(error = %e, path = %config_path.display(), "failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                let default = Self::default();
                if let Err(e) = default.save() {
                    tracing::warn!(error = %e, "could not write default settings");
                }
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        let config_path = Self::get_config_path();

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("nextgenedit");
        path.push("settings.json");
        path
    }
}
