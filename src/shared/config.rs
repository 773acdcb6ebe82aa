use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::features::form::DEFAULT_MAX_CHARS;
use crate::translation::catalog::{self, AUTO_DETECT, DEFAULT_TARGET};
use crate::translation::client::DEFAULT_API_URL;

/// Environment variable overriding the translation endpoint
pub const API_URL_ENV: &str = "QUICK_TRANSLATE_API_URL";

/// Upper bound accepted for `max_chars`
const MAX_CHARS_LIMIT: usize = 5000;

/// Theme options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    Ocean,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Translation endpoint (MyMemory-compatible GET API)
    pub api_url: String,
    /// Request timeout in seconds (minimum 1, default 15)
    pub request_timeout_secs: u64,
    /// Source text cap in characters (default 500)
    pub max_chars: usize,
    /// Source language selected on startup
    pub default_source_lang: String,
    /// Target language selected on startup
    pub default_target_lang: String,
    /// Theme mode selection
    pub theme_mode: ThemeMode,
    /// Show help overlay
    pub show_help: bool,
    /// Endpoint from the environment; used for this session only, never saved
    #[serde(skip)]
    pub api_url_override: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: 15,
            max_chars: DEFAULT_MAX_CHARS,
            default_source_lang: AUTO_DETECT.to_string(),
            default_target_lang: DEFAULT_TARGET.to_string(),
            theme_mode: ThemeMode::default(),
            show_help: false,
            api_url_override: None,
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if not found
    pub fn load() -> Result<Self> {
        let override_url = std::env::var(API_URL_ENV).ok();
        Self::load_from(&Self::config_path()?, override_url)
    }

    fn load_from(config_path: &Path, override_url: Option<String>) -> Result<Self> {
        let mut config = if config_path.exists() {
            let content = fs::read_to_string(config_path)?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Replacing unreadable config {}: {e}", config_path.display());
                let default_config = Config::default();
                let _ = default_config.save_to(config_path);
                default_config
            })
        } else {
            let default_config = Config::default();
            let _ = default_config.save_to(config_path);
            default_config
        };

        if let Some(url) = override_url.filter(|url| !url.trim().is_empty()) {
            info!("Using translation endpoint from {API_URL_ENV}");
            config.api_url_override = Some(url);
        }

        Ok(config.sanitized())
    }

    /// Endpoint to call: the environment override if set, else `api_url`
    pub fn endpoint(&self) -> &str {
        self.api_url_override.as_deref().unwrap_or(&self.api_url)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;

        // Use XDG config directory standard or fallback to ~/.config
        let config_dir = if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            PathBuf::from(xdg_config)
        } else {
            home_dir.join(".config")
        };

        Ok(config_dir.join("quick-translate").join("config.json"))
    }

    /// Clamp out-of-range values back to something usable
    fn sanitized(mut self) -> Self {
        self.max_chars = self.max_chars.clamp(1, MAX_CHARS_LIMIT);
        self.request_timeout_secs = self.request_timeout_secs.max(1);

        if !catalog::is_known(&self.default_source_lang) {
            self.default_source_lang = AUTO_DETECT.to_string();
        }
        // `auto` can never be a target
        if self.default_target_lang == AUTO_DETECT || !catalog::is_known(&self.default_target_lang)
        {
            self.default_target_lang = DEFAULT_TARGET.to_string();
        }
        self
    }

    /// Request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Advance to the next theme
    pub fn cycle_theme(&mut self) {
        self.theme_mode = match self.theme_mode {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Ocean,
            ThemeMode::Ocean => ThemeMode::Dark,
        };
    }

    /// Toggle help overlay
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Get theme display string
    pub fn theme_display(&self) -> &str {
        match self.theme_mode {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
            ThemeMode::Ocean => "Ocean",
        }
    }
}
