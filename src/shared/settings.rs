use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::shared::error::{ConverterError, ConverterResult};

pub const DEFAULT_RATES_URL: &str = "https://open.er-api.com/v6/latest/USD";
pub const RATES_URL_ENV: &str = "CONVERTER_RATES_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "converter.ts")]
#[serde(default)]
pub struct ConverterSettings {
    pub rates_url: String,
    pub user_agent: String,
    pub default_currency_from: String,
    pub default_currency_to: String,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            rates_url: DEFAULT_RATES_URL.to_string(),
            user_agent: "the-converter/currency".to_string(),
            default_currency_from: "USD".to_string(),
            default_currency_to: "EUR".to_string(),
        }
    }
}

impl ConverterSettings {
    pub fn get_settings_path() -> ConverterResult<PathBuf> {
        ProjectDirs::from("com", "antigravity", "the-converter")
            .map(|dirs| dirs.config_dir().join("settings.json"))
            .ok_or_else(|| ConverterError::Config("Failed to determine config directory".to_string()))
    }

    /// Loads settings from the platform config directory.
    ///
    /// A missing file yields defaults; nothing is written back.
    pub async fn load() -> ConverterResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> ConverterResult<Self> {
        let settings = if fs::try_exists(path).await? {
            let content = fs::read_to_string(path)
                .await
                .map_err(|e| ConverterError::Config(format!("Failed to read settings file: {}", e)))?;
            serde_json::from_str(&content)
                .map_err(|e| ConverterError::Config(format!("Failed to parse settings: {}", e)))?
        } else {
            debug!(path = %path.display(), "settings file missing, using defaults");
            Self::default()
        };

        Ok(settings.with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(RATES_URL_ENV) {
            if url.trim().is_empty() {
                warn!("{} is set but empty; ignoring", RATES_URL_ENV);
            } else {
                self.rates_url = url.trim().to_string();
            }
        }
        self
    }
}
