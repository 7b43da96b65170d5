pub mod schema;

pub use schema::{CatalogConfig, CleanupConfig, Config, StorageConfig, TelegramConfig};

use crate::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "mediasweep.toml";

impl Config {
    /// Default config file location under the platform config dir.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mediasweep").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load the config file (explicit path wins over the default
    /// location; a missing file is not an error), then apply environment
    /// overrides so secrets can stay out of the file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut config = match path {
            Some(ref p) if p.exists() => {
                let raw = std::fs::read_to_string(p)?;
                toml::from_str(&raw)
                    .map_err(|e| ConfigError::Load(format!("{}: {e}", p.display())))?
            }
            _ => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Environment overrides, same names the original deployment used.
    fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PLEX_URL") {
            self.catalog.base_url = v;
        }
        if let Some(v) = lookup("PLEX_TOKEN") {
            self.catalog.token = v;
        }
        if let Some(v) = lookup("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = v;
        }
        if let Some(v) = lookup("TELEGRAM_CHAT_ID") {
            self.telegram.chat_id = v;
        }
        if let Some(v) = lookup("MAX_VIEWS") {
            match v.parse() {
                Ok(n) => self.cleanup.max_view_count = n,
                Err(_) => tracing::warn!(value = %v, "ignoring non-numeric MAX_VIEWS"),
            }
        }
        if let Some(v) = lookup("DAYS_NOT_WATCHED") {
            match v.parse() {
                Ok(n) => self.cleanup.min_days_since_last_view = Some(n),
                Err(_) => tracing::warn!(value = %v, "ignoring non-numeric DAYS_NOT_WATCHED"),
            }
        }
    }

    /// Everything the read-only CLI paths need.
    pub fn validate_catalog(&self) -> Result<(), ConfigError> {
        if self.catalog.base_url.is_empty() {
            return Err(ConfigError::Validation(
                "catalog.base_url is required (or set PLEX_URL)".into(),
            ));
        }
        if self.catalog.token.is_empty() {
            return Err(ConfigError::Validation(
                "catalog.token is required (or set PLEX_TOKEN)".into(),
            ));
        }
        Ok(())
    }

    /// Everything the bot needs on top of the catalog.
    pub fn validate_bot(&self) -> Result<(), ConfigError> {
        self.validate_catalog()?;
        if self.telegram.bot_token.is_empty() {
            return Err(ConfigError::Validation(
                "telegram.bot_token is required (or set TELEGRAM_BOT_TOKEN)".into(),
            ));
        }
        if self.telegram.chat_id.is_empty() {
            return Err(ConfigError::Validation(
                "telegram.chat_id is required (or set TELEGRAM_CHAT_ID)".into(),
            ));
        }
        Ok(())
    }
}
