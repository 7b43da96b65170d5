use crate::cleanup::RetentionPolicy;
use serde::{Deserialize, Serialize};

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,

    #[serde(default)]
    pub cleanup: CleanupConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

// ── Media server ──────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Plex server URL, e.g. `http://192.168.1.100:32400`.
    #[serde(default)]
    pub base_url: String,
    /// Plex authentication token.
    #[serde(default)]
    pub token: String,
}

// ── Telegram channel ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    /// The single allow-listed operator chat.
    #[serde(default)]
    pub chat_id: String,
}

// ── Retention policy ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    /// Keep anything watched more than this many times.
    #[serde(default = "default_max_view_count")]
    pub max_view_count: u64,
    /// When set, keep anything watched within the last N days.
    #[serde(default)]
    pub min_days_since_last_view: Option<u32>,
}

fn default_max_view_count() -> u64 {
    1
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            max_view_count: default_max_view_count(),
            min_days_since_last_view: None,
        }
    }
}

impl CleanupConfig {
    pub fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy {
            max_view_count: self.max_view_count,
            min_days_since_last_view: self.min_days_since_last_view,
        }
    }
}

// ── Storage reporting ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Total capacity the usage report is measured against, in GB.
    #[serde(default = "default_capacity_gb")]
    pub capacity_gb: f64,
}

fn default_capacity_gb() -> f64 {
    3700.0
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            capacity_gb: default_capacity_gb(),
        }
    }
}
