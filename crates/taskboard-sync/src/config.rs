/*
[INPUT]:  YAML configuration file
[OUTPUT]: Parsed client configuration
[POS]:    Configuration layer - server and timing setup
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use taskboard_adapter::{ClientConfig, DEFAULT_BASE_URL};

/// Top-level configuration for the task client
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Task API server, e.g. "http://localhost:7540"
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Quiet period before a search query is sent
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,
    /// How long notices stay visible
    #[serde(default = "default_notice_dismiss_ms")]
    pub notice_dismiss_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Where the session token is kept. Defaults to the user data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_path: Option<PathBuf>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            search_debounce_ms: default_search_debounce_ms(),
            notice_dismiss_ms: default_notice_dismiss_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            token_path: None,
        }
    }
}

fn default_server_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_notice_dismiss_ms() -> u64 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl SyncConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// `<config_dir>/taskboard/config.yaml`, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("taskboard").join("config.yaml"))
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn notice_dismiss(&self) -> Duration {
        Duration::from_millis(self.notice_dismiss_ms)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}
