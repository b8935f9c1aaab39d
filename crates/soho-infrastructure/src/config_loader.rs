//! Loads [`InboxConfig`] from TOML.

use std::path::Path;
use tokio::fs;
use tracing::debug;

use soho_core::config::{API_BASE_ENV, InboxConfig};
use soho_core::error::{Result, SohoError};

use crate::paths::SohoPaths;

/// Reads the configuration at `path`; a missing file yields the defaults.
pub async fn load_config(path: &Path) -> Result<InboxConfig> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(InboxConfig::default());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| SohoError::io(format!("Failed to read config file: {}", e)))?;
    parse_config(&content)
}

/// Reads the configuration from the default location.
pub async fn load_default_config() -> Result<InboxConfig> {
    load_config(&SohoPaths::config_file()?).await
}

pub fn parse_config(content: &str) -> Result<InboxConfig> {
    toml::from_str(content).map_err(|e| SohoError::config(format!("Invalid config: {}", e)))
}

/// Reads the API base override from the environment.
pub fn api_base_from_env() -> Option<String> {
    std::env::var(API_BASE_ENV).ok()
}
