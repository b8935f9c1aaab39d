//! Platform path resolution for configuration and data files.
//!
//! ```text
//! ~/.config/soho/config.toml       # Inbox configuration
//! ~/.local/share/soho/inbox.json   # Inbox snapshot (file backend)
//! ```

use std::path::PathBuf;

use soho_core::error::{Result, SohoError};

const APP_DIR: &str = "soho";
const CONFIG_FILENAME: &str = "config.toml";
const SNAPSHOT_FILENAME: &str = "inbox.json";

pub struct SohoPaths;

impl SohoPaths {
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| SohoError::config("Cannot determine config directory"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| SohoError::config("Cannot determine data directory"))
    }

    /// Default location of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILENAME))
    }

    /// Snapshot location: `configured` when given, else under the data dir.
    pub fn snapshot_file(configured: Option<&str>) -> Result<PathBuf> {
        match configured.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(Self::data_dir()?.join(SNAPSHOT_FILENAME)),
        }
    }
}
