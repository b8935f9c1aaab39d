use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use soho_application::{Collaborators, InboxApp, build_repository};
use soho_core::clock::SystemClock;
use soho_core::config::InboxConfig;
use soho_infrastructure::TracingNotifier;
use soho_infrastructure::config_loader::{api_base_from_env, load_config, load_default_config};

/// Reads `path`, or the default config file when none is given.
pub async fn read_config(path: Option<&Path>) -> Result<InboxConfig> {
    let config = match path {
        Some(path) => load_config(path)
            .await
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => load_default_config()
            .await
            .context("Failed to load default config")?,
    };
    Ok(config)
}

/// Wires the inbox against the configured backend.
pub async fn build_app(config: &InboxConfig) -> Result<InboxApp> {
    let repository = build_repository(&config.storage, api_base_from_env())
        .context("Failed to set up storage")?;
    let collaborators = Collaborators::new(repository, Arc::new(SystemClock), Arc::new(TracingNotifier));
    Ok(InboxApp::build(config, collaborators).await)
}

/// Builds the inbox for a one-shot command; the scheduler stays off.
pub async fn open_app(path: Option<&Path>) -> Result<InboxApp> {
    let mut config = read_config(path).await?;
    config.auto_reply.start_enabled = false;
    build_app(&config).await
}
