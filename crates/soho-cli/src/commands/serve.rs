use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use soho_application::ReplyMode;

use super::context::{build_app, read_config};

pub async fn run(config: Option<&Path>, interval: Option<u64>) -> Result<()> {
    let mut config = read_config(config).await?;
    if let Some(secs) = interval {
        config.auto_reply.interval_secs = secs;
    }
    config.auto_reply.start_enabled = false;

    let app = build_app(&config).await?;
    app.scheduler.set_mode(ReplyMode::Auto).await;
    info!(
        interval_secs = config.auto_reply.interval_secs,
        "Auto mode on, press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;

    app.shutdown().await;
    info!("Auto mode off");
    Ok(())
}
