use std::path::Path;

use anyhow::Result;

use super::context::open_app;

pub async fn run(config: Option<&Path>) -> Result<()> {
    let app = open_app(config).await?;
    let report = app.scheduler.engine().tick().await;

    println!("Replied:           {}", report.replied_threads);
    println!("Follow-ups:        {}", report.follow_ups);
    println!("Skipped resolved:  {}", report.skipped_resolved);
    println!("Skipped answered:  {}", report.skipped_answered);
    println!("Skipped processed: {}", report.skipped_processed);
    println!("Superseded:        {}", report.superseded);
    Ok(())
}
