use std::path::Path;

use anyhow::Result;
use clap::Args;

use soho_core::clock::{Clock, SystemClock};
use soho_core::datetime::format_relative_time;
use soho_core::filter::{FilterCriteria, SlaFilter, View};
use soho_core::thread::{CustomerType, Platform, Sentiment};

use super::context::open_app;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Show resolved threads instead of the inbox
    #[arg(long)]
    pub archive: bool,
    /// positive | neutral | negative
    #[arg(long)]
    pub sentiment: Option<Sentiment>,
    /// facebook | instagram | x | google | tripadvisor
    #[arg(long)]
    pub platform: Option<Platform>,
    /// Guest location, matched ignoring case
    #[arg(long)]
    pub location: Option<String>,
    /// regular | member | vip
    #[arg(long)]
    pub customer_type: Option<CustomerType>,
    /// Exact property name
    #[arg(long)]
    pub hotel: Option<String>,
    /// all | delayed | on_time
    #[arg(long, default_value = "all")]
    pub sla: SlaFilter,
    /// Free text searched in titles, messages and tags
    #[arg(long, short, default_value = "")]
    pub query: String,
    /// Print the matching threads as JSON
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            view: if self.archive { View::Archive } else { View::Inbox },
            sentiment: self.sentiment,
            platform: self.platform,
            location: self.location.clone(),
            customer_type: self.customer_type,
            hotel: self.hotel.clone(),
            sla: self.sla,
            query: self.query.clone(),
        }
    }
}

pub async fn run(config: Option<&Path>, args: ListArgs) -> Result<()> {
    let app = open_app(config).await?;
    let threads = app.inbox.list_threads(&args.criteria()).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&threads)?);
        return Ok(());
    }

    let now = SystemClock.now();
    for thread in &threads {
        let delayed = if app.inbox.is_delayed(&thread.id).await { "DELAYED" } else { "" };
        println!(
            "{:<4} {:<11} {:<8} {:<8} {:<7} {:<10} {} ({})",
            thread.id,
            thread.platform,
            thread.status,
            thread.ai.sentiment,
            delayed,
            thread.guest_name().unwrap_or("-"),
            thread.title,
            format_relative_time(thread.display_timestamp(), now),
        );
    }
    println!("{} thread(s)", threads.len());
    Ok(())
}
