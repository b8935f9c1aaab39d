use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::list::ListArgs;

#[derive(Parser)]
#[command(name = "soho")]
#[command(about = "SoHo Inbox - guest messaging decision engine", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, env = "SOHO_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List threads matching the given filters
    List(ListArgs),
    /// Run a single auto-reply pass over the inbox
    Tick,
    /// Run the auto-reply scheduler until Ctrl-C
    Run {
        /// Override the tick interval in seconds
        #[arg(long)]
        interval: Option<u64>,
    },
    /// Look up bookings for the guest of a thread
    Bookings { thread_id: String },
    /// Upgrade an inbox snapshot file to the current schema
    Migrate {
        /// Snapshot to read
        input: PathBuf,
        /// Where to write the result (defaults to stdout)
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Schema version of the input (detected when omitted)
        #[arg(long)]
        from: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::logging::init(cli.json_logs);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::List(args) => commands::list::run(config, args).await?,
        Commands::Tick => commands::tick::run(config).await?,
        Commands::Run { interval } => commands::serve::run(config, interval).await?,
        Commands::Bookings { thread_id } => commands::bookings::run(config, &thread_id).await?,
        Commands::Migrate {
            input,
            output,
            from,
        } => commands::migrate::run(&input, output.as_deref(), from.as_deref()).await?,
    }

    Ok(())
}
