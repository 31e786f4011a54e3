use anyhow::Result;
use clap::Parser;
use tracing::{debug, warn};

use lottery_bootstrap::{logging, run, AppContext, Command};
use lottery_infrastructure::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "lottery-stats")]
#[command(about = "Lottery draw history sync and statistics", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Print counters in Prometheus text format when done
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => AppConfig::load_from(path).await?,
        None => AppConfig::load().await?,
    };
    let _log_guard = logging::init(config.log_dir.as_deref());
    match &config.source {
        Some(path) => debug!(path = %path, ?config, "config loaded"),
        None => warn!("config file not found, using defaults"),
    }

    let context = AppContext::new(config).await?;
    run(&context, args.command).await?;

    if args.metrics {
        print!("{}", context.state.metrics.render_prometheus());
    }
    Ok(())
}
