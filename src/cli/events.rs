//! Event fetching commands

use anyhow::Context;
use block_event_fetcher::{
    create_writer, CancellationToken, ConfigError, ConfigFile, EventFetcher, NetworkConfig,
    OutputFormat, RestGateway, SpinnerProgress,
};
use clap::{Args, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Subcommand)]
pub enum EventsCommands {
    /// Fetch events of one or more types over a block range
    Get(GetArgs),
}

#[derive(Args)]
pub struct GetArgs {
    /// Fully qualified event types (e.g. A.1654653399040a61.FlowToken.TokensDeposited)
    #[arg(required = true, num_args = 1..)]
    pub event_types: Vec<String>,

    /// First block height (0 = last N blocks up to the latest)
    #[arg(short, long, default_value = "0")]
    pub start: u64,

    /// Last block height (0 = latest sealed block)
    #[arg(short, long, default_value = "0")]
    pub end: u64,

    /// Number of latest blocks to fetch when no start is given
    #[arg(short, long, default_value = "10")]
    pub last: u64,

    /// Blocks per query (default from config, else 25)
    #[arg(short, long)]
    pub batch: Option<u64>,

    /// Number of concurrent workers (default from config, else 10)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Sort output by block height
    #[arg(long)]
    pub sort: bool,

    /// Abort the whole fetch after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Named network from the config file or defaults
    #[arg(short, long, default_value = "mainnet")]
    pub network: String,

    /// Access node REST URL (overrides --network)
    #[arg(long)]
    pub host: Option<String>,

    /// Output format (text, json, csv)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub async fn handle(action: &EventsCommands, config: &ConfigFile, quiet: bool) -> anyhow::Result<()> {
    match action {
        EventsCommands::Get(args) => get(args, config, quiet).await,
    }
}

async fn get(args: &GetArgs, config: &ConfigFile, quiet: bool) -> anyhow::Result<()> {
    let format: OutputFormat = args.format.parse()?;

    let mut options = config.settings.fetch_options();
    if let Some(batch) = args.batch {
        options = options.with_max_span(batch);
    }
    if let Some(workers) = args.workers {
        options = options.with_workers(workers);
    }
    if args.sort {
        options = options.sorted(true);
    }
    if let Some(secs) = args.timeout {
        options = options.with_timeout(Duration::from_secs(secs));
    }
    options.validate()?;

    let network = match &args.host {
        Some(host) => NetworkConfig::new("custom", host.as_str()),
        None => config
            .network(&args.network)
            .ok_or_else(|| ConfigError::UnknownNetwork(args.network.clone()))?,
    };

    let gateway = RestGateway::from_network(&network, config.settings.timeout_seconds)?;
    let host = gateway.host().to_string();
    let mut fetcher = EventFetcher::new(Arc::new(gateway));
    if !quiet {
        fetcher = fetcher.with_progress(SpinnerProgress::new());
    }

    let (start, end) = fetcher
        .calculate_start_end(args.start, args.end, args.last)
        .await
        .context("Failed to resolve block range")?;

    if !quiet {
        eprintln!("Fetching blocks {} to {} from {}", start, end, host);
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let started = Instant::now();
    let blocks = fetcher
        .fetch(&args.event_types, start, end, &options, cancel)
        .await?;
    let elapsed = started.elapsed();

    let mut writer = create_writer(format, args.output.as_deref())?;
    writer.write_events(&blocks)?;
    writer.finalize()?;

    if !quiet {
        let count: usize = blocks.iter().map(|b| b.events.len()).sum();
        eprintln!(
            "Fetched {} events from {} blocks in {:.2}s",
            count,
            blocks.len(),
            elapsed.as_secs_f64()
        );
    }

    Ok(())
}
