use chainscreen::config::Settings;
use chainscreen::core::{header, AddressScreener, BatchScheduler, SlidingWindowLimiter};
use chainscreen::services::{read_address_list, ApiClient, CsvSink, RowSink};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Screen a list of blockchain addresses and write a CSV risk report
#[derive(Debug, Parser)]
#[command(name = "chainscreen", version)]
struct Cli {
    /// File with one address per line
    input: PathBuf,

    /// Destination CSV report
    output: PathBuf,

    /// Split every category into direct and indirect exposure columns
    #[arg(short = 'i', long = "include-indirect")]
    include_indirect: bool,
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting chainscreen...");

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // The credential check runs before any network activity
    if !settings.has_credential() {
        error!("No API credential configured (set SCREENING_API_KEY)");
        process::exit(1);
    }

    let timeout = Duration::from_secs(settings.api.timeout_secs.unwrap_or(30));
    let api = Arc::new(ApiClient::new(
        settings.api.endpoint.clone(),
        settings.api.api_key.clone(),
        timeout,
    ));

    let started = Instant::now();

    // The catalog shapes the whole report; without it there is no schema
    let categories = match api.resolve_categories().await {
        Ok(categories) => categories,
        Err(e) => {
            error!("Failed to resolve category catalog: {}", e);
            process::exit(1);
        }
    };

    info!("Resolved {} risk categories", categories.len());

    let addresses = match read_address_list(&cli.input) {
        Ok(addresses) => addresses,
        Err(e) => {
            error!("Failed to read {}: {}", cli.input.display(), e);
            process::exit(1);
        }
    };

    info!(
        "Loaded {} addresses from {}",
        addresses.len(),
        cli.input.display()
    );

    let mut sink = match CsvSink::create(&cli.output) {
        Ok(sink) => sink,
        Err(e) => {
            error!("Failed to create {}: {}", cli.output.display(), e);
            process::exit(1);
        }
    };

    if let Err(e) = sink.write_header(&header(&categories, cli.include_indirect)) {
        error!("Failed to write report header: {}", e);
        process::exit(1);
    }

    let screener = AddressScreener::new(api);
    let limiter = SlidingWindowLimiter::new(
        settings.screening.rate_limit_per_minute,
        settings.screening.max_parallelism,
    );
    let mut scheduler = BatchScheduler::new(
        screener,
        limiter,
        categories,
        settings.screening.max_parallelism,
        cli.include_indirect,
    );

    match scheduler.run(&addresses, &mut sink).await {
        Ok(summary) => {
            info!(
                "Screened {} addresses ({} failed) across {} batches in {:.1}s",
                summary.total,
                summary.failed,
                summary.batches,
                started.elapsed().as_secs_f64()
            );
        }
        Err(e) => {
            error!("Failed to write report: {}", e);
            process::exit(1);
        }
    }
}
