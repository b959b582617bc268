//! CLI entry point for the commute briefing.
//!
//! Provides subcommands for listing upcoming BART trips, printing service
//! alerts, and rendering the full daily briefing.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commute_briefing::{
    alerts::alerts_or_unavailable,
    briefing::Briefing,
    clock::now_in,
    config::{BriefingConfig, StationPair},
    fetch::{BasicClient, FeedFetcher},
    matcher::TripMatcher,
    output::{append_trips, print_json, print_pretty, render_briefing, trip_lines},
};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "commute_briefing")]
#[command(about = "A daily commute briefing built from BART real-time feeds", long_about = None)]
struct Cli {
    /// JSON config file; built-in defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Only match trips that reach the destination after the departure stop
    #[arg(long, global = true, default_value_t = false)]
    strict_direction: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List upcoming trips for the configured (or given) station pair
    Trips {
        /// Departure station code, e.g. DALY
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// Destination station code, e.g. 12TH
        #[arg(long, requires = "from")]
        to: Option<String>,

        /// CSV file to append matched trips to
        #[arg(short, long)]
        output: Option<String>,

        /// Log trips as JSON instead of text lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print current service alerts
    Alerts,
    /// Render the full daily briefing
    Briefing,
}

/// Installs a colored stderr layer (`RUST_LOG`, default info) and a JSON
/// layer on a daily-rolled file (`RUST_LOG_JSON`, default debug).
///
/// The returned guard flushes the file writer when dropped.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/commute_briefing.log".to_string());
    let log_path = Path::new(&log_file_path);
    let log_dir = log_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_path
        .file_name()
        .unwrap_or(OsStr::new("commute_briefing.log"));

    let (file_writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, log_file_name));

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(file_writer)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let _log_guard = init_tracing()?;

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BriefingConfig::load(path)
            .with_context(|| format!("Failed to load config from {path}"))?,
        None => BriefingConfig::default(),
    }
    .with_strict_direction(cli.strict_direction);
    config.validate()?;

    let client = BasicClient::new();

    match cli.command.unwrap_or(Commands::Briefing) {
        Commands::Trips {
            from,
            to,
            output,
            json,
        } => {
            let pairs = match (from, to) {
                (Some(from), Some(to)) => vec![StationPair {
                    departure: from,
                    destination: to,
                    label: None,
                }],
                _ => config.station_pairs.clone(),
            };

            let fetcher = FeedFetcher::new(client, &config.feeds);
            let matcher = TripMatcher::from_config(&config)?;
            let feed = fetcher
                .fetch_trip_updates()
                .await
                .context("Trip-update feed unavailable")?;
            let now = now_in(matcher.tz());

            for (pair, trips) in matcher.itineraries(&feed, &pairs, &now) {
                info!(pair = %pair.display_name(), trips = trips.len(), "Upcoming trips");
                print_pretty(&trips);

                if json {
                    print_json(&trips)?;
                } else {
                    println!("{}", pair.display_name());
                    for line in trip_lines(&trips) {
                        println!("  {line}");
                    }
                }

                if let Some(path) = &output {
                    append_trips(path, &trips)?;
                }
            }
        }
        Commands::Alerts => {
            let fetcher = FeedFetcher::new(client, &config.feeds);
            let result = fetcher.fetch_alerts().await;
            for line in alerts_or_unavailable(&result, config.alert_keyword.as_deref()) {
                println!("{line}");
            }
        }
        Commands::Briefing => {
            let briefing = Briefing::gather(&config, client).await?;
            print!("{}", render_briefing(&briefing)?);
        }
    }

    Ok(())
}
