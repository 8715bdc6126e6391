use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use nw_core::{IdentityStrategy, Result};
use nw_ingest::{
    default_sources, load_sources, IngestionReport, Ingestor, IngestorConfig,
    DEFAULT_FETCH_CONCURRENCY,
};
use nw_web::AppState;

/// Duration in a compact human form, e.g. 30m, 1h15m, 2d.
#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_unit = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                // Saturate rather than overflow on absurdly large inputs.
                let seconds = match c {
                    's' => num,
                    'm' => num.saturating_mul(60),
                    'h' => num.saturating_mul(3600),
                    'd' => num.saturating_mul(86400),
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = total_seconds.saturating_add(seconds);
                current_number.clear();
                has_unit = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A bare number means seconds
        if !current_number.is_empty() {
            match current_number.parse::<u64>() {
                Ok(num) => {
                    total_seconds = total_seconds.saturating_add(num);
                    has_unit = true;
                }
                Err(_) => return Err("Invalid number in duration".to_string()),
            }
        }

        if !has_unit {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long, default_value = "memory")]
    storage: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch every configured feed and store the articles.
    Ingest {
        /// JSON file with [{"name": ..., "url": ...}] entries. The bundled
        /// sources are used when absent.
        #[arg(long)]
        sources: Option<PathBuf>,
        /// Identity strategy for stored articles: fresh or link-hash.
        #[arg(long, default_value = "fresh")]
        identity: IdentityStrategy,
        /// How many feeds to fetch at once.
        #[arg(long, default_value_t = DEFAULT_FETCH_CONCURRENCY)]
        concurrency: usize,
        /// Run forever, ingesting at the given interval (e.g. 30m, 1h15m)
        #[arg(long)]
        interval: Option<HumanDuration>,
    },
    /// Serve the news API over HTTP.
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: SocketAddr,
    },
    /// Print the configured sources as JSON.
    Sources {
        #[arg(long)]
        sources: Option<PathBuf>,
    },
}

fn resolve_sources(path: Option<&PathBuf>) -> Result<Vec<nw_ingest::FeedSource>> {
    match path {
        Some(path) => load_sources(path),
        None => Ok(default_sources()),
    }
}

fn report_outcome(report: &IngestionReport) {
    // Per-source failures are already logged where they happen.
    if !report.is_clean() {
        tracing::warn!("⚠️ {} of this run's sources failed", report.failures.len());
    }
    println!("{}", report.status_line());
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            sources,
            identity,
            concurrency,
            interval,
        } => {
            let store = nw_storage::create_store(cli.storage.as_str()).await?;
            info!("💾 Storage initialized (using {})", cli.storage);

            let feed_sources = resolve_sources(sources.as_ref())?;
            info!(
                "📰 Ingesting {} sources with {} identity",
                feed_sources.len(),
                identity
            );

            let ingestor = Ingestor::new(
                store,
                IngestorConfig {
                    sources: feed_sources,
                    identity,
                    max_concurrent_fetches: concurrency,
                    ..IngestorConfig::default()
                },
            )?;

            match interval {
                Some(interval) => loop {
                    report_outcome(&ingestor.run().await);
                    info!("⏳ Waiting {}s before next ingestion", interval.0.as_secs());
                    tokio::time::sleep(interval.0).await;
                },
                None => report_outcome(&ingestor.run().await),
            }
        }
        Commands::Serve { addr } => {
            let store = nw_storage::create_store(cli.storage.as_str()).await?;
            info!("💾 Storage initialized (using {})", cli.storage);
            info!("🌐 Serving news API on {}", addr);
            nw_web::serve(AppState::new(store), addr).await?;
        }
        Commands::Sources { sources } => {
            let feed_sources = resolve_sources(sources.as_ref())?;
            println!("{}", serde_json::to_string_pretty(&feed_sources)?);
        }
    }

    Ok(())
}
