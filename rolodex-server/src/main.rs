use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rolodex::ingest::{self, IngestConfig};
use rolodex::EngineClient;
use rolodex_http::serve;

#[derive(Parser)]
#[command(name = "rolodex")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[arg(long, env = "ELASTICSEARCH_URL", default_value = "http://localhost:9200")]
    engine_url: String,
    #[arg(long, env = "ROLODEX_BIND_ADDR", default_value = "0.0.0.0:8000")]
    bind_addr: String,
}

#[derive(Subcommand)]
enum Command {
    /// Recreate both collections and bulk-load companies from a CSV
    /// (falls back to the built-in sample dataset). Destructive.
    Ingest {
        /// Path to the companies CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long, default_value_t = ingest::DEFAULT_BATCH_SIZE)]
        batch_size: usize,
    },
}

async fn run_ingest(
    engine_url: &str,
    csv: Option<PathBuf>,
    batch_size: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let engine = EngineClient::new(engine_url);
    if !engine.ping().await {
        return Err(format!("could not reach search engine at {}", engine_url).into());
    }

    let config = IngestConfig {
        csv_path: csv,
        batch_size,
    };
    let report = ingest::run(&engine, &config).await?;
    tracing::info!(
        records = report.records,
        batches = report.batches,
        tags_seeded = report.tags_seeded,
        "Pipeline finished"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Ingest { csv, batch_size }) => {
            run_ingest(&cli.engine_url, csv, batch_size).await
        }
        None => {
            std::env::set_var("ELASTICSEARCH_URL", &cli.engine_url);
            std::env::set_var("ROLODEX_BIND_ADDR", &cli.bind_addr);
            serve().await
        }
    }
}
