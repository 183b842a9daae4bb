mod cli;
mod config;
mod db;
mod error;
mod kafka;
mod models;
mod parser;
mod processor;
mod translate;

use anyhow::Context;
use clap::Parser;
use cli::{Args, Commands};
use config::AppConfig;
use db::{AlertStore, MemoryAlertStore, PgAlertStore};
use models::{FeedPayload, ParsedAlert, RawAdvisory, RecordKind};
use processor::{ingest_batch, Normalizer};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use translate::{build_translator, TranslationMode};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    match args.command() {
        Commands::Consume => consume(&config).await,
        Commands::Ingest { file, dry_run } => ingest(&config, &file, dry_run).await,
        Commands::Parse { file } => parse(&file).await,
        Commands::Stats => stats(&config).await,
    }
}

async fn connect_store(config: &AppConfig) -> anyhow::Result<Arc<PgAlertStore>> {
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    info!("Connected to database");
    db::ensure_schema(&pool).await?;
    Ok(Arc::new(PgAlertStore::new(pool)))
}

fn build_normalizer(config: &AppConfig, store: Arc<dyn AlertStore>) -> anyhow::Result<Normalizer> {
    let mode: TranslationMode = config.translation_mode.parse()?;
    info!(
        "Translation mode {:?} (cache {})",
        mode, config.translation_cache
    );
    Ok(Normalizer::new(
        store,
        build_translator(mode, config.translation_cache),
    ))
}

async fn read_feed(path: &Path) -> anyhow::Result<Vec<RawAdvisory>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading feed file {}", path.display()))?;
    let feed: FeedPayload = serde_json::from_slice(&bytes)
        .with_context(|| format!("decoding feed file {}", path.display()))?;
    Ok(feed.into_advisories())
}

async fn consume(config: &AppConfig) -> anyhow::Result<()> {
    info!("Starting SWPC alert ingest service (Kafka)...");
    let store = connect_store(config).await?;
    let normalizer = Arc::new(build_normalizer(config, store)?);
    kafka::start_kafka_consumer(config, normalizer).await
}

async fn ingest(config: &AppConfig, file: &Path, dry_run: bool) -> anyhow::Result<()> {
    let advisories = read_feed(file).await?;
    info!("Loaded {} advisories from {}", advisories.len(), file.display());

    let store: Arc<dyn AlertStore> = if dry_run {
        info!("Dry run: storing into memory");
        Arc::new(MemoryAlertStore::new())
    } else {
        connect_store(config).await?
    };
    let normalizer = build_normalizer(config, store)?;

    let report = ingest_batch(advisories, &normalizer, config.ingest_concurrency).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn parse(file: &Path) -> anyhow::Result<()> {
    let parsed: Vec<ParsedAlert> = read_feed(file)
        .await?
        .iter()
        .filter_map(parser::route)
        .collect();
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

async fn stats(config: &AppConfig) -> anyhow::Result<()> {
    let store = connect_store(config).await?;

    let mut total = 0;
    for kind in RecordKind::ALL {
        let count = store.count(kind).await?;
        total += count;
        println!("{:<12} {}", kind.as_str(), count);
    }
    println!("{:<12} {}", "total", total);
    let unexpired = store.count_unexpired(chrono::Utc::now()).await?;
    println!("{:<12} {}", "unexpired", unexpired);
    Ok(())
}
