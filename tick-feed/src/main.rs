//! Operator toolkit for a file-backed tick store.
//!
//! Generates synthetic random-walk ticks, reports the stored extent, prints
//! ranges of ticks and deletes ranges of ticks.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use clap::Parser;
use log::{debug, info};
use std::sync::Arc;
use tick_core::fs::{load_registry, save_registry, PathManager};
use tick_core::store::FileStore;
use tick_core::{StoreConfig, TickStore};
use ticks::{InstrumentRegistry, TickError, TickRecord};

mod args;
mod feed;

use args::{Cli, Commands};
use feed::RandomFeed;

type FileTickStore = TickStore<FileStore, FileStore>;

#[tokio::main]
async fn main() -> Result<()> {
    tick_core::logging::init();

    let cli = Cli::parse();
    let paths = PathManager::from_args(&cli.common);
    paths.ensure_dirs()?;
    let config = StoreConfig::load(&paths)?;

    let registry_path = paths.get_data_file_path(&config.registry_file);
    let registry = Arc::new(load_registry(&registry_path)?);

    // Generation writes many rows; flush once at the end instead of per row.
    let autosave = !matches!(cli.command, Commands::Generate { .. });
    let file = FileStore::open_with(paths.get_data_file_path(&config.data_file), autosave)?;
    let store = TickStore::new(Arc::clone(&registry), file.clone(), file.clone(), &config);

    match cli.command {
        Commands::Generate {
            instruments,
            count,
            interval_secs,
            start,
        } => {
            let start = start.unwrap_or_else(Utc::now);
            generate(&store, instruments, count, start, Duration::seconds(interval_secs)).await?;
            file.flush().await?;
            save_registry(&registry, &registry_path)?;
            info!("Stored {} ticks in {}", count, file.path().display());
        }
        Commands::Extent => {
            let extent = store.extent().await?;
            match (extent.start, extent.end) {
                (Some(start), Some(end)) => println!("{} .. {}", start.to_rfc3339(), end.to_rfc3339()),
                _ => println!("store is empty"),
            }
        }
        Commands::Fetch {
            from,
            to,
            instrument,
        } => {
            print_ticks(&store, &registry, from, to, instrument.as_deref()).await?;
        }
        Commands::Delete { from, to } => {
            let removed = store.delete(from, to).await?;
            println!("deleted {} ticks", removed);
        }
    }

    Ok(())
}

async fn generate(
    store: &FileTickStore,
    instruments: usize,
    count: usize,
    start: DateTime<Utc>,
    interval: Duration,
) -> Result<()> {
    let mut rng = rand::thread_rng();
    let mut feed = RandomFeed::new(instruments, &mut rng);
    info!(
        "Generating {} ticks for {:?} from {}",
        count,
        feed.names(),
        start
    );

    let mut timestamp = start;
    for _ in 0..count {
        let quotes = feed.next_quotes(&mut rng);
        let record = TickRecord::encode(store.registry(), quotes, timestamp);
        store.save(&record).await?;
        timestamp += interval;
    }
    Ok(())
}

async fn print_ticks(
    store: &FileTickStore,
    registry: &InstrumentRegistry,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    instrument: Option<&str>,
) -> Result<()> {
    if let Some(name) = instrument {
        if registry.get(name).is_none() {
            anyhow::bail!("unknown instrument: {}", name);
        }
    }

    for record in store.fetch(from, to).await? {
        let timestamp = record.timestamp().to_rfc3339();
        match instrument {
            Some(name) => match record.decode(registry, name) {
                Ok(quote) => println!(
                    "{} {} {} {} {} {}",
                    timestamp, name, quote.bid, quote.ask, quote.buy_swap, quote.sell_swap
                ),
                Err(TickError::InvalidArgument(reason)) => debug!("Skipping {}: {}", timestamp, reason),
                Err(err) => return Err(err.into()),
            },
            None => {
                for (name, quote) in record.iter(registry) {
                    println!(
                        "{} {} {} {} {} {}",
                        timestamp, name, quote.bid, quote.ask, quote.buy_swap, quote.sell_swap
                    );
                }
            }
        }
    }
    Ok(())
}
