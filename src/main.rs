//! Finboard main entry point

use anyhow::Context;
use clap::Parser;
use finboard_api::{start_server, AppState};
use finboard_config::{Config, ConfigError, StorageBackend};
use finboard_core::{Expense, Invoice, JsonFileStore, MemoryStore, RecordEndpoint, Record, StoreRef};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "finboard")]
#[command(author = "Finboard Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Edit expense and income records of a personal finance dashboard", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the storage backend from the configuration (json or memory)
    #[arg(long)]
    storage: Option<StorageBackend>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (mut config, missing_config) = match Config::load(&args.config) {
        Ok(config) => (config, false),
        Err(ConfigError::FileNotFound { .. }) => (Config::default(), true),
        Err(e) => {
            eprintln!("{}", e.to_details());
            return Err(e.into());
        }
    };
    if let Some(backend) = args.storage {
        config.storage.backend = backend;
    }
    if let Err(e) = config.validate() {
        eprintln!("{}", e.to_details());
        return Err(e.into());
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.logging.level.as_str()))
        .init();

    if missing_config {
        log::warn!(
            "Config file not found: {}, running with defaults",
            args.config.display()
        );
    }

    let rt = Runtime::new()?;
    rt.block_on(async {
        let (expenses, income) = open_stores(&config).await?;
        let state = AppState {
            expenses: RecordEndpoint::new(expenses),
            income: RecordEndpoint::new(income),
            config,
        };
        start_server(state).await
    })
}

async fn open_stores(config: &Config) -> anyhow::Result<(StoreRef<Expense>, StoreRef<Invoice>)> {
    match config.storage.backend {
        StorageBackend::Json => {
            let expenses = open_json_store::<Expense>(&config.expenses_path()).await?;
            let income = open_json_store::<Invoice>(&config.income_path()).await?;
            Ok((expenses, income))
        }
        StorageBackend::Memory => {
            log::warn!("Using in-memory storage seeded from the record files, edits are lost on restart");
            let expenses = open_memory_store::<Expense>(&config.expenses_path()).await?;
            let income = open_memory_store::<Invoice>(&config.income_path()).await?;
            Ok((expenses, income))
        }
    }
}

async fn open_memory_store<R: Record>(path: &Path) -> anyhow::Result<StoreRef<R>> {
    let store = MemoryStore::<R>::load_snapshot(path)
        .await
        .with_context(|| format!("Failed to seed {} records from {}", R::KIND, path.display()))?;
    log::info!("Seeded {} {} records from {} (read-only)", store.len().await, R::KIND, path.display());
    Ok(Arc::new(store))
}

async fn open_json_store<R: Record>(path: &Path) -> anyhow::Result<StoreRef<R>> {
    let store = JsonFileStore::<R>::open(path)
        .await
        .with_context(|| format!("Failed to open {} store at {}", R::KIND, path.display()))?;
    log::info!("Loaded {} {} records from {}", store.len().await, R::KIND, path.display());
    Ok(Arc::new(store))
}
