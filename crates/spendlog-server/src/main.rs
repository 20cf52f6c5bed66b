//! HTTP service entry point for spendlog.

mod error;
mod export;
mod handlers;
mod server;
mod store;

use std::path::PathBuf;

use clap::Parser;
use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use spendlog_core::SpendlogConfig;

/// Expense tracking service - capture transactions from forms or receipts
#[derive(Parser)]
#[command(name = "spendlog")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenv().ok();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &cli.config {
        Some(path) => SpendlogConfig::from_file(path)?,
        None => SpendlogConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.server.database_url = url;
    }

    std::fs::create_dir_all(&config.server.upload_dir)?;

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.server.database_url)
        .await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    server::run_server(pool, config).await
}
