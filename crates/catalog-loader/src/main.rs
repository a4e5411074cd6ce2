//! Loads the scraper's restaurant JSON into the catalog.
//!
//! Records are converted, then upserted on `slug` in batches, each batch in
//! one transaction. With `--dry-run` nothing is written.

mod transform;

use std::env;
use std::path::PathBuf;

use clap::Parser;
use database::Database;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::transform::{load_records, transform_all};

#[derive(Debug, Parser)]
#[command(name = "catalog-loader")]
#[command(about = "Load scraped restaurant data into the Tastebud catalog")]
struct Args {
    /// Scraped restaurants JSON file
    #[arg(short, long, default_value = "data/restaurants.json")]
    input: PathBuf,

    /// Transform and print sample rows without writing to the database
    #[arg(long)]
    dry_run: bool,

    /// Print progress output
    #[arg(short, long)]
    verbose: bool,

    /// Rows per upsert transaction
    #[arg(long, default_value_t = 50)]
    batch_size: usize,

    /// SQLite database URL. Falls back to SQLITE_PATH env.
    #[arg(long)]
    database: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!(input = %args.input.display(), "Loading restaurant data");
    let records = load_records(&args.input)?;
    let rows = transform_all(records)?;
    info!(count = rows.len(), "Transformed restaurants");

    if args.dry_run {
        println!("\n--- Dry run: showing first 3 of {} rows ---\n", rows.len());
        for row in rows.iter().take(3) {
            println!("{}", serde_json::to_string_pretty(row)?);
        }
        println!("\n--- {} total rows would be upserted ---", rows.len());
        return Ok(());
    }

    let database_url = args
        .database
        .or_else(|| env::var("SQLITE_PATH").ok())
        .unwrap_or_else(|| "sqlite:tastebud.db?mode=rwc".to_string());

    let db = Database::connect(&database_url).await?;
    db.migrate().await?;

    let count = database::restaurant::upsert_restaurants(db.pool(), &rows, args.batch_size).await?;
    db.close().await;

    println!("Upserted {} restaurants", count);
    Ok(())
}
