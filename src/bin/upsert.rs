//! Insert or update one dictionary row read from stdin.
//!
//! ```text
//! cat temp.csv | upsert
//! ```
//!
//! The row is `en;la;defn;fr;es;it`, optionally prefixed by the row id that
//! the caller expects; the id is only used as an integrity check.

use anyhow::{Context, Result};
use clap::Parser;
use dante::db;
use dante::upsert::{id_mismatch, parse_upsert_line};
use sqlx::postgres::PgPoolOptions;
use std::io::Read;
use tracing::warn;

#[derive(Debug, Parser)]
#[command(name = "upsert", about = "Insert or update a dictionary row read from stdin")]
struct Args {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read row from stdin")?;
    let row = parse_upsert_line(&input)?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&args.database_url)
        .await
        .context("Failed to connect to database")?;

    let outcome = db::upsert_entry(&pool, &row.entry).await?;

    if let Some((expected, found)) = id_mismatch(row.expected_id, outcome) {
        warn!(expected, found, "Row id mismatch");
    }

    println!("{outcome}");
    Ok(())
}
