use anyhow::{Context, Result};
use log::{debug, info};
use sqlx::postgres::PgPool;

/// Represents a row of the `latin` table, minus its surrogate id
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DictionaryEntry {
    #[sqlx(rename = "en")]
    pub english: String,
    #[sqlx(rename = "la")]
    pub latin: String,
    #[sqlx(rename = "defn")]
    pub definition: String,
    #[sqlx(rename = "fr")]
    pub french_equivalent: String,
    #[sqlx(rename = "es")]
    pub spanish_equivalent: String,
    #[sqlx(rename = "it")]
    pub italian_equivalent: String,
}

/// Result of writing a row through [`upsert_entry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted(i32),
    Updated(i32),
}

impl UpsertOutcome {
    pub fn id(&self) -> i32 {
        match self {
            UpsertOutcome::Inserted(id) | UpsertOutcome::Updated(id) => *id,
        }
    }
}

impl std::fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsertOutcome::Inserted(id) => write!(f, "Inserted row at {id}"),
            UpsertOutcome::Updated(id) => write!(f, "Updated row at {id}"),
        }
    }
}

/// Initialize the database schema
pub async fn init_database_schema(pool: &PgPool) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS latin (
            id SERIAL PRIMARY KEY,
            en TEXT NOT NULL UNIQUE,
            la TEXT NOT NULL DEFAULT '',
            defn TEXT NOT NULL DEFAULT '',
            fr TEXT NOT NULL DEFAULT '',
            es TEXT NOT NULL DEFAULT '',
            it TEXT NOT NULL DEFAULT ''
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create latin table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Read every dictionary row, used to build the lookup index at startup
pub async fn fetch_all_entries(pool: &PgPool) -> Result<Vec<DictionaryEntry>> {
    let entries = sqlx::query_as::<_, DictionaryEntry>(
        "SELECT en, la, defn, fr, es, it FROM latin ORDER BY en",
    )
    .fetch_all(pool)
    .await
    .context("Failed to read dictionary entries")?;

    debug!("Fetched {} dictionary entries", entries.len());
    Ok(entries)
}

/// Point fetch of a single entry by its english word
pub async fn fetch_entry_by_english(pool: &PgPool, english: &str) -> Result<Option<DictionaryEntry>> {
    sqlx::query_as::<_, DictionaryEntry>(
        "SELECT en, la, defn, fr, es, it FROM latin WHERE en = $1",
    )
    .bind(english)
    .fetch_optional(pool)
    .await
    .with_context(|| format!("Failed to fetch dictionary entry for '{english}'"))
}

/// Get the surrogate id of the row holding `english`, if any
pub async fn find_entry_id(pool: &PgPool, english: &str) -> Result<Option<i32>> {
    sqlx::query_scalar::<_, i32>("SELECT id FROM latin WHERE en = $1")
        .bind(english)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to look up id for '{english}'"))
}

/// Insert a new row and return its id
pub async fn insert_entry(pool: &PgPool, entry: &DictionaryEntry) -> Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        "INSERT INTO latin (en, la, defn, fr, es, it) VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
    )
    .bind(&entry.english)
    .bind(&entry.latin)
    .bind(&entry.definition)
    .bind(&entry.french_equivalent)
    .bind(&entry.spanish_equivalent)
    .bind(&entry.italian_equivalent)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Failed to insert dictionary entry '{}'", entry.english))?;

    Ok(id)
}

/// Overwrite every column of row `id`; returns whether a row was touched
pub async fn update_entry(pool: &PgPool, id: i32, entry: &DictionaryEntry) -> Result<bool> {
    let result = sqlx::query(
        "UPDATE latin SET en = $1, la = $2, defn = $3, fr = $4, es = $5, it = $6 WHERE id = $7",
    )
    .bind(&entry.english)
    .bind(&entry.latin)
    .bind(&entry.definition)
    .bind(&entry.french_equivalent)
    .bind(&entry.spanish_equivalent)
    .bind(&entry.italian_equivalent)
    .bind(id)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to update dictionary entry {id}"))?;

    Ok(result.rows_affected() > 0)
}

/// Insert `entry`, or update the existing row with the same english word
pub async fn upsert_entry(pool: &PgPool, entry: &DictionaryEntry) -> Result<UpsertOutcome> {
    let outcome = match find_entry_id(pool, &entry.english).await? {
        Some(id) => {
            update_entry(pool, id, entry).await?;
            UpsertOutcome::Updated(id)
        }
        None => UpsertOutcome::Inserted(insert_entry(pool, entry).await?),
    };

    info!("{} for '{}'", outcome, entry.english);
    Ok(outcome)
}
