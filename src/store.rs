//! # Dictionary Store Module
//!
//! The authoritative source of dictionary rows. The bot reads through the
//! [`DictionaryStore`] trait so the lookup path can run against PostgreSQL in
//! production and against [`InMemoryStore`] in tests.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::postgres::PgPool;

use crate::db::{self, DictionaryEntry};

/// Read access to the dictionary rows
#[async_trait]
pub trait DictionaryStore: Send + Sync {
    /// Snapshot of every row, used once to build the lookup index
    async fn load_all(&self) -> Result<Vec<DictionaryEntry>>;

    /// Full record for one english word
    async fn fetch_entry(&self, english: &str) -> Result<Option<DictionaryEntry>>;
}

#[async_trait]
impl DictionaryStore for PgPool {
    async fn load_all(&self) -> Result<Vec<DictionaryEntry>> {
        db::fetch_all_entries(self).await
    }

    async fn fetch_entry(&self, english: &str) -> Result<Option<DictionaryEntry>> {
        db::fetch_entry_by_english(self, english).await
    }
}

/// Vec-backed store
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    entries: Vec<DictionaryEntry>,
}

impl InMemoryStore {
    pub fn new(entries: Vec<DictionaryEntry>) -> Self {
        Self { entries }
    }
}

#[async_trait]
impl DictionaryStore for InMemoryStore {
    async fn load_all(&self) -> Result<Vec<DictionaryEntry>> {
        Ok(self.entries.clone())
    }

    async fn fetch_entry(&self, english: &str) -> Result<Option<DictionaryEntry>> {
        Ok(self.entries.iter().find(|e| e.english == english).cloned())
    }
}
