//! # Query Handler Module
//!
//! Turns the candidate words of a `/q` request into a single reply: the first
//! candidate found in the [`LookupIndex`] is fetched from the dictionary store
//! and rendered with a fixed template.

use anyhow::Result;
use log::{info, warn};
use std::fmt;
use std::sync::Arc;

use crate::db::DictionaryEntry;
use crate::dictionary::LookupIndex;
use crate::store::DictionaryStore;

pub const QUERY_USAGE: &str = "Usage: /q <word>\nExample: /q foo";
pub const NO_MATCH: &str = "None";

/// Outcome of a dictionary query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// No candidate words were given
    Usage,
    /// None of the candidates is in the dictionary
    NoMatch,
    Found(DictionaryEntry),
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Usage => f.write_str(QUERY_USAGE),
            Reply::NoMatch => f.write_str(NO_MATCH),
            Reply::Found(entry) => write!(
                f,
                "Here's what I found for {},\nfrom the latin: {}, {}\nmodern equivalents:\nfr {},\nes {},\nit {}",
                entry.english,
                entry.latin,
                entry.definition,
                entry.french_equivalent,
                entry.spanish_equivalent,
                entry.italian_equivalent
            ),
        }
    }
}

/// Answers word queries from a shared, read-only index and a dictionary store
#[derive(Debug, Clone)]
pub struct QueryHandler<S> {
    index: Arc<LookupIndex>,
    store: S,
}

impl<S: DictionaryStore> QueryHandler<S> {
    pub fn new(index: Arc<LookupIndex>, store: S) -> Self {
        Self { index, store }
    }

    /// Load a snapshot from `store`, index it and wrap both in a handler
    pub async fn from_store(store: S) -> Result<Self> {
        let entries = store.load_all().await?;
        let index = LookupIndex::build(&entries);

        let empty = index.empty_letters();
        if !empty.is_empty() {
            info!("No dictionary words yet for letters: {:?}", empty);
        }

        Ok(Self::new(Arc::new(index), store))
    }

    pub fn index(&self) -> &LookupIndex {
        &self.index
    }

    /// Look up the first known word among `tokens`
    ///
    /// Storage errors are returned to the caller untouched.
    pub async fn handle<T: AsRef<str>>(&self, tokens: &[T]) -> Result<Reply> {
        if tokens.is_empty() {
            return Ok(Reply::Usage);
        }

        let Some(english) = self.index.find_first(tokens) else {
            return Ok(Reply::NoMatch);
        };

        match self.store.fetch_entry(&english).await? {
            Some(entry) => {
                info!("Query matched '{english}'");
                Ok(Reply::Found(entry))
            }
            None => {
                warn!("'{english}' is indexed but no longer in the dictionary store");
                Ok(Reply::NoMatch)
            }
        }
    }

    /// Handle a raw `<cmd> <token> [<token> ...]` message; `<cmd>` is dropped
    pub async fn handle_text(&self, text: &str) -> Result<Reply> {
        let tokens: Vec<&str> = text.split_whitespace().skip(1).collect();
        self.handle(tokens.as_slice()).await
    }
}
