//! Parsing of the single `;`-separated row the upsert tool reads from stdin,
//! e.g. `absent;absens;(adj) not present;absent;ausente;assente`, optionally
//! prefixed with the expected row id.

use crate::db::{DictionaryEntry, UpsertOutcome};

pub const FIELD_SEPARATOR: char = ';';

/// A dictionary row to write, with the id the caller believes it has
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertRow {
    pub expected_id: Option<i32>,
    pub entry: DictionaryEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertParseError {
    /// Neither 6 nor 7 fields
    FieldCount(usize),
    /// The leading id field is not an integer
    InvalidId(String),
    /// The english word does not start with a lowercase ascii letter
    InvalidEnglish(String),
}

impl std::fmt::Display for UpsertParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsertParseError::FieldCount(n) => {
                write!(f, "Expected 6 fields (or 7 with a leading id) separated by ';', found {n}")
            }
            UpsertParseError::InvalidId(raw) => write!(f, "Invalid row id: {raw}"),
            UpsertParseError::InvalidEnglish(word) => {
                write!(f, "English word must start with a letter in [a-z]: {word}")
            }
        }
    }
}

impl std::error::Error for UpsertParseError {}

/// Parse `[id;]en;la;defn;fr;es;it`
pub fn parse_upsert_line(line: &str) -> Result<UpsertRow, UpsertParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

    let expected_id = match fields.len() {
        6 => None,
        7 => {
            let raw = fields.remove(0).trim();
            Some(raw.parse::<i32>().map_err(|_| UpsertParseError::InvalidId(raw.to_string()))?)
        }
        n => return Err(UpsertParseError::FieldCount(n)),
    };

    let english = fields[0].trim().to_lowercase();
    if !english.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err(UpsertParseError::InvalidEnglish(english));
    }

    Ok(UpsertRow {
        expected_id,
        entry: DictionaryEntry {
            english,
            latin: fields[1].to_string(),
            definition: fields[2].to_string(),
            french_equivalent: fields[3].to_string(),
            spanish_equivalent: fields[4].to_string(),
            italian_equivalent: fields[5].trim_end().to_string(),
        },
    })
}

/// Id the caller expected and the id actually updated, when they differ
///
/// Inserts are never reported: a fresh row has no id to check against.
pub fn id_mismatch(expected_id: Option<i32>, outcome: UpsertOutcome) -> Option<(i32, i32)> {
    match (expected_id, outcome) {
        (Some(expected), UpsertOutcome::Updated(found)) if expected != found => Some((expected, found)),
        _ => None,
    }
}
