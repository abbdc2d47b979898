//! # Dictionary Index Module
//!
//! In-memory lookup index over the english words of the dictionary store.
//! Words are partitioned into 26 buckets by their first letter; the index is
//! built once from a store snapshot and never mutated afterwards.

use log::{debug, info, warn};

use crate::db::DictionaryEntry;

const LETTERS: usize = 26;

/// Letter-partitioned set of english words
#[derive(Debug, Clone, Default)]
pub struct LookupIndex {
    buckets: [Vec<String>; LETTERS],
    len: usize,
}

/// Returns true when `token` is non-empty and made of alphabetic characters only
pub fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// Bucket slot for a word, `None` unless it starts with `a..=z`
fn bucket_of(word: &str) -> Option<usize> {
    match word.as_bytes().first() {
        Some(b @ b'a'..=b'z') => Some((b - b'a') as usize),
        _ => None,
    }
}

impl LookupIndex {
    /// Build the index from a snapshot of dictionary entries
    ///
    /// Entries whose english word does not start with a lowercase ascii letter,
    /// words a query can never reach (uppercase or non-alphabetic characters),
    /// and repeated words are skipped with a warning.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dante::db::DictionaryEntry;
    /// use dante::dictionary::LookupIndex;
    ///
    /// let entry = DictionaryEntry {
    ///     english: "absent".to_string(),
    ///     latin: "absens".to_string(),
    ///     definition: "(adj) not present".to_string(),
    ///     french_equivalent: "absent".to_string(),
    ///     spanish_equivalent: "ausente".to_string(),
    ///     italian_equivalent: "assente".to_string(),
    /// };
    /// let index = LookupIndex::build(&[entry]);
    /// assert_eq!(index.find_first(["xyz123", "Absent"]), Some("absent".to_string()));
    /// ```
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = &'a DictionaryEntry>,
    {
        let mut index = Self::default();
        let mut skipped = 0_usize;

        for entry in entries {
            let word = entry.english.as_str();
            let Some(slot) = bucket_of(word) else {
                warn!("Skipping dictionary entry '{word}': first character is not in [a-z]");
                skipped += 1;
                continue;
            };

            // Queries are lowercased and must pass `is_word`
            if !is_word(word) || word.chars().any(char::is_uppercase) {
                warn!("Skipping dictionary entry '{word}': not a lowercase alphabetic word, unreachable by queries");
                skipped += 1;
                continue;
            }

            let bucket = &mut index.buckets[slot];
            if bucket.iter().any(|w| w == word) {
                warn!("Skipping duplicate dictionary entry '{word}'");
                skipped += 1;
                continue;
            }
            bucket.push(word.to_string());
            index.len += 1;
        }

        info!("Loaded {} dictionary entries ({} skipped)", index.len, skipped);
        index
    }

    /// Exact membership check for an already lowercased word
    pub fn contains(&self, word: &str) -> bool {
        bucket_of(word)
            .map(|slot| self.buckets[slot].iter().any(|w| w == word))
            .unwrap_or(false)
    }

    /// Return the first candidate, lowercased, that is a word present in the index
    ///
    /// Candidates are tried in order and the search stops at the first hit;
    /// tokens that are not alphabetic are skipped.
    pub fn find_first<I, S>(&self, candidates: I) -> Option<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for candidate in candidates {
            let word = candidate.as_ref().to_lowercase();
            if !is_word(&word) {
                debug!("Ignoring non-word candidate '{}'", candidate.as_ref());
                continue;
            }
            if self.contains(&word) {
                return Some(word);
            }
        }
        None
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Letters with no dictionary words yet
    pub fn empty_letters(&self) -> Vec<char> {
        self.buckets
            .iter()
            .enumerate()
            .filter(|(_, bucket)| bucket.is_empty())
            .map(|(i, _)| (b'a' + i as u8) as char)
            .collect()
    }
}
