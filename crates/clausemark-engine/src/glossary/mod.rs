//! # Glossary Extraction
//!
//! Builds a term → definition map from the raw document. Two sources are
//! merged; the first entry found for a term wins:
//!
//! 1. **`reference`**: `[Term]: definition` lines anywhere in the document
//! 2. **`section`**: bold-term bullets and two-column table rows under a
//!    `Definitions` or `Glossary` heading

pub mod reference;
pub mod section;

use std::collections::BTreeMap;

use log::debug;

/// A glossary term as written in the document and its definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub term: String,
    pub definition: String,
}

/// Lookup table keyed by normalised (lower-cased, whitespace-collapsed) term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlossaryMap {
    entries: BTreeMap<String, GlossaryEntry>,
}

impl GlossaryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry unless the term is already present or the row is not a
    /// usable definition. Returns whether the entry was added.
    pub fn insert(&mut self, term: &str, definition: &str) -> bool {
        let term = term.split_whitespace().collect::<Vec<_>>().join(" ");
        let definition = definition.trim();
        if !is_meaningful(&term) || definition.is_empty() {
            return false;
        }
        let key = term_key(&term);
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(
            key,
            GlossaryEntry {
                term,
                definition: definition.to_string(),
            },
        );
        true
    }

    /// Looks a term up case-insensitively.
    pub fn get(&self, term: &str) -> Option<&GlossaryEntry> {
        self.entries.get(&term_key(term))
    }

    /// Normalised lookup keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &GlossaryEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Normalises a term for lookup: lower-cased with whitespace runs collapsed.
pub fn term_key(term: &str) -> String {
    term.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Rejects blank and punctuation-only terms.
fn is_meaningful(term: &str) -> bool {
    term.chars().any(char::is_alphanumeric)
}

/// Extracts the glossary of `raw`. Reference-style lines take precedence over
/// section entries.
pub fn extract_glossary(raw: &str) -> GlossaryMap {
    let mut map = GlossaryMap::new();
    let from_references = reference::scan(raw, &mut map);
    let from_sections = section::scan(raw, &mut map);
    debug!(
        "glossary: {} terms ({from_references} reference-style, {from_sections} from sections)",
        map.len()
    );
    map
}
