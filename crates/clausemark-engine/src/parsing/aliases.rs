use std::collections::BTreeMap;

use crate::models::INFORMATIONAL;

/// Legacy `rule_type` tags that mean "always show this clause".
const INFORMATIONAL_ALIASES: &[&str] = &[
    "blue-grey",
    "blue grey",
    "bluegrey",
    "always show",
    "always-show",
    "always_show",
    "info",
];

/// Finite mapping from raw `rule_type` tags to their canonical category.
///
/// Applied once when a clause is built so comparisons elsewhere only ever see
/// canonical values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    aliases: BTreeMap<String, String>,
}

impl AliasTable {
    /// A table with no aliases at all.
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, raw: &str, canonical: &str) {
        self.aliases
            .insert(normalize(raw), canonical.trim().to_lowercase());
    }

    #[must_use]
    pub fn with(mut self, raw: &str, canonical: &str) -> Self {
        self.insert(raw, canonical);
        self
    }

    /// Returns the canonical form of `raw`, or `raw` itself (normalised) when no alias applies.
    pub fn resolve(&self, raw: &str) -> String {
        let key = normalize(raw);
        match self.aliases.get(&key) {
            Some(canonical) => canonical.clone(),
            None => key,
        }
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for raw in INFORMATIONAL_ALIASES {
            table.insert(raw, INFORMATIONAL);
        }
        table
    }
}

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}
