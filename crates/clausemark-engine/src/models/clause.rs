use std::collections::BTreeMap;

use crate::parsing::span::Span;

/// Value used for any attribute a clause does not carry.
pub const UNKNOWN: &str = "unknown";
/// Attribute naming the clause's rule category.
pub const RULE_TYPE: &str = "rule_type";
/// Attribute naming the audience a clause applies to.
pub const APPLIES_TO: &str = "applies_to";
/// Canonical `rule_type` of clauses that are never filtered out.
pub const INFORMATIONAL: &str = "informational";

/// Normalised, lower-cased attributes of a clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }

    /// Returns the value stored under `dimension`, or [`UNKNOWN`] when absent.
    pub fn get(&self, dimension: &str) -> &str {
        self.0.get(dimension).map_or(UNKNOWN, String::as_str)
    }

    pub fn contains(&self, dimension: &str) -> bool {
        self.0.contains_key(dimension)
    }

    pub fn rule_type(&self) -> &str {
        self.get(RULE_TYPE)
    }

    pub fn applies_to(&self) -> &str {
        self.get(APPLIES_TO)
    }

    /// Informational clauses are exempt from every filter.
    pub fn is_informational(&self) -> bool {
        self.rule_type() == INFORMATIONAL
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One segmented, attributed section of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Trimmed markdown content; never empty.
    pub content: String,
    /// Byte span of the source the clause was cut from.
    pub span: Span,
    pub attributes: Attributes,
}

impl Clause {
    pub fn new(content: impl Into<String>, span: Span, attributes: Attributes) -> Self {
        Self {
            content: content.into(),
            span,
            attributes,
        }
    }

    pub fn rule_type(&self) -> &str {
        self.attributes.rule_type()
    }

    pub fn applies_to(&self) -> &str {
        self.attributes.applies_to()
    }

    pub fn is_informational(&self) -> bool {
        self.attributes.is_informational()
    }
}
