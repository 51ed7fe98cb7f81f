//! # Term Highlighting
//!
//! Pure text scanning for glossary terms. `TermMatcher` finds whole-word,
//! case-insensitive occurrences in a plain string; `markdown` applies it to
//! the prose of a markdown string only, skipping links, images and code.
//!
//! When several terms could match at one position the longest wins: terms
//! are ordered by descending length before the alternation is built, and the
//! regex engine prefers earlier alternatives.

pub mod markdown;

use log::warn;
use regex::Regex;

use crate::{
    glossary::{GlossaryMap, term_key},
    parsing::span::Span,
};

pub use markdown::find_matches_in_markdown;

/// One occurrence of a glossary term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMatch {
    /// Byte span of the occurrence in the scanned text.
    pub span: Span,
    /// Glossary lookup key of the matched term.
    pub key: String,
}

/// A run of text that either is or is not a term occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPiece<'t> {
    Plain(&'t str),
    Term { text: &'t str, key: String },
}

#[derive(Debug, Clone)]
pub struct TermMatcher {
    pattern: Regex,
}

impl TermMatcher {
    /// Builds a matcher for every term of `glossary`; `None` when there is
    /// nothing to match.
    pub fn new(glossary: &GlossaryMap) -> Option<Self> {
        let mut terms: Vec<&str> = glossary.keys().collect();
        if terms.is_empty() {
            return None;
        }
        terms.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        let alternation = terms
            .iter()
            .map(|t| term_pattern(t))
            .collect::<Vec<_>>()
            .join("|");

        match Regex::new(&format!("(?i)(?:{alternation})")) {
            Ok(pattern) => Some(Self { pattern }),
            Err(e) => {
                warn!("term highlighting disabled: {e}");
                None
            }
        }
    }

    pub fn find_matches(&self, text: &str) -> Vec<TermMatch> {
        self.pattern
            .find_iter(text)
            .map(|m| TermMatch {
                span: Span::new(m.start(), m.end()),
                key: term_key(m.as_str()),
            })
            .collect()
    }

    /// Splits `text` into plain runs and term occurrences, in order.
    pub fn split<'t>(&self, text: &'t str) -> Vec<TextPiece<'t>> {
        let mut out = Vec::new();
        let mut last = 0;
        for m in self.find_matches(text) {
            if m.span.start > last {
                out.push(TextPiece::Plain(&text[last..m.span.start]));
            }
            out.push(TextPiece::Term {
                text: m.span.slice(text),
                key: m.key,
            });
            last = m.span.end;
        }
        if last < text.len() {
            out.push(TextPiece::Plain(&text[last..]));
        }
        out
    }
}

/// Regex for one term. Word boundaries are only asserted at edges that are
/// word characters, so terms like `C++` still match.
fn term_pattern(term: &str) -> String {
    let body = term
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let lead = if term.chars().next().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    let trail = if term.chars().last().is_some_and(is_word_char) {
        r"\b"
    } else {
        ""
    };
    format!("{lead}{body}{trail}")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn matcher(terms: &[&str]) -> TermMatcher {
        let mut glossary = GlossaryMap::new();
        for t in terms {
            glossary.insert(t, "definition");
        }
        TermMatcher::new(&glossary).unwrap()
    }

    fn matched<'t>(m: &TermMatcher, text: &'t str) -> Vec<&'t str> {
        m.find_matches(text)
            .into_iter()
            .map(|tm| tm.span.slice(text))
            .collect()
    }

    #[test]
    fn longest_term_wins() {
        let m = matcher(&["Board", "Board Member"]);
        let matches = m.find_matches("The Board Member decided");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key, "board member");
        assert_eq!(matches[0].span, Span::new(4, 16));
    }

    #[test]
    fn shorter_term_still_matches_alone() {
        let m = matcher(&["Board", "Board Member"]);
        assert_eq!(
            matched(&m, "The Board met. A board member left."),
            vec!["Board", "board member"]
        );
    }

    #[test]
    fn whole_words_only() {
        let m = matcher(&["Board"]);
        assert!(m.find_matches("The Boardroom and onboard staff").is_empty());
    }

    #[test]
    fn case_insensitive() {
        let m = matcher(&["Quorum"]);
        assert_eq!(matched(&m, "QUORUM and quorum"), vec!["QUORUM", "quorum"]);
    }

    #[test]
    fn terms_with_punctuation_edges() {
        let m = matcher(&["C++"]);
        assert_eq!(matched(&m, "Written in C++ today"), vec!["C++"]);
    }

    #[test]
    fn multiword_terms_span_whitespace_runs() {
        let m = matcher(&["Board Member"]);
        let matches = m.find_matches("a Board\n  Member");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].key, "board member");
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let m = matcher(&["a.b"]);
        assert!(m.find_matches("axb").is_empty());
        assert_eq!(matched(&m, "see a.b here"), vec!["a.b"]);
    }

    #[test]
    fn split_interleaves_plain_and_terms() {
        let m = matcher(&["Quorum"]);
        assert_eq!(
            m.split("A quorum is needed"),
            vec![
                TextPiece::Plain("A "),
                TextPiece::Term {
                    text: "quorum",
                    key: "quorum".to_string()
                },
                TextPiece::Plain(" is needed"),
            ]
        );
    }

    #[test]
    fn empty_glossary_has_no_matcher() {
        assert!(TermMatcher::new(&GlossaryMap::new()).is_none());
    }
}
