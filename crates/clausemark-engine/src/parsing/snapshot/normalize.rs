use std::collections::BTreeMap;

use crate::models::{APPLIES_TO, Clause, RULE_TYPE};

#[derive(Debug)]
pub struct ClauseSnap {
    pub text: String,
    pub span: (usize, usize),
    pub rule_type: String,
    pub applies_to: String,
    pub extra: BTreeMap<String, String>,
}

/// Longest content prefix kept in a snapshot, in chars.
const PREVIEW_CHARS: usize = 60;

pub fn normalize(clauses: &[Clause]) -> Vec<ClauseSnap> {
    clauses
        .iter()
        .map(|c| {
            let extra = c
                .attributes
                .iter()
                .filter(|(k, _)| *k != RULE_TYPE && *k != APPLIES_TO)
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            ClauseSnap {
                text: preview(&c.content, PREVIEW_CHARS),
                span: (c.span.start, c.span.end),
                rule_type: c.rule_type().to_string(),
                applies_to: c.applies_to().to_string(),
                extra,
            }
        })
        .collect()
}

/// Truncates to `max` chars with a "..." suffix.
fn preview(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
