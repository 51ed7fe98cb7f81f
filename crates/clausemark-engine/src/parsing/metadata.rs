use std::collections::BTreeMap;

/// Raw key/value pairs read from one metadata block, keys and values lower-cased.
pub type Metadata = BTreeMap<String, String>;

/// Parses the inner text of a metadata block into a [`Metadata`] mapping.
///
/// Each line is split on its first colon. The key is trimmed, lower-cased and
/// has internal whitespace runs collapsed to `_`; the value is everything after
/// the colon, trimmed and lower-cased. Lines without a colon or with an empty
/// key are skipped. A repeated key keeps the last value seen.
pub fn parse_metadata(inner: &str) -> Metadata {
    let mut out = Metadata::new();
    for line in inner.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = normalize_key(key);
        if key.is_empty() {
            continue;
        }
        out.insert(key, value.trim().to_lowercase());
    }
    out
}

/// Normalises an attribute name: `" Rule  Type "` becomes `"rule_type"`.
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta(pairs: &[(&str, &str)]) -> Metadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_key_value_lines() {
        let m = parse_metadata("\nrule_type: Policy\napplies_to: Staff\n");
        assert_eq!(m, meta(&[("rule_type", "policy"), ("applies_to", "staff")]));
    }

    #[test]
    fn value_keeps_further_colons() {
        let m = parse_metadata("source: https://example.org/a:b");
        assert_eq!(m, meta(&[("source", "https://example.org/a:b")]));
    }

    #[test]
    fn skips_lines_without_colon_or_key() {
        let m = parse_metadata("just a note\n: orphan value\nrule_type: guidance");
        assert_eq!(m, meta(&[("rule_type", "guidance")]));
    }

    #[test]
    fn key_whitespace_collapses_to_underscore() {
        let m = parse_metadata("  Applies   To : Students");
        assert_eq!(m, meta(&[("applies_to", "students")]));
    }

    #[test]
    fn single_line_block() {
        let m = parse_metadata(" rule_type: always show ");
        assert_eq!(m, meta(&[("rule_type", "always show")]));
    }

    #[test]
    fn empty_input_gives_empty_mapping() {
        assert!(parse_metadata("").is_empty());
        assert!(parse_metadata("\n\n   \n").is_empty());
    }

    #[test]
    fn later_duplicate_wins() {
        let m = parse_metadata("applies_to: staff\napplies_to: students");
        assert_eq!(m, meta(&[("applies_to", "students")]));
    }
}
