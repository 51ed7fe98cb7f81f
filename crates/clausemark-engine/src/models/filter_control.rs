use std::collections::BTreeSet;

use super::clause::{Clause, UNKNOWN};

/// A single checkbox on the filter surface.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FilterControl {
    /// The attribute this control filters on, e.g. `applies_to`.
    pub dimension: String,
    pub value: String,
    pub checked: bool,
}

impl FilterControl {
    /// Creates an unchecked control. Dimension and value are lower-cased to
    /// match clause attributes.
    pub fn new(dimension: &str, value: &str) -> Self {
        Self {
            dimension: crate::parsing::metadata::normalize_key(dimension),
            value: value.trim().to_lowercase(),
            checked: false,
        }
    }

    #[must_use]
    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn matches(&self, dimension: &str, value: &str) -> bool {
        self.dimension == dimension && self.value == value
    }
}

/// Builds one unchecked control per distinct value found under each of
/// `dimensions`, in dimension order then sorted value order.
///
/// `unknown` is offered whenever at least one clause lacks the dimension.
pub fn derive_controls(clauses: &[Clause], dimensions: &[String]) -> Vec<FilterControl> {
    let mut out = Vec::new();
    for dimension in dimensions {
        let values: BTreeSet<&str> = clauses
            .iter()
            .filter(|c| !c.is_informational())
            .map(|c| c.attributes.get(dimension))
            .collect();
        out.extend(values.into_iter().map(|v| FilterControl::new(dimension, v)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attributes, INFORMATIONAL, RULE_TYPE};
    use crate::parsing::span::Span;
    use pretty_assertions::assert_eq;

    fn clause(pairs: &[(&str, &str)]) -> Clause {
        let attrs: Attributes = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Clause::new("body", Span::default(), attrs)
    }

    #[test]
    fn new_normalises_case() {
        let control = FilterControl::new("Applies To", " Staff ");
        assert_eq!(control.dimension, "applies_to");
        assert_eq!(control.value, "staff");
        assert!(!control.checked);
    }

    #[test]
    fn derives_distinct_sorted_values() {
        let clauses = vec![
            clause(&[("applies_to", "students")]),
            clause(&[("applies_to", "staff")]),
            clause(&[("applies_to", "staff")]),
            clause(&[]),
        ];
        let controls = derive_controls(&clauses, &["applies_to".to_string()]);
        let values: Vec<_> = controls.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["staff", "students", UNKNOWN]);
    }

    #[test]
    fn informational_clauses_do_not_contribute_values() {
        let clauses = vec![
            clause(&[(RULE_TYPE, INFORMATIONAL)]),
            clause(&[(RULE_TYPE, "policy")]),
        ];
        let controls = derive_controls(&clauses, &[RULE_TYPE.to_string()]);
        assert_eq!(controls, vec![FilterControl::new(RULE_TYPE, "policy")]);
    }
}
