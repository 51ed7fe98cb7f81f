//! # Filter Engine
//!
//! Decides clause visibility from the checked filter controls.
//!
//! 1. Informational clauses are always visible
//! 2. Every dimension with at least one checked control must match: the
//!    clause's value under that dimension (`unknown` when absent) must be one
//!    of the checked values
//! 3. Dimensions with nothing checked impose no constraint

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::models::{Attributes, Clause, FilterControl};

type ValueSets = BTreeMap<String, BTreeSet<String>>;

/// The checked values of each filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    checked: ValueSets,
}

impl Selection {
    /// Collects the checked controls, grouped by dimension.
    pub fn from_controls<'a>(controls: impl IntoIterator<Item = &'a FilterControl>) -> Self {
        let mut checked = ValueSets::new();
        for control in controls.into_iter().filter(|c| c.checked) {
            checked
                .entry(control.dimension.clone())
                .or_default()
                .insert(control.value.clone());
        }
        Self { checked }
    }

    /// True when no control is checked in any dimension.
    pub fn is_empty(&self) -> bool {
        self.checked.is_empty()
    }

    /// Dimensions the user has opted into by checking something.
    pub fn active_dimensions(&self) -> impl Iterator<Item = &str> {
        self.checked.keys().map(String::as_str)
    }

    pub fn allows(&self, dimension: &str, value: &str) -> bool {
        self.checked
            .get(dimension)
            .is_none_or(|values| values.contains(value))
    }
}

/// Per-clause visibility, in clause order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Visibility(Vec<bool>);

impl Visibility {
    /// Every one of `len` clauses visible.
    pub fn all(len: usize) -> Self {
        Self(vec![true; len])
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    pub fn visible_count(&self) -> usize {
        self.0.iter().filter(|v| **v).count()
    }

    pub fn visible_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.then_some(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Evaluates filter selections against the controls offered on the surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterEngine {
    available: ValueSets,
}

impl FilterEngine {
    /// Records every distinct `(dimension, value)` pair the surface offers.
    pub fn new<'a>(controls: impl IntoIterator<Item = &'a FilterControl>) -> Self {
        let mut available = ValueSets::new();
        for control in controls {
            available
                .entry(control.dimension.clone())
                .or_default()
                .insert(control.value.clone());
        }
        Self { available }
    }

    pub fn is_available(&self, dimension: &str, value: &str) -> bool {
        self.available
            .get(dimension)
            .is_some_and(|values| values.contains(value))
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &str> {
        self.available.keys().map(String::as_str)
    }

    /// Builds the selection from `controls`, ignoring checked controls the
    /// surface never offered.
    pub fn selection(&self, controls: &[FilterControl]) -> Selection {
        Selection::from_controls(
            controls
                .iter()
                .filter(|c| self.is_available(&c.dimension, &c.value)),
        )
    }

    pub fn is_visible(&self, selection: &Selection, attributes: &Attributes) -> bool {
        if attributes.is_informational() {
            return true;
        }
        selection
            .active_dimensions()
            .all(|dimension| selection.allows(dimension, attributes.get(dimension)))
    }

    pub fn evaluate(&self, controls: &[FilterControl], clauses: &[Clause]) -> Visibility {
        let selection = self.selection(controls);
        let visibility = Visibility(
            clauses
                .iter()
                .map(|c| self.is_visible(&selection, &c.attributes))
                .collect(),
        );
        debug!(
            "filters {:?}: {} of {} clauses visible",
            selection.checked,
            visibility.visible_count(),
            clauses.len()
        );
        visibility
    }
}
