//! # View State
//!
//! Everything derived from one document load, owned by a single `ViewState`.
//! A new load builds a new state that replaces the old one wholesale; nothing
//! is merged across loads.
//!
//! User input arrives as `ViewEvent`s. Filter events re-run the filter engine
//! synchronously; hover events update the tooltip. Adapters (the terminal UI,
//! the HTML export) read the state back after each event.

use log::debug;

use crate::{
    filter::{FilterEngine, Visibility},
    glossary::{GlossaryMap, extract_glossary},
    highlight::{TermMatch, TermMatcher, find_matches_in_markdown},
    models::{APPLIES_TO, Clause, FilterControl, RULE_TYPE, derive_controls},
    parsing::segment::{SegmentOptions, segment},
    render::TermContext,
};

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub segment: SegmentOptions,
    /// Extract the glossary and mark terms.
    pub glossary: bool,
    /// Controls offered on the filter surface. When empty, one control per
    /// distinct value of each of `dimensions` is derived from the clauses.
    pub controls: Vec<FilterControl>,
    pub dimensions: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            segment: SegmentOptions::default(),
            glossary: true,
            controls: Vec::new(),
            dimensions: vec![RULE_TYPE.to_string(), APPLIES_TO.to_string()],
        }
    }
}

/// Definition shown for the hovered term marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    SetChecked {
        dimension: String,
        value: String,
        checked: bool,
    },
    Toggle {
        dimension: String,
        value: String,
    },
    HoverEnter {
        term: String,
    },
    HoverLeave,
}

/// What an event changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    /// Filters were re-evaluated.
    Visibility,
    /// The tooltip changed.
    Tooltip,
    Unchanged,
}

/// A term marker inside a visible clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermMarker {
    pub clause: usize,
    pub term: TermMatch,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    clauses: Vec<Clause>,
    glossary: GlossaryMap,
    matcher: Option<TermMatcher>,
    engine: FilterEngine,
    controls: Vec<FilterControl>,
    visibility: Visibility,
    tooltip: Option<Tooltip>,
}

impl ViewState {
    /// The pre-load state: nothing to show.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Segments `raw`, extracts its glossary and runs the initial filter pass.
    pub fn load(raw: &str, options: &LoadOptions) -> Self {
        let clauses = segment(raw, &options.segment);

        let glossary = if options.glossary {
            extract_glossary(raw)
        } else {
            GlossaryMap::new()
        };
        let matcher = TermMatcher::new(&glossary);

        let controls = if options.controls.is_empty() {
            derive_controls(&clauses, &options.dimensions)
        } else {
            options.controls.clone()
        };
        let engine = FilterEngine::new(&controls);
        let visibility = engine.evaluate(&controls, &clauses);

        debug!(
            "loaded view: {} clauses, {} glossary terms, {} filter controls",
            clauses.len(),
            glossary.len(),
            controls.len()
        );

        Self {
            clauses,
            glossary,
            matcher,
            engine,
            controls,
            visibility,
            tooltip: None,
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn glossary(&self) -> &GlossaryMap {
        &self.glossary
    }

    pub fn controls(&self) -> &[FilterControl] {
        &self.controls
    }

    pub fn visibility(&self) -> &Visibility {
        &self.visibility
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Visible clauses with their indices, in document order.
    pub fn visible_clauses(&self) -> impl Iterator<Item = (usize, &Clause)> {
        self.clauses
            .iter()
            .enumerate()
            .filter(|(i, _)| self.visibility.is_visible(*i))
    }

    pub fn term_context(&self) -> Option<TermContext<'_>> {
        self.matcher.as_ref().map(|matcher| TermContext {
            matcher,
            glossary: &self.glossary,
        })
    }

    /// Term markers in the visible clauses, in document order. Spans are
    /// relative to each clause's content.
    pub fn term_markers(&self) -> Vec<TermMarker> {
        let Some(matcher) = &self.matcher else {
            return Vec::new();
        };
        self.visible_clauses()
            .flat_map(|(index, clause)| {
                find_matches_in_markdown(&clause.content, matcher)
                    .into_iter()
                    .map(move |term| TermMarker {
                        clause: index,
                        term,
                    })
            })
            .collect()
    }

    pub fn apply(&mut self, event: ViewEvent) -> ViewUpdate {
        match event {
            ViewEvent::SetChecked {
                dimension,
                value,
                checked,
            } => self.set_checked(&dimension, &value, |_| checked),
            ViewEvent::Toggle { dimension, value } => {
                self.set_checked(&dimension, &value, |current| !current)
            }
            ViewEvent::HoverEnter { term } => {
                let tooltip = self.glossary.get(&term).map(|entry| Tooltip {
                    term: entry.term.clone(),
                    definition: entry.definition.clone(),
                });
                self.replace_tooltip(tooltip)
            }
            ViewEvent::HoverLeave => self.replace_tooltip(None),
        }
    }

    fn set_checked(
        &mut self,
        dimension: &str,
        value: &str,
        next: impl Fn(bool) -> bool,
    ) -> ViewUpdate {
        // Event strings get the same normalisation as the controls themselves
        let wanted = FilterControl::new(dimension, value);
        let Some(control) = self
            .controls
            .iter_mut()
            .find(|c| c.matches(&wanted.dimension, &wanted.value))
        else {
            debug!("no filter control {dimension}={value}");
            return ViewUpdate::Unchanged;
        };
        control.checked = next(control.checked);
        self.visibility = self.engine.evaluate(&self.controls, &self.clauses);
        ViewUpdate::Visibility
    }

    fn replace_tooltip(&mut self, tooltip: Option<Tooltip>) -> ViewUpdate {
        if self.tooltip == tooltip {
            return ViewUpdate::Unchanged;
        }
        self.tooltip = tooltip;
        ViewUpdate::Tooltip
    }
}
