//! Turns the configuration file and command-line arguments into engine load
//! options. Command-line values win over the file.

use clap::ValueEnum;
use clausemark_config::{AssociationSetting, Config};
use clausemark_engine::{
    AliasTable, Association, Delimiters, FilterControl, LoadOptions, SegmentOptions, ViewEvent,
    ViewState, ViewUpdate,
};
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AssociationArg {
    /// Metadata governs the content that follows it
    Forward,
    /// Metadata governs the content that precedes it
    Backward,
    /// Documents are split on `---` lines; the first metadata block of each section governs it
    Sectioned,
}

impl From<AssociationArg> for Association {
    fn from(arg: AssociationArg) -> Self {
        match arg {
            AssociationArg::Forward => Association::Forward,
            AssociationArg::Backward => Association::Backward,
            AssociationArg::Sectioned => Association::Sectioned,
        }
    }
}

fn association_from_config(setting: AssociationSetting) -> Association {
    match setting {
        AssociationSetting::Forward => Association::Forward,
        AssociationSetting::Backward => Association::Backward,
        AssociationSetting::Sectioned => Association::Sectioned,
    }
}

/// A `dimension=value` filter to check after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub dimension: String,
    pub value: String,
}

/// Parses `dimension=value` for `--check`.
pub fn parse_check(s: &str) -> Result<Check, String> {
    let Some((dimension, value)) = s.split_once('=') else {
        return Err(format!("expected dimension=value, got '{s}'"));
    };
    let (dimension, value) = (dimension.trim(), value.trim());
    if dimension.is_empty() || value.is_empty() {
        return Err(format!("expected dimension=value, got '{s}'"));
    }
    Ok(Check {
        dimension: dimension.to_string(),
        value: value.to_string(),
    })
}

pub fn load_options(config: &Config, association: Option<AssociationArg>) -> LoadOptions {
    let mut aliases = AliasTable::default();
    for (raw, canonical) in &config.aliases {
        aliases.insert(raw, canonical);
    }

    let segment = SegmentOptions {
        association: association
            .map(Association::from)
            .unwrap_or_else(|| association_from_config(config.association)),
        delimiters: Delimiters::new(config.comment_open.clone(), config.comment_close.clone()),
        aliases,
    };

    let controls = config
        .filters
        .iter()
        .flat_map(|group| {
            group
                .values
                .iter()
                .map(|value| FilterControl::new(&group.dimension, value))
        })
        .collect();

    LoadOptions {
        segment,
        glossary: config.glossary,
        controls,
        ..LoadOptions::default()
    }
}

/// Checks each requested control; unknown ones are reported and skipped.
pub fn apply_checks(view: &mut ViewState, checks: &[Check]) {
    for check in checks {
        let update = view.apply(ViewEvent::SetChecked {
            dimension: check.dimension.clone(),
            value: check.value.clone(),
            checked: true,
        });
        if update == ViewUpdate::Unchanged {
            warn!(
                "no filter control {}={} in this document",
                check.dimension, check.value
            );
        }
    }
}
