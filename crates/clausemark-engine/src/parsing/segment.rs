use log::debug;

use crate::models::{APPLIES_TO, Attributes, Clause, RULE_TYPE, UNKNOWN};

use super::{
    aliases::AliasTable,
    blocks::{Delimiters, MetadataBlock, locate_blocks},
    metadata::{Metadata, parse_metadata},
    span::Span,
};

/// Which content span a metadata block governs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Association {
    /// A block applies to the content up to the next block. Text before the
    /// first block becomes an untagged leading clause.
    #[default]
    Forward,
    /// A block applies to the content since the previous block. Text after the
    /// last block becomes an untagged trailing clause.
    Backward,
    /// The document is split on thematic-break lines (`---`); the first block
    /// inside a section governs the whole section.
    Sectioned,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentOptions {
    pub association: Association,
    pub delimiters: Delimiters,
    pub aliases: AliasTable,
}

impl SegmentOptions {
    #[must_use]
    pub fn with_association(mut self, association: Association) -> Self {
        self.association = association;
        self
    }
}

/// Splits `raw` into clauses, in document order.
///
/// Spans that are empty after trimming are dropped, so every returned clause
/// has non-empty content.
pub fn segment(raw: &str, options: &SegmentOptions) -> Vec<Clause> {
    let blocks = locate_blocks(raw, &options.delimiters);
    let mut out = Vec::new();
    match options.association {
        Association::Forward => segment_forward(raw, &blocks, &options.aliases, &mut out),
        Association::Backward => segment_backward(raw, &blocks, &options.aliases, &mut out),
        Association::Sectioned => segment_sectioned(raw, &blocks, &options.aliases, &mut out),
    }
    debug!(
        "segmented {} bytes: {} metadata blocks, {} clauses ({:?})",
        raw.len(),
        blocks.len(),
        out.len(),
        options.association
    );
    out
}

fn segment_forward(
    raw: &str,
    blocks: &[MetadataBlock],
    aliases: &AliasTable,
    out: &mut Vec<Clause>,
) {
    let first = blocks.first().map_or(raw.len(), |b| b.full.start);
    push_span(raw, Span::new(0, first), Metadata::new(), aliases, out);

    for (i, block) in blocks.iter().enumerate() {
        let end = blocks.get(i + 1).map_or(raw.len(), |next| next.full.start);
        let metadata = parse_metadata(block.inner.slice(raw));
        push_span(raw, Span::new(block.full.end, end), metadata, aliases, out);
    }
}

fn segment_backward(
    raw: &str,
    blocks: &[MetadataBlock],
    aliases: &AliasTable,
    out: &mut Vec<Clause>,
) {
    let mut start = 0;
    for block in blocks {
        let metadata = parse_metadata(block.inner.slice(raw));
        push_span(raw, Span::new(start, block.full.start), metadata, aliases, out);
        start = block.full.end;
    }
    push_span(raw, Span::new(start, raw.len()), Metadata::new(), aliases, out);
}

fn segment_sectioned(
    raw: &str,
    blocks: &[MetadataBlock],
    aliases: &AliasTable,
    out: &mut Vec<Clause>,
) {
    for section in sections(raw, blocks) {
        let inside: Vec<&MetadataBlock> = blocks
            .iter()
            .filter(|b| b.full.start >= section.start && b.full.end <= section.end)
            .collect();

        let metadata = inside
            .first()
            .map(|b| parse_metadata(b.inner.slice(raw)))
            .unwrap_or_default();

        let mut content = String::new();
        let mut cursor = section.start;
        for block in &inside {
            content.push_str(&raw[cursor..block.full.start]);
            cursor = block.full.end;
        }
        content.push_str(&raw[cursor..section.end]);

        let trimmed = content.trim();
        if trimmed.is_empty() {
            continue;
        }
        out.push(Clause::new(trimmed, section, finalize(metadata, aliases)));
    }
}

/// Splits `raw` at thematic-break lines that are not inside a metadata block.
fn sections(raw: &str, blocks: &[MetadataBlock]) -> Vec<Span> {
    let mut out = Vec::new();
    let mut section_start = 0;
    let mut line_start = 0;
    for line in raw.split_inclusive('\n') {
        let line_end = line_start + line.len();
        let inside_block = blocks
            .iter()
            .any(|b| b.full.start <= line_start && line_start < b.full.end);
        if !inside_block && is_thematic_break(line) {
            out.push(Span::new(section_start, line_start));
            section_start = line_end;
        }
        line_start = line_end;
    }
    out.push(Span::new(section_start, raw.len()));
    out
}

fn is_thematic_break(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

/// Emits a clause for the trimmed text of `span`, if any remains.
fn push_span(
    raw: &str,
    span: Span,
    metadata: Metadata,
    aliases: &AliasTable,
    out: &mut Vec<Clause>,
) {
    let text = span.slice(raw);
    let trimmed_start = text.trim_start();
    let content = trimmed_start.trim_end();
    if content.is_empty() {
        return;
    }
    let start = span.start + (text.len() - trimmed_start.len());
    let content_span = Span::new(start, start + content.len());
    out.push(Clause::new(content, content_span, finalize(metadata, aliases)));
}

/// Turns raw metadata into clause attributes: empty values are dropped, the
/// two required attributes are always present and `rule_type` is resolved
/// through the alias table.
fn finalize(mut metadata: Metadata, aliases: &AliasTable) -> Attributes {
    metadata.retain(|_, v| !v.is_empty());
    let rule_type = metadata
        .get(RULE_TYPE)
        .map_or_else(|| UNKNOWN.to_string(), |raw| aliases.resolve(raw));
    metadata.insert(RULE_TYPE.to_string(), rule_type);
    metadata
        .entry(APPLIES_TO.to_string())
        .or_insert_with(|| UNKNOWN.to_string());
    Attributes::new(metadata)
}
