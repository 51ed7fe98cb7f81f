use std::sync::OnceLock;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;

use crate::render::markdown_options;

use super::{TermMatch, TermMatcher};

/// Raw HTML elements whose text is never marked.
const RAW_HTML_ELEMENTS: [&str; 4] = ["a", "code", "pre", "kbd"];

/// Tracks whether the event stream is inside a link, image or code block,
/// where terms are never marked. Inline code arrives as its own event and is
/// skipped by only ever looking at `Event::Text`.
///
/// Raw inline HTML links and code (`<a>`, `<code>`, `<pre>`, `<kbd>`) are
/// tracked separately; an unclosed one ends with its enclosing block.
#[derive(Debug, Default)]
pub(crate) struct RawZones {
    depth: usize,
    html_depth: usize,
}

impl RawZones {
    pub(crate) fn observe(&mut self, event: &Event<'_>) {
        match event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => {
                self.depth += 1;
            }
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                self.depth = self.depth.saturating_sub(1);
            }
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableCell,
            ) => {
                self.html_depth = 0;
            }
            Event::InlineHtml(html) => match raw_html_tag(html) {
                Some(HtmlTag::Open) => self.html_depth += 1,
                Some(HtmlTag::Close) => self.html_depth = self.html_depth.saturating_sub(1),
                None => {}
            },
            _ => {}
        }
    }

    pub(crate) fn is_raw(&self) -> bool {
        self.depth > 0 || self.html_depth > 0
    }
}

#[derive(Debug, PartialEq, Eq)]
enum HtmlTag {
    Open,
    Close,
}

/// Classifies an inline HTML tag as opening or closing one of the raw
/// elements. Self-closing tags and other elements give `None`.
fn raw_html_tag(html: &str) -> Option<HtmlTag> {
    static TAG: OnceLock<Regex> = OnceLock::new();
    let re = TAG.get_or_init(|| {
        Regex::new(r"^<(/?)([A-Za-z][A-Za-z0-9]*)(?:\s[^>]*?)?\s*(/?)>$")
            .expect("Invalid inline HTML tag regex")
    });

    let caps = re.captures(html.trim())?;
    let name = caps[2].to_ascii_lowercase();
    if !RAW_HTML_ELEMENTS.contains(&name.as_str()) || !caps[3].is_empty() {
        return None;
    }
    if caps[1].is_empty() {
        Some(HtmlTag::Open)
    } else {
        Some(HtmlTag::Close)
    }
}

/// Finds term occurrences in the prose of `markdown`, with spans into the
/// markdown source.
///
/// Text whose source bytes differ from the parsed text (entities, escapes) is
/// left unmarked, since its offsets cannot be mapped back exactly.
pub fn find_matches_in_markdown(markdown: &str, matcher: &TermMatcher) -> Vec<TermMatch> {
    let mut zones = RawZones::default();
    let mut out = Vec::new();

    for (event, range) in Parser::new_ext(markdown, markdown_options()).into_offset_iter() {
        zones.observe(&event);
        if let Event::Text(text) = &event
            && !zones.is_raw()
            && let Some(source) = markdown.get(range.clone())
            && source == &text[..]
        {
            out.extend(matcher.find_matches(source).into_iter().map(|m| TermMatch {
                span: m.span.offset(range.start),
                key: m.key,
            }));
        }
    }
    out
}
