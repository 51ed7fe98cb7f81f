//! # Rendering
//!
//! Markdown to HTML through pulldown-cmark, with glossary terms marked up.
//!
//! Term marking works on the event stream: only `Event::Text` outside links,
//! images and code blocks is split, so rendered tags are never broken up.
//! `render_view` is the HTML display surface: one `<section>` per clause,
//! carrying the attributes the filter reads back and a `hidden` flag.

use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{CowStr, Event, Options, Parser, html};

use crate::{
    glossary::GlossaryMap,
    highlight::{TermMatcher, TextPiece, markdown::RawZones},
    view::ViewState,
};

/// Parser options shared by rendering and term scanning.
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// What a renderer needs to mark glossary terms.
#[derive(Debug, Clone, Copy)]
pub struct TermContext<'a> {
    pub matcher: &'a TermMatcher,
    pub glossary: &'a GlossaryMap,
}

/// Converts one clause's markdown into HTML.
pub trait Renderer {
    fn render(&self, markdown: &str, terms: Option<TermContext<'_>>) -> String;
}

#[derive(Debug, Default)]
pub struct PulldownRenderer;

impl PulldownRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for PulldownRenderer {
    fn render(&self, markdown: &str, terms: Option<TermContext<'_>>) -> String {
        let parser = Parser::new_ext(markdown, markdown_options());
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        match terms {
            None => html::push_html(&mut out, parser),
            Some(ctx) => html::push_html(&mut out, mark_terms(parser, ctx).into_iter()),
        }
        out
    }
}

fn mark_terms<'a>(parser: Parser<'a>, ctx: TermContext<'_>) -> Vec<Event<'a>> {
    let mut zones = RawZones::default();
    let mut events = Vec::new();

    for event in parser {
        zones.observe(&event);
        if let Event::Text(text) = &event
            && !zones.is_raw()
        {
            let pieces = ctx.matcher.split(text);
            if pieces.iter().any(|p| matches!(p, TextPiece::Term { .. })) {
                for piece in pieces {
                    events.push(piece_event(piece, ctx.glossary));
                }
                continue;
            }
        }
        events.push(event);
    }
    events
}

fn piece_event<'a>(piece: TextPiece<'_>, glossary: &GlossaryMap) -> Event<'a> {
    match piece {
        TextPiece::Plain(text) => Event::Text(CowStr::from(text.to_string())),
        TextPiece::Term { text, key } => match glossary.get(&key) {
            Some(entry) => Event::InlineHtml(CowStr::from(format!(
                r#"<span class="term" data-term="{}" data-definition="{}">{}</span>"#,
                encode_double_quoted_attribute(&entry.term),
                encode_double_quoted_attribute(&entry.definition),
                encode_text(text)
            ))),
            None => Event::Text(CowStr::from(text.to_string())),
        },
    }
}

/// Renders every clause of `view` as a `<section>`, hiding the ones the
/// current filters exclude.
pub fn render_view(view: &ViewState, renderer: &dyn Renderer) -> String {
    let terms = view.term_context();
    let mut out = String::new();
    for (index, clause) in view.clauses().iter().enumerate() {
        let hidden = if view.visibility().is_visible(index) {
            ""
        } else {
            " hidden"
        };
        out.push_str(&format!(
            "<section class=\"clause\" data-rule_type=\"{}\" data-applies_to=\"{}\"{hidden}>\n",
            encode_double_quoted_attribute(clause.rule_type()),
            encode_double_quoted_attribute(clause.applies_to()),
        ));
        out.push_str(&renderer.render(&clause.content, terms));
        out.push_str("</section>\n");
    }
    out
}
