pub mod filter;
pub mod glossary;
pub mod highlight;
pub mod io;
pub mod models;
pub mod parsing;
pub mod render;
pub mod view;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use filter::{FilterEngine, Selection, Visibility};
pub use glossary::{GlossaryEntry, GlossaryMap, extract_glossary};
pub use highlight::{TermMatch, TermMatcher, TextPiece};
pub use io::*;
pub use models::*;
pub use parsing::{AliasTable, Association, Delimiters, SegmentOptions, segment};
pub use render::{PulldownRenderer, Renderer, TermContext, render_view};
pub use view::{LoadOptions, TermMarker, Tooltip, ViewEvent, ViewState, ViewUpdate};
