//! # Clause Parsing
//!
//! Splits a raw markdown document into attributed clauses.
//!
//! ## Phases
//!
//! 1. **Block location** (`blocks`): every `<!-- … -->` metadata block is found
//!    in document order using a forward-only `Cursor`
//! 2. **Metadata extraction** (`metadata`): the inner text of each block is read
//!    as `key: value` lines
//! 3. **Segmentation** (`segment`): each block is paired with the content span
//!    it governs according to the configured `Association`, and `rule_type` is
//!    resolved through the `AliasTable` (`aliases`)
//!
//! ## Key Invariants
//!
//! - Clauses come out in document order
//! - Every clause has non-empty, trimmed content
//! - Every clause carries `rule_type` and `applies_to`, defaulting to `unknown`

pub mod aliases;
pub mod blocks;
pub mod cursor;
pub mod metadata;
pub mod segment;
pub mod snapshot;
pub mod span;

pub use aliases::AliasTable;
pub use blocks::{Delimiters, MetadataBlock, locate_blocks};
pub use metadata::{Metadata, parse_metadata};
pub use segment::{Association, SegmentOptions, segment};
pub use span::Span;
