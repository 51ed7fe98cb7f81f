//! # Snapshot Testing Support
//!
//! - **`normalize`**: converts clauses into a stable `ClauseSnap` form for
//!   `insta` snapshot assertions
//! - **`invariants`**: runtime checks for segmenter correctness (spans in
//!   bounds, non-empty trimmed content, content matching its source slice)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{ClauseSnap, normalize};
