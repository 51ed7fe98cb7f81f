pub mod clause;
pub mod filter_control;

pub use clause::*;
pub use filter_control::*;
