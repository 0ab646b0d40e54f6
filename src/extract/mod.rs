//! Extractors that project one facet of an analysis result each.
//!
//! The extractors are independent pure functions over the same immutable
//! input. None reads another's output, so they may run in any order or in
//! parallel.

mod structure;
mod tables;
mod text;

pub use structure::extract_structure;
pub use tables::extract_tables;
pub use text::extract_text;
