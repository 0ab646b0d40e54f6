//! Data model for layout analysis input and flattened output.
//!
//! `analysis` is the typed contract with the layout analysis collaborator;
//! `records` holds the flat records the extractors produce. Neither side is
//! mutated after construction.

mod analysis;
mod geometry;
mod records;

pub use analysis::{AnalysisResult, BoundingRegion, Cell, Line, Page, Span, Table};
pub use geometry::Point;
pub use records::{
    BoundingRegionRecord, CellRecord, LineRecord, SpanRecord, StructureRecord, TableRecord,
    TextDump,
};
