//! Flat output records built by the extractors.
//!
//! Field names and declaration order are part of the output contract: they
//! are what downstream indexing sees.

use super::geometry::Point;
use serde::{Deserialize, Serialize};

/// One string per line, in page order then line order.
pub type TextDump = Vec<String>;

/// Geometry and line metadata for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureRecord {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Page width in `unit`
    pub width: f64,

    /// Page height in `unit`
    pub height: f64,

    /// Measurement unit
    pub unit: String,

    /// Lines in source order
    pub lines: Vec<LineRecord>,
}

/// A line and its spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    /// Line text
    pub content: String,

    /// Spans in source order; empty rather than absent
    pub spans: Vec<SpanRecord>,
}

/// An (offset, length) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanRecord {
    /// Character offset
    pub offset: u64,
    /// Character count
    pub length: u64,
}

/// One table with its cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    /// Position of the table in the source sequence (0-based)
    pub table_index: usize,

    /// Number of rows in the grid
    pub row_count: u32,

    /// Number of columns in the grid
    pub column_count: u32,

    /// Cells in source order
    pub cells: Vec<CellRecord>,
}

/// One table cell with its regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Zero-based row position
    pub row_index: u32,

    /// Zero-based column position
    pub column_index: u32,

    /// Cell text
    pub content: String,

    /// Regions in source order
    pub bounding_regions: Vec<BoundingRegionRecord>,
}

/// A page-scoped polygon, copied point for point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegionRecord {
    /// Page the polygon lies on (1-indexed)
    pub page_number: u32,

    /// Corner points, as given
    pub polygon: Vec<Point>,
}
