//! Typed records for a layout analysis result.
//!
//! These mirror the response schema of the layout analysis service
//! (camelCase on the wire). Decoding is strict: every field the extractors
//! read must be present, and a missing field is reported with the index of
//! the page, table or cell that lacked it.

use super::geometry::{deserialize_polygon, Point};
use crate::error::{Error, Extractor, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status reported by a completed analysis operation.
const STATUS_SUCCEEDED: &str = "succeeded";

/// The full result of a layout analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Pages in document order
    pub pages: Vec<Page>,

    /// Detected tables in the order the analyzer reported them
    pub tables: Vec<Table>,
}

impl AnalysisResult {
    /// Create an empty analysis result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an analysis result from JSON.
    ///
    /// Accepts either the bare `analyzeResult` object or the operation
    /// wrapper `{"status": "succeeded", "analyzeResult": {...}}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode an analysis result from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut root = into_object(value, "$")?;

        if let Some(inner) = root.remove("analyzeResult") {
            check_status(&root)?;
            return Self::from_value(inner);
        }
        if root.contains_key("status") && !root.contains_key("pages") {
            check_status(&root)?;
            return Err(Error::Analysis(
                "analysis operation succeeded but carried no analyzeResult".into(),
            ));
        }

        let pages = take_array(&mut root, "pages", "$")?
            .into_iter()
            .enumerate()
            .map(|(i, page)| decode(page, &format!("pages[{}]", i)))
            .collect::<Result<Vec<Page>>>()?;

        let tables = take_array(&mut root, "tables", "$")?
            .into_iter()
            .enumerate()
            .map(|(i, table)| Table::decode(table, i))
            .collect::<Result<Vec<Table>>>()?;

        Ok(Self { pages, tables })
    }

    /// Add a page.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Add a table.
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Total number of lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// Total number of cells across all tables.
    pub fn cell_count(&self) -> usize {
        self.tables.iter().map(|t| t.cells.len()).sum()
    }

    /// Check if the result holds neither pages nor tables.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty() && self.tables.is_empty()
    }
}

/// One analyzed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page number (1-indexed)
    #[serde(alias = "page_number")]
    pub page_number: u32,

    /// Page width in `unit`
    pub width: f64,

    /// Page height in `unit`
    pub height: f64,

    /// Measurement unit, e.g. "inch" or "pixel"
    pub unit: String,

    /// Recognized lines in reading order
    pub lines: Vec<Line>,
}

impl Page {
    /// Create a page with no lines.
    pub fn new(page_number: u32, width: f64, height: f64, unit: impl Into<String>) -> Self {
        Self {
            page_number,
            width,
            height,
            unit: unit.into(),
            lines: Vec::new(),
        }
    }

    /// Add a line to the page.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Add a line and return self.
    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }
}

/// One recognized line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Line text
    pub content: String,

    /// Pointers into the page's character stream
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line with no spans.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            spans: Vec::new(),
        }
    }

    /// Add a span and return self.
    pub fn with_span(mut self, offset: u64, length: u64) -> Self {
        self.spans.push(Span { offset, length });
        self
    }
}

/// An (offset, length) pointer into the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Character offset
    pub offset: u64,
    /// Character count
    pub length: u64,
}

/// A detected table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Number of rows in the grid
    #[serde(alias = "row_count")]
    pub row_count: u32,

    /// Number of columns in the grid
    #[serde(alias = "column_count")]
    pub column_count: u32,

    /// Cells in the order the analyzer reported them
    pub cells: Vec<Cell>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTable {
    #[serde(alias = "row_count")]
    row_count: u32,
    #[serde(alias = "column_count")]
    column_count: u32,
    cells: Vec<Value>,
}

impl Table {
    /// Create a table with no cells.
    pub fn new(row_count: u32, column_count: u32) -> Self {
        Self {
            row_count,
            column_count,
            cells: Vec::new(),
        }
    }

    /// Add a cell to the table.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Add a cell and return self.
    pub fn with_cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    fn decode(value: Value, table_idx: usize) -> Result<Self> {
        let location = format!("tables[{}]", table_idx);
        let raw: RawTable = decode(value, &location)?;
        let cells = raw
            .cells
            .into_iter()
            .enumerate()
            .map(|(i, cell)| decode(cell, &format!("{}.cells[{}]", location, i)))
            .collect::<Result<Vec<Cell>>>()?;

        Ok(Self {
            row_count: raw.row_count,
            column_count: raw.column_count,
            cells,
        })
    }
}

/// One table cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Zero-based row position
    #[serde(alias = "row_index")]
    pub row_index: u32,

    /// Zero-based column position
    #[serde(alias = "column_index")]
    pub column_index: u32,

    /// Cell text
    pub content: String,

    /// Where the cell appears; more than one for cells split across regions
    #[serde(alias = "bounding_regions")]
    pub bounding_regions: Vec<BoundingRegion>,
}

impl Cell {
    /// Create a cell with no bounding regions.
    pub fn new(row_index: u32, column_index: u32, content: impl Into<String>) -> Self {
        Self {
            row_index,
            column_index,
            content: content.into(),
            bounding_regions: Vec::new(),
        }
    }

    /// Add a bounding region and return self.
    pub fn with_region(mut self, region: BoundingRegion) -> Self {
        self.bounding_regions.push(region);
        self
    }
}

/// A page-scoped polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingRegion {
    /// Page the polygon lies on (1-indexed)
    #[serde(alias = "page_number")]
    pub page_number: u32,

    /// Corner points in reading orientation
    #[serde(deserialize_with = "deserialize_polygon")]
    pub polygon: Vec<Point>,
}

impl BoundingRegion {
    /// Create a bounding region.
    pub fn new(page_number: u32, polygon: Vec<Point>) -> Self {
        Self {
            page_number,
            polygon,
        }
    }

    /// Axis-aligned rectangle as a four-point polygon, clockwise from top-left.
    pub fn rect(page_number: u32, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            page_number,
            vec![
                Point::new(x, y),
                Point::new(x + width, y),
                Point::new(x + width, y + height),
                Point::new(x, y + height),
            ],
        )
    }
}

fn shape_error(location: &str, message: impl Into<String>) -> Error {
    Error::input_shape(Extractor::Decode, location, message)
}

fn decode<T: serde::de::DeserializeOwned>(value: Value, location: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| shape_error(location, e.to_string()))
}

fn into_object(value: Value, location: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(shape_error(
            location,
            format!("expected an object, found {}", json_kind(&other)),
        )),
    }
}

fn take_array(map: &mut Map<String, Value>, key: &str, location: &str) -> Result<Vec<Value>> {
    match map.remove(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(shape_error(
            location,
            format!("`{}` should be an array, found {}", key, json_kind(&other)),
        )),
        None => Err(shape_error(location, format!("missing field `{}`", key))),
    }
}

fn check_status(root: &Map<String, Value>) -> Result<()> {
    match root.get("status").and_then(Value::as_str) {
        Some(STATUS_SUCCEEDED) | None => Ok(()),
        Some(status) => Err(Error::Analysis(format!(
            "analysis operation finished with status `{}`",
            status
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
