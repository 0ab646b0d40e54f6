//! The indexable envelope.

use super::json::{to_json, JsonFormat};
use crate::config::ServiceBlock;
use crate::error::{Error, Result};
use crate::model::{StructureRecord, TableRecord, TextDump};
use serde::{Deserialize, Serialize};

/// Configuration blocks plus extracted data, ready for indexing.
///
/// Field order is the serialization order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Embedding service parameters, verbatim
    pub embeddings: ServiceBlock,

    /// Search index parameters, verbatim
    pub index: ServiceBlock,

    /// Output of the three extractors
    pub extracted_data: ExtractedData,
}

/// The three extracted facets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedData {
    /// One string per line
    pub text: TextDump,

    /// One record per page
    pub structure: Vec<StructureRecord>,

    /// One record per table
    pub tables: Vec<TableRecord>,
}

impl Envelope {
    /// Encode the envelope as a single JSON string.
    ///
    /// Fails if any page dimension or polygon coordinate is not finite,
    /// since JSON has no encoding for NaN or infinity.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        self.extracted_data.ensure_finite()?;
        to_json(self, format)
    }

    /// Decode an envelope previously produced by [`Envelope::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::Serialization(format!("invalid envelope: {}", e)))
    }
}

impl ExtractedData {
    fn ensure_finite(&self) -> Result<()> {
        for (page_idx, page) in self.structure.iter().enumerate() {
            if !page.width.is_finite() || !page.height.is_finite() {
                return Err(Error::Serialization(format!(
                    "structure[{}]: page size {}x{} is not a finite number",
                    page_idx, page.width, page.height
                )));
            }
        }

        for table in &self.tables {
            for (cell_idx, cell) in table.cells.iter().enumerate() {
                for (region_idx, region) in cell.bounding_regions.iter().enumerate() {
                    if let Some(point) = region.polygon.iter().find(|p| !p.is_finite()) {
                        return Err(Error::Serialization(format!(
                            "tables[{}].cells[{}].bounding_regions[{}]: point ({}, {}) is not finite",
                            table.table_index, cell_idx, region_idx, point.x, point.y
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingRegionRecord, CellRecord, Point};

    fn table_with_point(point: Point) -> TableRecord {
        TableRecord {
            table_index: 0,
            row_count: 1,
            column_count: 1,
            cells: vec![CellRecord {
                row_index: 0,
                column_index: 0,
                content: "x".into(),
                bounding_regions: vec![BoundingRegionRecord {
                    page_number: 1,
                    polygon: vec![Point::new(0.0, 0.0), point],
                }],
            }],
        }
    }

    #[test]
    fn test_empty_envelope_keys() {
        let json = Envelope::default().to_json(JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"embeddings":{},"index":{},"extracted_data":{"text":[],"structure":[],"tables":[]}}"#
        );
    }

    #[test]
    fn test_non_finite_page_size_rejected() {
        let mut envelope = Envelope::default();
        envelope.extracted_data.structure.push(StructureRecord {
            page_number: 1,
            width: f64::NAN,
            height: 11.0,
            unit: "inch".into(),
            lines: Vec::new(),
        });

        let err = envelope.to_json(JsonFormat::Compact).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert!(err.to_string().contains("structure[0]"));
    }

    #[test]
    fn test_non_finite_polygon_rejected() {
        let mut envelope = Envelope::default();
        envelope
            .extracted_data
            .tables
            .push(table_with_point(Point::new(f64::INFINITY, 1.0)));

        let err = envelope.to_json(JsonFormat::Compact).unwrap_err();
        assert!(err.to_string().contains("tables[0].cells[0].bounding_regions[0]"));
    }

    #[test]
    fn test_envelope_decodes_back() {
        let mut envelope = Envelope::default();
        envelope.extracted_data.text.push("line".into());
        envelope
            .extracted_data
            .tables
            .push(table_with_point(Point::new(2.5, 3.75)));

        let json = envelope.to_json(JsonFormat::Pretty).unwrap();
        assert_eq!(Envelope::from_json(&json).unwrap(), envelope);
    }
}
