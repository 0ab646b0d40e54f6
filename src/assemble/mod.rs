//! Assembly of extractor output into the indexable envelope.
//!
//! # Example
//!
//! ```
//! use pdfindex::assemble::{assemble, AssembleOptions, JsonFormat};
//! use pdfindex::model::{AnalysisResult, Line, Page};
//! use pdfindex::IndexingConfig;
//!
//! let mut result = AnalysisResult::new();
//! result.add_page(Page::new(1, 8.5, 11.0, "inch").with_line(Line::new("Invoice #123")));
//!
//! let envelope = assemble(&result, &IndexingConfig::default(), &AssembleOptions::default())?;
//! assert_eq!(envelope.extracted_data.text, vec!["Invoice #123"]);
//!
//! let json = envelope.to_json(JsonFormat::Compact)?;
//! assert!(json.starts_with(r#"{"embeddings":"#));
//! # Ok::<(), pdfindex::Error>(())
//! ```

mod envelope;
mod json;
mod stats;

pub use envelope::{Envelope, ExtractedData};
pub use json::{to_json, JsonFormat};
pub use stats::ExtractionStats;

use crate::config::IndexingConfig;
use crate::error::Result;
use crate::extract::{extract_structure, extract_tables, extract_text};
use crate::model::AnalysisResult;
use serde::{Deserialize, Serialize};

/// Options for assembling an envelope.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Run the three extractors on the rayon pool
    pub parallel: bool,

    /// Encoding used by [`index_analysis_with_options`]
    pub format: JsonFormat,
}

impl AssembleOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel extraction.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the JSON format.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            format: JsonFormat::Compact,
        }
    }
}

/// The serialized envelope, as handed to the indexing workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOutput {
    /// Envelope JSON
    pub document_data: String,
}

/// Run the extractors and merge their output with the configuration blocks.
///
/// The first extractor error is returned as-is; no partial envelope is built.
pub fn assemble(
    result: &AnalysisResult,
    config: &IndexingConfig,
    options: &AssembleOptions,
) -> Result<Envelope> {
    let (text, (structure, tables)) = if options.parallel {
        rayon::join(
            || extract_text(result),
            || rayon::join(|| extract_structure(result), || extract_tables(result)),
        )
    } else {
        (
            extract_text(result),
            (extract_structure(result), extract_tables(result)),
        )
    };

    let extracted_data = ExtractedData {
        text,
        structure: structure?,
        tables: tables?,
    };

    if log::log_enabled!(log::Level::Debug) {
        let stats = ExtractionStats::collect(&extracted_data);
        log::debug!(
            "Extracted {} lines on {} pages, {} tables with {} cells",
            stats.line_count,
            stats.page_count,
            stats.table_count,
            stats.cell_count
        );
    }

    Ok(Envelope {
        embeddings: config.embeddings.clone(),
        index: config.index.clone(),
        extracted_data,
    })
}

/// Assemble and encode an envelope as compact JSON.
pub fn index_analysis(result: &AnalysisResult, config: &IndexingConfig) -> Result<IndexOutput> {
    index_analysis_with_options(result, config, &AssembleOptions::default())
}

/// Assemble and encode an envelope with custom options.
pub fn index_analysis_with_options(
    result: &AnalysisResult,
    config: &IndexingConfig,
    options: &AssembleOptions,
) -> Result<IndexOutput> {
    let envelope = assemble(result, config, options)?;
    let document_data = envelope.to_json(options.format)?;
    log::debug!("Encoded envelope: {} bytes", document_data.len());
    Ok(IndexOutput { document_data })
}
