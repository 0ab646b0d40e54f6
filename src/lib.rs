//! # pdfindex
//!
//! Normalizes the result of a PDF layout analysis pass into a flat JSON
//! envelope for search indexing and embedding generation.
//!
//! The library does no OCR or layout inference. It takes an already
//! analyzed document (pages → lines → spans, tables → cells → bounding
//! regions) and projects it into three flat facets:
//!
//! - **text**: one string per line, in reading order
//! - **structure**: page geometry with per-line span metadata
//! - **tables**: table grids with cell content and cell polygons
//!
//! The facets are combined with two pass-through configuration blocks
//! (`embeddings`, `index`) and encoded as a single JSON string.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfindex::{index_document, IndexingConfig, JsonFileAnalyzer};
//!
//! fn main() -> pdfindex::Result<()> {
//!     let config = IndexingConfig::from_file("indexing.json")?;
//!     let output = index_document(&JsonFileAnalyzer::new(), "invoice.layout.json", &config)?;
//!     println!("{}", output.document_data);
//!     Ok(())
//! }
//! ```

pub mod analyze;
pub mod assemble;
pub mod config;
pub mod error;
pub mod extract;
pub mod model;

// Re-export commonly used types
pub use analyze::{DocumentAnalyzer, JsonFileAnalyzer, StaticAnalyzer};
pub use assemble::{
    assemble, index_analysis, index_analysis_with_options, AssembleOptions, Envelope,
    ExtractedData, ExtractionStats, IndexOutput, JsonFormat,
};
pub use config::{EmbeddingKey, IndexKey, IndexingConfig, RecognizedKey, ServiceBlock};
pub use error::{Error, Extractor, Result};
pub use extract::{extract_structure, extract_tables, extract_text};
pub use model::{
    AnalysisResult, BoundingRegion, BoundingRegionRecord, Cell, CellRecord, Line, LineRecord,
    Page, Point, Span, SpanRecord, StructureRecord, Table, TableRecord, TextDump,
};

/// Analyze a document and build its envelope JSON.
///
/// `source` is handed to the analyzer untouched; only the analyzer knows how
/// to interpret it.
///
/// # Example
///
/// ```
/// use pdfindex::{index_document, AnalysisResult, IndexingConfig, StaticAnalyzer};
///
/// let analyzer = StaticAnalyzer::new(AnalysisResult::new());
/// let output = index_document(&analyzer, "https://example.com/a.pdf", &IndexingConfig::new())?;
/// assert!(output.document_data.contains(r#""tables":[]"#));
/// # Ok::<(), pdfindex::Error>(())
/// ```
pub fn index_document(
    analyzer: &dyn DocumentAnalyzer,
    source: &str,
    config: &IndexingConfig,
) -> Result<IndexOutput> {
    PdfIndex::new().with_config(config.clone()).index(analyzer, source)
}

/// Builder for analyzing and indexing documents.
///
/// # Example
///
/// ```no_run
/// use pdfindex::{IndexingConfig, JsonFileAnalyzer, PdfIndex};
///
/// let json = PdfIndex::new()
///     .with_config(IndexingConfig::from_file("indexing.json")?)
///     .sequential()
///     .pretty()
///     .index(&JsonFileAnalyzer::new(), "invoice.layout.json")?
///     .document_data;
/// # Ok::<(), pdfindex::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PdfIndex {
    config: IndexingConfig,
    options: AssembleOptions,
}

impl PdfIndex {
    /// Create a new builder with empty configuration blocks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration blocks.
    pub fn with_config(mut self, config: IndexingConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the extractors one after another.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Emit pretty-printed JSON.
    pub fn pretty(mut self) -> Self {
        self.options = self.options.with_format(JsonFormat::Pretty);
        self
    }

    /// Build the envelope for an analysis result that is already in hand.
    pub fn assemble(&self, result: &AnalysisResult) -> Result<Envelope> {
        assemble(result, &self.config, &self.options)
    }

    /// Encode the envelope for an analysis result that is already in hand.
    pub fn index_analysis(&self, result: &AnalysisResult) -> Result<IndexOutput> {
        index_analysis_with_options(result, &self.config, &self.options)
    }

    /// Analyze `source` and encode its envelope.
    pub fn index(&self, analyzer: &dyn DocumentAnalyzer, source: &str) -> Result<IndexOutput> {
        log::debug!("Analyzing {} with {}", source, analyzer.name());
        let result = analyzer.analyze(source)?;
        self.index_analysis(&result)
    }
}
