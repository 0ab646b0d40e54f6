//! Counts collected over extracted data.

use super::ExtractedData;
use serde::{Deserialize, Serialize};

/// Statistics over one extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of page records
    pub page_count: usize,

    /// Number of text lines
    pub line_count: usize,

    /// Number of spans across all lines
    pub span_count: usize,

    /// Number of table records
    pub table_count: usize,

    /// Number of cells across all tables
    pub cell_count: usize,

    /// Number of bounding regions across all cells
    pub region_count: usize,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: usize,

    /// Character count (excluding whitespace)
    pub char_count: usize,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics over extracted data.
    pub fn collect(data: &ExtractedData) -> Self {
        let mut stats = Self::new();

        for line in &data.text {
            stats.count_text(line);
        }
        stats.line_count = data.text.len();
        stats.page_count = data.structure.len();
        stats.span_count = data
            .structure
            .iter()
            .flat_map(|page| &page.lines)
            .map(|line| line.spans.len())
            .sum();

        stats.table_count = data.tables.len();
        for table in &data.tables {
            stats.cell_count += table.cells.len();
            stats.region_count += table
                .cells
                .iter()
                .map(|cell| cell.bounding_regions.len())
                .sum::<usize>();
        }

        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count();
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_stats_count_text() {
        let mut stats = ExtractionStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_collect_empty() {
        let stats = ExtractionStats::collect(&ExtractedData::default());
        assert_eq!(stats, ExtractionStats::default());
    }
}
