//! Plain text extraction.

use crate::model::{AnalysisResult, TextDump};

/// Flatten every line of every page into one string per line.
///
/// Content is copied verbatim: no trimming, no normalization.
pub fn extract_text(result: &AnalysisResult) -> TextDump {
    result
        .pages
        .iter()
        .flat_map(|page| page.lines.iter())
        .map(|line| line.content.clone())
        .collect()
}
