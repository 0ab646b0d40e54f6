//! Page structure extraction.

use crate::error::{Error, Extractor, Result};
use crate::model::{AnalysisResult, LineRecord, Page, SpanRecord, StructureRecord};

/// Flatten per-page geometry and per-line span metadata.
///
/// One record per page, in page order. Width, height, offsets and lengths
/// are passed through as given; units are not interpreted.
pub fn extract_structure(result: &AnalysisResult) -> Result<Vec<StructureRecord>> {
    result
        .pages
        .iter()
        .enumerate()
        .map(|(page_idx, page)| page_record(page_idx, page))
        .collect()
}

fn page_record(page_idx: usize, page: &Page) -> Result<StructureRecord> {
    if page.page_number == 0 {
        return Err(Error::input_shape(
            Extractor::Structure,
            format!("pages[{}]", page_idx),
            "page_number must be 1 or greater",
        ));
    }

    let lines = page
        .lines
        .iter()
        .map(|line| LineRecord {
            content: line.content.clone(),
            spans: line
                .spans
                .iter()
                .map(|span| SpanRecord {
                    offset: span.offset,
                    length: span.length,
                })
                .collect(),
        })
        .collect();

    Ok(StructureRecord {
        page_number: page.page_number,
        width: page.width,
        height: page.height,
        unit: page.unit.clone(),
        lines,
    })
}
