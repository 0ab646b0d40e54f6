//! Integration tests for the analyzer boundary.

use pdfindex::analyze::{DocumentAnalyzer, JsonFileAnalyzer, StaticAnalyzer};
use pdfindex::model::AnalysisResult;
use pdfindex::{index_document, Error, Extractor, IndexingConfig, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Analyzer that records how often it was called and what it was given.
struct CountingAnalyzer {
    calls: AtomicUsize,
    expected_source: &'static str,
}

impl DocumentAnalyzer for CountingAnalyzer {
    fn name(&self) -> &str {
        "counting"
    }

    fn analyze(&self, source: &str) -> Result<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(source, self.expected_source);
        Ok(AnalysisResult::new())
    }
}

#[test]
fn test_source_goes_to_analyzer_once() {
    let analyzer = CountingAnalyzer {
        calls: AtomicUsize::new(0),
        expected_source: "https://example.com/invoice.pdf",
    };

    index_document(
        &analyzer,
        "https://example.com/invoice.pdf",
        &IndexingConfig::new(),
    )
    .unwrap();
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_analyzer_failure_propagates() {
    let err = index_document(&StaticAnalyzer::default(), "", &IndexingConfig::new()).unwrap_err();
    assert!(matches!(err, Error::Analysis(_)));
}

#[test]
fn test_malformed_saved_analysis() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("broken.json"),
        r#"{"pages": [{"pageNumber": 1, "width": 8.5, "height": 11, "unit": "inch"}], "tables": []}"#,
    )
    .unwrap();

    let analyzer = JsonFileAnalyzer::new().with_base_dir(dir.path());
    match analyzer.analyze("broken.json").unwrap_err() {
        Error::InputShape {
            extractor,
            location,
            message,
        } => {
            assert_eq!(extractor, Extractor::Decode);
            assert_eq!(location, "pages[0]");
            assert!(message.contains("lines"));
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_saved_analysis_round_trips_through_serialize() {
    let original =
        AnalysisResult::from_json(include_str!("fixtures/invoice.layout.json")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.json");
    std::fs::write(&path, serde_json::to_string(&original).unwrap()).unwrap();

    let replayed = JsonFileAnalyzer::new()
        .analyze(path.to_str().unwrap())
        .unwrap();
    assert_eq!(replayed, original);
}
