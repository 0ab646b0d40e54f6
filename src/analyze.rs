//! The boundary with the layout analysis collaborator.
//!
//! Anything that can turn a document locator into an [`AnalysisResult`]
//! implements [`DocumentAnalyzer`]. The extraction core never sees the
//! locator itself.
//!
//! # Example
//!
//! ```no_run
//! use pdfindex::analyze::{DocumentAnalyzer, JsonFileAnalyzer};
//!
//! let analyzer = JsonFileAnalyzer::new();
//! let result = analyzer.analyze("saved/invoice.layout.json")?;
//! println!("{} pages", result.pages.len());
//! # Ok::<(), pdfindex::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::model::AnalysisResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Trait for layout analysis collaborators.
pub trait DocumentAnalyzer: Send + Sync {
    /// Name of this analyzer, used in logs.
    fn name(&self) -> &str;

    /// Analyze the document at `source` (a URL, path, or other locator).
    fn analyze(&self, source: &str) -> Result<AnalysisResult>;
}

/// Replays analysis results saved as JSON files.
///
/// The locator is a file path, resolved against `base_dir` when relative.
#[derive(Debug, Clone, Default)]
pub struct JsonFileAnalyzer {
    base_dir: Option<PathBuf>,
}

impl JsonFileAnalyzer {
    /// Create an analyzer that resolves paths against the working directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    fn resolve(&self, source: &str) -> PathBuf {
        let source = source.strip_prefix("file://").unwrap_or(source);
        let path = Path::new(source);
        match &self.base_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl DocumentAnalyzer for JsonFileAnalyzer {
    fn name(&self) -> &str {
        "json-file"
    }

    fn analyze(&self, source: &str) -> Result<AnalysisResult> {
        let path = self.resolve(source);
        let contents = fs::read_to_string(&path)?;
        log::debug!("Read {} bytes of analysis from {}", contents.len(), path.display());
        AnalysisResult::from_json(&contents)
    }
}

/// Returns a fixed analysis result for every locator.
#[derive(Debug, Clone, Default)]
pub struct StaticAnalyzer {
    result: AnalysisResult,
}

impl StaticAnalyzer {
    /// Create an analyzer that always returns `result`.
    pub fn new(result: AnalysisResult) -> Self {
        Self { result }
    }
}

impl DocumentAnalyzer for StaticAnalyzer {
    fn name(&self) -> &str {
        "static"
    }

    fn analyze(&self, source: &str) -> Result<AnalysisResult> {
        if source.is_empty() {
            return Err(Error::Analysis("empty document locator".into()));
        }
        Ok(self.result.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, Page};
    use std::io::Write;

    #[test]
    fn test_json_file_analyzer_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"pages": [{{"pageNumber": 1, "width": 8.5, "height": 11, "unit": "inch", "lines": []}}], "tables": []}}"#
        )
        .unwrap();

        let analyzer = JsonFileAnalyzer::new();
        let result = analyzer.analyze(file.path().to_str().unwrap()).unwrap();
        assert_eq!(result.pages.len(), 1);
    }

    #[test]
    fn test_json_file_analyzer_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.json"), r#"{"pages": [], "tables": []}"#).unwrap();

        let analyzer = JsonFileAnalyzer::new().with_base_dir(dir.path());
        assert!(analyzer.analyze("a.json").unwrap().is_empty());
        assert!(analyzer.analyze("file://a.json").unwrap().is_empty());
    }

    #[test]
    fn test_json_file_analyzer_missing_file() {
        let err = JsonFileAnalyzer::new()
            .analyze("/definitely/not/here.json")
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_static_analyzer() {
        let mut result = AnalysisResult::new();
        result.add_page(Page::new(1, 1.0, 1.0, "inch").with_line(Line::new("x")));
        let analyzer = StaticAnalyzer::new(result.clone());

        assert_eq!(analyzer.analyze("anything").unwrap(), result);
        assert!(analyzer.analyze("").is_err());
        assert_eq!(analyzer.name(), "static");
    }
}
