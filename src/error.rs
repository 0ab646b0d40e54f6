//! Error types for pdfindex library.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for pdfindex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Stage that rejected an analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    /// Decoding the collaborator's response into typed records
    Decode,
    /// Text extractor
    Text,
    /// Structure extractor
    Structure,
    /// Table extractor
    Tables,
}

impl fmt::Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Extractor::Decode => "decode",
            Extractor::Text => "text",
            Extractor::Structure => "structure",
            Extractor::Tables => "tables",
        };
        f.write_str(name)
    }
}

/// Error types that can occur while normalizing an analysis result.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The analysis result does not have the expected shape.
    #[error("{extractor} extractor: {location}: {message}")]
    InputShape {
        /// Stage that detected the problem
        extractor: Extractor,
        /// Offending element, e.g. `tables[2].cells[5]`
        location: String,
        /// What was wrong with it
        message: String,
    },

    /// The assembled envelope cannot be encoded as JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid indexing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The layout analysis collaborator failed or returned an unusable result.
    #[error("Analysis error: {0}")]
    Analysis(String),
}

impl Error {
    /// Build an input shape error.
    pub fn input_shape(
        extractor: Extractor,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::InputShape {
            extractor,
            location: location.into(),
            message: message.into(),
        }
    }

    /// Whether this error was raised by input validation.
    pub fn is_input_shape(&self) -> bool {
        matches!(self, Error::InputShape { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return Error::Io(io::Error::from(err));
        }
        let location = format!("line {} column {}", err.line(), err.column());
        Error::input_shape(Extractor::Decode, location, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::input_shape(
            Extractor::Tables,
            "tables[1].cells[3]",
            "row_index 4 >= row_count 2",
        );
        assert_eq!(
            err.to_string(),
            "tables extractor: tables[1].cells[3]: row_index 4 >= row_count 2"
        );

        let err = Error::Serialization("non-finite number".into());
        assert_eq!(err.to_string(), "Serialization error: non-finite number");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_is_decode_shape_error() {
        let err: Error = serde_json::from_str::<u32>("\"nope\"").unwrap_err().into();
        assert!(err.is_input_shape());
        assert!(matches!(
            err,
            Error::InputShape {
                extractor: Extractor::Decode,
                ..
            }
        ));
    }
}
