//! Error types for the G-code post-processing core.
//!
//! This module provides structured error types for line parsing and
//! per-layer geometric queries.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Errors that can occur while parsing program text into the document model.
///
/// Parse errors are fatal: they abort the whole parse and carry the
/// offending source line for diagnostics. No partial document is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line contains no command code.
    #[error("Line has no command code: {line:?}")]
    MissingCode {
        /// The offending source line.
        line: String,
    },

    /// A letter-prefixed token whose numeric remainder failed to parse.
    #[error("Malformed argument '{token}' in line: {line}")]
    MalformedArgument {
        /// The token that failed to parse.
        token: String,
        /// The offending source line.
        line: String,
    },
}

/// Errors that can occur during geometric queries on a layer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    /// No line in the layer carries the requested axis argument.
    #[error("Layer has no {axis} coordinates to compute extents from")]
    EmptyExtent {
        /// The axis that no line carries.
        axis: char,
    },
}

/// Unified error type for the crate's public API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Parse error
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Result type alias for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type alias for geometric queries.
pub type GeometryResult<T> = Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::MalformedArgument {
            token: "Xabc".to_string(),
            line: "G1 Xabc Y5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed argument 'Xabc' in line: G1 Xabc Y5"
        );

        let err = ParseError::MissingCode {
            line: "".to_string(),
        };
        assert_eq!(err.to_string(), "Line has no command code: \"\"");
    }

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::EmptyExtent { axis: 'X' };
        assert_eq!(
            err.to_string(),
            "Layer has no X coordinates to compute extents from"
        );
    }

    #[test]
    fn test_error_conversions() {
        let err: Error = ParseError::MissingCode {
            line: "".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Parse(_)));

        let err: Error = GeometryError::EmptyExtent { axis: 'Y' }.into();
        assert!(matches!(err, Error::Geometry(_)));
    }
}
