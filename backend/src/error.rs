//! Error types for the clinical trials normalization pipeline.
//!
//! - [`WorkbookError`] - Spreadsheet reading errors
//! - [`ParseError`] - Normalizer errors (missing input, unreadable workbook)
//! - [`ServerError`] - HTTP-facing errors with a status code
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use axum::http::StatusCode;
use thiserror::Error;

// =============================================================================
// Workbook Errors
// =============================================================================

/// Errors while opening or reading a spreadsheet.
#[derive(Debug, Error)]
pub enum WorkbookError {
    /// Failed to read file from disk.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a workbook the reader understands.
    #[error("Failed to open workbook: {0}")]
    Open(#[from] calamine::Error),

    /// A listed sheet could not be decoded.
    #[error("Failed to read sheet '{name}': {message}")]
    Sheet { name: String, message: String },

    /// The workbook has no worksheets at all.
    #[error("Workbook contains no sheets")]
    NoSheets,
}

// =============================================================================
// Parse Errors (Normalizer)
// =============================================================================

/// Errors returned by the normalizer.
#[derive(Debug, Error)]
pub enum ParseError {
    /// No file was attached to the request.
    #[error("No file uploaded")]
    MissingInput,

    /// The workbook could not be read.
    #[error(transparent)]
    Workbook(#[from] WorkbookError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// Message used when a parse failure carries no text of its own.
pub const PARSE_FAILURE_FALLBACK: &str = "Failed to parse file";

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// No `file` field in the upload.
    #[error("No file uploaded")]
    MissingInput,

    /// The upload or workbook could not be processed.
    #[error("{0}")]
    ParseFailed(String),

    /// Only POST and OPTIONS are served on the parse endpoint.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ServerError {
    /// Build a parse failure, falling back to a generic message when empty.
    pub fn parse_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            ServerError::ParseFailed(PARSE_FAILURE_FALLBACK.to_string())
        } else {
            ServerError::ParseFailed(message)
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MissingInput => StatusCode::BAD_REQUEST,
            ServerError::ParseFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<ParseError> for ServerError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::MissingInput => ServerError::MissingInput,
            ParseError::Workbook(e) => ServerError::parse_failed(e.to_string()),
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for workbook operations.
pub type WorkbookResult<T> = Result<T, WorkbookError>;

/// Result type for normalizer operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // WorkbookError -> ParseError -> ServerError
        let parse_err: ParseError = WorkbookError::NoSheets.into();
        assert!(parse_err.to_string().contains("no sheets"));

        let server_err: ServerError = parse_err.into();
        assert_eq!(server_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(server_err.to_string(), "Workbook contains no sheets");
    }

    #[test]
    fn test_missing_input_is_bad_request() {
        let server_err: ServerError = ParseError::MissingInput.into();
        assert_eq!(server_err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(server_err.to_string(), "No file uploaded");
    }

    #[test]
    fn test_empty_parse_message_falls_back() {
        let err = ServerError::parse_failed("  ");
        assert_eq!(err.to_string(), PARSE_FAILURE_FALLBACK);

        let err = ServerError::parse_failed("zip header missing");
        assert_eq!(err.to_string(), "zip header missing");
    }

    #[test]
    fn test_sheet_error_format() {
        let err = WorkbookError::Sheet {
            name: "Config".into(),
            message: "bad xml".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("'Config'"));
        assert!(msg.contains("bad xml"));
    }
}
