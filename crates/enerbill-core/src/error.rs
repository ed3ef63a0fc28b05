//! Error types for the enerbill-core library.
//!
//! Missing fields, malformed tokens and unknown month abbreviations are not
//! errors: they come back as `None` and lower the confidence score. The
//! variants here cover inputs that cannot be processed at all.

use thiserror::Error;

/// Main error type for the enerbill library.
#[derive(Error, Debug)]
pub enum EnerbillError {
    /// The layout result is structurally invalid.
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Bill extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// The layout source could not produce a result.
    #[error("layout source error: {0}")]
    Source(#[from] SourceError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while validating a layout result.
#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    /// Polygons are flat `[x, y, ...]` lists and must hold whole points.
    #[error("polygon on page {page}, line {line} has an odd coordinate count ({len})")]
    OddPolygon { page: u32, line: usize, len: usize },

    /// Page numbers are 1-based.
    #[error("page at position {0} has page number 0")]
    InvalidPageNumber(usize),

    /// A line with text must carry a position.
    #[error("line {line} on page {page} has content but no polygon")]
    MissingPolygon { page: u32, line: usize },
}

/// Errors related to bill field extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A configured label pattern does not compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The configured rule set cannot be used.
    #[error("invalid rule: {0}")]
    InvalidRule(String),
}

/// Errors surfaced by a layout source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The payload is not a layout-analysis response.
    #[error("malformed layout payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The response envelope carries no `analyzeResult`.
    #[error("response has no analyzeResult")]
    MissingResult,

    /// The analysis service reported a failure.
    #[error("layout analysis failed: {0}")]
    ServiceFailed(String),

    /// The analysis has not finished yet.
    #[error("layout analysis not finished (status: {0})")]
    NotReady(String),
}

/// Result type for the enerbill library.
pub type Result<T> = std::result::Result<T, EnerbillError>;
