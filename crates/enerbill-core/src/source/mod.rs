//! Layout-analysis sources.
//!
//! A source turns document bytes into a [`LayoutResult`]. Document bytes are
//! always passed per call; sources keep no per-document state, so one
//! instance can be shared across threads and requests.

mod reader;

pub use reader::AnalyzeResultReader;

use crate::error::SourceError;
use crate::layout::LayoutResult;

/// Result type for layout source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Trait for layout-analysis providers.
pub trait LayoutSource: Send + Sync {
    /// Analyze one document.
    fn analyze(&self, document: &[u8]) -> Result<LayoutResult>;
}

impl<S: LayoutSource + ?Sized> LayoutSource for &S {
    fn analyze(&self, document: &[u8]) -> Result<LayoutResult> {
        (**self).analyze(document)
    }
}
