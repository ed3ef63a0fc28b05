//! Electricity bill field extraction.

pub mod confidence;
pub mod history;
mod parser;
pub mod rules;
pub mod scanner;
pub mod table;
mod tool;

pub use parser::BillExtractor;
pub use tool::{follow_up_questions, BillTool, ToolReply};

use crate::layout::LayoutResult;
use crate::models::bill::ExtractionResult;

/// Result type for extraction operations.
pub type Result<T> = crate::error::Result<T>;

/// Trait for bill extractors.
pub trait BillParser: Send + Sync {
    /// Extract bill data from a layout result.
    fn extract(&self, layout: &LayoutResult) -> Result<ExtractionResult>;
}
