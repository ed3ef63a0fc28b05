//! Core library for electricity bill layout extraction.
//!
//! This crate provides:
//! - The layout-analysis result model (pages, lines, polygons, tables, styles)
//! - Layout sources that read recorded analysis responses
//! - Rule-driven field extraction for the account holder and billing table
//! - Positional alignment of the consumption history sub-table
//! - Per-group completeness scoring and the agent tool reply

pub mod bill;
pub mod error;
pub mod layout;
pub mod models;
pub mod source;

#[cfg(test)]
mod fixtures;

pub use bill::{BillExtractor, BillParser, BillTool, ToolReply};
pub use error::{EnerbillError, Result};
pub use layout::LayoutResult;
pub use models::bill::{AccountHolder, Consumption, ConsumptionHistory, CurrentBillingInfo, ExtractionResult};
pub use models::config::{EnerbillConfig, ExtractionConfig};
pub use source::{AnalyzeResultReader, LayoutSource};
