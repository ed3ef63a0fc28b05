//! Reader for recorded layout-analysis responses.

use serde::Deserialize;
use tracing::debug;

use super::{LayoutSource, Result};
use crate::error::SourceError;
use crate::layout::LayoutResult;

/// Polling envelope returned by the analysis service.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OperationEnvelope {
    status: String,
    #[serde(default)]
    analyze_result: Option<LayoutResult>,
    #[serde(default)]
    error: Option<ServiceErrorBody>,
}

#[derive(Deserialize)]
struct ServiceErrorBody {
    #[serde(default)]
    message: String,
}

/// Reads a recorded service response from JSON bytes.
///
/// Accepts the bare `analyzeResult` object, an object wrapping it under
/// `analyzeResult`, or the full polling envelope with a `status` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyzeResultReader;

impl AnalyzeResultReader {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutSource for AnalyzeResultReader {
    fn analyze(&self, document: &[u8]) -> Result<LayoutResult> {
        let value: serde_json::Value = serde_json::from_slice(document)?;

        if value.get("status").is_some() {
            let envelope: OperationEnvelope = serde_json::from_value(value)?;
            return match envelope.status.as_str() {
                "succeeded" => envelope.analyze_result.ok_or(SourceError::MissingResult),
                "failed" => Err(SourceError::ServiceFailed(
                    envelope
                        .error
                        .map(|e| e.message)
                        .filter(|m| !m.is_empty())
                        .unwrap_or_else(|| "unknown error".to_string()),
                )),
                other => Err(SourceError::NotReady(other.to_string())),
            };
        }

        let layout: LayoutResult = match value.get("analyzeResult") {
            Some(inner) => serde_json::from_value(inner.clone())?,
            None if value.is_object() => serde_json::from_value(value)?,
            None => return Err(SourceError::MissingResult),
        };

        debug!(
            "Read layout result with {} pages and {} tables",
            layout.pages.len(),
            layout.tables.len()
        );

        Ok(layout)
    }
}
