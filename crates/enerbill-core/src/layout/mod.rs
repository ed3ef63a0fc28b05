//! Read-only view of a document layout-analysis result.
//!
//! The shapes follow the layout service's `analyzeResult` JSON (camelCase
//! keys, flat polygon coordinate lists) so a recorded response deserializes
//! straight into [`LayoutResult`].

mod table;

pub use table::{Table, TableCell};

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Bounding polygon as a flat `[x1, y1, x2, y2, ...]` list.
///
/// The first point is the top-left corner for upright text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon(pub Vec<f64>);

impl Polygon {
    /// Build a polygon from `(x, y)` points.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        Self(points.iter().flat_map(|&(x, y)| [x, y]).collect())
    }

    /// Axis-aligned rectangle polygon, clockwise from the top-left corner.
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::from_points(&[
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
        ])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the polygon's points. A trailing odd coordinate is ignored.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.0.chunks_exact(2).map(|p| (p[0], p[1]))
    }

    /// Leftmost x coordinate.
    pub fn left_edge(&self) -> Option<f64> {
        self.points().map(|(x, _)| x).reduce(f64::min)
    }

    /// Topmost y coordinate.
    pub fn top_edge(&self) -> Option<f64> {
        self.points().map(|(_, y)| y).reduce(f64::min)
    }
}

/// A text line as read by the layout service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub content: String,
    #[serde(default)]
    pub polygon: Polygon,
}

impl Line {
    pub fn new(content: impl Into<String>, polygon: Polygon) -> Self {
        Self {
            content: content.into(),
            polygon,
        }
    }
}

/// A single recognized word.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    pub content: String,
    #[serde(default)]
    pub polygon: Polygon,
    #[serde(default)]
    pub confidence: f32,
}

/// One page of the analyzed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// 1-based page number.
    pub page_number: u32,
    /// Lines in the service's reading order.
    #[serde(default)]
    pub lines: Vec<Line>,
    #[serde(default)]
    pub words: Vec<Word>,
}

/// Style span flags (handwriting detection).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    #[serde(default)]
    pub is_handwritten: Option<bool>,
    #[serde(default)]
    pub confidence: f32,
}

/// Detected document language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub locale: String,
    #[serde(default)]
    pub confidence: f32,
}

/// Complete output of one layout-analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub styles: Vec<Style>,
    #[serde(default)]
    pub languages: Vec<Language>,
}

impl LayoutResult {
    /// True if any style span reports handwritten content.
    pub fn has_handwriting(&self) -> bool {
        self.styles.iter().any(|s| s.is_handwritten == Some(true))
    }

    /// Total number of lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// Reject results that cannot come from a well-formed analysis.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (position, page) in self.pages.iter().enumerate() {
            if page.page_number == 0 {
                return Err(LayoutError::InvalidPageNumber(position));
            }

            for (idx, line) in page.lines.iter().enumerate() {
                let len = line.polygon.0.len();
                if len % 2 != 0 {
                    return Err(LayoutError::OddPolygon {
                        page: page.page_number,
                        line: idx,
                        len,
                    });
                }
                if len == 0 && !line.content.trim().is_empty() {
                    return Err(LayoutError::MissingPolygon {
                        page: page.page_number,
                        line: idx,
                    });
                }
            }
        }

        Ok(())
    }
}
