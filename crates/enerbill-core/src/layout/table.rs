//! Tables recognized by the layout service.

use serde::{Deserialize, Serialize};

/// A cell in a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// Row index (0-based).
    pub row_index: usize,
    /// Column index (0-based).
    pub column_index: usize,
    /// Cell text.
    #[serde(default)]
    pub content: String,
}

impl TableCell {
    pub fn new(row_index: usize, column_index: usize, content: impl Into<String>) -> Self {
        Self {
            row_index,
            column_index,
            content: content.into(),
        }
    }
}

/// A recognized table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub row_count: usize,
    #[serde(default)]
    pub column_count: usize,
    /// Cells in service order.
    #[serde(default)]
    pub cells: Vec<TableCell>,
}

impl Table {
    /// Build a table from cells, deriving the grid size from their indices.
    pub fn from_cells(cells: Vec<TableCell>) -> Self {
        let row_count = cells.iter().map(|c| c.row_index + 1).max().unwrap_or(0);
        let column_count = cells.iter().map(|c| c.column_index + 1).max().unwrap_or(0);
        Self {
            row_count,
            column_count,
            cells,
        }
    }

    /// Get the cell at a specific position.
    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.cells
            .iter()
            .find(|c| c.row_index == row && c.column_index == column)
    }
}
