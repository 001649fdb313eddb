//! Table model structures.

use serde::{Deserialize, Serialize};

/// A cell in a table.
///
/// `text` is the concatenation of every paragraph inside the cell, joined
/// with `"\n"`. `style` is the style name of the cell's first paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Full text content of the cell
    pub text: String,

    /// Style name of the first paragraph in the cell
    pub style: String,
}

impl Cell {
    /// Create a cell.
    pub fn new(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: style.into(),
        }
    }

    /// Check if this cell has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A row in a table. Serializes as a bare array of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    /// Cells in this row
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell to this row.
    pub fn add_cell(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// Get the number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A table: ordered rows of cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Rows in document order
    pub content: Vec<Row>,
}

impl TableBlock {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to this table.
    pub fn add_row(&mut self, row: Row) {
        self.content.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.content.len()
    }

    /// Get the number of columns (from the first row).
    pub fn column_count(&self) -> usize {
        self.content.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Get a plain text representation, cells tab-separated, rows on
    /// separate lines.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for row in &self.content {
            let cells: Vec<&str> = row.cells.iter().map(|c| c.text.as_str()).collect();
            text.push_str(&cells.join("\t"));
            text.push('\n');
        }
        text
    }
}
