//! Table types.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::BoundingBox;
use crate::error::Error;

/// Text of a single addressed cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    /// Row index (0-indexed)
    pub row: usize,
    /// Column index (0-indexed)
    pub col: usize,
    /// Cell text
    pub text: String,
}

/// A table grid supplied by the table detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCellGrid {
    /// Number of rows
    pub rows: usize,

    /// Number of columns
    pub cols: usize,

    /// Addressed cells; missing addresses render as empty text
    pub cells: Vec<GridCell>,

    /// Number of header rows (0 = no header)
    pub header_row_count: usize,

    /// Table region in page coordinates
    pub bbox: BoundingBox,
}

impl TableCellGrid {
    /// Create an empty grid with the given shape.
    pub fn new(rows: usize, cols: usize, bbox: BoundingBox) -> Self {
        Self {
            rows,
            cols,
            cells: Vec::new(),
            header_row_count: 0,
            bbox,
        }
    }

    /// Build a grid from row-major text values.
    ///
    /// The column count is the length of the longest row.
    pub fn from_rows<S: Into<String>>(rows: Vec<Vec<S>>, bbox: BoundingBox) -> Self {
        let cols = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut grid = Self::new(rows.len(), cols, bbox);
        for (r, row) in rows.into_iter().enumerate() {
            for (c, text) in row.into_iter().enumerate() {
                grid.cells.push(GridCell {
                    row: r,
                    col: c,
                    text: text.into(),
                });
            }
        }
        grid
    }

    /// Add a cell and return self.
    pub fn with_cell(mut self, row: usize, col: usize, text: impl Into<String>) -> Self {
        self.cells.push(GridCell {
            row,
            col,
            text: text.into(),
        });
        self
    }

    /// Set the header row count and return self.
    pub fn with_header_rows(mut self, count: usize) -> Self {
        self.header_row_count = count;
        self
    }

    /// Check if the grid has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Text at `(row, col)`. The first cell addressed there wins.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.cells
            .iter()
            .find(|c| c.row == row && c.col == col)
            .map(|c| c.text.as_str())
    }

    /// Dense row-major text grid with missing cells as empty strings.
    ///
    /// Out-of-range cells are ignored.
    pub fn to_text_grid(&self) -> Vec<Vec<String>> {
        let mut grid = vec![vec![None::<&str>; self.cols]; self.rows];
        for cell in &self.cells {
            if cell.row < self.rows && cell.col < self.cols && grid[cell.row][cell.col].is_none() {
                grid[cell.row][cell.col] = Some(cell.text.as_str());
            }
        }
        grid.into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|t| t.unwrap_or_default().to_string())
                    .collect()
            })
            .collect()
    }

    /// Report inconsistent cell addressing.
    ///
    /// `table` is the grid's position in the page input. None of the returned
    /// errors prevent rendering.
    pub fn validate(&self, table: usize) -> Vec<Error> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for cell in &self.cells {
            if cell.row >= self.rows || cell.col >= self.cols {
                errors.push(Error::TableGridInput {
                    table,
                    reason: format!(
                        "cell ({}, {}) outside {}x{} grid",
                        cell.row, cell.col, self.rows, self.cols
                    ),
                });
            } else if !seen.insert((cell.row, cell.col)) {
                errors.push(Error::TableGridInput {
                    table,
                    reason: format!("cell ({}, {}) addressed more than once", cell.row, cell.col),
                });
            }
        }

        if self.header_row_count > self.rows {
            errors.push(Error::TableGridInput {
                table,
                reason: format!(
                    "{} header rows in a {}-row grid",
                    self.header_row_count, self.rows
                ),
            });
        }

        errors
    }
}

/// A table rendered as fixed-width text and Markdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedTable {
    /// Bordered fixed-width text
    pub ascii_text: String,

    /// Markdown table
    pub markdown_text: String,

    /// Number of rows
    pub num_rows: usize,

    /// Number of columns
    pub num_cols: usize,

    /// Whether the source grid declared header rows
    pub has_header: bool,

    /// Table region in page coordinates
    pub bbox: BoundingBox,

    /// Source cell text, row-major
    pub cells: Vec<Vec<String>>,
}

impl RenderedTable {
    /// Check if the table has no content.
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0 || self.num_cols == 0
    }

    /// Get plain text representation of the table (tab separated).
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
