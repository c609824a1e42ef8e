//! Page-level types.

use serde::{Deserialize, Serialize};

use super::{Block, Column, RenderedTable, TableCellGrid, TextSpan};
use crate::error::Error;

/// Everything the collaborators supply for one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageInput {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Page width in the span coordinate units
    pub width: f32,

    /// Page height in the span coordinate units
    pub height: f32,

    /// Extracted text spans
    pub spans: Vec<TextSpan>,

    /// Detected table grids
    pub tables: Vec<TableCellGrid>,
}

impl PageInput {
    /// Create an empty page input with the given dimensions.
    pub fn new(page_number: u32, width: f32, height: f32) -> Self {
        Self {
            page_number,
            width,
            height,
            spans: Vec::new(),
            tables: Vec::new(),
        }
    }

    /// Create an empty US Letter page (8.5 x 11 inches).
    pub fn letter(page_number: u32) -> Self {
        Self::new(page_number, 612.0, 792.0)
    }

    /// Set the spans and return self.
    pub fn with_spans(mut self, spans: Vec<TextSpan>) -> Self {
        self.spans = spans;
        self
    }

    /// Add a span.
    pub fn add_span(&mut self, span: TextSpan) {
        self.spans.push(span);
    }

    /// Add a table grid.
    pub fn add_table(&mut self, table: TableCellGrid) {
        self.tables.push(table);
    }

    /// Set the table grids and return self.
    pub fn with_tables(mut self, tables: Vec<TableCellGrid>) -> Self {
        self.tables = tables;
        self
    }
}

/// Kind of recovered input problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A span was skipped
    GeometryInput,
    /// A table grid had inconsistent addressing
    TableGridInput,
}

/// A recovered input problem recorded on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What kind of input was affected
    pub kind: DiagnosticKind,
    /// Human-readable description
    pub message: String,
}

impl Diagnostic {
    /// Convert a recoverable error into a diagnostic.
    ///
    /// Returns `None` for errors that abort analysis.
    pub fn from_error(err: &Error) -> Option<Self> {
        let kind = match err {
            Error::GeometryInput { .. } => DiagnosticKind::GeometryInput,
            Error::TableGridInput { .. } => DiagnosticKind::TableGridInput,
            _ => return None,
        };
        Some(Self {
            kind,
            message: err.to_string(),
        })
    }
}

/// An analyzed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Page width
    pub width: f32,

    /// Page height
    pub height: f32,

    /// Detected columns, left to right
    pub columns: Vec<Column>,

    /// Text blocks in reading order
    pub blocks: Vec<Block>,

    /// Rendered tables, in input order
    pub tables: Vec<RenderedTable>,

    /// Spans absorbed by tables
    pub table_span_indices: Vec<usize>,

    /// Recovered input problems
    pub diagnostics: Vec<Diagnostic>,
}

impl Page {
    /// Create an empty page.
    pub fn new(page_number: u32, width: f32, height: f32) -> Self {
        Self {
            page_number,
            width,
            height,
            columns: Vec::new(),
            blocks: Vec::new(),
            tables: Vec::new(),
            table_span_indices: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Check if the page has neither blocks nor tables.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty() && self.tables.is_empty()
    }

    /// Get the number of blocks on the page.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Get the number of tables on the page.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Blocks belonging to one column, top to bottom.
    pub fn column_blocks(&self, column_index: usize) -> impl Iterator<Item = &Block> {
        self.blocks
            .iter()
            .filter(move |b| b.column_index == Some(column_index))
    }

    /// Get plain text content of the page.
    ///
    /// Blocks appear in reading order. Each table's fixed-width text is placed
    /// before the first block that starts below the table's top edge.
    pub fn plain_text(&self) -> String {
        let mut tables: Vec<&RenderedTable> = self.tables.iter().filter(|t| !t.is_empty()).collect();
        tables.sort_by(|a, b| a.bbox.y0.total_cmp(&b.bbox.y0));
        let mut tables = tables.into_iter().peekable();

        let mut parts: Vec<&str> = Vec::new();
        for block in &self.blocks {
            while let Some(table) = tables.next_if(|t| t.bbox.y0 < block.bbox.y0) {
                parts.push(&table.ascii_text);
            }
            parts.push(&block.text);
        }
        parts.extend(tables.map(|t| t.ascii_text.as_str()));

        parts.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlockType, BoundingBox};

    #[test]
    fn test_page_new() {
        let page = Page::new(1, 612.0, 792.0);
        assert_eq!(page.page_number, 1);
        assert_eq!(page.dimensions(), (612.0, 792.0));
        assert!(page.is_empty());
        assert_eq!(page.plain_text(), "");
    }

    #[test]
    fn test_diagnostic_from_error() {
        let err = Error::GeometryInput {
            index: 2,
            reason: "inverted bounding box".to_string(),
        };
        let diag = Diagnostic::from_error(&err).unwrap();
        assert_eq!(diag.kind, DiagnosticKind::GeometryInput);
        assert!(diag.message.contains("index 2"));

        let fatal = Error::InvalidConfig("x".to_string());
        assert!(Diagnostic::from_error(&fatal).is_none());
    }

    #[test]
    fn test_plain_text_places_tables_by_position() {
        let mut page = Page::new(1, 612.0, 792.0);
        page.blocks.push(Block::new(
            BlockType::Paragraph,
            "Above",
            BoundingBox::new(50.0, 50.0, 300.0, 62.0),
        ));
        page.blocks.push(Block::new(
            BlockType::Paragraph,
            "Below",
            BoundingBox::new(50.0, 400.0, 300.0, 412.0),
        ));
        page.tables.push(RenderedTable {
            ascii_text: "+---+".to_string(),
            markdown_text: String::new(),
            num_rows: 1,
            num_cols: 1,
            has_header: false,
            bbox: BoundingBox::new(50.0, 200.0, 300.0, 300.0),
            cells: vec![vec!["x".to_string()]],
        });

        assert_eq!(page.plain_text(), "Above\n\n+---+\n\nBelow");
    }

    #[test]
    fn test_page_input_builder() {
        let input = PageInput::letter(2)
            .with_spans(vec![TextSpan::from_box("a", 0.0, 0.0, 5.0, 10.0, 10.0)]);
        assert_eq!(input.page_number, 2);
        assert_eq!(input.width, 612.0);
        assert_eq!(input.spans.len(), 1);
        assert!(input.tables.is_empty());
    }
}
