//! # pdflayout
//!
//! Layout analysis for text extracted from PDF pages.
//!
//! This library takes positioned text spans and detected table grids for each
//! page and reconstructs the reading structure: columns, paragraphs,
//! headings, list items, captions, and tables rendered as fixed-width text.
//!
//! ## Quick Start
//!
//! ```
//! use pdflayout::{analyze_page, PageInput, TextSpan};
//!
//! fn main() -> pdflayout::Result<()> {
//!     let mut input = PageInput::letter(1);
//!     input.add_span(TextSpan::from_box("Introduction", 72.0, 60.0, 200.0, 78.0, 18.0));
//!     input.add_span(TextSpan::from_box("Body text of the page.", 72.0, 90.0, 400.0, 100.0, 10.0));
//!
//!     let page = analyze_page(&input)?;
//!     for block in &page.blocks {
//!         println!("{:?}: {}", block.block_type, block.text);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Column detection**: gutter search over horizontal text coverage
//! - **Paragraph reconstruction**: spacing, font and indentation breaks
//! - **Page-wide elements**: titles crossing columns keep their position
//! - **Tables**: bordered fixed-width text and Markdown output
//! - **CJK support**: no spaces inserted between Chinese/Japanese characters
//! - **Parallel processing**: Uses Rayon for multi-page documents

pub mod error;
pub mod layout;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{
    ColumnDetector, ColumnLayout, ErrorMode, LayoutAnalyzer, LayoutOptions, ParagraphReconstructor,
};
pub use model::{
    Alignment, Block, BlockType, BoundingBox, Column, Diagnostic, DiagnosticKind, Document,
    GridCell, Line, Page, PageError, PageInput, RenderedTable, TableCellGrid, TextSpan,
};
pub use render::{AsciiTableRenderer, TableStyle};

/// Analyze one page with default options.
///
/// # Arguments
///
/// * `input` - Spans and table grids of the page
///
/// # Example
///
/// ```
/// use pdflayout::{analyze_page, PageInput};
///
/// let page = analyze_page(&PageInput::letter(1)).unwrap();
/// assert!(page.is_empty());
/// ```
pub fn analyze_page(input: &PageInput) -> Result<Page> {
    LayoutAnalyzer::new().analyze_page(input)
}

/// Analyze one page with custom options.
///
/// # Example
///
/// ```
/// use pdflayout::{analyze_page_with_options, LayoutOptions, PageInput};
///
/// let options = LayoutOptions::new().with_header_footer(40.0, 40.0);
/// let page = analyze_page_with_options(&PageInput::letter(1), options).unwrap();
/// assert_eq!(page.page_number, 1);
/// ```
pub fn analyze_page_with_options(input: &PageInput, options: LayoutOptions) -> Result<Page> {
    LayoutAnalyzer::with_options(options)?.analyze_page(input)
}

/// Analyze every page of a document with default options.
///
/// Pages are processed in parallel. Failing pages are recorded in
/// [`Document::errors`] instead of aborting the document.
///
/// # Example
///
/// ```
/// use pdflayout::{analyze_document, PageInput};
///
/// let pages = vec![PageInput::letter(2), PageInput::letter(1)];
/// let doc = analyze_document(&pages).unwrap();
/// assert_eq!(doc.pages[0].page_number, 1);
/// ```
pub fn analyze_document(pages: &[PageInput]) -> Result<Document> {
    LayoutAnalyzer::new().analyze_document(pages)
}

/// Analyze every page of a document with custom options.
///
/// # Example
///
/// ```
/// use pdflayout::{analyze_document_with_options, LayoutOptions, PageInput};
///
/// let options = LayoutOptions::new().sequential().strict();
/// let doc = analyze_document_with_options(&[PageInput::letter(1)], options).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// ```
pub fn analyze_document_with_options(pages: &[PageInput], options: LayoutOptions) -> Result<Document> {
    LayoutAnalyzer::with_options(options)?.analyze_document(pages)
}

/// Render a table grid with the default style.
///
/// # Example
///
/// ```
/// use pdflayout::{render_table, BoundingBox, TableCellGrid};
///
/// let grid = TableCellGrid::from_rows(vec![vec!["a", "b"]], BoundingBox::default());
/// let table = render_table(&grid);
/// assert_eq!(table.ascii_text, "+-----+-----+\n| a   | b   |\n+-----+-----+");
/// ```
pub fn render_table(grid: &TableCellGrid) -> RenderedTable {
    AsciiTableRenderer::new().render(grid)
}
