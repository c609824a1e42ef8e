//! Data model for layout analysis.
//!
//! Inputs ([`TextSpan`], [`TableCellGrid`], [`PageInput`]) come from the
//! text extractor and table detector. Outputs ([`Page`], [`Document`]) are
//! immutable values built once per page. Coordinates are in page space with
//! the origin at the top-left corner and y growing downward.

mod block;
mod column;
mod document;
mod geometry;
mod page;
mod span;
mod table;

pub use block::{Alignment, Block, BlockType};
pub use column::{Column, Line};
pub use document::{Document, PageError};
pub use geometry::BoundingBox;
pub use page::{Diagnostic, DiagnosticKind, Page, PageInput};
pub use span::TextSpan;
pub use table::{GridCell, RenderedTable, TableCellGrid};
