//! Rendering of table grids as fixed-width text and Markdown.

mod style;
mod table;

pub use style::TableStyle;
pub use table::AsciiTableRenderer;
