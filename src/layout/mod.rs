//! Layout analysis: column detection, paragraph reconstruction and page
//! assembly.

mod analyzer;
pub mod cluster;
mod columns;
mod options;
mod paragraphs;
pub mod text;

pub use analyzer::LayoutAnalyzer;
pub use columns::{ColumnDetector, ColumnLayout};
pub use options::{ErrorMode, LayoutOptions};
pub use paragraphs::ParagraphReconstructor;
