//! Text blocks produced by layout analysis.

use serde::{Deserialize, Serialize};

use super::BoundingBox;

/// Classification of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockType {
    /// A heading (large font, short)
    Heading,
    /// A regular paragraph
    Paragraph,
    /// A bulleted or numbered list item
    ListItem,
    /// A caption next to a table
    Caption,
    /// Content spanning more than one column
    FullWidth,
    /// Running header in the top page margin
    Header,
    /// Running footer in the bottom page margin
    Footer,
}

impl BlockType {
    /// Check whether blocks of this type belong to no column.
    pub fn is_page_level(&self) -> bool {
        matches!(
            self,
            BlockType::FullWidth | BlockType::Header | BlockType::Footer
        )
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

/// A logical block of text in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block classification
    pub block_type: BlockType,

    /// Box enclosing every line of the block
    pub bbox: BoundingBox,

    /// Reconstructed text
    pub text: String,

    /// Owning column, or `None` for page-level blocks
    pub column_index: Option<usize>,

    /// Dominant font size
    pub font_size: f32,

    /// Number of source lines
    pub line_count: usize,

    /// Detected alignment
    pub alignment: Alignment,

    /// First-line indentation relative to the block's left edge, in points
    pub indentation: f32,

    /// Mean baseline distance between lines (0 for single-line blocks)
    pub line_spacing: f32,

    /// Indices of the source spans in the page input
    pub span_indices: Vec<usize>,
}

impl Block {
    /// Create a block with default metadata.
    pub fn new(block_type: BlockType, text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            block_type,
            bbox,
            text: text.into(),
            column_index: None,
            font_size: 0.0,
            line_count: 1,
            alignment: Alignment::Left,
            indentation: 0.0,
            line_spacing: 0.0,
            span_indices: Vec::new(),
        }
    }

    /// Set the column and return self.
    pub fn in_column(mut self, column_index: usize) -> Self {
        self.column_index = Some(column_index);
        self
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.block_type == BlockType::Heading
    }

    /// Check if the block spans the page rather than one column.
    pub fn is_full_width(&self) -> bool {
        self.column_index.is_none()
    }

    /// Number of whitespace-separated words.
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Check if the block has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_builder() {
        let block = Block::new(
            BlockType::Paragraph,
            "Two words",
            BoundingBox::new(0.0, 0.0, 10.0, 10.0),
        )
        .in_column(1);

        assert_eq!(block.column_index, Some(1));
        assert!(!block.is_full_width());
        assert_eq!(block.word_count(), 2);
        assert!(!block.is_heading());
    }

    #[test]
    fn test_page_level_types() {
        assert!(BlockType::FullWidth.is_page_level());
        assert!(BlockType::Header.is_page_level());
        assert!(!BlockType::Caption.is_page_level());
    }

    #[test]
    fn test_block_type_serde_names() {
        let json = serde_json::to_string(&BlockType::ListItem).unwrap();
        assert_eq!(json, "\"list_item\"");
        let json = serde_json::to_string(&BlockType::FullWidth).unwrap();
        assert_eq!(json, "\"full_width\"");
    }
}
