//! Fixed-width table style.

use crate::layout::LayoutOptions;

/// Border characters and sizing for fixed-width tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStyle {
    /// Border junction character
    pub corner: char,

    /// Horizontal border character
    pub horizontal: char,

    /// Cell separator character
    pub vertical: char,

    /// Marker that ends a truncated cell
    pub ellipsis: String,

    /// Spaces on each side of the cell content
    pub padding: usize,

    /// Minimum content width per column
    pub min_width: usize,

    /// Maximum content width per column
    pub max_width: usize,
}

impl TableStyle {
    /// Create the default `+`, `-`, `|` style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take padding and width limits from layout options.
    pub fn from_options(options: &LayoutOptions) -> Self {
        Self {
            padding: options.table_cell_padding,
            min_width: options.table_min_column_width,
            max_width: options.table_max_column_width,
            ..Self::default()
        }
    }

    /// Set the border characters.
    pub fn with_border(mut self, corner: char, horizontal: char, vertical: char) -> Self {
        self.corner = corner;
        self.horizontal = horizontal;
        self.vertical = vertical;
        self
    }

    /// Set the truncation marker.
    pub fn with_ellipsis(mut self, ellipsis: impl Into<String>) -> Self {
        self.ellipsis = ellipsis.into();
        self
    }

    /// Set cell padding.
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    /// Set the column content width limits.
    ///
    /// `max` is raised to `min` when smaller.
    pub fn with_widths(mut self, min: usize, max: usize) -> Self {
        self.min_width = min;
        self.max_width = max.max(min);
        self
    }
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            corner: '+',
            horizontal: '-',
            vertical: '|',
            ellipsis: "...".to_string(),
            padding: 1,
            min_width: 3,
            max_width: 40,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_from_options() {
        let options = LayoutOptions::new()
            .with_table_cell_padding(2)
            .with_table_min_column_width(4)
            .with_table_max_column_width(20);
        let style = TableStyle::from_options(&options);

        assert_eq!(style.padding, 2);
        assert_eq!(style.min_width, 4);
        assert_eq!(style.max_width, 20);
        assert_eq!(style.corner, '+');
    }

    #[test]
    fn test_style_builder() {
        let style = TableStyle::new()
            .with_border('*', '=', '!')
            .with_ellipsis("~")
            .with_widths(10, 5);

        assert_eq!(style.vertical, '!');
        assert_eq!(style.ellipsis, "~");
        assert_eq!(style.max_width, 10);
    }
}
