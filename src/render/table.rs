//! Fixed-width and Markdown table rendering.

use super::style::TableStyle;
use crate::layout::LayoutOptions;
use crate::model::{RenderedTable, TableCellGrid};

/// Renders table grids as bordered fixed-width text and Markdown.
///
/// Rendering is pure: the same grid always produces the same strings.
#[derive(Debug, Clone, Default)]
pub struct AsciiTableRenderer {
    style: TableStyle,
}

impl AsciiTableRenderer {
    /// Create a renderer with the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given style.
    pub fn with_style(style: TableStyle) -> Self {
        Self { style }
    }

    /// Create a renderer using the table settings of layout options.
    pub fn from_options(options: &LayoutOptions) -> Self {
        Self::with_style(TableStyle::from_options(options))
    }

    /// Get the style.
    pub fn style(&self) -> &TableStyle {
        &self.style
    }

    /// Render a grid.
    pub fn render(&self, grid: &TableCellGrid) -> RenderedTable {
        let cells = grid.to_text_grid();
        let (ascii_text, markdown_text) = if grid.is_empty() {
            (String::new(), String::new())
        } else {
            (
                self.render_ascii(&cells, grid.header_row_count),
                self.render_markdown(&cells, grid.header_row_count),
            )
        };

        RenderedTable {
            ascii_text,
            markdown_text,
            num_rows: grid.rows,
            num_cols: grid.cols,
            has_header: grid.header_row_count > 0,
            bbox: grid.bbox,
            cells,
        }
    }

    /// Content width of each column, within the style's limits.
    pub fn column_widths(&self, cells: &[Vec<String>]) -> Vec<usize> {
        let cols = cells.iter().map(Vec::len).max().unwrap_or(0);
        (0..cols)
            .map(|c| {
                cells
                    .iter()
                    .filter_map(|row| row.get(c))
                    .map(|cell| display_width(cell))
                    .max()
                    .unwrap_or(0)
                    .clamp(self.style.min_width, self.style.max_width.max(self.style.min_width))
            })
            .collect()
    }

    /// Render row-major cells as a bordered fixed-width table.
    ///
    /// A separator follows the header rows when there are body rows below them.
    pub fn render_ascii(&self, cells: &[Vec<String>], header_rows: usize) -> String {
        let widths = self.column_widths(cells);
        if cells.is_empty() || widths.is_empty() {
            return String::new();
        }

        let border = self.border(&widths);
        let header_rows = header_rows.min(cells.len());

        let mut lines = Vec::with_capacity(cells.len() + 3);
        lines.push(border.clone());
        for (r, row) in cells.iter().enumerate() {
            lines.push(self.row(row, &widths));
            if r + 1 == header_rows && header_rows < cells.len() {
                lines.push(border.clone());
            }
        }
        lines.push(border);

        lines.join("\n")
    }

    fn border(&self, widths: &[usize]) -> String {
        let mut line = String::new();
        line.push(self.style.corner);
        for &width in widths {
            let rendered = width + 2 * self.style.padding;
            line.extend(std::iter::repeat(self.style.horizontal).take(rendered));
            line.push(self.style.corner);
        }
        line
    }

    fn row(&self, row: &[String], widths: &[usize]) -> String {
        let pad = " ".repeat(self.style.padding);
        let mut line = String::new();
        line.push(self.style.vertical);
        for (c, &width) in widths.iter().enumerate() {
            let text = self.fit(row.get(c).map(String::as_str).unwrap_or(""), width);
            line.push_str(&pad);
            line.push_str(&text);
            line.extend(std::iter::repeat(' ').take(width - display_width(&text)));
            line.push_str(&pad);
            line.push(self.style.vertical);
        }
        line
    }

    /// Flatten a cell and truncate it to `width` characters.
    fn fit(&self, cell: &str, width: usize) -> String {
        let flat = flatten(cell);
        if display_width(&flat) <= width {
            return flat;
        }

        let marker = self.style.ellipsis.chars().count();
        if width <= marker {
            return flat.chars().take(width).collect();
        }
        let mut truncated: String = flat.chars().take(width - marker).collect();
        truncated.push_str(&self.style.ellipsis);
        truncated
    }

    /// Render row-major cells as a Markdown table.
    ///
    /// The first row is the header. Multiple header rows are merged per
    /// column. Cells are escaped but never truncated.
    pub fn render_markdown(&self, cells: &[Vec<String>], header_rows: usize) -> String {
        let cols = cells.iter().map(Vec::len).max().unwrap_or(0);
        if cells.is_empty() || cols == 0 {
            return String::new();
        }

        let header_rows = header_rows.clamp(1, cells.len());
        let cell = |row: &Vec<String>, c: usize| escape_cell(row.get(c).map(String::as_str).unwrap_or(""));

        let header: Vec<String> = (0..cols)
            .map(|c| {
                cells[..header_rows]
                    .iter()
                    .map(|row| cell(row, c))
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        let body: Vec<Vec<String>> = cells[header_rows..]
            .iter()
            .map(|row| (0..cols).map(|c| cell(row, c)).collect())
            .collect();

        let widths: Vec<usize> = (0..cols)
            .map(|c| {
                std::iter::once(&header[c])
                    .chain(body.iter().map(|row| &row[c]))
                    .map(|text| display_width(text))
                    .max()
                    .unwrap_or(0)
                    .max(3)
            })
            .collect();

        let mut lines = Vec::with_capacity(body.len() + 2);
        lines.push(markdown_row(&header, &widths));
        lines.push(markdown_row(
            &widths.iter().map(|&w| "-".repeat(w)).collect::<Vec<_>>(),
            &widths,
        ));
        lines.extend(body.iter().map(|row| markdown_row(row, &widths)));

        lines.join("\n")
    }
}

fn markdown_row(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (text, &width) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(text);
        line.extend(std::iter::repeat(' ').take(width.saturating_sub(display_width(text))));
        line.push_str(" |");
    }
    line
}

/// Display length of cell text, in characters.
fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Replace line breaks and tabs with spaces.
fn flatten(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, '\n' | '\r' | '\t') { ' ' } else { c })
        .collect()
}

/// Flatten and escape a cell for Markdown.
fn escape_cell(text: &str) -> String {
    flatten(text).trim().replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoundingBox;

    fn grid(rows: Vec<Vec<&str>>, header: usize) -> TableCellGrid {
        TableCellGrid::from_rows(rows, BoundingBox::new(0.0, 0.0, 200.0, 50.0)).with_header_rows(header)
    }

    #[test]
    fn test_column_widths_floor_and_cap() {
        let renderer = AsciiTableRenderer::new();
        let cells = vec![vec!["a".to_string(), "x".repeat(50), "hello".to_string()]];
        assert_eq!(renderer.column_widths(&cells), vec![3, 40, 5]);
    }

    #[test]
    fn test_render_ascii_with_header() {
        let table = AsciiTableRenderer::new().render(&grid(
            vec![vec!["Name", "Age"], vec!["Alice", "30"]],
            1,
        ));

        let expected = "\
+-------+-----+
| Name  | Age |
+-------+-----+
| Alice | 30  |
+-------+-----+";
        assert_eq!(table.ascii_text, expected);
        assert!(table.has_header);
        assert_eq!(table.num_rows, 2);
    }

    #[test]
    fn test_no_header_separator_without_header() {
        let table = AsciiTableRenderer::new().render(&grid(vec![vec!["a"], vec!["b"]], 0));
        assert_eq!(table.ascii_text.lines().count(), 4);
        assert!(!table.has_header);
    }

    #[test]
    fn test_all_header_rows_single_bottom_border() {
        let table = AsciiTableRenderer::new().render(&grid(vec![vec!["a"], vec!["b"]], 2));
        assert_eq!(table.ascii_text.lines().count(), 4);
    }

    #[test]
    fn test_truncation() {
        let renderer = AsciiTableRenderer::with_style(TableStyle::new().with_widths(3, 8));
        let table = renderer.render(&grid(vec![vec!["abcdefghijkl"]], 0));
        assert_eq!(table.ascii_text.lines().nth(1), Some("| abcde... |"));
    }

    #[test]
    fn test_flattened_whitespace() {
        let table = AsciiTableRenderer::new().render(&grid(vec![vec!["two\nlines"]], 0));
        assert_eq!(table.ascii_text.lines().nth(1), Some("| two lines |"));
    }

    #[test]
    fn test_custom_border() {
        let style = TableStyle::new().with_border('#', '=', '!');
        let table = AsciiTableRenderer::with_style(style).render(&grid(vec![vec!["abc"]], 0));
        assert_eq!(table.ascii_text, "#=====#\n! abc !\n#=====#");
    }

    #[test]
    fn test_markdown_merges_header_rows() {
        let table = AsciiTableRenderer::new().render(&grid(
            vec![vec!["Q1", "Q2"], vec!["Sales", "Costs"], vec!["10", "20"]],
            2,
        ));
        let expected = "\
| Q1 Sales | Q2 Costs |
| -------- | -------- |
| 10       | 20       |";
        assert_eq!(table.markdown_text, expected);
    }

    #[test]
    fn test_markdown_escapes_pipes() {
        let table = AsciiTableRenderer::new().render(&grid(vec![vec!["a|b"], vec!["c"]], 1));
        assert!(table.markdown_text.starts_with("| a\\|b |"));
    }

    #[test]
    fn test_empty_grid() {
        let empty = TableCellGrid::new(0, 0, BoundingBox::default());
        let table = AsciiTableRenderer::new().render(&empty);
        assert!(table.ascii_text.is_empty());
        assert!(table.markdown_text.is_empty());
        assert!(table.is_empty());
    }
}
