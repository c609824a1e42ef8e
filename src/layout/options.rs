//! Layout analysis options and configuration.

use crate::error::{Error, Result};

/// Options for layout analysis.
///
/// Every heuristic threshold lives here. Fractions are relative to the page
/// width, ratios are relative to a font size or line spacing measured on the
/// page.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Minimum gutter width as a fraction of page width
    pub min_gap_fraction: f32,

    /// Minimum column width as a fraction of page width
    pub min_column_width_fraction: f32,

    /// Spans allowed to cross a gutter, as a fraction of the text coverage beside it
    pub gutter_noise_fraction: f32,

    /// Spans wider than this multiple of the narrowest column are page-wide
    pub page_wide_ratio: f32,

    /// A lone span covering this fraction of the page width is page-wide
    pub full_width_fraction: f32,

    /// Baseline gap (relative to typical line spacing) that breaks a paragraph
    pub line_spacing_multiplier: f32,

    /// Font size (relative to the column median) that marks a heading
    pub heading_font_ratio: f32,

    /// Longest text still classified as a heading, in characters
    pub heading_max_chars: usize,

    /// Relative font size change between lines that breaks a block
    pub font_change_tolerance: f32,

    /// Use first-line indentation as a paragraph break signal
    pub indent_breaks: bool,

    /// A line ending this far (fraction of column text width) short of the right margin is short
    pub short_line_fraction: f32,

    /// Minimum indentation (multiple of font size) that counts as indented
    pub indent_min_fraction: f32,

    /// Gap between spans (multiple of average char width) that inserts a space
    pub word_gap_ratio: f32,

    /// NFC-normalize span text and expand ligatures
    pub normalize_text: bool,

    /// Share of a span's or block's area inside a table that hands it to the table
    pub table_overlap_threshold: f32,

    /// Maximum caption distance from a table (multiple of caption font size)
    pub caption_distance_factor: f32,

    /// Spaces on each side of a rendered table cell
    pub table_cell_padding: usize,

    /// Minimum rendered column content width, in characters
    pub table_min_column_width: usize,

    /// Maximum rendered column content width; longer cells are truncated
    pub table_max_column_width: usize,

    /// Split spans in the top/bottom page margins into header/footer blocks
    pub detect_header_footer: bool,

    /// Height of the header area, in points
    pub header_margin: f32,

    /// Height of the footer area, in points
    pub footer_margin: f32,

    /// Analyze pages of a document in parallel
    pub parallel: bool,

    /// How page failures affect document analysis
    pub error_mode: ErrorMode,
}

impl LayoutOptions {
    /// Create new layout options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum gutter width fraction.
    pub fn with_min_gap_fraction(mut self, fraction: f32) -> Self {
        self.min_gap_fraction = fraction;
        self
    }

    /// Set minimum column width fraction.
    pub fn with_min_column_width_fraction(mut self, fraction: f32) -> Self {
        self.min_column_width_fraction = fraction;
        self
    }

    /// Set paragraph-break spacing multiplier.
    pub fn with_line_spacing_multiplier(mut self, multiplier: f32) -> Self {
        self.line_spacing_multiplier = multiplier;
        self
    }

    /// Set heading font ratio.
    pub fn with_heading_font_ratio(mut self, ratio: f32) -> Self {
        self.heading_font_ratio = ratio;
        self
    }

    /// Set table cell padding.
    pub fn with_table_cell_padding(mut self, padding: usize) -> Self {
        self.table_cell_padding = padding;
        self
    }

    /// Set minimum table column width.
    pub fn with_table_min_column_width(mut self, width: usize) -> Self {
        self.table_min_column_width = width;
        self
    }

    /// Set maximum table column width.
    pub fn with_table_max_column_width(mut self, width: usize) -> Self {
        self.table_max_column_width = width;
        self
    }

    /// Enable or disable indentation-based paragraph breaks.
    pub fn with_indent_breaks(mut self, enabled: bool) -> Self {
        self.indent_breaks = enabled;
        self
    }

    /// Enable or disable text normalization.
    pub fn with_text_normalization(mut self, enabled: bool) -> Self {
        self.normalize_text = enabled;
        self
    }

    /// Enable header/footer detection with the given margins.
    pub fn with_header_footer(mut self, header_margin: f32, footer_margin: f32) -> Self {
        self.detect_header_footer = true;
        self.header_margin = header_margin;
        self.footer_margin = footer_margin;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail document analysis on the first page error.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<()> {
        let unit_fractions = [
            ("min_gap_fraction", self.min_gap_fraction),
            ("min_column_width_fraction", self.min_column_width_fraction),
            ("full_width_fraction", self.full_width_fraction),
            ("table_overlap_threshold", self.table_overlap_threshold),
        ];
        for (name, value) in unit_fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }

        let open_fractions = [
            ("gutter_noise_fraction", self.gutter_noise_fraction),
            ("short_line_fraction", self.short_line_fraction),
        ];
        for (name, value) in open_fractions {
            if !(0.0..1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be in [0, 1), got {}",
                    name, value
                )));
            }
        }

        let positives = [
            ("page_wide_ratio", self.page_wide_ratio),
            ("line_spacing_multiplier", self.line_spacing_multiplier),
            ("heading_font_ratio", self.heading_font_ratio),
            ("font_change_tolerance", self.font_change_tolerance),
            ("indent_min_fraction", self.indent_min_fraction),
            ("word_gap_ratio", self.word_gap_ratio),
            ("caption_distance_factor", self.caption_distance_factor),
        ];
        for (name, value) in positives {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        if self.detect_header_footer
            && !(self.header_margin >= 0.0 && self.footer_margin >= 0.0)
        {
            return Err(Error::InvalidConfig(
                "header and footer margins must be non-negative".to_string(),
            ));
        }

        if self.table_min_column_width == 0 {
            return Err(Error::InvalidConfig(
                "table_min_column_width must be at least 1".to_string(),
            ));
        }
        if self.table_max_column_width < self.table_min_column_width {
            return Err(Error::InvalidConfig(format!(
                "table_max_column_width ({}) is below table_min_column_width ({})",
                self.table_max_column_width, self.table_min_column_width
            )));
        }

        Ok(())
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            min_gap_fraction: 0.04,
            min_column_width_fraction: 0.1,
            gutter_noise_fraction: 0.1,
            page_wide_ratio: 1.5,
            full_width_fraction: 0.8,
            line_spacing_multiplier: 1.6,
            heading_font_ratio: 1.2,
            heading_max_chars: 120,
            font_change_tolerance: 0.15,
            indent_breaks: true,
            short_line_fraction: 0.15,
            indent_min_fraction: 1.0,
            word_gap_ratio: 0.2,
            normalize_text: true,
            table_overlap_threshold: 0.5,
            caption_distance_factor: 2.0,
            table_cell_padding: 1,
            table_min_column_width: 3,
            table_max_column_width: 40,
            detect_header_footer: false,
            header_margin: 36.0,
            footer_margin: 36.0,
            parallel: true,
            error_mode: ErrorMode::Lenient,
        }
    }
}

/// How page failures affect document analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Stop at the first failing page
    Strict,
    /// Record the failure and continue with the remaining pages
    #[default]
    Lenient,
}
