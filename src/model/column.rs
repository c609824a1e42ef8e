//! Lines and column bands.

use serde::{Deserialize, Serialize};

use super::BoundingBox;

/// Spans sharing a baseline, ordered left to right.
///
/// A line refers to its spans by index into the page input rather than
/// owning them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Indices of the spans in this line, sorted by x0
    pub span_indices: Vec<usize>,
    /// Baseline Y position (mean of the member baselines)
    pub baseline_y: f32,
    /// Union of the member boxes
    pub bbox: BoundingBox,
    /// Dominant font size, weighted by character count
    pub font_size: f32,
    /// Joined text of the spans
    pub text: String,
}

impl Line {
    /// Leftmost X position.
    pub fn left(&self) -> f32 {
        self.bbox.x0
    }

    /// Rightmost X position.
    pub fn right(&self) -> f32 {
        self.bbox.x1
    }

    /// Check if the line has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A detected column in the page layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column index (0 = leftmost)
    pub index: usize,
    /// Horizontal extent `[low, high)` owned by this column
    pub x_range: (f32, f32),
    /// Lines in this column, top to bottom
    pub lines: Vec<Line>,
}

impl Column {
    /// Create an empty column.
    pub fn new(index: usize, low: f32, high: f32) -> Self {
        Self {
            index,
            x_range: (low, high),
            lines: Vec::new(),
        }
    }

    /// Width of the column band.
    pub fn width(&self) -> f32 {
        self.x_range.1 - self.x_range.0
    }

    /// Check if an X coordinate falls within this column's half-open range.
    pub fn contains(&self, x: f32) -> bool {
        x >= self.x_range.0 && x < self.x_range.1
    }

    /// Number of lines in the column.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}
