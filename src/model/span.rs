//! Positioned text fragments supplied by the text extractor.

use serde::{Deserialize, Serialize};

use super::BoundingBox;
use crate::error::{Error, Result};

/// A contiguous run of text with a known position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// Bounding box in page coordinates
    pub bbox: BoundingBox,
    /// Y coordinate of the baseline
    pub baseline_y: f32,
    /// Font size in points
    pub font_size: f32,
    /// Page number (1-indexed)
    pub page_number: u32,
}

impl TextSpan {
    /// Create a new span on page 1.
    pub fn new(text: impl Into<String>, bbox: BoundingBox, baseline_y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            bbox,
            baseline_y,
            font_size,
            page_number: 1,
        }
    }

    /// Create a span whose baseline sits at the bottom of its box.
    pub fn from_box(text: impl Into<String>, x0: f32, y0: f32, x1: f32, y1: f32, font_size: f32) -> Self {
        Self::new(text, BoundingBox::new(x0, y0, x1, y1), y1, font_size)
    }

    /// Set the page number and return self.
    pub fn on_page(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Check whether the span carries any visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Check the span's geometry.
    ///
    /// `index` is the span's position in the page input and is carried in the
    /// returned error.
    pub fn validate(&self, index: usize) -> Result<()> {
        let reason = if !self.bbox.is_finite() || !self.baseline_y.is_finite() {
            Some("non-finite coordinates")
        } else if self.bbox.is_inverted() {
            Some("inverted bounding box")
        } else if self.bbox.area() <= 0.0 {
            Some("zero-area bounding box")
        } else if !self.font_size.is_finite() || self.font_size <= 0.0 {
            Some("non-positive font size")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(Error::GeometryInput {
                index,
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Average character width, falling back to half the font size.
    pub fn avg_char_width(&self) -> f32 {
        let chars = self.text.chars().count();
        if chars > 0 && self.bbox.width() > 0.0 {
            self.bbox.width() / chars as f32
        } else {
            self.font_size * 0.5
        }
    }
}
