//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{Block, Page, RenderedTable};

/// A page that could not be analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageError {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Error description
    pub message: String,
}

/// The analyzed pages of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Successfully analyzed pages, in page-number order
    pub pages: Vec<Page>,

    /// Pages that failed, in page-number order
    pub errors: Vec<PageError>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of analyzed pages.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by its page number.
    pub fn get_page(&self, page_number: u32) -> Option<&Page> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Record a page failure.
    pub fn add_error(&mut self, page_number: u32, message: impl Into<String>) {
        self.errors.push(PageError {
            page_number,
            message: message.into(),
        });
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Check if any page failed.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Every block with its page number, in reading order.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (u32, &Block)> {
        self.pages
            .iter()
            .flat_map(|p| p.blocks.iter().map(move |b| (p.page_number, b)))
    }

    /// Every table with its page number.
    pub fn iter_tables(&self) -> impl Iterator<Item = (u32, &RenderedTable)> {
        self.pages
            .iter()
            .flat_map(|p| p.tables.iter().map(move |t| (p.page_number, t)))
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.plain_text())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
