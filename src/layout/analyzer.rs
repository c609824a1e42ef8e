//! Page and document layout analysis.

use log::{debug, warn};
use rayon::prelude::*;

use super::cluster::median;
use super::columns::{ColumnDetector, ColumnLayout};
use super::options::{ErrorMode, LayoutOptions};
use super::paragraphs::{median_font, ParagraphReconstructor};
use super::text;
use crate::error::{Error, Result};
use crate::model::{
    Block, BlockType, Diagnostic, Document, Line, Page, PageInput, RenderedTable, TextSpan,
};
use crate::render::AsciiTableRenderer;

/// Orchestrates column detection, paragraph reconstruction and table
/// rendering for whole pages.
///
/// # Example
///
/// ```
/// use pdflayout::{LayoutAnalyzer, PageInput, TextSpan};
///
/// let mut input = PageInput::letter(1);
/// input.add_span(TextSpan::from_box("Hello world", 72.0, 90.0, 200.0, 100.0, 10.0));
///
/// let page = LayoutAnalyzer::new().analyze_page(&input).unwrap();
/// assert_eq!(page.blocks.len(), 1);
/// assert_eq!(page.blocks[0].text, "Hello world");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LayoutAnalyzer {
    options: LayoutOptions,
    columns: ColumnDetector,
    paragraphs: ParagraphReconstructor,
    tables: AsciiTableRenderer,
}

/// Column lines of one column, plus its median font.
struct ColumnLines {
    lines: Vec<Line>,
    body_font: f32,
}

impl LayoutAnalyzer {
    /// Create an analyzer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with validated options.
    pub fn with_options(options: LayoutOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            columns: ColumnDetector::with_options(options.clone()),
            paragraphs: ParagraphReconstructor::with_options(options.clone()),
            tables: AsciiTableRenderer::from_options(&options),
            options,
        })
    }

    /// Get the options.
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Analyze one page.
    ///
    /// Malformed spans and inconsistent table grids are skipped and recorded
    /// as diagnostics. Only unusable page dimensions fail.
    pub fn analyze_page(&self, input: &PageInput) -> Result<Page> {
        self.check_dimensions(input)?;

        let mut page = Page::new(input.page_number, input.width, input.height);
        let spans = &input.spans;

        let mut valid = Vec::with_capacity(spans.len());
        for (i, span) in spans.iter().enumerate() {
            if let Err(err) = span.validate(i) {
                warn!("Page {}: skipping span: {}", input.page_number, err);
                page.diagnostics.extend(Diagnostic::from_error(&err));
            } else if !span.is_blank() {
                valid.push(i);
            }
        }

        for (t, grid) in input.tables.iter().enumerate() {
            for err in grid.validate(t) {
                warn!("Page {}: {}", input.page_number, err);
                page.diagnostics.extend(Diagnostic::from_error(&err));
            }
            page.tables.push(self.tables.render(grid));
        }

        let (body, absorbed): (Vec<usize>, Vec<usize>) = valid
            .into_iter()
            .partition(|&i| self.absorbing_table(&spans[i], &page.tables).is_none());
        page.table_span_indices = absorbed;

        let (header, body, footer) = self.split_margins(spans, body, input.height);

        let layout = self.columns.detect(spans, &body, input.width);
        let mut blocks = self.reading_order(spans, &layout, &mut page);

        if !header.is_empty() || !footer.is_empty() {
            let body_font = page_body_font(&page, &blocks);
            let mut framed = self.margin_blocks(spans, &header, BlockType::Header, body_font);
            framed.append(&mut blocks);
            framed.append(&mut self.margin_blocks(spans, &footer, BlockType::Footer, body_font));
            blocks = framed;
        }

        let (kept, dropped): (Vec<Block>, Vec<Block>) = blocks
            .into_iter()
            .partition(|b| self.overlapping_table(b, &page.tables).is_none());
        for block in dropped {
            debug!("Page {}: dropping block under table: {:?}", input.page_number, block.text);
            page.table_span_indices.extend(block.span_indices);
        }
        page.table_span_indices.sort_unstable();

        page.blocks = kept;
        self.mark_captions(&mut page);

        debug!(
            "Page {}: {} column(s), {} block(s), {} table(s), {} diagnostic(s)",
            page.page_number,
            page.columns.len(),
            page.blocks.len(),
            page.tables.len(),
            page.diagnostics.len()
        );
        Ok(page)
    }

    fn check_dimensions(&self, input: &PageInput) -> Result<()> {
        let (width, height) = (input.width, input.height);
        let reason = if !width.is_finite() || !height.is_finite() {
            Some(format!("non-finite page dimensions {}x{}", width, height))
        } else if width < 0.0 || height < 0.0 {
            Some(format!("negative page dimensions {}x{}", width, height))
        } else if width == 0.0 && !input.spans.is_empty() {
            Some("zero page width with text present".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(Error::LayoutAnalysis {
                page: input.page_number,
                reason,
            }),
            None => Ok(()),
        }
    }

    /// Index of the first non-empty table covering most of the span.
    fn absorbing_table(&self, span: &TextSpan, tables: &[RenderedTable]) -> Option<usize> {
        let area = span.bbox.area();
        tables.iter().position(|t| {
            !t.is_empty()
                && area > 0.0
                && t.bbox.intersection_area(&span.bbox) > self.options.table_overlap_threshold * area
        })
    }

    fn overlapping_table(&self, block: &Block, tables: &[RenderedTable]) -> Option<usize> {
        let area = block.bbox.area();
        tables.iter().position(|t| {
            !t.is_empty()
                && area > 0.0
                && t.bbox.intersection_area(&block.bbox) > self.options.table_overlap_threshold * area
        })
    }

    /// Split span indices into header, body and footer.
    fn split_margins(
        &self,
        spans: &[TextSpan],
        indices: Vec<usize>,
        height: f32,
    ) -> (Vec<usize>, Vec<usize>, Vec<usize>) {
        if !self.options.detect_header_footer {
            return (Vec::new(), indices, Vec::new());
        }

        let footer_top = height - self.options.footer_margin;
        let mut header = Vec::new();
        let mut body = Vec::new();
        let mut footer = Vec::new();
        for i in indices {
            let bbox = &spans[i].bbox;
            if bbox.y1 <= self.options.header_margin {
                header.push(i);
            } else if bbox.y0 >= footer_top {
                footer.push(i);
            } else {
                body.push(i);
            }
        }
        (header, body, footer)
    }

    fn margin_blocks(
        &self,
        spans: &[TextSpan],
        indices: &[usize],
        block_type: BlockType,
        body_font: f32,
    ) -> Vec<Block> {
        let lines = self.paragraphs.build_lines(spans, indices);
        let mut blocks = self.paragraphs.blocks_from_lines(&lines, None, body_font);
        for block in &mut blocks {
            block.block_type = block_type;
        }
        blocks
    }

    /// Build the page's blocks in reading order and fill in its columns.
    ///
    /// Page-wide lines cut the page into horizontal sections. Each section
    /// lists its column blocks column by column, then the page-wide block
    /// below it.
    fn reading_order(&self, spans: &[TextSpan], layout: &ColumnLayout, page: &mut Page) -> Vec<Block> {
        let columns: Vec<ColumnLines> = layout
            .column_spans
            .iter()
            .map(|indices| {
                let lines = self.paragraphs.build_lines(spans, indices);
                let body_font = median_font(&lines);
                ColumnLines { lines, body_font }
            })
            .collect();
        let wide_lines = self.paragraphs.build_lines(spans, &layout.page_wide);

        let column_baselines: Vec<f32> = columns
            .iter()
            .flat_map(|c| c.lines.iter().map(|l| l.baseline_y))
            .collect();
        let runs = split_runs(wide_lines, &column_baselines);

        let mut fonts: Vec<f32> = columns
            .iter()
            .flat_map(|c| c.lines.iter())
            .chain(runs.iter().flatten())
            .map(|l| l.font_size)
            .collect();
        let page_font = median(&mut fonts).unwrap_or(0.0);

        let run_starts: Vec<f32> = runs
            .iter()
            .filter_map(|run| run.first().map(|l| l.baseline_y))
            .collect();
        let section_of = |baseline: f32| run_starts.iter().filter(|&&start| start < baseline).count();

        let mut blocks = Vec::new();
        for section in 0..=runs.len() {
            for (c, column) in columns.iter().enumerate() {
                let lines: Vec<Line> = column
                    .lines
                    .iter()
                    .filter(|l| section_of(l.baseline_y) == section)
                    .cloned()
                    .collect();
                if !lines.is_empty() {
                    blocks.extend(self.paragraphs.blocks_from_lines(&lines, Some(c), column.body_font));
                }
            }
            if let Some(run) = runs.get(section) {
                for mut block in self.paragraphs.blocks_from_lines(run, None, page_font) {
                    block.block_type = BlockType::FullWidth;
                    blocks.push(block);
                }
            }
        }

        page.columns = layout.columns.clone();
        for (column, lines) in page.columns.iter_mut().zip(columns) {
            column.lines = lines.lines;
        }

        blocks
    }

    /// Relabel paragraphs sitting next to a table as captions.
    fn mark_captions(&self, page: &mut Page) {
        if page.tables.iter().all(RenderedTable::is_empty) {
            return;
        }

        let body_font = page_body_font(page, &page.blocks);
        let factor = self.options.caption_distance_factor;

        for block in &mut page.blocks {
            if block.block_type != BlockType::Paragraph {
                continue;
            }
            let near_table = page.tables.iter().filter(|t| !t.is_empty()).any(|t| {
                block.bbox.vertical_gap(&t.bbox) <= factor * block.font_size
                    && block.bbox.horizontal_overlap(&t.bbox) > 0.0
            });
            let looks_like_caption =
                block.font_size < body_font || text::has_caption_prefix(&block.text);

            if near_table && looks_like_caption {
                block.block_type = BlockType::Caption;
            }
        }
    }

    /// Analyze every page of a document.
    ///
    /// Pages run in parallel when enabled. Results are ordered by page
    /// number. In lenient mode failing pages are recorded in
    /// [`Document::errors`]; in strict mode the first failure is returned.
    pub fn analyze_document(&self, pages: &[PageInput]) -> Result<Document> {
        let mut results: Vec<(u32, Result<Page>)> = if self.options.parallel {
            pages
                .par_iter()
                .map(|input| (input.page_number, self.analyze_page(input)))
                .collect()
        } else {
            pages
                .iter()
                .map(|input| (input.page_number, self.analyze_page(input)))
                .collect()
        };

        results.sort_by_key(|(page_number, _)| *page_number);

        let mut document = Document::new();
        for (page_number, result) in results {
            match result {
                Ok(page) => document.add_page(page),
                Err(err) if self.options.error_mode == ErrorMode::Strict => return Err(err),
                Err(err) => {
                    warn!("Page {} failed: {}", page_number, err);
                    document.add_error(page_number, err.to_string());
                }
            }
        }

        Ok(document)
    }

    /// Analyze pages lazily, in input order.
    ///
    /// Dropping the iterator stops further analysis.
    pub fn analyze_iter<'a>(
        &'a self,
        pages: &'a [PageInput],
    ) -> impl Iterator<Item = Result<Page>> + 'a {
        pages.iter().map(move |input| self.analyze_page(input))
    }
}

/// Group sorted page-wide lines into runs not separated by column content.
fn split_runs(lines: Vec<Line>, column_baselines: &[f32]) -> Vec<Vec<Line>> {
    let mut runs: Vec<Vec<Line>> = Vec::new();
    for line in lines {
        let joins = runs.last().and_then(|run| run.last()).is_some_and(|prev| {
            !column_baselines
                .iter()
                .any(|&b| b > prev.baseline_y && b < line.baseline_y)
        });
        match runs.last_mut() {
            Some(run) if joins => run.push(line),
            _ => runs.push(vec![line]),
        }
    }
    runs
}

/// Font size of the body text, weighted by block size.
fn page_body_font(page: &Page, blocks: &[Block]) -> f32 {
    let mut fonts: Vec<f32> = page
        .columns
        .iter()
        .flat_map(|c| c.lines.iter().map(|l| l.font_size))
        .collect();
    if fonts.is_empty() {
        fonts = blocks.iter().map(|b| b.font_size).collect();
    }
    median(&mut fonts).unwrap_or(0.0)
}
