//! Line grouping and paragraph reconstruction within a column.

use std::ops::Range;

use log::debug;

use super::cluster::{cluster_by_gap, median, Interval};
use super::options::LayoutOptions;
use super::text;
use crate::model::{Alignment, Block, BlockType, BoundingBox, Line, TextSpan};

/// Margin deviation (points) below which a block edge counts as aligned.
const ALIGNMENT_TOLERANCE: f32 = 5.0;

/// Lines whose font sizes differ by at most this fraction feed the typical spacing.
const SPACING_FONT_SIMILARITY: f32 = 0.1;

/// Groups the spans of one column into lines and the lines into blocks.
#[derive(Debug, Clone, Default)]
pub struct ParagraphReconstructor {
    options: LayoutOptions,
}

impl ParagraphReconstructor {
    /// Create a reconstructor with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reconstructor with the given options.
    pub fn with_options(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Reconstruct the blocks of one column, top to bottom.
    ///
    /// `indices` selects the column's spans from `spans`.
    pub fn reconstruct(
        &self,
        spans: &[TextSpan],
        indices: &[usize],
        column_index: Option<usize>,
    ) -> Vec<Block> {
        let lines = self.build_lines(spans, indices);
        let body_font = median_font(&lines);
        self.blocks_from_lines(&lines, column_index, body_font)
    }

    /// Group spans into lines sorted by baseline.
    ///
    /// A span joins a line when its baseline is within half the smaller font
    /// size of the line's last span.
    pub fn build_lines(&self, spans: &[TextSpan], indices: &[usize]) -> Vec<Line> {
        let baselines: Vec<Interval> = indices
            .iter()
            .map(|&i| Interval::point(spans[i].baseline_y, i))
            .collect();

        let clusters = cluster_by_gap(&baselines, |cluster, candidate| {
            let last_font = cluster
                .last_member()
                .map(|i| spans[i].font_size)
                .unwrap_or(spans[candidate.index].font_size);
            0.5 * last_font.min(spans[candidate.index].font_size)
        });

        let mut lines: Vec<Line> = clusters
            .into_iter()
            .map(|cluster| self.make_line(spans, cluster.members))
            .collect();

        lines.sort_by(|a, b| {
            a.baseline_y
                .total_cmp(&b.baseline_y)
                .then_with(|| a.left().total_cmp(&b.left()))
        });
        lines
    }

    fn make_line(&self, spans: &[TextSpan], mut members: Vec<usize>) -> Line {
        members.sort_by(|&a, &b| spans[a].bbox.x0.total_cmp(&spans[b].bbox.x0).then(a.cmp(&b)));

        let mut text = String::new();
        let mut prev: Option<&TextSpan> = None;
        let mut weighted_font = 0.0;
        let mut total_chars = 0usize;

        for &idx in &members {
            let span = &spans[idx];
            let piece = if self.options.normalize_text {
                text::normalize(&span.text)
            } else {
                span.text.as_str().into()
            };

            if let Some(prev) = prev {
                let gap = span.bbox.x0 - prev.bbox.x1;
                let char_width = (prev.avg_char_width() + span.avg_char_width()) / 2.0;
                if gap > self.options.word_gap_ratio * char_width
                    && text::needs_separator(&text, &piece)
                {
                    text.push(' ');
                }
            }
            text.push_str(&piece);

            let chars = span.text.chars().filter(|c| !c.is_whitespace()).count();
            weighted_font += span.font_size * chars as f32;
            total_chars += chars;
            prev = Some(span);
        }

        let font_size = if total_chars > 0 {
            weighted_font / total_chars as f32
        } else {
            members.iter().map(|&i| spans[i].font_size).sum::<f32>() / members.len().max(1) as f32
        };
        let baseline_y =
            members.iter().map(|&i| spans[i].baseline_y).sum::<f32>() / members.len().max(1) as f32;
        let bbox = BoundingBox::enclosing(members.iter().map(|&i| &spans[i].bbox)).unwrap_or_default();

        Line {
            span_indices: members,
            baseline_y,
            bbox,
            font_size,
            text: text.trim().to_string(),
        }
    }

    /// Median baseline distance between consecutive lines of similar font size.
    ///
    /// Falls back to 1.2 × the median font size when no such pair exists.
    pub fn typical_spacing(lines: &[Line]) -> f32 {
        let mut gaps: Vec<f32> = lines
            .windows(2)
            .filter(|w| {
                let (a, b) = (w[0].font_size, w[1].font_size);
                (a - b).abs() <= SPACING_FONT_SIMILARITY * a.max(b)
            })
            .map(|w| w[1].baseline_y - w[0].baseline_y)
            .filter(|&gap| gap > 0.0)
            .collect();

        median(&mut gaps).unwrap_or_else(|| 1.2 * median_font(lines))
    }

    /// Split sorted lines into block ranges.
    ///
    /// A new block starts on a large baseline gap, a font size change, a list
    /// marker, or (when enabled) an indented line after a short one.
    pub fn split_lines(&self, lines: &[Line]) -> Vec<Range<usize>> {
        if lines.is_empty() {
            return Vec::new();
        }

        let typical = Self::typical_spacing(lines);
        let max_gap = self.options.line_spacing_multiplier * typical;
        let baselines: Vec<Interval> = lines
            .iter()
            .enumerate()
            .map(|(i, line)| Interval::point(line.baseline_y, i))
            .collect();

        let mut breaks = vec![false; lines.len()];
        for cluster in cluster_by_gap(&baselines, |_, _| max_gap).iter().skip(1) {
            if let Some(&first) = cluster.members.first() {
                breaks[first] = true;
            }
        }

        let left_margin = lines.iter().map(Line::left).fold(f32::INFINITY, f32::min);
        let right_margin = lines.iter().map(Line::right).fold(f32::NEG_INFINITY, f32::max);
        let text_width = (right_margin - left_margin).max(0.0);

        for i in 1..lines.len() {
            if breaks[i] {
                continue;
            }
            let (prev, cur) = (&lines[i - 1], &lines[i]);

            let font_change = (cur.font_size - prev.font_size).abs() / prev.font_size.max(f32::EPSILON);
            if font_change > self.options.font_change_tolerance {
                breaks[i] = true;
            } else if text::starts_with_list_marker(&cur.text) {
                breaks[i] = true;
            } else if self.options.indent_breaks {
                let prev_short = right_margin - prev.right() > self.options.short_line_fraction * text_width;
                let indented = cur.left() - left_margin >= self.options.indent_min_fraction * cur.font_size;
                breaks[i] = prev_short && indented;
            }
        }

        let mut ranges = Vec::new();
        let mut start = 0;
        for i in 1..lines.len() {
            if breaks[i] {
                ranges.push(start..i);
                start = i;
            }
        }
        ranges.push(start..lines.len());

        debug!(
            "{} line(s), typical spacing {:.1}, {} block(s)",
            lines.len(),
            typical,
            ranges.len()
        );
        ranges
    }

    /// Build classified blocks from sorted lines.
    ///
    /// `body_font` is the median line font of the whole column and drives
    /// heading detection.
    pub fn blocks_from_lines(
        &self,
        lines: &[Line],
        column_index: Option<usize>,
        body_font: f32,
    ) -> Vec<Block> {
        let left_margin = lines.iter().map(Line::left).fold(f32::INFINITY, f32::min);
        let right_margin = lines.iter().map(Line::right).fold(f32::NEG_INFINITY, f32::max);

        self.split_lines(lines)
            .into_iter()
            .map(|range| {
                self.build_block(&lines[range], (left_margin, right_margin), column_index, body_font)
            })
            .collect()
    }

    fn build_block(
        &self,
        lines: &[Line],
        margins: (f32, f32),
        column_index: Option<usize>,
        body_font: f32,
    ) -> Block {
        let text = text::join_lines(lines.iter().map(|l| l.text.as_str()));
        let bbox = BoundingBox::enclosing(lines.iter().map(|l| &l.bbox)).unwrap_or_default();

        let (weighted, chars) = lines.iter().fold((0.0, 0usize), |(w, c), line| {
            let n = line.text.chars().count().max(1);
            (w + line.font_size * n as f32, c + n)
        });
        let font_size = weighted / chars.max(1) as f32;

        let line_spacing = if lines.len() > 1 {
            lines
                .windows(2)
                .map(|w| w[1].baseline_y - w[0].baseline_y)
                .sum::<f32>()
                / (lines.len() - 1) as f32
        } else {
            0.0
        };

        Block {
            block_type: self.classify(&text, font_size, body_font),
            bbox,
            column_index,
            font_size,
            line_count: lines.len(),
            alignment: detect_alignment(lines, margins),
            indentation: lines.first().map(|l| l.left() - bbox.x0).unwrap_or(0.0),
            line_spacing,
            span_indices: lines.iter().flat_map(|l| l.span_indices.iter().copied()).collect(),
            text,
        }
    }

    /// Classify a block by its text and font size.
    pub fn classify(&self, text: &str, font_size: f32, body_font: f32) -> BlockType {
        if body_font > 0.0
            && font_size >= self.options.heading_font_ratio * body_font
            && text.chars().count() <= self.options.heading_max_chars
        {
            BlockType::Heading
        } else if text::starts_with_list_marker(text) {
            BlockType::ListItem
        } else {
            BlockType::Paragraph
        }
    }
}

/// Median line font size, or 0 when there are no lines.
pub(crate) fn median_font(lines: &[Line]) -> f32 {
    let mut fonts: Vec<f32> = lines.iter().map(|l| l.font_size).collect();
    median(&mut fonts).unwrap_or(0.0)
}

fn std_dev(values: &[f32]) -> f32 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f32>() / values.len() as f32;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / values.len() as f32;
    variance.sqrt()
}

/// Alignment from the spread of line margins inside `(left, right)`.
fn detect_alignment(lines: &[Line], (left, right): (f32, f32)) -> Alignment {
    let left_margins: Vec<f32> = lines.iter().map(|l| l.left() - left).collect();
    let right_margins: Vec<f32> = lines.iter().map(|l| right - l.right()).collect();

    if let ([l], [r]) = (left_margins.as_slice(), right_margins.as_slice()) {
        if *l > ALIGNMENT_TOLERANCE && (l - r).abs() < ALIGNMENT_TOLERANCE {
            return Alignment::Center;
        }
        return Alignment::Left;
    }
    if lines.is_empty() {
        return Alignment::Left;
    }

    // Last line of a justified paragraph is ragged
    let ragged_end = if lines.len() > 2 {
        &right_margins[..right_margins.len() - 1]
    } else {
        &right_margins[..]
    };

    let left_aligned = std_dev(&left_margins) < ALIGNMENT_TOLERANCE;
    let right_aligned = std_dev(ragged_end) < ALIGNMENT_TOLERANCE;

    match (left_aligned, right_aligned) {
        (true, true) => Alignment::Justify,
        (false, true) => Alignment::Right,
        (true, false) => Alignment::Left,
        (false, false) => {
            let offsets: Vec<f32> = left_margins
                .iter()
                .zip(&right_margins)
                .map(|(l, r)| l - r)
                .collect();
            if std_dev(&offsets) < ALIGNMENT_TOLERANCE {
                Alignment::Center
            } else {
                Alignment::Left
            }
        }
    }
}
