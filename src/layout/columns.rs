//! Column detection from horizontal text coverage.

use log::debug;

use super::options::LayoutOptions;
use crate::model::{Column, TextSpan};

/// Result of column detection for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnLayout {
    /// Columns left to right, without lines
    pub columns: Vec<Column>,

    /// Span indices assigned to each column, in input order
    pub column_spans: Vec<Vec<usize>>,

    /// Spans that cross columns (titles, banners), in input order
    pub page_wide: Vec<usize>,

    /// Empty x-intervals between adjacent columns' text
    pub gutters: Vec<(f32, f32)>,
}

impl ColumnLayout {
    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the layout has more than one column.
    pub fn is_multi_column(&self) -> bool {
        self.columns.len() > 1
    }
}

/// Detects vertical column bands on a page.
///
/// Span extents are projected onto the x-axis. A gutter is a wide enough
/// stretch between text that no span covers, or that only a few spans cross
/// compared with the text on either side (titles, banners).
#[derive(Debug, Clone, Default)]
pub struct ColumnDetector {
    options: LayoutOptions,
}

impl ColumnDetector {
    /// Create a detector with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with the given options.
    pub fn with_options(options: LayoutOptions) -> Self {
        Self { options }
    }

    /// Detect columns over every span.
    pub fn detect_all(&self, spans: &[TextSpan], page_width: f32) -> ColumnLayout {
        let indices: Vec<usize> = (0..spans.len()).collect();
        self.detect(spans, &indices, page_width)
    }

    /// Detect columns over the spans at `indices`.
    ///
    /// Every index ends up either in exactly one column or in `page_wide`.
    pub fn detect(&self, spans: &[TextSpan], indices: &[usize], page_width: f32) -> ColumnLayout {
        if indices.is_empty() {
            return ColumnLayout::default();
        }

        if let [only] = indices {
            if spans[*only].bbox.width() >= self.options.full_width_fraction * page_width {
                debug!("Lone span {} covers the page width, no columns", only);
                return ColumnLayout {
                    page_wide: vec![*only],
                    ..Default::default()
                };
            }
        }

        let bands = self.find_bands(spans, indices, page_width);
        let gutters: Vec<(f32, f32)> = bands.windows(2).map(|w| (w[0].1, w[1].0)).collect();
        let boundaries: Vec<f32> = gutters
            .iter()
            .map(|(low, high)| ((low + high) / 2.0).clamp(0.0, page_width))
            .collect();

        let columns: Vec<Column> = (0..=boundaries.len())
            .map(|i| {
                let low = if i == 0 { 0.0 } else { boundaries[i - 1] };
                let high = boundaries.get(i).copied().unwrap_or(page_width);
                Column::new(i, low, high)
            })
            .collect();

        let narrowest = columns
            .iter()
            .map(Column::width)
            .fold(f32::INFINITY, f32::min);
        let wide_limit = self.options.page_wide_ratio * narrowest;

        let mut column_spans = vec![Vec::new(); columns.len()];
        let mut page_wide = Vec::new();

        for &idx in indices {
            let bbox = &spans[idx].bbox;
            let crosses = columns.len() > 1
                && (bbox.width() > wide_limit
                    || gutters.iter().any(|&(low, high)| bbox.x0 <= low && bbox.x1 >= high));

            if crosses {
                page_wide.push(idx);
            } else {
                let cx = bbox.center_x();
                let column = boundaries.iter().filter(|&&b| cx >= b).count();
                column_spans[column].push(idx);
            }
        }

        debug!(
            "Detected {} column(s), gutters {:?}, {} page-wide span(s)",
            columns.len(),
            gutters,
            page_wide.len()
        );

        ColumnLayout {
            columns,
            column_spans,
            page_wide,
            gutters,
        }
    }

    /// Text bands `(left, right)` ordered left to right.
    fn find_bands(&self, spans: &[TextSpan], indices: &[usize], page_width: f32) -> Vec<(f32, f32)> {
        let profile = coverage_profile(spans, indices);
        let (Some(&(x_min, _, _)), Some(&(_, x_max, _))) = (profile.first(), profile.last()) else {
            return vec![(0.0, page_width)];
        };

        let gutters = self.find_gutters(&profile, self.options.min_gap_fraction * page_width);
        let mut bands = Vec::with_capacity(gutters.len() + 1);
        let mut start = x_min;
        for (low, high) in gutters {
            bands.push((start, low));
            start = high;
        }
        bands.push((start, x_max));

        fold_narrow_bands(&mut bands, self.options.min_column_width_fraction * page_width);
        bands
    }

    /// Stretches of constant, sparse coverage with text on both sides.
    ///
    /// A stretch qualifies when it is at least `min_gap` wide and the spans
    /// crossing it are few next to the text beside it: fewer than the smaller
    /// of the two side peaks and within the noise tolerance of that peak.
    /// Coverage is constant across a stretch, so every span inside it crosses
    /// it completely.
    fn find_gutters(&self, profile: &[(f32, f32, usize)], min_gap: f32) -> Vec<(f32, f32)> {
        let mut gutters = Vec::new();
        let mut start = 0;

        while start < profile.len() {
            let count = profile[start].2;
            let mut end = start + 1;
            while end < profile.len() && profile[end].2 == count {
                end += 1;
            }

            let (low, high) = (profile[start].0, profile[end - 1].1);
            if start > 0 && end < profile.len() && high - low >= min_gap {
                let peak = |segments: &[(f32, f32, usize)]| segments.iter().map(|s| s.2).max().unwrap_or(0);
                let side = peak(&profile[..start]).min(peak(&profile[end..]));
                if count < side && count <= self.noise_tolerance(side) {
                    debug!("Gutter {:.1}..{:.1} crossed by {} span(s)", low, high, count);
                    gutters.push((low, high));
                }
            }

            start = end;
        }

        gutters
    }

    /// Spans allowed to cross a gutter beside text with `coverage` peak.
    fn noise_tolerance(&self, coverage: usize) -> usize {
        ((self.options.gutter_noise_fraction * coverage as f32).floor() as usize).max(1)
    }
}

/// Coverage count over the x-extent of the spans.
///
/// Each entry is a stretch `(start, end, count)` with a constant number of
/// covering spans. Uncovered stretches between spans are included with a
/// count of zero.
fn coverage_profile(spans: &[TextSpan], indices: &[usize]) -> Vec<(f32, f32, usize)> {
    let mut events: Vec<(f32, i32)> = indices
        .iter()
        .flat_map(|&i| [(spans[i].bbox.x0, 1), (spans[i].bbox.x1, -1)])
        .collect();
    events.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut segments = Vec::new();
    let mut count: i32 = 0;
    let mut prev_x: Option<f32> = None;

    for (x, delta) in events {
        if let Some(prev) = prev_x {
            if x > prev {
                segments.push((prev, x, count.max(0) as usize));
            }
        }
        count += delta;
        prev_x = Some(x);
    }

    segments
}

/// Merge bands narrower than `min_width` into their nearest neighbour.
fn fold_narrow_bands(bands: &mut Vec<(f32, f32)>, min_width: f32) {
    let width = |b: &(f32, f32)| b.1 - b.0;

    while bands.len() > 1 {
        let Some(i) = (0..bands.len())
            .filter(|&i| width(&bands[i]) < min_width)
            .min_by(|&a, &b| width(&bands[a]).total_cmp(&width(&bands[b])))
        else {
            break;
        };

        let neighbour = if i == 0 {
            1
        } else if i == bands.len() - 1 {
            i - 1
        } else {
            let left_gap = bands[i].0 - bands[i - 1].1;
            let right_gap = bands[i + 1].0 - bands[i].1;
            if left_gap <= right_gap {
                i - 1
            } else {
                i + 1
            }
        };

        let (keep, drop) = (i.min(neighbour), i.max(neighbour));
        bands[keep] = (bands[keep].0.min(bands[drop].0), bands[keep].1.max(bands[drop].1));
        bands.remove(drop);
    }
}
