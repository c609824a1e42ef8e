//! Integration tests for page layout analysis.

use std::collections::BTreeSet;

use pdflayout::{
    BlockType, BoundingBox, DiagnosticKind, LayoutAnalyzer, LayoutOptions, Page, PageInput,
    TableCellGrid, TextSpan,
};

const PAGE_WIDTH: f32 = 612.0;

/// A one-line span of font size 10 ending at `baseline`.
fn text_line(text: &str, x0: f32, x1: f32, baseline: f32) -> TextSpan {
    TextSpan::from_box(text, x0, baseline - 10.0, x1, baseline, 10.0)
}

/// Two columns separated by a gutter of 5% of the page width.
fn two_column_spans(first_baseline: f32, lines: usize) -> Vec<TextSpan> {
    let gutter = PAGE_WIDTH * 0.05;
    let mut spans = Vec::new();
    for i in 0..lines {
        let baseline = first_baseline + 14.0 * i as f32;
        spans.push(text_line("left column text", 50.0, 290.0, baseline));
        spans.push(text_line("right column text", 290.0 + gutter, 530.0 + gutter, baseline));
    }
    spans
}

/// One line of `words` word-level spans spread over `x0..x1` with 4pt gaps.
fn word_spans(words: usize, x0: f32, x1: f32, baseline: f32) -> Vec<TextSpan> {
    let gap = 4.0;
    let width = (x1 - x0 - gap * (words - 1) as f32) / words as f32;
    (0..words)
        .map(|w| {
            let start = x0 + (width + gap) * w as f32;
            text_line("word", start, start + width, baseline)
        })
        .collect()
}

/// Every span index that ended up in a block or a table.
fn covered_spans(page: &Page) -> Vec<usize> {
    let mut covered: Vec<usize> = page
        .blocks
        .iter()
        .flat_map(|b| b.span_indices.iter().copied())
        .chain(page.table_span_indices.iter().copied())
        .collect();
    covered.sort_unstable();
    covered
}

fn assert_column_ordering(page: &Page) {
    for pair in page.columns.windows(2) {
        assert!(pair[0].x_range.1 <= pair[1].x_range.0);
        assert!(pair[0].x_range.0 < pair[1].x_range.0);
    }
    for column in &page.columns {
        for lines in column.lines.windows(2) {
            assert!(lines[0].baseline_y <= lines[1].baseline_y);
        }
    }
}

#[test]
fn test_single_column_two_paragraphs() {
    let baselines = [100.0, 114.0, 128.0, 163.0, 177.0, 191.0];
    let spans: Vec<TextSpan> = baselines
        .iter()
        .map(|&b| text_line("A line of ordinary paragraph text", 72.0, 540.0, b))
        .collect();

    let page = LayoutAnalyzer::new()
        .analyze_page(&PageInput::letter(1).with_spans(spans))
        .unwrap();

    assert_eq!(page.columns.len(), 1);
    assert_eq!(page.blocks.len(), 2);
    assert!(page
        .blocks
        .iter()
        .all(|b| b.block_type == BlockType::Paragraph && b.column_index == Some(0)));
    assert_eq!(page.blocks[0].line_count, 3);
    assert!(page.blocks[0].bbox.y1 < page.blocks[1].bbox.y0);
}

#[test]
fn test_two_columns() {
    let spans = two_column_spans(100.0, 10);
    let page = LayoutAnalyzer::new()
        .analyze_page(&PageInput::letter(1).with_spans(spans))
        .unwrap();

    assert_eq!(page.columns.len(), 2);
    assert!(page.columns[0].x_range.1 <= page.columns[1].x_range.0);
    assert_eq!(page.columns[0].lines.len(), 10);
    assert_eq!(page.columns[1].lines.len(), 10);

    let order: Vec<Option<usize>> = page.blocks.iter().map(|b| b.column_index).collect();
    assert_eq!(order, vec![Some(0), Some(1)]);
    assert!(page.blocks[0].text.starts_with("left column text"));
    assert_column_ordering(&page);
}

#[test]
fn test_title_above_two_columns() {
    let mut spans = vec![TextSpan::from_box(
        "A Title Spanning Both Columns",
        PAGE_WIDTH * 0.05,
        40.0,
        PAGE_WIDTH * 0.95,
        58.0,
        18.0,
    )];
    spans.extend(two_column_spans(100.0, 10));

    let page = LayoutAnalyzer::new()
        .analyze_page(&PageInput::letter(1).with_spans(spans))
        .unwrap();

    assert_eq!(page.columns.len(), 2);
    assert_eq!(page.blocks[0].block_type, BlockType::FullWidth);
    assert_eq!(page.blocks[0].column_index, None);
    assert_eq!(page.blocks[0].text, "A Title Spanning Both Columns");
    assert_eq!(page.blocks[1].column_index, Some(0));
    assert_eq!(page.blocks[2].column_index, Some(1));
}

#[test]
fn test_short_column_next_to_long_column() {
    let gutter = 32.0;
    let mut spans = Vec::new();
    for i in 0..20 {
        let baseline = 100.0 + 14.0 * i as f32;
        if i < 2 {
            spans.push(text_line("left column text", 50.0, 290.0, baseline));
        }
        spans.push(text_line("right column text", 290.0 + gutter, 530.0 + gutter, baseline));
    }

    let page = LayoutAnalyzer::new()
        .analyze_page(&PageInput::letter(1).with_spans(spans))
        .unwrap();

    assert_eq!(page.columns.len(), 2);
    assert_eq!(page.columns[0].lines.len(), 2);
    assert_eq!(page.columns[1].lines.len(), 20);
    let order: Vec<Option<usize>> = page.blocks.iter().map(|b| b.column_index).collect();
    assert_eq!(order, vec![Some(0), Some(1)]);
    assert_eq!(page.blocks[0].text, "left column text left column text");
    assert!(!page.blocks[1].text.contains("left"));
    assert_column_ordering(&page);
}

#[test]
fn test_title_above_word_level_columns() {
    let mut spans = vec![TextSpan::from_box(
        "A Title Spanning Both Columns",
        PAGE_WIDTH * 0.05,
        40.0,
        PAGE_WIDTH * 0.95,
        58.0,
        18.0,
    )];
    for i in 0..20 {
        let baseline = 100.0 + 14.0 * i as f32;
        spans.extend(word_spans(6, 50.0, 290.0, baseline));
        spans.extend(word_spans(6, 322.0, 562.0, baseline));
    }

    let page = LayoutAnalyzer::new()
        .analyze_page(&PageInput::letter(1).with_spans(spans))
        .unwrap();

    assert_eq!(page.columns.len(), 2);
    assert_eq!(page.blocks.len(), 3);
    assert_eq!(page.blocks[0].block_type, BlockType::FullWidth);
    assert_eq!(page.blocks[0].text, "A Title Spanning Both Columns");
    assert_eq!(page.blocks[1].column_index, Some(0));
    assert_eq!(page.blocks[2].column_index, Some(1));
    assert!(page.blocks[1].text.starts_with("word word word word word word word"));
    assert_eq!(page.columns[0].lines[0].span_indices.len(), 6);
}

#[test]
fn test_three_columns_read_left_to_right() {
    let mut spans = Vec::new();
    for i in 0..10 {
        let baseline = 100.0 + 14.0 * i as f32;
        spans.push(text_line("first column", 40.0, 200.0, baseline));
        spans.push(text_line("second column", 230.0, 390.0, baseline));
        spans.push(text_line("third column", 420.0, 580.0, baseline));
    }

    let page = LayoutAnalyzer::new()
        .analyze_page(&PageInput::letter(1).with_spans(spans))
        .unwrap();

    assert_eq!(page.columns.len(), 3);
    let order: Vec<Option<usize>> = page.blocks.iter().map(|b| b.column_index).collect();
    assert_eq!(order, vec![Some(0), Some(1), Some(2)]);
    assert!(page.blocks[0].text.starts_with("first column"));
    assert!(page.blocks[2].text.starts_with("third column"));
    assert_column_ordering(&page);
}

#[test]
fn test_banner_between_column_sections() {
    let mut spans = two_column_spans(100.0, 6);
    spans.push(text_line("A banner running across the whole page", 40.0, 570.0, 200.0));
    spans.extend(two_column_spans(230.0, 6));

    let page = LayoutAnalyzer::new()
        .analyze_page(&PageInput::letter(1).with_spans(spans))
        .unwrap();

    let order: Vec<Option<usize>> = page.blocks.iter().map(|b| b.column_index).collect();
    assert_eq!(order, vec![Some(0), Some(1), None, Some(0), Some(1)]);
    assert_eq!(page.blocks[2].block_type, BlockType::FullWidth);
    assert!(page.blocks[3].bbox.y0 > page.blocks[2].bbox.y1);
}

#[test]
fn test_empty_page() {
    let page = LayoutAnalyzer::new().analyze_page(&PageInput::letter(1)).unwrap();
    assert!(page.columns.is_empty());
    assert!(page.blocks.is_empty());
    assert!(page.tables.is_empty());
    assert_eq!(page.plain_text(), "");
}

#[test]
fn test_lone_wide_span() {
    let spans = vec![text_line("One very wide line of text", 20.0, 592.0, 100.0)];
    let page = LayoutAnalyzer::new()
        .analyze_page(&PageInput::letter(1).with_spans(spans))
        .unwrap();

    assert!(page.columns.is_empty());
    assert_eq!(page.blocks.len(), 1);
    assert_eq!(page.blocks[0].block_type, BlockType::FullWidth);
}

#[test]
fn test_spans_partitioned_between_blocks_and_tables() {
    let mut spans = vec![TextSpan::from_box(
        "Quarterly Report",
        40.0,
        40.0,
        570.0,
        58.0,
        18.0,
    )];
    spans.extend(two_column_spans(100.0, 8));
    spans.push(text_line("Table 1: Sales by region", 50.0, 250.0, 290.0));
    // Cell text inside the table region
    spans.push(text_line("North", 60.0, 100.0, 320.0));
    spans.push(text_line("120", 200.0, 230.0, 320.0));
    // Malformed and blank spans
    spans.push(TextSpan::from_box("bad", f32::NAN, 0.0, 10.0, 10.0, 10.0));
    spans.push(text_line("  ", 50.0, 60.0, 400.0));

    let table = TableCellGrid::from_rows(
        vec![vec!["Region", "Sales"], vec!["North", "120"]],
        BoundingBox::new(50.0, 300.0, 290.0, 340.0),
    )
    .with_header_rows(1);

    let input = PageInput::letter(1)
        .with_spans(spans.clone())
        .with_tables(vec![table]);
    let page = LayoutAnalyzer::new().analyze_page(&input).unwrap();

    let expected: Vec<usize> = spans
        .iter()
        .enumerate()
        .filter(|(i, s)| s.validate(*i).is_ok() && !s.is_blank())
        .map(|(i, _)| i)
        .collect();
    let covered = covered_spans(&page);
    assert_eq!(covered, expected);
    assert_eq!(covered.iter().collect::<BTreeSet<_>>().len(), covered.len());

    assert_eq!(page.table_span_indices.len(), 2);
    assert_eq!(page.diagnostics.len(), 1);
    assert_eq!(page.diagnostics[0].kind, DiagnosticKind::GeometryInput);
    assert!(page
        .blocks
        .iter()
        .any(|b| b.block_type == BlockType::Caption && b.text.starts_with("Table 1")));
    assert_column_ordering(&page);
}

#[test]
fn test_malformed_table_grid_is_diagnosed() {
    let grid = TableCellGrid::new(1, 2, BoundingBox::new(50.0, 300.0, 290.0, 340.0))
        .with_cell(0, 0, "a")
        .with_cell(0, 5, "lost");
    let page = LayoutAnalyzer::new()
        .analyze_page(&PageInput::letter(1).with_tables(vec![grid]))
        .unwrap();

    assert_eq!(page.diagnostics.len(), 1);
    assert_eq!(page.diagnostics[0].kind, DiagnosticKind::TableGridInput);
    assert_eq!(page.tables[0].cells, vec![vec!["a".to_string(), String::new()]]);
}

#[test]
fn test_header_and_footer_frame_the_body() {
    let mut spans = vec![text_line("Journal of Examples", 72.0, 250.0, 28.0)];
    spans.extend(two_column_spans(100.0, 5));
    spans.push(text_line("Page 4", 290.0, 322.0, 776.0));

    let options = LayoutOptions::new().with_header_footer(36.0, 36.0);
    let page = LayoutAnalyzer::with_options(options)
        .unwrap()
        .analyze_page(&PageInput::letter(4).with_spans(spans))
        .unwrap();

    assert_eq!(page.blocks.first().map(|b| b.block_type), Some(BlockType::Header));
    assert_eq!(page.blocks.last().map(|b| b.block_type), Some(BlockType::Footer));
    assert_eq!(page.columns.len(), 2);
}

#[test]
fn test_deterministic_results() {
    let mut spans = vec![TextSpan::from_box("Title", 40.0, 40.0, 570.0, 58.0, 18.0)];
    spans.extend(two_column_spans(100.0, 12));
    let input = PageInput::letter(1).with_spans(spans);

    let analyzer = LayoutAnalyzer::new();
    let first = analyzer.analyze_page(&input).unwrap();
    for _ in 0..5 {
        assert_eq!(analyzer.analyze_page(&input).unwrap(), first);
    }
}

#[test]
fn test_input_order_does_not_change_text() {
    let spans = two_column_spans(100.0, 6);
    let mut reversed = spans.clone();
    reversed.reverse();

    let analyzer = LayoutAnalyzer::new();
    let forward = analyzer
        .analyze_page(&PageInput::letter(1).with_spans(spans))
        .unwrap();
    let backward = analyzer
        .analyze_page(&PageInput::letter(1).with_spans(reversed))
        .unwrap();

    assert_eq!(forward.plain_text(), backward.plain_text());
}
