//! Row-oriented blocks: comparison grids, tables, tier rows and summaries.

use slide_fit::{BlockKind, Rgb, SlotRole};

use super::{mark_color, SlideLayout};
use crate::config::Canvas;
use crate::measure::FontSpec;
use crate::shape::{Frame, TextStyle};
use crate::slide_index::BlockId;

const TABLE_MIN_ROW: f32 = 0.32;
const TABLE_MAX_ROW: f32 = 0.8;
const TIER_COLUMNS: [f32; 3] = [1.8, 4.0, 2.6];

pub(super) fn comparison_grid(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let index = layout.index;
    let top = layout.top();
    let col_w = layout.width() / 2.0;
    let accent = layout.accent;
    let mut row_top = top;
    let mut pending_left: Option<f32> = None;

    for child in index.children(id) {
        let block = index.block(child);
        let header = block.hints.header;
        let size = if header { 13.0 } else { 11.0 };
        let text = block.text();
        let cell_h = layout
            .measure(&text, FontSpec::new(size).with_bold(header), col_w)
            .clamp(0.28, 0.8);
        match block.role {
            Some(SlotRole::Left) => {
                // A left cell without a partner still takes its row.
                if let Some(prev) = pending_left.take() {
                    row_top += prev;
                }
                let style = if header {
                    TextStyle::new(size).bold().color(accent)
                } else {
                    TextStyle::new(size)
                };
                layout.text(Frame::new(layout.left(), row_top, col_w, cell_h), style, text);
                pending_left = Some(cell_h);
            }
            Some(SlotRole::Right) => {
                let row_h = pending_left.take().map_or(cell_h, |left| left.max(cell_h));
                let style = if header {
                    TextStyle::new(size).bold().color(Rgb::CODE_GREEN)
                } else {
                    TextStyle::new(size).color(Rgb::GRAY_70)
                };
                layout.text(
                    Frame::new(layout.left() + col_w, row_top, col_w, row_h),
                    style,
                    text,
                );
                row_top += row_h;
                if header {
                    row_top += 0.05;
                }
            }
            _ => {}
        }
    }
    if let Some(prev) = pending_left {
        row_top += prev;
    }
    layout.claim(id);
    row_top - top + layout.gaps().section
}

/// Column widths across `content_width`; three columns give the last one
/// the extra room, as drawn on the 8.4in reference column.
fn column_widths(columns: usize, content_width: f32) -> Vec<f32> {
    match columns {
        3 => [2.5, 2.5, 3.4]
            .iter()
            .map(|w| w * content_width / Canvas::REFERENCE_CONTENT_WIDTH)
            .collect(),
        n => vec![content_width / n.max(1) as f32; n],
    }
}

pub(super) fn table(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let index = layout.index;
    let rows: Vec<Vec<BlockId>> = index
        .descendants_of(id, &[BlockKind::TableRow])
        .into_iter()
        .map(|row| index.descendants_of(row, &[BlockKind::TableCell]))
        .collect();
    layout.claim(id);
    let columns = rows.first().map_or(0, Vec::len);
    if columns == 0 {
        return 0.0;
    }
    let widths = column_widths(columns, layout.width());
    let spare = layout.width() / columns as f32;
    let width_of = |col: usize| widths.get(col).copied().unwrap_or(spare);
    let accent = layout.accent;
    let top = layout.top();
    let mut row_top = top;

    for cells in &rows {
        let header = cells.iter().any(|cell| index.block(*cell).hints.header);
        let size = if header { 12.0 } else { 11.0 };
        let mut row_h: f32 = TABLE_MIN_ROW;
        for (col, cell) in cells.iter().enumerate() {
            let text = index.block(*cell).text();
            let font = FontSpec::new(size).with_bold(header || col == 0);
            row_h = row_h.max(layout.measure(&text, font, width_of(col)));
        }
        let row_h = row_h.min(TABLE_MAX_ROW);

        let mut left = layout.left();
        for (col, cell) in cells.iter().enumerate() {
            let block = index.block(*cell);
            let text = block.text();
            let mut style = if header {
                TextStyle::new(12.0).bold().color(accent)
            } else if col == 0 {
                TextStyle::new(11.0).bold()
            } else {
                TextStyle::new(11.0).color(Rgb::GRAY_70)
            };
            if !header {
                if let Some(color) = mark_color(&text) {
                    style = style.color(color);
                } else if text.trim_start().starts_with('~') {
                    style = style.color(Rgb::ORANGE);
                }
                if block.hints.deck_accent {
                    style = style.bold().color(accent);
                }
            }
            let w = width_of(col);
            layout.text(Frame::new(left, row_top, w, row_h), style, text);
            left += w;
        }
        row_top += row_h;
    }
    row_top - top + layout.gaps().section
}

pub(super) fn tier_rows(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let top = layout.top();
    let accent = layout.accent;
    let columns = TIER_COLUMNS.map(|w| layout.scaled(w));
    let mut y = top;
    for id in ids {
        let block = layout.block(*id);
        let values = [
            block.slot_text(SlotRole::TierName),
            block.slot_text(SlotRole::TierUses),
            block.slot_text(SlotRole::TierCost),
        ];
        let mut row_h: f32 = 0.35;
        for (col, value) in values.iter().enumerate() {
            let font = FontSpec::new(12.0).with_bold(col == 0);
            row_h = row_h.max(layout.measure(value, font, columns[col]));
        }
        let mut left = layout.left();
        for (col, value) in values.into_iter().enumerate() {
            let style = if col == 0 {
                TextStyle::new(12.0).bold().color(accent)
            } else {
                TextStyle::new(12.0).color(Rgb::GRAY_70)
            };
            layout.text(Frame::new(left, y, columns[col], row_h), style, value);
            left += columns[col];
        }
        y += row_h + 0.05;
        layout.claim(*id);
    }
    y - top + layout.gaps().section
}

pub(super) fn summary_rows(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let index = layout.index;
    let top = layout.top();
    let accent = layout.accent;
    let mut y = top;
    for (i, id) in ids.iter().enumerate() {
        let cells = index.descendants_of(*id, &[BlockKind::SummaryCell]);
        let cell_w = layout.width() / cells.len().max(1) as f32;
        let first = i == 0;
        let size = if first { 12.0 } else { 11.0 };
        let texts: Vec<String> = cells.iter().map(|cell| index.block(*cell).text()).collect();
        let row_h = texts
            .iter()
            .map(|text| layout.measure(text, FontSpec::new(size).with_bold(first), cell_w))
            .fold(0.30f32, f32::max);
        for (col, text) in texts.into_iter().enumerate() {
            let style = if first {
                TextStyle::new(size).bold().color(accent)
            } else {
                TextStyle::new(size).color(Rgb::GRAY_70)
            };
            let left = layout.left() + col as f32 * cell_w;
            layout.text(Frame::new(left, y, cell_w, row_h), style, text);
        }
        y += row_h + 0.02;
        layout.claim(*id);
    }
    y - top + layout.gaps().section
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_widths_for_two_and_three_columns() {
        assert_eq!(column_widths(2, 8.4), vec![4.2, 4.2]);
        let three = column_widths(3, 8.4);
        for (got, want) in three.iter().zip([2.5, 2.5, 3.4]) {
            assert!((got - want).abs() < 1e-5);
        }
        let four = column_widths(4, 8.4);
        assert_eq!(four.len(), 4);
        assert!((four[0] - 2.1).abs() < 1e-6);
    }

    #[test]
    fn column_widths_fill_a_narrow_column() {
        for columns in 1..=5 {
            let widths = column_widths(columns, 5.4);
            assert_eq!(widths.len(), columns);
            let total: f32 = widths.iter().sum();
            assert!((total - 5.4).abs() < 1e-4, "{columns} columns sum to {total}");
        }
    }
}
