//! Column count and item width for multi-item blocks.

use serde::{Deserialize, Serialize};

/// Grid spacing and the minimum width an item may shrink to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Horizontal gap between columns.
    pub gap: f32,
    /// Items narrower than this drop a column.
    pub min_item_width: f32,
    /// Column cap when no explicit hint is given.
    pub max_default_columns: usize,
    /// Vertical gap between rows.
    pub row_gap: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            gap: 0.2,
            min_item_width: 2.5,
            max_default_columns: 4,
            row_gap: 0.2,
        }
    }
}

/// Resolved column grid for `item_count` items.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnLayout {
    pub columns: usize,
    pub rows: usize,
    pub item_width: f32,
    pub gap: f32,
}

impl GridConfig {
    /// Choose columns for `item_count` items across `content_width`.
    ///
    /// Starts from `hint` (or the item count, capped at the default maximum)
    /// and drops columns while items would be narrower than the minimum.
    pub fn resolve(&self, content_width: f32, item_count: usize, hint: Option<usize>) -> ColumnLayout {
        let mut columns = hint
            .unwrap_or_else(|| item_count.min(self.max_default_columns))
            .max(1);
        while columns > 1 && self.item_width(content_width, columns) < self.min_item_width {
            columns -= 1;
        }
        ColumnLayout {
            columns,
            rows: item_count.div_ceil(columns),
            item_width: self.item_width(content_width, columns),
            gap: self.gap,
        }
    }

    fn item_width(&self, content_width: f32, columns: usize) -> f32 {
        (content_width - self.gap * (columns as f32 - 1.0)) / columns as f32
    }
}

impl ColumnLayout {
    /// Left edge of the first column; short single rows are centered.
    pub fn start_left(&self, content_left: f32, content_width: f32, item_count: usize) -> f32 {
        if item_count >= self.columns || item_count == 0 {
            return content_left;
        }
        let used = item_count as f32 * self.item_width + (item_count as f32 - 1.0) * self.gap;
        content_left + (content_width - used) / 2.0
    }

    /// Left edge of item `index`.
    pub fn item_left(&self, start_left: f32, index: usize) -> f32 {
        start_left + (index % self.columns) as f32 * (self.item_width + self.gap)
    }

    /// Row of item `index`.
    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    /// Uniform row height: the tallest need, capped so every row fits in
    /// `available` once the row gaps are taken out.
    pub fn row_height(&self, tallest_need: f32, available: f32, row_gap: f32) -> f32 {
        if self.rows <= 1 {
            return tallest_need.min(available);
        }
        let per_row = (available - row_gap * (self.rows as f32 - 1.0)) / self.rows as f32;
        tallest_need.min(per_row)
    }

    /// Total height of all rows at `row_height`.
    pub fn total_height(&self, row_height: f32, row_gap: f32) -> f32 {
        if self.rows == 0 {
            return 0.0;
        }
        self.rows as f32 * row_height + (self.rows as f32 - 1.0) * row_gap
    }
}

/// Resolve columns with the default grid config across the default 8.4in
/// content width.
pub fn resolve_columns(item_count: usize, explicit_hint: Option<usize>) -> ColumnLayout {
    GridConfig::default().resolve(8.4, item_count, explicit_hint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hint_shrinks_until_items_are_wide_enough() {
        let layout = resolve_columns(5, Some(5));
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.rows, 2);
        assert!((layout.item_width - 8.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn default_caps_at_four_columns() {
        let layout = resolve_columns(7, None);
        assert_eq!(layout.columns, 3);
        let two = resolve_columns(2, None);
        assert_eq!(two.columns, 2);
        assert!((two.item_width - 4.1).abs() < 1e-4);
    }

    #[test]
    fn zero_items_still_resolve_one_column() {
        let layout = resolve_columns(0, None);
        assert_eq!(layout.columns, 1);
        assert_eq!(layout.rows, 0);
        assert_eq!(layout.total_height(1.0, 0.2), 0.0);
    }

    #[test]
    fn item_width_respects_floor_unless_single_column() {
        let cfg = GridConfig::default();
        for count in 1..12 {
            for hint in [None, Some(2), Some(3), Some(4), Some(6)] {
                for width in [3.0f32, 5.5, 8.4, 12.0] {
                    let layout = cfg.resolve(width, count, hint);
                    assert!(layout.columns == 1 || layout.item_width >= cfg.min_item_width);
                }
            }
        }
    }

    #[test]
    fn partial_rows_are_centered() {
        let layout = resolve_columns(2, Some(3));
        let left = layout.start_left(0.8, 8.4, 2);
        let used = 2.0 * layout.item_width + layout.gap;
        assert!((left - (0.8 + (8.4 - used) / 2.0)).abs() < 1e-4);
        assert_eq!(layout.start_left(0.8, 8.4, 3), 0.8);
    }

    #[test]
    fn rows_share_available_height() {
        let layout = resolve_columns(6, Some(3));
        assert_eq!(layout.rows, 2);
        assert!((layout.row_height(5.0, 3.2, 0.2) - 1.5).abs() < 1e-4);
        assert!((layout.row_height(1.0, 3.2, 0.2) - 1.0).abs() < 1e-4);
        assert!((layout.total_height(1.5, 0.2) - 3.2).abs() < 1e-4);
    }
}
