//! Layout configuration.

use serde::{Deserialize, Serialize};

use crate::columns::GridConfig;
use crate::glyph_metrics::GlyphMetrics;
use crate::measure::MeasureConfig;

/// Slide canvas and content column, in inches.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
    /// Left edge of the content column.
    pub content_left: f32,
    /// Width of the content column.
    pub content_width: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: Self::REFERENCE_HEIGHT,
            content_left: 0.8,
            content_width: Self::REFERENCE_CONTENT_WIDTH,
        }
    }
}

impl Canvas {
    /// Content width the fixed block geometry is drawn for.
    pub const REFERENCE_CONTENT_WIDTH: f32 = 8.4;
    /// Canvas height the fixed vertical anchors are drawn for.
    pub const REFERENCE_HEIGHT: f32 = 5.625;

    pub fn content_right(&self) -> f32 {
        self.content_left + self.content_width
    }

    /// Horizontal length drawn for the reference column, scaled to this one.
    pub fn scale_x(&self, inches: f32) -> f32 {
        inches * self.content_width / Self::REFERENCE_CONTENT_WIDTH
    }

    /// Vertical position drawn for the reference height, scaled to this canvas.
    pub fn scale_y(&self, inches: f32) -> f32 {
        inches * self.height / Self::REFERENCE_HEIGHT
    }
}

/// Vertical gaps left after a block.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub tight: f32,
    pub normal: f32,
    pub section: f32,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            tight: 0.08,
            normal: 0.10,
            section: 0.20,
        }
    }
}

/// Whole-slide compaction when content runs past the canvas bottom.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressionConfig {
    /// Shapes starting above this offset are chrome and never move.
    pub content_top_threshold: f32,
    /// Space kept free at the canvas bottom after compaction.
    pub bottom_margin: f32,
    /// Smallest vertical scale applied.
    pub floor_scale: f32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            content_top_threshold: 0.3,
            bottom_margin: 0.10,
            floor_scale: 0.40,
        }
    }
}

/// Layout configuration for slide construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub canvas: Canvas,
    pub spacing: Spacing,
    pub compression: CompressionConfig,
    pub grid: GridConfig,
    pub measure: MeasureConfig,
    pub glyphs: GlyphMetrics,
    /// Initial cursor offset on every slide.
    pub content_top: f32,
    /// Space kept below multi-row blocks sized against the canvas bottom.
    pub bottom_reserve: f32,
    /// Height budget for unclaimed fallback text.
    pub fallback_max_height: f32,
}

impl LayoutConfig {
    /// Canvas of `width` x `height` inches with the default 0.8in side margins.
    pub fn for_canvas(width: f32, height: f32) -> Self {
        let defaults = Self::default();
        let content_left = defaults.canvas.content_left;
        Self {
            canvas: Canvas {
                width,
                height,
                content_left,
                content_width: (width - 2.0 * content_left).max(1.0),
            },
            ..defaults
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            spacing: Spacing::default(),
            compression: CompressionConfig::default(),
            grid: GridConfig::default(),
            measure: MeasureConfig::default(),
            glyphs: GlyphMetrics::default(),
            content_top: 0.6,
            bottom_reserve: 0.3,
            fallback_max_height: 5.5,
        }
    }
}
