//! Renderer-free text measurement and slide layout for `slide-fit`.
//!
//! Text height is predicted from per-character em widths instead of a font
//! rasterizer. The [`LayoutEngine`] walks each slide's semantic blocks
//! through a fixed priority table of layout rules, stacks them down a
//! vertical cursor and compacts slides that run past the canvas bottom.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod columns;
mod compress;
mod config;
mod cursor;
mod deck;
mod engine;
mod glyph_metrics;
mod measure;
mod rules;
mod shape;
mod slide_index;
mod truncate;

pub use columns::{resolve_columns, ColumnLayout, GridConfig};
pub use compress::{compress_slide, Compression};
pub use config::{Canvas, CompressionConfig, LayoutConfig, Spacing};
pub use cursor::LayoutCursor;
pub use deck::{DeckCodecError, LaidOutDeck, LaidOutSlide, DECK_FORMAT_VERSION};
pub use engine::{LayoutDiagnostic, LayoutEngine};
pub use glyph_metrics::{GlyphMetrics, TextMeasurer};
pub use measure::{measure, measure_with_spacing, FontSpec, MeasureConfig, Measurer, TextMetrics, POINTS_PER_INCH};
pub use shape::{
    is_monospace_font, Align, Fill, Frame, RectShape, Shape, TextBody, TextShape, TextStyle,
    CODE_FONT, DEFAULT_FONT,
};
pub use slide_index::{BlockId, ClaimSet, SlideIndex};
pub use truncate::{truncate_to_fit, ELLIPSIS};
