//! Position-only compaction of slides whose content runs past the bottom.

use crate::config::CompressionConfig;
use crate::shape::Shape;

/// What compaction did to a slide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Compression {
    /// Content already fits.
    Unchanged,
    /// Content scaled toward its first shape by `scale`.
    Scaled { scale: f32 },
    /// Fitting needed `required_scale`, below the floor; `floor` was applied.
    Floored { required_scale: f32, floor: f32 },
}

/// Pull shapes up so content ends above the canvas bottom.
///
/// Compaction triggers when either `cursor_top` (where the layout cursor
/// stopped) or any shape bottom lies past `canvas_height`. Shapes starting
/// above the content threshold never move, and no shape changes size.
/// Offsets from the first content shape are scaled by
/// `(usable - start) / (end - start)`, floored at `cfg.floor_scale`.
pub fn compress_slide(
    shapes: &mut [Shape],
    cursor_top: f32,
    canvas_height: f32,
    cfg: &CompressionConfig,
) -> Compression {
    let mut actual_bottom = cursor_top;
    let mut content_start = f32::INFINITY;
    let mut content_end = f32::NEG_INFINITY;
    for shape in shapes.iter() {
        let frame = shape.frame();
        actual_bottom = actual_bottom.max(frame.bottom());
        if frame.top >= cfg.content_top_threshold {
            content_start = content_start.min(frame.top);
            content_end = content_end.max(frame.bottom());
        }
    }
    if actual_bottom <= canvas_height || !content_start.is_finite() {
        return Compression::Unchanged;
    }
    let content_height = content_end - content_start;
    if content_height <= 0.0 {
        return Compression::Unchanged;
    }

    let usable = canvas_height - cfg.bottom_margin;
    let required = (usable - content_start) / content_height;
    let (scale, outcome) = if required > cfg.floor_scale {
        (required, Compression::Scaled { scale: required })
    } else {
        (
            cfg.floor_scale,
            Compression::Floored {
                required_scale: required,
                floor: cfg.floor_scale,
            },
        )
    };
    if scale >= 1.0 {
        return Compression::Unchanged;
    }

    for shape in shapes.iter_mut() {
        let top = shape.frame().top;
        if top >= content_start {
            shape.set_top(content_start + (top - content_start) * scale);
        }
    }
    outcome
}
