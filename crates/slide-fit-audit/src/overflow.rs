//! Text that needs more height than its frame provides.

use serde::{Deserialize, Serialize};
use slide_fit_layout::{FontSpec, Measurer, TextShape, POINTS_PER_INCH};

use crate::config::{AuditConfig, Severity};

const PREVIEW_CHARS: usize = 60;

/// One text frame whose content is predicted to spill out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextOverflow {
    pub slide_number: usize,
    /// Index of the shape within its slide, rectangles included.
    pub shape_index: usize,
    /// First characters of the text, line breaks shown as `|`.
    pub preview: String,
    pub font_size: f32,
    pub font_name: String,
    pub is_bold: bool,
    pub shape_width: f32,
    pub shape_height: f32,
    pub available: f32,
    pub needed: f32,
    pub overflow: f32,
    pub estimated_lines: u32,
    pub shape_top: f32,
    pub shape_bottom: f32,
    /// Where the text itself ends, frame insets included.
    pub effective_bottom: f32,
    pub runs_off_slide: bool,
    pub severity: Severity,
}

pub(crate) fn preview(text: &str, max_chars: usize) -> String {
    text.chars()
        .take(max_chars)
        .map(|ch| if ch == '\n' { '|' } else { ch })
        .collect()
}

/// Check one text shape; `None` when it fits within tolerance.
pub(crate) fn check_text_shape(
    cfg: &AuditConfig,
    measurer: &Measurer,
    slide_number: usize,
    shape_index: usize,
    shape: &TextShape,
    canvas_height: f32,
) -> Option<TextOverflow> {
    let text = shape.body.plain_text();
    if text.trim().is_empty() {
        return None;
    }
    let insets = *measurer.config();
    let frame = shape.frame;
    let available = frame.height - insets.vertical_inset;
    if frame.width - insets.horizontal_inset <= 0.0 || available <= 0.0 {
        return None;
    }

    let style = &shape.style;
    let bold = shape.is_bold();
    let (needed, lines) = if style.wrap {
        let mut font = FontSpec::new(style.font_size)
            .with_bold(bold)
            .with_line_spacing(style.line_spacing);
        if style.is_monospace() {
            font = font.monospace();
        }
        let metrics = measurer.measure(&text, font, frame.width);
        (metrics.height - insets.vertical_inset, metrics.line_count)
    } else {
        let lines = text.split('\n').count().max(1) as u32;
        let line_h = style.font_size / POINTS_PER_INCH * style.line_spacing;
        (lines as f32 * line_h, lines)
    };

    let overflow = needed - available;
    if overflow <= cfg.tolerance(available) {
        return None;
    }
    let effective_bottom = frame.top + insets.vertical_inset / 2.0 + needed + insets.vertical_inset / 2.0;
    Some(TextOverflow {
        slide_number,
        shape_index,
        preview: preview(&text, PREVIEW_CHARS),
        font_size: style.font_size,
        font_name: style.font_name.clone(),
        is_bold: bold,
        shape_width: frame.width,
        shape_height: frame.height,
        available,
        needed,
        overflow,
        estimated_lines: lines,
        shape_top: frame.top,
        shape_bottom: frame.bottom(),
        effective_bottom,
        runs_off_slide: effective_bottom > canvas_height,
        severity: cfg.severity(overflow),
    })
}
