//! Code blocks, architecture diagrams and token listings.

use slide_fit::Rgb;

use super::SlideLayout;
use crate::measure::FontSpec;
use crate::shape::{Fill, Frame, TextStyle};
use crate::slide_index::BlockId;

const CODE_LINE_SPACING: f32 = 1.15;
const TOKEN_ROW_HEIGHT: f32 = 0.25;

/// Dark outlined box with syntax-colored runs inset by `pad_x`/`pad_y`.
pub(super) fn code_panel(layout: &mut SlideLayout<'_>, id: BlockId, frame: Frame, font_size: f32, pad_x: f32, pad_y: f32) {
    layout.rect(frame, Fill::outlined(Rgb::CODE_BG, Rgb::CODE_BORDER));
    let runs = layout.block(id).rich_text();
    let inner = Frame::new(
        frame.left + pad_x,
        frame.top + pad_y,
        frame.width - 2.0 * pad_x,
        frame.height - 2.0 * pad_y,
    );
    let style = TextStyle::new(font_size).code().color(Rgb::CODE_DEFAULT);
    layout.rich_text(inner, style, runs);
    layout.claim(id);
}

/// Box height for a code listing measured at `width` inside `pad_y` insets.
pub(super) fn code_height(layout: &SlideLayout<'_>, id: BlockId, font_size: f32, width: f32) -> f32 {
    let text = layout.block(id).text();
    let font = FontSpec::new(font_size)
        .monospace()
        .with_line_spacing(CODE_LINE_SPACING);
    layout.measure(&text, font, width) * CODE_LINE_SPACING
}

pub(super) fn architecture_diagram(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let block = layout.block(id);
    if !block.has_text() {
        layout.claim(id);
        return 0.0;
    }
    let lines = block.text().matches('\n').count() + 1;
    let h = (lines as f32 * 0.18 + 0.3).clamp(1.5, 3.5);
    let frame = Frame::new(layout.left(), layout.top(), layout.width(), h);
    code_panel(layout, id, frame, 10.0, 0.2, 0.12);
    h + layout.gaps().section
}

/// One full-width code block at `top`; returns its box height.
pub(super) fn place_code_block(layout: &mut SlideLayout<'_>, id: BlockId, top: f32) -> f32 {
    if !layout.block(id).has_text() {
        layout.claim(id);
        return 0.0;
    }
    let inner_w = layout.width() - 0.4;
    let h = (code_height(layout, id, 10.0, inner_w) + 0.24).clamp(1.0, 4.5);
    let frame = Frame::new(layout.left(), top, layout.width(), h);
    code_panel(layout, id, frame, 10.0, 0.2, 0.12);
    h
}

pub(super) fn code_block(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let mut consumed = 0.0;
    for id in ids {
        let top = layout.top() + consumed;
        let h = place_code_block(layout, *id, top);
        if h > 0.0 {
            consumed += h + layout.gaps().section;
        }
    }
    consumed
}

pub(super) fn token_display(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let top = layout.top();
    for (i, id) in ids.iter().enumerate() {
        let text = layout.block(*id).text();
        let frame = Frame::new(
            layout.left(),
            top + i as f32 * TOKEN_ROW_HEIGHT,
            layout.width(),
            TOKEN_ROW_HEIGHT,
        );
        layout.text(frame, TextStyle::new(11.0).code(), text);
        layout.claim(*id);
    }
    ids.len() as f32 * TOKEN_ROW_HEIGHT + layout.gaps().normal
}
