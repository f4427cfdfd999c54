//! Plain text blocks, quotes and the catch-all fallback.

use slide_fit::{BlockKind, Rgb};

use super::SlideLayout;
use crate::measure::FontSpec;
use crate::shape::{Frame, TextStyle};
use crate::slide_index::BlockId;

const TITLE_META_TOP: f32 = 4.5;
const SMALL_TEXT_TOP: f32 = 4.8;
const FALLBACK_MIN_CHARS: usize = 5;

pub(super) fn body_text(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let text = layout.block(id).text();
    layout.claim(id);
    if text.is_empty() {
        return 0.0;
    }
    let h = layout
        .measure(&text, FontSpec::new(14.0), layout.width())
        .clamp(0.3, 3.5);
    layout.text(
        Frame::new(layout.left(), layout.top(), layout.width(), h),
        TextStyle::new(14.0).color(Rgb::GRAY_70).centered(),
        text,
    );
    h + layout.gaps().normal
}

fn footnote(layout: &mut SlideLayout<'_>, text: String, top: f32) -> f32 {
    let h = layout
        .measure(&text, FontSpec::new(14.0), layout.width())
        .clamp(0.3, 1.5);
    let style = TextStyle::new(14.0).color(Rgb::GRAY_50);
    let style = if layout.centered { style.centered() } else { style };
    layout.text(Frame::new(layout.left(), top, layout.width(), h), style, text);
    h
}

pub(super) fn title_meta(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let text = layout.block(id).text();
    layout.claim(id);
    if text.is_empty() {
        return 0.0;
    }
    layout.cursor.advance_to(layout.cfg.canvas.scale_y(TITLE_META_TOP));
    let top = layout.top();
    footnote(layout, text, top)
}

pub(super) fn quote(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let index = layout.index;
    let block = index.block(id);
    let attribution = index
        .next_sibling_of_kind(id, BlockKind::QuoteAttribution)
        .or_else(|| {
            index
                .descendants_of(id, &[BlockKind::QuoteAttribution])
                .first()
                .copied()
        });
    let attribution_text = attribution.map(|a| index.block(a).text()).unwrap_or_default();

    let mut text = block.text();
    if !attribution_text.is_empty() {
        text = text.replacen(attribution_text.as_str(), "", 1);
    }
    let text = text.trim();
    layout.claim(id);
    if let Some(a) = attribution {
        layout.claim(a);
    }
    if text.is_empty() && attribution_text.is_empty() {
        return 0.0;
    }

    let top = layout.top();
    let mut y = top;
    if !text.is_empty() {
        let quoted = format!("\u{201C}{text}\u{201D}");
        let h = layout
            .measure(&quoted, FontSpec::new(24.0), layout.width())
            .max(0.6);
        layout.text(
            Frame::new(layout.left(), y, layout.width(), h),
            TextStyle::new(24.0).italic().centered(),
            quoted,
        );
        y += h + layout.gaps().normal;
    }
    if !attribution_text.is_empty() {
        let h = layout
            .measure(&attribution_text, FontSpec::new(14.0), layout.width())
            .max(0.3);
        layout.text(
            Frame::new(layout.left(), y, layout.width(), h),
            TextStyle::new(14.0).color(Rgb::GRAY_50).centered(),
            attribution_text,
        );
        y += h;
    }
    y - top + layout.gaps().normal
}

pub(super) fn small_text(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let texts: Vec<String> = ids
        .iter()
        .map(|id| layout.block(*id).text())
        .filter(|text| !text.is_empty())
        .collect();
    for id in ids {
        layout.claim(*id);
    }
    if texts.is_empty() {
        return 0.0;
    }
    layout.cursor.advance_to(layout.cfg.canvas.scale_y(SMALL_TEXT_TOP));
    let top = layout.top();
    let mut y = top;
    for text in texts {
        y += footnote(layout, text, y);
    }
    y - top
}

pub(super) fn fallback(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let text = layout.block(id).text();
    layout.claim(id);
    if text.chars().count() <= FALLBACK_MIN_CHARS {
        return 0.0;
    }
    let font = FontSpec::new(14.0);
    let text = layout.truncate(&text, font, layout.width(), layout.cfg.fallback_max_height);
    let h = layout.measure(&text, font, layout.width()).max(0.3);
    layout.text(
        Frame::new(layout.left(), layout.top(), layout.width(), h),
        TextStyle::new(14.0).color(Rgb::GRAY_70),
        text,
    );
    h + layout.gaps().normal
}
