//! Section markers, headlines and subheads.

use slide_fit::Rgb;

use super::SlideLayout;
use crate::measure::FontSpec;
use crate::shape::{Align, Frame, TextStyle};
use crate::slide_index::BlockId;

const LABEL_HEIGHT: f32 = 0.4;
const CENTERED_LABEL_TOP: f32 = 1.0;
const CENTERED_HEADLINE_TOP: f32 = 1.5;
const CENTERED_HEADLINE_GAP: f32 = 0.50;

fn label(layout: &mut SlideLayout<'_>, id: BlockId) {
    let text = layout.block(id).text().to_uppercase();
    let frame = Frame::new(layout.left(), layout.top(), layout.width(), LABEL_HEIGHT);
    let style = TextStyle::new(14.0).bold().color(layout.accent).no_wrap();
    layout.text(frame, style, text);
    layout.claim(id);
}

pub(super) fn section_number(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    for id in ids {
        label(layout, *id);
    }
    LABEL_HEIGHT + layout.gaps().tight
}

pub(super) fn section_title(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let text = layout.block(id).text();
    let font = FontSpec::new(20.0).bold();
    let h = layout.measure(&text, font, layout.width()).clamp(0.40, 1.0);
    let frame = Frame::new(layout.left(), layout.top(), layout.width(), h);
    layout.text(frame, TextStyle::new(20.0).bold(), text);
    layout.claim(id);
    h + layout.gaps().normal
}

pub(super) fn section_label(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    if layout.centered {
        layout.cursor.reset_to(CENTERED_LABEL_TOP);
    }
    for id in ids {
        label(layout, *id);
    }
    LABEL_HEIGHT + layout.gaps().normal
}

fn alignment(layout: &SlideLayout<'_>) -> Align {
    if layout.centered {
        Align::Center
    } else {
        Align::Left
    }
}

/// Shared shape of headline-like blocks: at least one line, at most `max_h`.
fn heading_block(layout: &mut SlideLayout<'_>, id: BlockId, style: TextStyle, max_h: f32) -> f32 {
    let text = layout.block(id).text();
    let font = FontSpec::new(style.font_size).with_bold(style.bold);
    let measured = layout.measure(&text, font, layout.width());
    let h = measured.min(max_h).max(layout.single_line(font));
    let frame = Frame::new(layout.left(), layout.top(), layout.width(), h);
    let style = style.with_align(alignment(layout));
    layout.text(frame, style, text);
    layout.claim(id);
    h
}

pub(super) fn headline(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let hints = layout.block(id).hints;
    let size = if hints.gradient || hints.heading_level == Some(1) {
        56.0
    } else {
        40.0
    };
    let color = if hints.gradient { Rgb::CYAN } else { Rgb::WHITE };
    if layout.centered {
        layout.cursor.advance_to(CENTERED_HEADLINE_TOP);
    }
    let h = heading_block(layout, id, TextStyle::new(size).bold().color(color), 3.5);
    let gap = if layout.centered {
        CENTERED_HEADLINE_GAP
    } else {
        layout.gaps().section
    };
    h + gap
}

pub(super) fn medium_headline(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let h = heading_block(layout, id, TextStyle::new(36.0).bold(), 3.0);
    h + layout.gaps().section
}

pub(super) fn subhead(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let h = heading_block(layout, id, TextStyle::new(24.0).color(Rgb::GRAY_70), 2.5);
    h + layout.gaps().normal
}
