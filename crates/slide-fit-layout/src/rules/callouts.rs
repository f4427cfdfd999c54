//! Accent-bar tenet boxes, numbered principles and highlight callouts.

use slide_fit::{runs_text, BlockKind, Rgb, SemanticBlock, SlotRole};

use super::SlideLayout;
use crate::measure::FontSpec;
use crate::shape::{Fill, Frame, TextStyle};
use crate::slide_index::BlockId;

const TENET_HEIGHT: f32 = 0.9;
const TENET_PITCH: f32 = 1.0;
const TENET_BAR: f32 = 0.15;
const TENET_COLUMN_PITCH: f32 = 4.5;
const TENET_COLUMN_WIDTH: f32 = 4.2;
const MIN_PRINCIPLE_HEIGHT: f32 = 0.85;

/// Tinted box with a solid accent bar, bold title and gray body.
fn tenet_box(layout: &mut SlideLayout<'_>, frame: Frame, title: &str, text: &str, accent: Rgb) {
    layout.rect(frame, Fill::solid(accent.tenet_background()));
    layout.rect(
        Frame::new(frame.left, frame.top, TENET_BAR, frame.height),
        Fill::solid(accent).square(),
    );
    let text_left = frame.left + 0.25;
    let text_w = frame.width - 0.35;
    let tight = layout.gaps().tight;

    let title_h = layout
        .measure(title, FontSpec::new(14.0).bold(), text_w)
        .min(frame.height * 0.45)
        .max(0.25);
    layout.text(
        Frame::new(text_left, frame.top + tight, text_w, title_h),
        TextStyle::new(14.0).bold(),
        title,
    );

    let text_h = frame.height - (tight + title_h + tight + 0.05);
    if !text.is_empty() && text_h > 0.1 {
        layout.text(
            Frame::new(text_left, frame.top + tight + title_h + tight, text_w, text_h.max(0.15)),
            TextStyle::new(11.0).color(Rgb::GRAY_70),
            text,
        );
    }
}

pub(super) fn tenets(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let top = layout.top();
    let two_columns = ids.len() >= 4;
    let column_pitch = layout.scaled(TENET_COLUMN_PITCH);
    let column_w = layout.scaled(TENET_COLUMN_WIDTH);
    for (i, id) in ids.iter().enumerate() {
        let block = layout.block(*id);
        let frame = if two_columns {
            Frame::new(
                layout.left() + (i % 2) as f32 * column_pitch,
                top + (i / 2) as f32 * TENET_PITCH,
                column_w,
                TENET_HEIGHT,
            )
        } else {
            Frame::new(layout.left(), top + i as f32 * TENET_PITCH, layout.width(), TENET_HEIGHT)
        };
        let accent = block.hints.accent.unwrap_or(Rgb::GREEN);
        let title = block.slot_text(SlotRole::TenetTitle);
        let text = block.slot_text(SlotRole::TenetText);
        tenet_box(layout, frame, &title, &text, accent);
        layout.claim(*id);
    }
    let rows = if two_columns {
        ids.len().div_ceil(2)
    } else {
        ids.len()
    };
    if rows == 0 {
        return 0.0;
    }
    (rows - 1) as f32 * TENET_PITCH + TENET_HEIGHT + layout.gaps().section
}

/// Title and description of a principle's content slot.
///
/// A heading and paragraph pair wins, then bold lead-in text, then a lone
/// paragraph, then the whole text as title.
fn principle_parts(block: &SemanticBlock) -> (String, String) {
    let Some(content) = block.slot(SlotRole::PrincipleContent) else {
        return (String::new(), String::new());
    };
    if let Some(heading) = content.find_kind(BlockKind::Heading) {
        let desc = content
            .find_kind(BlockKind::Paragraph)
            .map(SemanticBlock::text)
            .unwrap_or_default();
        return (heading.text(), desc);
    }
    let runs = content.rich_text();
    if runs.iter().any(|run| run.bold) {
        let mut title = String::new();
        let mut desc = String::new();
        for run in &runs {
            if run.bold {
                title.push_str(&run.text);
            } else {
                desc.push_str(&run.text);
            }
        }
        return (title.trim().to_string(), desc.trim().to_string());
    }
    if let Some(paragraph) = content.find_kind(BlockKind::Paragraph) {
        return (paragraph.text(), String::new());
    }
    (content.text(), String::new())
}

pub(super) fn principles(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    if ids.is_empty() {
        return 0.0;
    }
    let top = layout.top();
    let col_w = layout.width() / 2.0 - 0.1;
    let text_w = col_w - 0.35;
    let row_gap = 0.1;
    let tight = layout.gaps().tight;

    let items: Vec<(String, String)> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let block = layout.block(*id);
            let number = block.slot_text(SlotRole::PrincipleNumber);
            let number = if number.is_empty() {
                (i + 1).to_string()
            } else {
                number
            };
            let (title, desc) = principle_parts(block);
            (format!("{number}. {title}"), desc)
        })
        .collect();

    let mut row_h = MIN_PRINCIPLE_HEIGHT;
    for (title, desc) in &items {
        let desc_h = if desc.is_empty() {
            0.0
        } else {
            layout.measure(desc, FontSpec::new(11.0), text_w)
        };
        let need = tight + layout.measure(title, FontSpec::new(14.0).bold(), text_w) + tight + desc_h + 0.05;
        row_h = row_h.max(need);
    }

    let accent = layout.accent;
    for (i, (title, desc)) in items.iter().enumerate() {
        let frame = Frame::new(
            layout.left() + (i % 2) as f32 * (col_w + 0.2),
            top + (i / 2) as f32 * (row_h + row_gap),
            col_w,
            row_h,
        );
        tenet_box(layout, frame, title, desc, accent);
    }

    let index = layout.index;
    for id in ids {
        layout.claim(*id);
        if let Some(container) =
            index.ancestor_of_kind(*id, &[BlockKind::PrincipleGrid, BlockKind::Grid])
        {
            layout.claim(container);
        }
    }
    let rows = items.len().div_ceil(2);
    rows as f32 * (row_h + row_gap)
}

pub(super) fn highlight_box(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let block = layout.block(id);
    layout.claim(id);
    let runs = block.rich_text();
    let text = runs_text(&runs);
    if text.is_empty() {
        return 0.0;
    }
    let color = block.hints.accent.unwrap_or(layout.accent);
    let inner_w = layout.width() - 0.4;
    let bold = runs.iter().any(|run| run.bold);
    let text_h = layout.measure(&text, FontSpec::new(14.0).with_bold(bold), inner_w);
    let box_h = (text_h + 0.24).max(0.5);
    let top = layout.top();

    layout.rect(
        Frame::new(layout.left(), top, layout.width(), box_h),
        Fill::outlined(color.callout_background(), color),
    );
    let frame = Frame::new(layout.left() + 0.2, top + 0.12, inner_w, box_h - 0.24);
    layout.rich_text(frame, TextStyle::new(14.0), runs);
    box_h + layout.gaps().normal
}
