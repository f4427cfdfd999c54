//! List-shaped blocks: versus columns, feature lists, notifications and
//! good/bad pattern pairs.

use slide_fit::{BlockKind, Rgb, SlotRole, Tone};

use super::{mark_color, SlideLayout};
use crate::measure::FontSpec;
use crate::shape::{Fill, Frame, TextStyle};
use crate::slide_index::BlockId;

const SIDE_WIDTH: f32 = 4.0;
const SIDE_GUTTER: f32 = 0.7;
const NOTIFICATION_WIDTH: f32 = 6.0;
const NOTIFICATION_ROW: f32 = 0.55;
const NOTIFICATION_GAP: f32 = 0.08;
const PATTERN_COLUMN: f32 = 4.1;

pub(super) fn versus(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let index = layout.index;
    let sides = index.descendants_of(id, &[BlockKind::VersusSide]);
    layout.claim(id);
    if sides.len() < 2 {
        return 0.0;
    }
    let top = layout.top();
    let mut bottom = top;
    let n = sides.len() as f32;
    let gutter = layout.scaled(SIDE_GUTTER);
    // Two sides keep the wide pairing; more split the column evenly.
    let side_w = if sides.len() == 2 {
        layout.scaled(SIDE_WIDTH)
    } else {
        (layout.width() - gutter * (n - 1.0)) / n
    };
    let content_left = layout.left();
    let side_left = |i: usize| content_left + i as f32 * (side_w + gutter);

    for (i, side) in sides.iter().enumerate() {
        let left = side_left(i);
        let default_color = if i == 0 { Rgb::ORANGE } else { Rgb::GREEN };
        let mut title_h = 0.4;
        if let Some(title) = index.block(*side).slot(SlotRole::VersusTitle) {
            let text = title.text();
            let color = title.hints.accent.unwrap_or(default_color);
            title_h = layout
                .measure(&text, FontSpec::new(24.0).bold(), side_w)
                .max(0.4);
            layout.text(
                Frame::new(left, top, side_w, title_h),
                TextStyle::new(24.0).bold().color(color),
                text,
            );
        }
        let mut item_top = top + title_h + 0.1;
        if let Some(list) = index.descendants_of(*side, &[BlockKind::FeatureList]).first() {
            for item in index.descendants_of(*list, &[BlockKind::ListItem]) {
                let text = index.block(item).text();
                let color = mark_color(&text).unwrap_or(Rgb::WHITE);
                let h = layout.measure(&text, FontSpec::new(14.0), side_w).max(0.3);
                layout.text(
                    Frame::new(left, item_top, side_w, h),
                    TextStyle::new(14.0).color(color),
                    text,
                );
                item_top += h;
            }
        }
        bottom = bottom.max(item_top);
    }

    // Dividers sit in the gutters between neighbouring columns.
    let font = FontSpec::new(32.0).bold();
    let vs_h = layout.measure("vs", font, gutter);
    let vs_top = top + 1.2;
    for i in 1..sides.len() {
        let gutter_left = side_left(i) - gutter;
        layout.text(
            Frame::new(gutter_left, vs_top, gutter, vs_h),
            TextStyle::new(32.0).bold().color(Rgb::GRAY_50).centered(),
            "vs",
        );
    }
    bottom = bottom.max(vs_top + vs_h);
    bottom - top + layout.gaps().section
}

pub(super) fn feature_list(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let index = layout.index;
    let top = layout.top();
    let mut y = top;
    for item in index.descendants_of(id, &[BlockKind::ListItem]) {
        let text = index.block(item).text();
        if text.is_empty() {
            continue;
        }
        let color = mark_color(&text).unwrap_or(Rgb::WHITE);
        let h = layout.measure(&text, FontSpec::new(16.0), layout.width()).max(0.4);
        layout.text(
            Frame::new(layout.left(), y, layout.width(), h),
            TextStyle::new(16.0).color(color),
            text,
        );
        y += h;
    }
    layout.claim(id);
    if y == top {
        return 0.0;
    }
    y - top + layout.gaps().section
}

pub(super) fn notification_stack(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let index = layout.index;
    let notifications = index.descendants_of(id, &[BlockKind::Notification]);
    layout.claim(id);
    if notifications.is_empty() {
        return 0.0;
    }
    let top = layout.top();
    let stack_w = layout.scaled(NOTIFICATION_WIDTH);
    let start_left = layout.left() + (layout.width() - stack_w) / 2.0;
    let body_w = stack_w - 0.7;
    let body_font = FontSpec::new(10.0);

    for (i, n) in notifications.iter().enumerate() {
        let block = index.block(*n);
        let row_top = top + i as f32 * (NOTIFICATION_ROW + NOTIFICATION_GAP);
        let tone = block.hints.tone;
        let (fill, border) = match tone {
            Some(Tone::Allowed) => (Rgb(0x0A, 0x1A, 0x0D), Rgb::GREEN),
            Some(Tone::Blocked) => (Rgb(0x1A, 0x0A, 0x0A), Rgb::RED),
            _ => (Rgb::DARK_GRAY, Rgb::BORDER_GRAY),
        };
        layout.rect(
            Frame::new(start_left, row_top, stack_w, NOTIFICATION_ROW),
            Fill::outlined(fill, border),
        );

        let allowed = tone == Some(Tone::Allowed);
        let (icon, icon_color) = if allowed {
            ("\u{2713}", Rgb::GREEN)
        } else {
            ("\u{2715}", Rgb::RED)
        };
        layout.text(
            Frame::new(start_left + 0.1, row_top + 0.05, 0.35, 0.45),
            TextStyle::new(16.0).bold().color(icon_color).centered(),
            icon,
        );

        let title = block.slot_text(SlotRole::NotificationTitle);
        let title_h = layout
            .measure(&title, FontSpec::new(12.0).bold(), body_w)
            .clamp(0.22, NOTIFICATION_ROW * 0.5);
        layout.text(
            Frame::new(start_left + 0.5, row_top + 0.04, body_w, title_h),
            TextStyle::new(12.0).bold(),
            title,
        );

        let body = block.slot_text(SlotRole::NotificationBody);
        if body.is_empty() {
            continue;
        }
        // At least one line, so truncation always has room for its marker.
        let body_h = layout
            .measure(&body, body_font, body_w)
            .min(NOTIFICATION_ROW - title_h - 0.08)
            .max(layout.single_line(body_font));
        let body = layout.truncate(&body, body_font, body_w, body_h);
        layout.text(
            Frame::new(start_left + 0.5, row_top + 0.04 + title_h, body_w, body_h),
            TextStyle::new(10.0).color(Rgb::GRAY_70),
            body,
        );
    }
    let n = notifications.len() as f32;
    n * (NOTIFICATION_ROW + NOTIFICATION_GAP) - NOTIFICATION_GAP + layout.gaps().section
}

pub(super) fn patterns(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let top = layout.top();
    let column = layout.scaled(PATTERN_COLUMN);
    let mut bad_top = top;
    let mut good_top = top;
    for id in ids {
        let block = layout.block(*id);
        let text = block.text();
        layout.claim(*id);
        if text.is_empty() {
            continue;
        }
        let good = block.kind == BlockKind::GoodPattern;
        let (mark, color, left, y) = if good {
            ("\u{2713}", Rgb::GREEN, layout.left() + column + layout.scaled(0.2), good_top)
        } else {
            ("\u{2717}", Rgb::RED, layout.left(), bad_top)
        };
        let text = format!("{mark} {text}");
        let h = layout
            .measure(&text, FontSpec::new(13.0), column)
            .max(0.3);
        layout.text(
            Frame::new(left, y, column, h),
            TextStyle::new(13.0).color(color),
            text,
        );
        if good {
            good_top += h + 0.02;
        } else {
            bad_top += h + 0.02;
        }
    }
    bad_top.max(good_top) - top + layout.gaps().section
}
