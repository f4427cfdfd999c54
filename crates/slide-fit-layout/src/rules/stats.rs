//! Numeric callouts, tier stacks and before/after comparisons.

use slide_fit::{BlockKind, Rgb, SlotRole, Tone};

use super::SlideLayout;
use crate::measure::FontSpec;
use crate::shape::{Fill, Frame, TextStyle};
use crate::slide_index::BlockId;

const TIER_GAP: f32 = 0.08;
const MIN_TIER_HEIGHT: f32 = 0.55;
const BEFORE_AFTER_HEIGHT: f32 = 1.2;

pub(super) fn stat_group(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let index = layout.index;
    let stats = index.descendants_of(id, &[BlockKind::Stat]);
    layout.claim(id);
    if stats.is_empty() {
        return 0.0;
    }
    let top = layout.top();
    let w = layout.width() / stats.len() as f32;
    let mut tallest: f32 = 0.0;
    for (i, stat) in stats.iter().enumerate() {
        let block = index.block(*stat);
        let left = layout.left() + i as f32 * w;
        let number = block.slot_text(SlotRole::StatNumber);
        let label = block.slot_text(SlotRole::StatLabel);
        let number_h = layout
            .measure(&number, FontSpec::new(40.0).bold(), w)
            .clamp(0.6, 1.2);
        layout.text(
            Frame::new(left, top, w, number_h),
            TextStyle::new(40.0).bold().color(Rgb::CYAN).centered(),
            number,
        );
        let label_h = layout.measure(&label, FontSpec::new(12.0), w).clamp(0.3, 0.6);
        layout.text(
            Frame::new(left, top + number_h, w, label_h),
            TextStyle::new(12.0).color(Rgb::GRAY_70).centered(),
            label,
        );
        tallest = tallest.max(number_h + label_h);
    }
    tallest + layout.gaps().section
}

pub(super) fn big_stats(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    if ids.is_empty() {
        return 0.0;
    }
    let top = layout.top();
    let w = layout.width() / ids.len() as f32;
    let mut tallest: f32 = 0.0;
    for (i, id) in ids.iter().enumerate() {
        let block = layout.block(*id);
        let left = layout.left() + i as f32 * w;
        let number = block.slot_text(SlotRole::BigStatNumber);
        let unit = block.slot_text(SlotRole::BigStatUnit);
        let number_h = layout
            .measure(&number, FontSpec::new(56.0).bold(), w)
            .max(1.05);
        layout.text(
            Frame::new(left, top, w, number_h),
            TextStyle::new(56.0).bold().color(Rgb::CYAN),
            number,
        );
        let unit_h = layout.measure(&unit, FontSpec::new(18.0), w).max(0.4);
        layout.text(
            Frame::new(left, top + number_h, w, unit_h),
            TextStyle::new(18.0).color(Rgb::GRAY_70),
            unit,
        );
        tallest = tallest.max(number_h + unit_h);
        layout.claim(*id);
    }
    tallest + layout.gaps().section
}

struct Tier {
    label: String,
    title: String,
    detail: String,
}

pub(super) fn tier_stack(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let index = layout.index;
    let tiers: Vec<Tier> = index
        .descendants_of(id, &[BlockKind::Tier])
        .into_iter()
        .map(|tier| {
            let block = index.block(tier);
            let desc = block.slot_text(SlotRole::TierDesc);
            let tokens = block.slot_text(SlotRole::TierTokens);
            let detail = match (desc.is_empty(), tokens.is_empty()) {
                (false, false) => format!("{desc}  |  {tokens}"),
                (false, true) => desc,
                _ => tokens,
            };
            Tier {
                label: block.slot_text(SlotRole::TierLabel).to_uppercase(),
                title: block.slot_text(SlotRole::TierTitle),
                detail,
            }
        })
        .collect();
    layout.claim(id);
    if tiers.is_empty() {
        return 0.0;
    }

    let top = layout.top();
    let n = tiers.len() as f32;
    let inner_w = layout.width() - 0.3;
    let label_font = FontSpec::new(10.0).bold();
    let title_font = FontSpec::new(12.0).bold();
    let detail_font = FontSpec::new(9.0);
    let measure_or_zero = |layout: &SlideLayout<'_>, text: &str, font: FontSpec| {
        if text.is_empty() {
            0.0
        } else {
            layout.measure(text, font, inner_w)
        }
    };

    let tallest = tiers
        .iter()
        .map(|tier| {
            0.05 + measure_or_zero(layout, &tier.label, label_font)
                + measure_or_zero(layout, &tier.title, title_font)
                + 0.02
                + measure_or_zero(layout, &tier.detail, detail_font)
                + 0.05
        })
        .fold(MIN_TIER_HEIGHT, f32::max);
    let available = layout.cfg.canvas.height - top - 0.4;
    let per_tier = (available - TIER_GAP * (n - 1.0)) / n;
    let tier_h = tallest.min(per_tier).max(MIN_TIER_HEIGHT);
    let accent = layout.accent;

    for (i, tier) in tiers.iter().enumerate() {
        let tier_top = top + i as f32 * (tier_h + TIER_GAP);
        layout.rect(
            Frame::new(layout.left(), tier_top, layout.width(), tier_h),
            Fill::outlined(Rgb::DARK_GRAY, Rgb::BORDER_GRAY),
        );
        let left = layout.left() + 0.15;
        let label_h = measure_or_zero(layout, &tier.label, label_font);
        layout.text(
            Frame::new(left, tier_top + 0.05, inner_w, label_h),
            TextStyle::new(10.0).bold().color(accent),
            tier.label.clone(),
        );
        let title_top = tier_top + 0.05 + label_h;
        let title_h = measure_or_zero(layout, &tier.title, title_font);
        layout.text(
            Frame::new(left, title_top, inner_w, title_h),
            TextStyle::new(12.0).bold(),
            tier.title.clone(),
        );
        if tier.detail.is_empty() {
            continue;
        }
        let detail_top = title_top + title_h + 0.02;
        let detail_h = (tier_h - (detail_top - tier_top) - 0.05)
            .max(measure_or_zero(layout, &tier.detail, detail_font));
        if detail_h > 0.08 {
            layout.text(
                Frame::new(left, detail_top, inner_w, detail_h),
                TextStyle::new(9.0).color(Rgb::GRAY_70),
                tier.detail.clone(),
            );
        }
    }
    n * (tier_h + TIER_GAP) + layout.gaps().section
}

struct Comparison {
    label: String,
    value: String,
    desc: String,
    border: Rgb,
}

pub(super) fn before_after(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let index = layout.index;
    let cards: Vec<Comparison> = index
        .descendants_of(id, &[BlockKind::BeforeAfterCard])
        .into_iter()
        .map(|card| {
            let block = index.block(card);
            let label = block.slot_text(SlotRole::ComparisonLabel);
            let value = block.slot_text(SlotRole::ComparisonValue);
            let mut desc = block.text();
            for part in [&label, &value] {
                if !part.is_empty() {
                    desc = desc.replacen(part.as_str(), "", 1);
                }
            }
            let border = if block.hints.tone == Some(Tone::Before) {
                Rgb::ORANGE
            } else {
                Rgb::GREEN
            };
            Comparison {
                label,
                value,
                desc: desc.trim().to_string(),
                border,
            }
        })
        .collect();
    layout.claim(id);
    if cards.is_empty() {
        return 0.0;
    }

    let top = layout.top();
    let col_w = layout.width() / 2.0 - 0.1;
    let inner_w = col_w - 0.24;

    // Stack label, value and description without overlap, growing the
    // cards when the content is taller than the nominal height.
    struct Placed {
        label_h: f32,
        value_top: f32,
        value_h: f32,
        desc: Option<(f32, f32)>,
    }
    let placed: Vec<Placed> = cards
        .iter()
        .map(|card| {
            let label_h = layout
                .measure(&card.label, FontSpec::new(14.0).bold(), inner_w)
                .max(0.3);
            let value_top = (0.38f32).max(0.08 + label_h);
            let value_h = layout
                .measure(&card.value, FontSpec::new(28.0).bold(), inner_w)
                .max(0.5);
            let desc = if card.desc.chars().count() > 5 {
                let desc_h = layout
                    .measure(&card.desc, FontSpec::new(10.0), inner_w)
                    .clamp(0.3, 0.45);
                Some(((0.75f32).max(value_top + value_h), desc_h))
            } else {
                None
            };
            Placed {
                label_h,
                value_top,
                value_h,
                desc,
            }
        })
        .collect();
    let card_h = placed
        .iter()
        .map(|p| match p.desc {
            Some((desc_top, desc_h)) => desc_top + desc_h + 0.05,
            None => p.value_top + p.value_h + 0.05,
        })
        .fold(BEFORE_AFTER_HEIGHT, f32::max);

    for (i, (card, p)) in cards.iter().zip(&placed).enumerate() {
        let left = layout.left() + i as f32 * (col_w + 0.2);
        layout.rect(
            Frame::new(left, top, col_w, card_h),
            Fill::outlined(Rgb::DARK_GRAY, card.border),
        );
        layout.text(
            Frame::new(left + 0.12, top + 0.08, inner_w, p.label_h),
            TextStyle::new(14.0).bold().color(card.border),
            card.label.clone(),
        );
        layout.text(
            Frame::new(left + 0.12, top + p.value_top, inner_w, p.value_h),
            TextStyle::new(28.0).bold(),
            card.value.clone(),
        );
        if let Some((desc_top, desc_h)) = p.desc {
            layout.text(
                Frame::new(left + 0.12, top + desc_top, inner_w, desc_h),
                TextStyle::new(10.0).color(Rgb::GRAY_70),
                card.desc.clone(),
            );
        }
    }
    card_h + layout.gaps().section
}
