//! Card grids: plain, numbered and module cards, plus mixed grid content.

use slide_fit::{BlockKind, Rgb, SemanticBlock, SlotRole, StyleHints};

use super::code::{code_height, code_panel, place_code_block};
use super::SlideLayout;
use crate::measure::FontSpec;
use crate::shape::{Fill, Frame, TextStyle};
use crate::slide_index::BlockId;

const CARD_KINDS: &[BlockKind] = &[BlockKind::Card, BlockKind::ModuleCard];
const MIN_CARD_HEIGHT: f32 = 0.8;
const MODULE_CARD_NEED: f32 = 1.8;
const CARD_PAD: f32 = 0.15;
const MIN_GRID_TEXT_CHARS: usize = 5;

pub(super) fn grid(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let index = layout.index;
    let hints = layout.block(id).hints;

    let direct: Vec<BlockId> = index
        .children(id)
        .into_iter()
        .filter(|child| CARD_KINDS.contains(&index.block(*child).kind))
        .collect();
    let cards = if direct.is_empty() {
        index.descendants_of(id, CARD_KINDS)
    } else {
        direct
    };

    if !cards.is_empty() {
        let top = layout.top();
        let mut consumed = place_cards(layout, &cards, Some(&hints), top);
        consumed += layout.gaps().section;
        for child in index.children(id) {
            if layout.claims.is_claimed(child) {
                continue;
            }
            let text = index.block(child).text();
            if text.chars().count() <= MIN_GRID_TEXT_CHARS {
                continue;
            }
            let top = layout.top() + consumed;
            let font = FontSpec::new(12.0);
            let text = layout.truncate(&text, font, layout.width(), layout.cfg.fallback_max_height);
            let h = layout.measure(&text, font, layout.width()).max(0.3);
            let frame = Frame::new(layout.left(), top, layout.width(), h);
            layout.text(frame, TextStyle::new(12.0).color(Rgb::GRAY_70), text);
            consumed += h + layout.gaps().normal;
        }
        layout.claim(id);
        return consumed;
    }

    let code = index.descendants_of(id, &[BlockKind::CodeBlock]);
    if !code.is_empty() {
        let consumed = if hints.columns == Some(2) && code.len() == 2 {
            side_by_side_code(layout, &code)
        } else {
            let mut consumed = 0.0;
            for block in &code {
                let top = layout.top() + consumed;
                let h = place_code_block(layout, *block, top);
                if h > 0.0 {
                    consumed += h + layout.gaps().section;
                }
            }
            consumed
        };
        layout.claim(id);
        return consumed;
    }

    // Principle grids are laid out by the principle rule.
    if !index.descendants_of(id, &[BlockKind::Principle]).is_empty() {
        return 0.0;
    }

    let mut consumed = 0.0;
    for child in index.children(id) {
        let text = index.block(child).text();
        if text.is_empty() {
            continue;
        }
        let top = layout.top() + consumed;
        let h = layout.measure(&text, FontSpec::new(12.0), layout.width()).max(0.3);
        let frame = Frame::new(layout.left(), top, layout.width(), h);
        layout.text(frame, TextStyle::new(12.0).color(Rgb::GRAY_70), text);
        consumed += h + layout.gaps().normal;
    }
    layout.claim(id);
    consumed
}

fn side_by_side_code(layout: &mut SlideLayout<'_>, code: &[BlockId]) -> f32 {
    let gap = 0.15;
    let w = (layout.width() - gap) / 2.0;
    let top = layout.top();
    let mut tallest: f32 = 0.0;
    for (i, id) in code.iter().enumerate() {
        let h = (code_height(layout, *id, 9.0, w - 0.3) + 0.20).clamp(1.0, 3.5);
        let left = layout.left() + i as f32 * (w + gap);
        code_panel(layout, *id, Frame::new(left, top, w, h), 9.0, 0.15, 0.10);
        tallest = tallest.max(h);
    }
    tallest + layout.gaps().section
}

pub(super) fn standalone_cards(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let index = layout.index;
    let cards: Vec<BlockId> = ids
        .iter()
        .copied()
        .filter(|id| index.ancestor_of_kind(*id, &[BlockKind::Grid]).is_none())
        .collect();
    if cards.is_empty() {
        return 0.0;
    }
    let top = layout.top();
    place_cards(layout, &cards, None, top) + layout.gaps().section
}

#[derive(Clone, Debug, Default)]
struct CardContent {
    title: String,
    text: String,
    number: String,
}

impl CardContent {
    fn of(block: &SemanticBlock) -> Self {
        let mut text = block.slot_text(SlotRole::CardText);
        let usage = block.slot_text(SlotRole::CardUsage);
        if !usage.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&usage);
        }
        Self {
            title: block.slot_text(SlotRole::CardTitle),
            text,
            number: block.slot_text(SlotRole::CardNumber),
        }
    }
}

/// Explicit column count requested by grid hints.
fn column_hint(hints: Option<&StyleHints>, count: usize) -> Option<usize> {
    let hints = hints?;
    let columns = usize::from(hints.columns?);
    if hints.auto_fit {
        Some(columns.min(count))
    } else {
        Some(columns)
    }
}

/// Lay cards out on a resolved grid at `top`; returns the grid height.
fn place_cards(layout: &mut SlideLayout<'_>, ids: &[BlockId], hints: Option<&StyleHints>, top: f32) -> f32 {
    let count = ids.len();
    let grid_cfg = layout.cfg.grid;
    let grid = grid_cfg.resolve(layout.width(), count, column_hint(hints, count));
    let inner_w = grid.item_width - 2.0 * CARD_PAD;
    let available = layout.available_from(top);

    let mut tallest = MIN_CARD_HEIGHT;
    for id in ids {
        let block = layout.block(*id);
        let need = if block.kind == BlockKind::ModuleCard {
            MODULE_CARD_NEED
        } else {
            let content = CardContent::of(block);
            card_need(layout, &content, inner_w)
        };
        tallest = tallest.max(need);
    }
    let card_h = grid
        .row_height(tallest, available, grid_cfg.row_gap)
        .max(MIN_CARD_HEIGHT);

    let start = grid.start_left(layout.left(), layout.width(), count);
    for (i, id) in ids.iter().enumerate() {
        let left = grid.item_left(start, i);
        let row_top = top + grid.row_of(i) as f32 * (card_h + grid_cfg.row_gap);
        let frame = Frame::new(left, row_top, grid.item_width, card_h);
        let block = layout.block(*id);
        if block.kind == BlockKind::ModuleCard {
            module_card(layout, block, frame);
        } else {
            let content = CardContent::of(block);
            if content.number.is_empty() {
                plain_card(layout, block, &content, frame);
            } else {
                number_card(layout, &content, frame);
            }
        }
        layout.claim(*id);
    }
    grid.total_height(card_h, grid_cfg.row_gap)
}

fn card_need(layout: &SlideLayout<'_>, content: &CardContent, inner_w: f32) -> f32 {
    let text_h = if content.text.is_empty() {
        0.0
    } else {
        layout.measure(&content.text, FontSpec::new(12.0), inner_w)
    };
    if !content.number.is_empty() {
        let number_h = layout.measure(&content.number, FontSpec::new(48.0).bold(), inner_w);
        let title_h = layout.measure(&content.title, FontSpec::new(14.0).bold(), inner_w);
        let text_h = if content.text.is_empty() {
            0.0
        } else {
            layout.measure(&content.text, FontSpec::new(10.0), inner_w)
        };
        return 0.08 + number_h + title_h + text_h + 0.08;
    }
    let title_h = layout.measure(&content.title, FontSpec::new(16.0).bold(), inner_w) + 0.05;
    CARD_PAD + title_h + layout.gaps().tight + text_h + 0.05
}

fn scaled_font(height: f32, per_inch: f32, min: i32, max: i32) -> f32 {
    ((height * per_inch) as i32).clamp(min, max) as f32
}

fn plain_card(layout: &mut SlideLayout<'_>, block: &SemanticBlock, content: &CardContent, frame: Frame) {
    layout.rect(frame, Fill::outlined(Rgb::DARK_GRAY, Rgb::BORDER_GRAY));
    let inner_w = frame.width - 2.0 * CARD_PAD;
    let tight = layout.gaps().tight;

    let title_font = FontSpec::new(16.0).bold();
    let title_h = (layout.measure(&content.title, title_font, inner_w) + 0.05)
        .min(frame.height * 0.5)
        .max(0.35);
    layout.text(
        Frame::new(frame.left + CARD_PAD, frame.top + CARD_PAD, inner_w, title_h),
        TextStyle::new(16.0).bold().color(layout.accent),
        content.title.clone(),
    );

    if content.text.is_empty() {
        return;
    }
    let text_top = frame.top + CARD_PAD + title_h + tight;
    let mut text_h = frame.height - (CARD_PAD + title_h + tight + 0.05);
    let budget = text_h.max(0.2);
    let mut size = 8.0;
    for candidate in [12.0f32, 11.0, 10.0, 9.0, 8.0] {
        if layout.measure(&content.text, FontSpec::new(candidate), inner_w) <= budget {
            size = candidate;
            break;
        }
    }
    text_h = text_h.max(layout.measure(&content.text, FontSpec::new(size), inner_w));
    let text_frame = Frame::new(frame.left + CARD_PAD, text_top, inner_w, text_h.max(0.2));
    let style = TextStyle::new(size).color(Rgb::GRAY_70);

    let runs = block
        .slot(SlotRole::CardText)
        .map(SemanticBlock::rich_text)
        .unwrap_or_default();
    if runs.len() > 1 && block.slot(SlotRole::CardUsage).is_none() {
        layout.rich_text(text_frame, style, runs);
    } else {
        layout.text(text_frame, style, content.text.clone());
    }
}

fn number_card(layout: &mut SlideLayout<'_>, content: &CardContent, frame: Frame) {
    layout.rect(frame, Fill::outlined(Rgb::DARK_GRAY, Rgb::BORDER_GRAY));
    let pad = 0.08;
    let inner_w = frame.width - 0.2;
    let left = frame.left + 0.1;
    let h = frame.height;
    let number_size = scaled_font(h, 28.0, 24, 48);
    let title_size = scaled_font(h, 8.0, 10, 14);
    let text_size = scaled_font(h, 6.0, 8, 10);

    let number_h = layout
        .measure(&content.number, FontSpec::new(number_size).bold(), inner_w)
        .min(h * 0.5)
        .max(0.5);
    layout.text(
        Frame::new(left, frame.top + pad, inner_w, number_h),
        TextStyle::new(number_size).bold().color(Rgb::CYAN).centered(),
        content.number.clone(),
    );

    let title_top = frame.top + pad + number_h;
    let title_h = layout
        .measure(&content.title, FontSpec::new(title_size).bold(), inner_w)
        .min(h * 0.25)
        .max(0.25);
    layout.text(
        Frame::new(left, title_top, inner_w, title_h),
        TextStyle::new(title_size).bold().color(layout.accent).centered(),
        content.title.clone(),
    );

    let remaining = h - pad - number_h - title_h - pad;
    if remaining > 0.1 {
        layout.text(
            Frame::new(left, title_top + title_h, inner_w, remaining),
            TextStyle::new(text_size).color(Rgb::GRAY_70).centered(),
            content.text.clone(),
        );
    }
}

fn module_card(layout: &mut SlideLayout<'_>, block: &SemanticBlock, frame: Frame) {
    layout.rect(frame, Fill::outlined(Rgb::DARK_GRAY, Rgb::BORDER_GRAY));
    layout.rect(
        Frame::new(frame.left, frame.top, frame.width, 0.04),
        Fill::solid(layout.accent).square(),
    );
    let pad = 0.10;
    let left = frame.left + 0.12;
    let inner_w = frame.width - 0.24;
    let h = frame.height;
    let mut y = frame.top + pad;

    let name = block.slot_text(SlotRole::ModuleName);
    let name_size = scaled_font(h, 9.0, 11, 15);
    let name_h = layout
        .measure(&name, FontSpec::new(name_size).bold(), inner_w)
        .min(h * 0.30)
        .max(0.25);
    layout.text(
        Frame::new(left, y, inner_w, name_h),
        TextStyle::new(name_size).bold().color(layout.accent),
        name,
    );
    y += name_h;

    let contract = block.slot_text(SlotRole::ModuleContract);
    if !contract.is_empty() {
        let size = scaled_font(h, 6.0, 8, 10);
        let contract_h = layout
            .measure(&contract, FontSpec::new(size).monospace(), inner_w)
            .min(h * 0.25)
            .max(0.20);
        layout.text(
            Frame::new(left, y, inner_w, contract_h),
            TextStyle::new(size).code().color(Rgb::CODE_GREEN),
            contract,
        );
        y += contract_h;
    }

    let purpose = block.slot_text(SlotRole::ModulePurpose);
    let remaining = h - (y - frame.top) - pad;
    if !purpose.is_empty() && remaining > 0.1 {
        let size = scaled_font(h, 6.0, 8, 11);
        layout.text(
            Frame::new(left, y, inner_w, remaining),
            TextStyle::new(size).color(Rgb::GRAY_70),
            purpose,
        );
    }
}
