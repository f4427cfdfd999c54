//! Step flows and box-and-arrow diagrams.

use slide_fit::{BlockKind, Rgb, SemanticBlock, SlotRole};

use super::SlideLayout;
use crate::measure::FontSpec;
use crate::shape::{Fill, Frame, TextStyle};
use crate::slide_index::BlockId;

const ARROW: &str = "\u{2192}";
const ARROW_WIDTH: f32 = 0.45;
const STEP_GAP: f32 = 0.15;
const WRAPPED_COLUMNS: usize = 3;
const WRAPPED_GAP: f32 = 0.2;
const WRAPPED_ROW_GAP: f32 = 0.25;
const MAX_SINGLE_ROW_STEPS: usize = 4;
const MIN_STEP_HEIGHT: f32 = 0.9;
const MIN_WRAPPED_STEP_HEIGHT: f32 = 1.05;

struct Step {
    label: String,
    desc: String,
    turns: String,
    all_text: String,
}

impl Step {
    fn of(block: &SemanticBlock) -> Self {
        let number = block.slot_text(SlotRole::StepNumber);
        let title = block.slot_text(SlotRole::StepTitle);
        let label = match (number.is_empty(), title.is_empty()) {
            (false, false) => format!("{number}. {title}"),
            (false, true) => number,
            (true, false) => title,
            (true, true) => String::new(),
        };
        Self {
            label,
            desc: block.slot_text(SlotRole::StepDesc),
            turns: block.slot_text(SlotRole::StepTurns),
            all_text: block.text(),
        }
    }

    fn need(&self, layout: &SlideLayout<'_>, inner_w: f32) -> f32 {
        let mut need = 0.08;
        if !self.label.is_empty() {
            need += label_height(layout, &self.label, inner_w);
        }
        if !self.desc.is_empty() {
            need += layout.measure(&self.desc, FontSpec::new(11.0), inner_w);
        }
        if !self.turns.is_empty() {
            need += layout.measure(&self.turns, FontSpec::new(10.0), inner_w);
        }
        need + 0.05
    }
}

fn label_height(layout: &SlideLayout<'_>, label: &str, inner_w: f32) -> f32 {
    layout
        .measure(label, FontSpec::new(14.0).bold(), inner_w)
        .clamp(0.3, 0.6)
}

fn step_content(layout: &mut SlideLayout<'_>, step: &Step, frame: Frame) {
    let inner_w = frame.width - 0.24;
    let left = frame.left + 0.12;
    let mut y = frame.top + 0.08;

    if step.label.is_empty() {
        layout.text(
            Frame::new(frame.left + 0.08, frame.top + 0.08, frame.width - 0.16, frame.height - 0.16),
            TextStyle::new(11.0).centered(),
            step.all_text.clone(),
        );
        return;
    }

    let label_h = label_height(layout, &step.label, inner_w);
    layout.text(
        Frame::new(left, y, inner_w, label_h),
        TextStyle::new(14.0).bold().centered(),
        step.label.clone(),
    );
    y += label_h;

    if !step.desc.is_empty() {
        let font = FontSpec::new(11.0);
        let desc_h = layout.measure(&step.desc, font, inner_w);
        // Descriptions stay inside their box; a floored box truncates them.
        let room = frame.bottom() - y - 0.05;
        if desc_h > 0.10 && room >= layout.single_line(font) {
            let (desc, desc_h) = if desc_h > room + 1e-4 {
                (layout.truncate(&step.desc, font, inner_w, room), room)
            } else {
                (step.desc.clone(), desc_h)
            };
            layout.text(
                Frame::new(left, y, inner_w, desc_h),
                TextStyle::new(11.0).color(Rgb::GRAY_70).centered(),
                desc,
            );
            y += desc_h;
        }
    }

    if !step.turns.is_empty() {
        let needed = layout.measure(&step.turns, FontSpec::new(10.0), inner_w);
        let remaining = frame.height - (y - frame.top) - 0.05;
        let turns_h = remaining.max(needed);
        if turns_h > 0.1 {
            layout.text(
                Frame::new(left, y, inner_w, turns_h),
                TextStyle::new(10.0).italic().color(layout.accent).centered(),
                step.turns.clone(),
            );
        }
    }
}

fn arrow(layout: &mut SlideLayout<'_>, frame: Frame, size: f32) {
    let style = TextStyle::new(size).bold().color(layout.accent).centered();
    layout.text(frame, style, ARROW);
}

pub(super) fn flow_diagram(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let steps: Vec<Step> = layout
        .index
        .descendants_of(id, &[BlockKind::FlowStep])
        .into_iter()
        .map(|step| Step::of(layout.block(step)))
        .collect();
    layout.claim(id);
    if steps.is_empty() {
        return 0.0;
    }
    let top = layout.top();
    let accent = layout.accent;
    let n = steps.len();

    if n > MAX_SINGLE_ROW_STEPS {
        let rows = n.div_ceil(WRAPPED_COLUMNS);
        let box_w = (layout.width() - WRAPPED_GAP * (WRAPPED_COLUMNS as f32 - 1.0)) / WRAPPED_COLUMNS as f32;
        let inner_w = box_w - 0.24;
        let tallest = steps
            .iter()
            .map(|step| step.need(layout, inner_w))
            .fold(MIN_WRAPPED_STEP_HEIGHT, f32::max);
        let per_row = (layout.available_from(top) - (rows as f32 - 1.0) * WRAPPED_ROW_GAP) / rows as f32;
        // Overflow past the bottom is left to compaction.
        let box_h = tallest.min(per_row).max(MIN_WRAPPED_STEP_HEIGHT);

        for (i, step) in steps.iter().enumerate() {
            let col = i % WRAPPED_COLUMNS;
            let row = i / WRAPPED_COLUMNS;
            let left = layout.left() + col as f32 * (box_w + WRAPPED_GAP);
            let row_top = top + row as f32 * (box_h + WRAPPED_ROW_GAP);
            let frame = Frame::new(left, row_top, box_w, box_h);
            layout.rect(frame, Fill::outlined(Rgb::DARK_GRAY, accent));
            step_content(layout, step, frame);
            if col < WRAPPED_COLUMNS - 1 && i < n - 1 {
                arrow(
                    layout,
                    Frame::new(
                        left + box_w + WRAPPED_GAP / 2.0 - 0.22,
                        row_top + box_h / 2.0 - 0.22,
                        ARROW_WIDTH,
                        ARROW_WIDTH,
                    ),
                    16.0,
                );
            }
        }
        let total = rows as f32 * box_h + (rows as f32 - 1.0) * WRAPPED_ROW_GAP;
        return total + layout.gaps().section;
    }

    let arrow_space = (n as f32 - 1.0) * (ARROW_WIDTH + 2.0 * STEP_GAP);
    let box_w = ((layout.width() - arrow_space) / n as f32).min(2.5);
    let inner_w = box_w - 0.24;
    let tallest = steps
        .iter()
        .map(|step| step.need(layout, inner_w))
        .fold(MIN_STEP_HEIGHT, f32::max);
    let box_h = tallest.min(layout.available_from(top)).max(MIN_STEP_HEIGHT);
    let total_w = n as f32 * box_w + arrow_space;
    let mut left = layout.left() + (layout.width() - total_w) / 2.0;

    for (i, step) in steps.iter().enumerate() {
        let frame = Frame::new(left, top, box_w, box_h);
        layout.rect(frame, Fill::outlined(Rgb::DARK_GRAY, accent));
        step_content(layout, step, frame);
        left += box_w;
        if i < n - 1 {
            arrow(
                layout,
                Frame::new(left + STEP_GAP, top + box_h / 2.0 - 0.22, ARROW_WIDTH, ARROW_WIDTH),
                20.0,
            );
            left += ARROW_WIDTH + 2.0 * STEP_GAP;
        }
    }
    box_h + layout.gaps().section
}

pub(super) fn diagram(layout: &mut SlideLayout<'_>, ids: &[BlockId]) -> f32 {
    let Some(id) = ids.first().copied() else {
        return 0.0;
    };
    let boxes: Vec<(String, String)> = layout
        .index
        .descendants_of(id, &[BlockKind::DiagramBox])
        .into_iter()
        .map(|b| {
            let block = layout.block(b);
            (
                block.slot_text(SlotRole::DiagramBoxTitle),
                block.slot_text(SlotRole::DiagramBoxContent),
            )
        })
        .collect();
    layout.claim(id);
    if boxes.is_empty() {
        return 0.0;
    }
    let top = layout.top();
    let accent = layout.accent;
    let n = boxes.len();
    let arrow_space = (n as f32 - 1.0) * (ARROW_WIDTH + 2.0 * STEP_GAP);
    let box_w = ((layout.width() - arrow_space) / n as f32).min(2.4);
    let inner_w = box_w - 0.16;

    let mut box_h: f32 = 0.8;
    for (title, content) in &boxes {
        let title_h = if title.is_empty() {
            0.30
        } else {
            layout.measure(title, FontSpec::new(12.0).bold(), inner_w)
        };
        let content_h = if content.is_empty() {
            0.0
        } else {
            layout.measure(content, FontSpec::new(10.0), inner_w)
        };
        box_h = box_h.max(title_h + content_h + 0.24);
    }

    let total_w = n as f32 * box_w + arrow_space;
    let mut left = layout.left() + (layout.width() - total_w) / 2.0;
    for (i, (title, content)) in boxes.iter().enumerate() {
        layout.rect(Frame::new(left, top, box_w, box_h), Fill::outlined(Rgb::DARK_GRAY, accent));
        let mut title_h = 0.30;
        if !title.is_empty() {
            title_h = layout
                .measure(title, FontSpec::new(12.0).bold(), inner_w)
                .max(0.30);
            layout.text(
                Frame::new(left + 0.08, top + 0.08, inner_w, title_h),
                TextStyle::new(12.0).bold().centered(),
                title.clone(),
            );
        }
        if !content.is_empty() {
            let content_h = layout
                .measure(content, FontSpec::new(10.0), inner_w)
                .min(box_h - title_h - 0.16)
                .max(0.25);
            layout.text(
                Frame::new(left + 0.08, top + 0.08 + title_h, inner_w, content_h),
                TextStyle::new(10.0).color(Rgb::GRAY_70).centered(),
                content.clone(),
            );
        }
        left += box_w;
        if i < n - 1 {
            arrow(
                layout,
                Frame::new(left + STEP_GAP, top + box_h / 2.0 - 0.18, ARROW_WIDTH, 0.40),
                18.0,
            );
            left += ARROW_WIDTH + 2.0 * STEP_GAP;
        }
    }
    box_h + layout.gaps().section
}
