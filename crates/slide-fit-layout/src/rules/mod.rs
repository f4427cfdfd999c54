//! Block layout rules and the priority-ordered dispatch table.
//!
//! Every rule places shapes starting at the slide cursor and returns the
//! height it consumed, trailing gap included. Rules claim the blocks they
//! render so later rules (and the fallback) skip them.

mod callouts;
mod cards;
mod code;
mod flow;
mod headings;
mod lists;
mod stats;
mod tables;
mod text;

use slide_fit::{BlockKind, Rgb, RichTextRun, SemanticBlock};

use crate::config::{LayoutConfig, Spacing};
use crate::cursor::LayoutCursor;
use crate::measure::{FontSpec, Measurer};
use crate::shape::{Fill, Frame, RectShape, Shape, TextShape, TextStyle};
use crate::slide_index::{BlockId, ClaimSet, SlideIndex};

/// How a rule is matched against unclaimed blocks of its kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Arity {
    /// Only the first unclaimed match.
    First,
    /// Every unclaimed match, one call per block.
    Each,
    /// All unclaimed matches in a single call.
    All,
    /// Unclaimed top-level blocks with nothing claimed inside.
    Roots,
}

type RuleFn = fn(&mut SlideLayout<'_>, &[BlockId]) -> f32;

pub(crate) struct Rule {
    pub(crate) name: &'static str,
    kinds: &'static [BlockKind],
    arity: Arity,
    handler: RuleFn,
}

const fn rule(name: &'static str, kinds: &'static [BlockKind], arity: Arity, handler: RuleFn) -> Rule {
    Rule {
        name,
        kinds,
        arity,
        handler,
    }
}

/// Rules in priority order.
pub(crate) const RULES: &[Rule] = &[
    rule("section-number", &[BlockKind::SectionNumber], Arity::First, headings::section_number),
    rule("section-title", &[BlockKind::SectionTitle], Arity::First, headings::section_title),
    rule("section-label", &[BlockKind::SectionLabel], Arity::First, headings::section_label),
    rule("headline", &[BlockKind::Headline], Arity::First, headings::headline),
    rule("medium-headline", &[BlockKind::MediumHeadline], Arity::Each, headings::medium_headline),
    rule("subhead", &[BlockKind::Subhead], Arity::First, headings::subhead),
    rule("architecture", &[BlockKind::ArchitectureDiagram], Arity::First, code::architecture_diagram),
    rule("comparison-grid", &[BlockKind::ComparisonGrid], Arity::First, tables::comparison_grid),
    rule("grid", &[BlockKind::Grid], Arity::Each, cards::grid),
    rule("cards", &[BlockKind::Card, BlockKind::ModuleCard], Arity::All, cards::standalone_cards),
    rule("principles", &[BlockKind::Principle], Arity::All, callouts::principles),
    rule("code-block", &[BlockKind::CodeBlock], Arity::Each, code::code_block),
    rule("flow", &[BlockKind::FlowDiagram], Arity::Each, flow::flow_diagram),
    rule("tenets", &[BlockKind::Tenet], Arity::All, callouts::tenets),
    rule("versus", &[BlockKind::Versus], Arity::First, lists::versus),
    rule("table", &[BlockKind::Table], Arity::Each, tables::table),
    rule("feature-list", &[BlockKind::FeatureList], Arity::Each, lists::feature_list),
    rule("notifications", &[BlockKind::NotificationStack], Arity::First, lists::notification_stack),
    rule("stat-group", &[BlockKind::StatGroup], Arity::First, stats::stat_group),
    rule("big-stats", &[BlockKind::BigStat], Arity::All, stats::big_stats),
    rule("tier-stack", &[BlockKind::TierStack], Arity::First, stats::tier_stack),
    rule("tier-rows", &[BlockKind::TierRow], Arity::All, tables::tier_rows),
    rule("diagram", &[BlockKind::Diagram], Arity::First, flow::diagram),
    rule("before-after", &[BlockKind::BeforeAfter], Arity::First, stats::before_after),
    rule("token-display", &[BlockKind::TokenDisplay], Arity::All, code::token_display),
    rule("patterns", &[BlockKind::BadPattern, BlockKind::GoodPattern], Arity::All, lists::patterns),
    rule("summary-rows", &[BlockKind::SummaryRow], Arity::All, tables::summary_rows),
    rule("body-text", &[BlockKind::BodyText], Arity::Each, text::body_text),
    rule("title-meta", &[BlockKind::TitleMeta], Arity::First, text::title_meta),
    rule("highlight-box", &[BlockKind::HighlightBox], Arity::Each, callouts::highlight_box),
    rule("quote", &[BlockKind::Quote], Arity::First, text::quote),
    rule("small-text", &[BlockKind::SmallText], Arity::All, text::small_text),
    rule("fallback", &[], Arity::Roots, text::fallback),
];

/// Run every rule in priority order over one slide.
pub(crate) fn run_rules(layout: &mut SlideLayout<'_>) {
    for rule in RULES {
        match rule.arity {
            Arity::First => {
                if let Some(id) = layout.unclaimed(rule.kinds).first().copied() {
                    layout.apply(rule, &[id]);
                }
            }
            Arity::Each => {
                for id in layout.unclaimed(rule.kinds) {
                    if !layout.claims.is_claimed(id) {
                        layout.apply(rule, &[id]);
                    }
                }
            }
            Arity::All => {
                let ids = layout.unclaimed(rule.kinds);
                if !ids.is_empty() {
                    layout.apply(rule, &ids);
                }
            }
            Arity::Roots => {
                let roots = layout.index.roots().to_vec();
                for id in roots {
                    if !layout.claims.touches(layout.index, id) {
                        layout.apply(rule, &[id]);
                    }
                }
            }
        }
    }
}

/// Mutable state of one slide under construction.
pub(crate) struct SlideLayout<'a> {
    pub(crate) cfg: &'a LayoutConfig,
    pub(crate) measurer: &'a Measurer,
    pub(crate) accent: Rgb,
    pub(crate) centered: bool,
    pub(crate) index: &'a SlideIndex<'a>,
    pub(crate) claims: ClaimSet,
    pub(crate) cursor: LayoutCursor,
    pub(crate) shapes: Vec<Shape>,
}

impl<'a> SlideLayout<'a> {
    pub(crate) fn new(
        cfg: &'a LayoutConfig,
        measurer: &'a Measurer,
        index: &'a SlideIndex<'a>,
        accent: Rgb,
        centered: bool,
    ) -> Self {
        Self {
            cfg,
            measurer,
            accent,
            centered,
            index,
            claims: ClaimSet::new(index),
            cursor: LayoutCursor::new(cfg.content_top),
            shapes: Vec::with_capacity(16),
        }
    }

    fn apply(&mut self, rule: &Rule, ids: &[BlockId]) {
        let consumed = (rule.handler)(self, ids);
        log::trace!(
            "rule {} placed {} block(s), consumed {:.2}in",
            rule.name,
            ids.len(),
            consumed
        );
        self.cursor.advance(consumed);
    }

    fn unclaimed(&self, kinds: &[BlockKind]) -> Vec<BlockId> {
        self.index
            .of_kinds(kinds)
            .into_iter()
            .filter(|id| !self.claims.is_claimed(*id))
            .collect()
    }

    pub(crate) fn block(&self, id: BlockId) -> &'a SemanticBlock {
        self.index.block(id)
    }

    pub(crate) fn claim(&mut self, id: BlockId) {
        self.claims.claim(self.index, id);
    }

    pub(crate) fn top(&self) -> f32 {
        self.cursor.top()
    }

    pub(crate) fn left(&self) -> f32 {
        self.cfg.canvas.content_left
    }

    pub(crate) fn width(&self) -> f32 {
        self.cfg.canvas.content_width
    }

    /// Width drawn for the 8.4in reference column, scaled to this canvas.
    pub(crate) fn scaled(&self, inches: f32) -> f32 {
        self.cfg.canvas.scale_x(inches)
    }

    pub(crate) fn gaps(&self) -> Spacing {
        self.cfg.spacing
    }

    /// Height left between `top` and the reserved strip above the canvas bottom.
    pub(crate) fn available_from(&self, top: f32) -> f32 {
        self.cfg.canvas.height - top - self.cfg.bottom_reserve
    }

    pub(crate) fn measure(&self, text: &str, font: FontSpec, width: f32) -> f32 {
        self.measurer.height(text, font, width)
    }

    pub(crate) fn single_line(&self, font: FontSpec) -> f32 {
        self.measurer.single_line_height(font)
    }

    pub(crate) fn truncate(&self, text: &str, font: FontSpec, width: f32, max_height: f32) -> String {
        self.measurer.truncate_to_fit(text, font, width, max_height)
    }

    /// Place a plain text frame; blank text and degenerate frames are skipped.
    pub(crate) fn text(&mut self, frame: Frame, style: TextStyle, text: impl Into<String>) {
        let text = text.into();
        if frame.is_degenerate() || text.trim().is_empty() {
            return;
        }
        self.shapes.push(Shape::Text(TextShape::new(frame, style, text)));
    }

    /// Place formatted runs, collapsing a single run to plain text.
    pub(crate) fn rich_text(&mut self, frame: Frame, style: TextStyle, mut runs: Vec<RichTextRun>) {
        if frame.is_degenerate() || runs.iter().all(|run| run.text.trim().is_empty()) {
            return;
        }
        if runs.len() == 1 {
            let run = runs.remove(0);
            let style = match run.color {
                Some(color) => style.color(color),
                None => style,
            };
            let style = TextStyle {
                bold: style.bold || run.bold,
                italic: style.italic || run.italic,
                ..style
            };
            self.shapes.push(Shape::Text(TextShape::new(frame, style, run.text)));
            return;
        }
        self.shapes.push(Shape::Text(TextShape::with_runs(frame, style, runs)));
    }

    pub(crate) fn rect(&mut self, frame: Frame, fill: Fill) {
        if frame.is_degenerate() {
            return;
        }
        self.shapes.push(Shape::Rect(RectShape { frame, fill }));
    }
}

/// Status color for check-mark prefixed items.
pub(crate) fn mark_color(text: &str) -> Option<Rgb> {
    let text = text.trim_start();
    if text.starts_with('\u{2713}') {
        Some(Rgb::GREEN)
    } else if text.starts_with('\u{2717}') || text.starts_with('\u{2715}') {
        Some(Rgb::RED)
    } else {
        None
    }
}
