//! Text overflow and overlap audit for laid-out `slide-fit` decks.
//!
//! The audit re-measures every text frame of a finished deck with the same
//! glyph metrics the layout engine uses and reports frames whose text is
//! predicted to spill out, plus text frames that cover each other. It never
//! mutates the deck.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod config;
mod overflow;
mod overlap;
mod report;

use slide_fit_layout::{LaidOutDeck, LaidOutSlide, Measurer, Shape, TextShape};

pub use config::{AuditConfig, Severity};
pub use overflow::TextOverflow;
pub use overlap::ShapeOverlap;
pub use report::{format_report, format_summary, DeckReport, SlideReport};

/// Canvas height assumed for shapes audited outside a deck.
pub const DEFAULT_CANVAS_HEIGHT: f32 = 5.625;

/// Overflow and overlap checker.
#[derive(Clone, Debug, Default)]
pub struct Auditor {
    cfg: AuditConfig,
    measurer: Measurer,
}

impl Auditor {
    pub fn new(cfg: AuditConfig) -> Self {
        Self {
            cfg,
            measurer: Measurer::default(),
        }
    }

    /// Audit with the measurer the deck was laid out with.
    pub fn with_measurer(mut self, measurer: Measurer) -> Self {
        self.measurer = measurer;
        self
    }

    pub fn config(&self) -> &AuditConfig {
        &self.cfg
    }

    /// Check one text shape; `None` when it fits.
    pub fn check_text_shape(
        &self,
        slide_number: usize,
        shape_index: usize,
        shape: &TextShape,
        canvas_height: f32,
    ) -> Option<TextOverflow> {
        overflow::check_text_shape(
            &self.cfg,
            &self.measurer,
            slide_number,
            shape_index,
            shape,
            canvas_height,
        )
    }

    pub fn detect_overlaps(&self, slide_number: usize, shapes: &[Shape]) -> Vec<ShapeOverlap> {
        overlap::detect_overlaps(&self.cfg, slide_number, shapes)
    }

    pub fn audit_shapes(&self, slide_number: usize, shapes: &[Shape], canvas_height: f32) -> SlideReport {
        let overflows = shapes
            .iter()
            .enumerate()
            .filter_map(|(i, shape)| {
                self.check_text_shape(slide_number, i, shape.as_text()?, canvas_height)
            })
            .collect();
        let text_shapes = shapes
            .iter()
            .filter_map(Shape::as_text)
            .filter(|text| !text.body.is_blank())
            .count();
        SlideReport {
            slide_number,
            total_shapes: shapes.len(),
            text_shapes,
            overflows,
            overlaps: self.detect_overlaps(slide_number, shapes),
        }
    }

    pub fn audit_slide(&self, slide: &LaidOutSlide, canvas_height: f32) -> SlideReport {
        self.audit_shapes(slide.number, &slide.shapes, canvas_height)
    }

    pub fn audit_deck(&self, name: &str, deck: &LaidOutDeck) -> DeckReport {
        let slides: Vec<SlideReport> = deck
            .slides
            .iter()
            .map(|slide| self.audit_slide(slide, deck.canvas.height))
            .collect();
        let report = DeckReport {
            name: name.to_string(),
            total_slides: deck.slides.len(),
            slides,
        };
        if report.is_clean() {
            log::debug!("{}: {} slide(s) clean", name, report.total_slides);
        } else {
            log::warn!(
                "{}: {} overflow(s), {} overlap(s) on {}/{} slides",
                name,
                report.total_overflows(),
                report.total_overlaps(),
                report.slides_with_issues(),
                report.total_slides
            );
        }
        report
    }
}

/// Audit `deck` with default thresholds and glyph metrics.
pub fn audit_deck(name: &str, deck: &LaidOutDeck) -> DeckReport {
    Auditor::default().audit_deck(name, deck)
}
