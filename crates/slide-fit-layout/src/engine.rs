//! Deck layout orchestration: rules, compaction and diagnostics.

use core::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use slide_fit::{SemanticDeck, SlideSource};

use crate::compress::{compress_slide, Compression};
use crate::config::LayoutConfig;
use crate::deck::{LaidOutDeck, LaidOutSlide};
use crate::glyph_metrics::TextMeasurer;
use crate::measure::Measurer;
use crate::rules::{run_rules, SlideLayout};
use crate::slide_index::SlideIndex;

/// Diagnostics raised while laying out a deck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LayoutDiagnostic {
    /// Content needed more compaction than the floor allows and still
    /// runs past the canvas bottom.
    SevereOverflow { slide_number: usize, required_scale: f32 },
    /// Content was pulled up by `scale` to fit.
    Compressed { slide_number: usize, scale: f32 },
}

impl fmt::Display for LayoutDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SevereOverflow {
                slide_number,
                required_scale,
            } => write!(
                f,
                "slide {}: content needs {:.0}% scale, beyond the compaction floor",
                slide_number,
                required_scale * 100.0
            ),
            Self::Compressed {
                slide_number,
                scale,
            } => write!(f, "slide {}: compressed to {:.0}%", slide_number, scale * 100.0),
        }
    }
}

type DiagnosticCallback = Arc<Mutex<Box<dyn FnMut(LayoutDiagnostic) + Send + 'static>>>;
type DiagnosticSink = Option<DiagnosticCallback>;

/// Semantic deck to positioned shapes.
#[derive(Clone)]
pub struct LayoutEngine {
    cfg: LayoutConfig,
    measurer: Measurer,
    diagnostic_sink: DiagnosticSink,
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("cfg", &self.cfg)
            .field("measurer", &self.measurer)
            .field("has_diagnostic_sink", &self.diagnostic_sink.is_some())
            .finish()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(cfg: LayoutConfig) -> Self {
        Self {
            measurer: Measurer::new(cfg.measure, cfg.glyphs),
            cfg,
            diagnostic_sink: None,
        }
    }

    /// Measure with real font metrics instead of the built-in glyph table.
    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.measurer = self.measurer.with_text_measurer(measurer);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    pub fn measurer(&self) -> &Measurer {
        &self.measurer
    }

    /// Register or replace the diagnostics sink.
    pub fn set_diagnostic_sink<F>(&mut self, sink: F)
    where
        F: FnMut(LayoutDiagnostic) + Send + 'static,
    {
        self.diagnostic_sink = Some(Arc::new(Mutex::new(Box::new(sink))));
    }

    fn emit_diagnostic(&self, diagnostic: LayoutDiagnostic) {
        let Some(sink) = &self.diagnostic_sink else {
            return;
        };
        if let Ok(mut sink) = sink.lock() {
            sink(diagnostic);
        }
    }

    /// Lay out every slide of `deck` in order.
    pub fn layout_deck(&self, deck: &SemanticDeck) -> LaidOutDeck {
        let mut out = LaidOutDeck::new(self.cfg.canvas);
        out.slides.reserve(deck.slides.len());
        for (i, slide) in deck.slides.iter().enumerate() {
            let (laid_out, diagnostic) = self.layout_slide_inner(slide, i + 1, deck);
            if let Some(diagnostic) = diagnostic {
                out.diagnostics.push(diagnostic);
            }
            out.slides.push(laid_out);
        }
        log::debug!(
            "laid out {} slide(s), {} shape(s), {} diagnostic(s)",
            out.slides.len(),
            out.shape_count(),
            out.diagnostics.len()
        );
        out
    }

    /// Lay out one slide using the deck accent of `deck`.
    pub fn layout_slide(&self, slide: &SlideSource, number: usize, deck: &SemanticDeck) -> LaidOutSlide {
        self.layout_slide_inner(slide, number, deck).0
    }

    fn layout_slide_inner(
        &self,
        slide: &SlideSource,
        number: usize,
        deck: &SemanticDeck,
    ) -> (LaidOutSlide, Option<LayoutDiagnostic>) {
        let index = SlideIndex::new(slide);
        let mut layout = SlideLayout::new(&self.cfg, &self.measurer, &index, deck.accent, slide.centered);
        run_rules(&mut layout);
        let claimed = layout.claims.claimed_count();
        let cursor_top = layout.top();
        let mut shapes = layout.shapes;

        let diagnostic = match compress_slide(
            &mut shapes,
            cursor_top,
            self.cfg.canvas.height,
            &self.cfg.compression,
        ) {
            Compression::Unchanged => None,
            Compression::Scaled { scale } => {
                log::debug!("slide {}: compressed to {:.2}", number, scale);
                Some(LayoutDiagnostic::Compressed {
                    slide_number: number,
                    scale,
                })
            }
            Compression::Floored {
                required_scale,
                floor,
            } => {
                log::warn!(
                    "slide {}: content needs scale {:.2}, floored at {:.2}; text will overflow",
                    number,
                    required_scale,
                    floor
                );
                Some(LayoutDiagnostic::SevereOverflow {
                    slide_number: number,
                    required_scale,
                })
            }
        };
        if let Some(diagnostic) = &diagnostic {
            self.emit_diagnostic(diagnostic.clone());
        }

        log::debug!(
            "slide {}: {} block(s), {} claimed, {} shape(s)",
            number,
            index.len(),
            claimed,
            shapes.len()
        );
        let mut out = LaidOutSlide::new(number);
        out.shapes = shapes;
        (out, diagnostic)
    }
}
