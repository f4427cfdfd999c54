//! Per-slide and per-deck aggregation plus the text report.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::overflow::TextOverflow;
use crate::overlap::ShapeOverlap;

const RULE_WIDTH: usize = 70;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideReport {
    pub slide_number: usize,
    pub total_shapes: usize,
    pub text_shapes: usize,
    pub overflows: Vec<TextOverflow>,
    pub overlaps: Vec<ShapeOverlap>,
}

impl SlideReport {
    pub fn has_issues(&self) -> bool {
        !self.overflows.is_empty() || !self.overlaps.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckReport {
    /// Display name, usually the input file stem.
    pub name: String,
    pub total_slides: usize,
    pub slides: Vec<SlideReport>,
}

impl DeckReport {
    pub fn total_overflows(&self) -> usize {
        self.slides.iter().map(|s| s.overflows.len()).sum()
    }

    pub fn total_overlaps(&self) -> usize {
        self.slides.iter().map(|s| s.overlaps.len()).sum()
    }

    pub fn slides_with_issues(&self) -> usize {
        self.slides.iter().filter(|s| s.has_issues()).count()
    }

    pub fn is_clean(&self) -> bool {
        self.total_overflows() == 0 && self.total_overlaps() == 0
    }
}

fn rule_line() -> String {
    "=".repeat(RULE_WIDTH)
}

fn counted(count: usize, noun: &str) -> Option<String> {
    (count > 0).then(|| format!("{count} {noun}"))
}

/// Human-readable report for one deck.
///
/// `verbose` also lists clean slides.
pub fn format_report(report: &DeckReport, verbose: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule_line());
    let _ = writeln!(out, "{}", report.name);
    let _ = write!(out, "{}", rule_line());

    if report.is_clean() {
        out.push_str("\n  ALL CLEAN - no text overflow or overlap detected");
        return out;
    }

    let parts: Vec<String> = [
        counted(report.total_overflows(), "overflows"),
        counted(report.total_overlaps(), "overlaps"),
    ]
    .into_iter()
    .flatten()
    .collect();
    let _ = write!(
        out,
        "\n  {} across {}/{} slides",
        parts.join(", "),
        report.slides_with_issues(),
        report.total_slides
    );

    for slide in &report.slides {
        if !slide.has_issues() {
            if verbose {
                let _ = write!(out, "\n\n  Slide {}: CLEAN", slide.slide_number);
            }
            continue;
        }
        let parts: Vec<String> = [
            counted(slide.overflows.len(), "overflow(s)"),
            counted(slide.overlaps.len(), "overlap(s)"),
        ]
        .into_iter()
        .flatten()
        .collect();
        let _ = write!(out, "\n\n  Slide {}: {}", slide.slide_number, parts.join(", "));

        for ov in &slide.overflows {
            let _ = write!(
                out,
                "\n    [{}] {:.0}pt {}{} in {:.1}\"x{:.2}\" needs {:.2}\" (overflow: {:.2}\")",
                ov.severity,
                ov.font_size,
                ov.font_name,
                if ov.is_bold { "(B)" } else { "" },
                ov.shape_width,
                ov.shape_height,
                ov.needed,
                ov.overflow
            );
            let _ = write!(out, "\n      \"{}\"", ov.preview);
            if ov.runs_off_slide {
                let _ = write!(out, "\n      ^^ RUNS OFF SLIDE (bottom={:.2}\")", ov.effective_bottom);
            }
        }
        for ol in &slide.overlaps {
            let _ = write!(
                out,
                "\n    [OVERLAP-{}] shapes {} & {}: {:.2}\"x{:.2}\" overlap",
                ol.severity, ol.shape_a, ol.shape_b, ol.width, ol.height
            );
            let _ = write!(out, "\n      A: \"{}\"  B: \"{}\"", ol.text_a, ol.text_b);
        }
    }
    out
}

/// Closing summary across several decks.
pub fn format_summary(reports: &[DeckReport]) -> String {
    let overflows: usize = reports.iter().map(DeckReport::total_overflows).sum();
    let overlaps: usize = reports.iter().map(DeckReport::total_overlaps).sum();
    let slides: usize = reports.iter().map(|r| r.total_slides).sum();
    let clean: usize = reports
        .iter()
        .map(|r| r.total_slides.saturating_sub(r.slides_with_issues()))
        .sum();
    let mut out = String::new();
    let _ = writeln!(out, "\n{}", rule_line());
    let _ = writeln!(
        out,
        "SUMMARY: {overflows} overflow issues, {overlaps} overlaps across {slides} slides"
    );
    let _ = writeln!(out, "  Clean slides: {clean}/{slides}");
    out.push_str(&rule_line());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Severity;

    fn overflow(slide: usize) -> TextOverflow {
        TextOverflow {
            slide_number: slide,
            shape_index: 2,
            preview: "Too much text|here".to_string(),
            font_size: 14.0,
            font_name: "Arial".to_string(),
            is_bold: true,
            shape_width: 8.4,
            shape_height: 0.4,
            available: 0.3,
            needed: 0.93,
            overflow: 0.63,
            estimated_lines: 4,
            shape_top: 5.0,
            shape_bottom: 5.4,
            effective_bottom: 6.03,
            runs_off_slide: true,
            severity: Severity::Severe,
        }
    }

    fn deck(slides: Vec<SlideReport>) -> DeckReport {
        DeckReport {
            name: "talk".to_string(),
            total_slides: slides.len(),
            slides,
        }
    }

    #[test]
    fn clean_deck_gets_the_banner() {
        let report = deck(vec![SlideReport {
            slide_number: 1,
            ..SlideReport::default()
        }]);
        let text = format_report(&report, false);
        assert!(text.starts_with(&format!("\n{}\ntalk\n", "=".repeat(70))));
        assert!(text.ends_with("  ALL CLEAN - no text overflow or overlap detected"));
    }

    #[test]
    fn overflow_lines_match_the_verifier_layout() {
        let report = deck(vec![
            SlideReport {
                slide_number: 1,
                ..SlideReport::default()
            },
            SlideReport {
                slide_number: 2,
                overflows: vec![overflow(2)],
                ..SlideReport::default()
            },
        ]);
        let text = format_report(&report, true);
        assert!(text.contains("\n  1 overflows across 1/2 slides"));
        assert!(text.contains("\n\n  Slide 1: CLEAN"));
        assert!(text.contains("\n\n  Slide 2: 1 overflow(s)"));
        assert!(text.contains(
            "\n    [SEVERE] 14pt Arial(B) in 8.4\"x0.40\" needs 0.93\" (overflow: 0.63\")"
        ));
        assert!(text.contains("\n      \"Too much text|here\""));
        assert!(text.contains("\n      ^^ RUNS OFF SLIDE (bottom=6.03\")"));
        assert!(!format_report(&report, false).contains("CLEAN"));
    }

    #[test]
    fn overlap_lines_name_both_shapes() {
        let report = deck(vec![SlideReport {
            slide_number: 4,
            overlaps: vec![ShapeOverlap {
                slide_number: 4,
                shape_a: 0,
                shape_b: 1,
                text_a: "first".to_string(),
                text_b: "second".to_string(),
                width: 2.0,
                height: 0.3,
                severity: Severity::Moderate,
            }],
            ..SlideReport::default()
        }]);
        let text = format_report(&report, false);
        assert!(text.contains("\n  1 overlaps across 1/1 slides"));
        assert!(text.contains("\n    [OVERLAP-MODERATE] shapes 0 & 1: 2.00\"x0.30\" overlap"));
        assert!(text.contains("\n      A: \"first\"  B: \"second\""));
    }

    #[test]
    fn summary_totals_every_deck() {
        let noisy = deck(vec![SlideReport {
            slide_number: 1,
            overflows: vec![overflow(1), overflow(1)],
            ..SlideReport::default()
        }]);
        let clean = deck(vec![SlideReport::default(), SlideReport::default()]);
        let text = format_summary(&[noisy, clean]);
        assert!(text.contains("SUMMARY: 2 overflow issues, 0 overlaps across 3 slides"));
        assert!(text.contains("  Clean slides: 2/3"));
        assert!(text.ends_with(&"=".repeat(70)));
    }
}
