//! Text frames that cover each other.

use serde::{Deserialize, Serialize};
use slide_fit_layout::Shape;

use crate::config::{AuditConfig, Severity};
use crate::overflow::preview;

const PREVIEW_CHARS: usize = 30;

/// Two text-bearing shapes whose frames intersect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeOverlap {
    pub slide_number: usize,
    pub shape_a: usize,
    pub shape_b: usize,
    pub text_a: String,
    pub text_b: String,
    pub width: f32,
    pub height: f32,
    pub severity: Severity,
}

fn short_preview(text: &str) -> String {
    let out = preview(text, PREVIEW_CHARS);
    if out.trim().is_empty() {
        "(empty)".to_string()
    } else {
        out
    }
}

/// Every pair of text shapes overlapping by at least the minimum thickness.
///
/// Rectangles never count: backgrounds sit behind text on purpose.
pub(crate) fn detect_overlaps(cfg: &AuditConfig, slide_number: usize, shapes: &[Shape]) -> Vec<ShapeOverlap> {
    let texts: Vec<(usize, &Shape, String)> = shapes
        .iter()
        .enumerate()
        .filter_map(|(i, shape)| {
            let text = shape.as_text()?.body.plain_text().trim().to_string();
            (!text.is_empty()).then_some((i, shape, text))
        })
        .collect();

    let mut out = Vec::new();
    for (n, (a_index, a, a_text)) in texts.iter().enumerate() {
        for (b_index, b, b_text) in &texts[n + 1..] {
            let (w, h) = a.frame().intersection(b.frame());
            if w <= 0.0 || h <= 0.0 {
                continue;
            }
            let thickness = w.min(h);
            if thickness < cfg.min_overlap {
                continue;
            }
            out.push(ShapeOverlap {
                slide_number,
                shape_a: *a_index,
                shape_b: *b_index,
                text_a: short_preview(a_text),
                text_b: short_preview(b_text),
                width: w,
                height: h,
                severity: cfg.severity(thickness),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_fit::Rgb;
    use slide_fit_layout::{Fill, Frame, RectShape, TextShape, TextStyle};

    fn text_at(left: f32, top: f32, w: f32, h: f32, text: &str) -> Shape {
        Shape::Text(TextShape::new(Frame::new(left, top, w, h), TextStyle::new(12.0), text))
    }

    #[test]
    fn offset_frames_overlap_moderately() {
        let shapes = [text_at(1.0, 1.0, 3.0, 0.5, "first"), text_at(2.0, 1.2, 3.0, 0.5, "second")];
        let found = detect_overlaps(&AuditConfig::default(), 3, &shapes);
        assert_eq!(found.len(), 1);
        let overlap = &found[0];
        assert!((overlap.width - 2.0).abs() < 1e-5);
        assert!((overlap.height - 0.3).abs() < 1e-5);
        assert_eq!(overlap.severity, Severity::Moderate);
        assert_eq!((overlap.shape_a, overlap.shape_b), (0, 1));
        assert_eq!(overlap.slide_number, 3);
    }

    #[test]
    fn backgrounds_and_slivers_are_ignored() {
        let shapes = [
            Shape::Rect(RectShape {
                frame: Frame::new(0.0, 0.0, 10.0, 5.0),
                fill: Fill::solid(Rgb::DARK_GRAY),
            }),
            text_at(1.0, 1.0, 3.0, 0.5, "row one"),
            text_at(1.0, 1.45, 3.0, 0.5, "row two"),
        ];
        assert!(detect_overlaps(&AuditConfig::default(), 1, &shapes).is_empty());
    }

    #[test]
    fn indices_count_every_shape() {
        let shapes = [
            Shape::Rect(RectShape {
                frame: Frame::new(0.0, 0.0, 10.0, 5.0),
                fill: Fill::solid(Rgb::DARK_GRAY),
            }),
            text_at(1.0, 1.0, 2.0, 2.0, "a"),
            text_at(1.0, 1.0, 2.0, 2.0, "b"),
        ];
        let found = detect_overlaps(&AuditConfig::default(), 1, &shapes);
        assert_eq!((found[0].shape_a, found[0].shape_b), (1, 2));
        assert_eq!(found[0].severity, Severity::Severe);
    }
}
