//! Drawable shapes produced by layout, in inches on the slide canvas.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use slide_fit::{runs_text, Rgb, RichTextRun};

/// Proportional deck face.
pub const DEFAULT_FONT: &str = "Arial";
/// Fixed-pitch face for code and tokens.
pub const CODE_FONT: &str = "Consolas";

/// Whether `font_name` is a fixed-pitch face.
pub fn is_monospace_font(font_name: &str) -> bool {
    let lower = font_name.trim().to_ascii_lowercase();
    matches!(lower.as_str(), "consolas" | "courier new" | "courier")
}

/// Axis-aligned box in inches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Zero or negative extent in either direction.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Width and height of the intersection with `other`, possibly non-positive.
    pub fn intersection(&self, other: &Frame) -> (f32, f32) {
        let w = self.right().min(other.right()) - self.left.max(other.left);
        let h = self.bottom().min(other.bottom()) - self.top.max(other.top);
        (w, h)
    }
}

/// Horizontal paragraph alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Character and paragraph formatting of a text shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f32,
    pub font_name: String,
    pub bold: bool,
    pub italic: bool,
    /// Default color; runs with their own color override it.
    pub color: Rgb,
    pub align: Align,
    /// Word wrap inside the frame.
    pub wrap: bool,
    /// Line pitch as a multiple of the font size.
    pub line_spacing: f32,
}

impl TextStyle {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            font_name: DEFAULT_FONT.to_string(),
            bold: false,
            italic: false,
            color: Rgb::WHITE,
            align: Align::Left,
            wrap: true,
            line_spacing: 1.2,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }

    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn no_wrap(mut self) -> Self {
        self.wrap = false;
        self
    }

    pub fn code(mut self) -> Self {
        self.font_name = CODE_FONT.to_string();
        self
    }

    pub fn is_monospace(&self) -> bool {
        is_monospace_font(&self.font_name)
    }
}

/// Text content of a shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TextBody {
    Plain(String),
    Runs(Vec<RichTextRun>),
}

impl TextBody {
    pub fn plain_text(&self) -> Cow<'_, str> {
        match self {
            Self::Plain(text) => Cow::Borrowed(text),
            Self::Runs(runs) => Cow::Owned(runs_text(runs)),
        }
    }

    pub fn any_bold(&self) -> bool {
        match self {
            Self::Plain(_) => false,
            Self::Runs(runs) => runs.iter().any(|run| run.bold),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.plain_text().trim().is_empty()
    }
}

/// Text frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextShape {
    pub frame: Frame,
    pub style: TextStyle,
    pub body: TextBody,
}

impl TextShape {
    pub fn new(frame: Frame, style: TextStyle, text: impl Into<String>) -> Self {
        Self {
            frame,
            style,
            body: TextBody::Plain(text.into()),
        }
    }

    pub fn with_runs(frame: Frame, style: TextStyle, runs: Vec<RichTextRun>) -> Self {
        Self {
            frame,
            style,
            body: TextBody::Runs(runs),
        }
    }

    /// Set in bold, either by the shape style or by any run.
    pub fn is_bold(&self) -> bool {
        self.style.bold || self.body.any_bold()
    }
}

/// Fill and outline of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub color: Rgb,
    pub border: Option<Rgb>,
    /// Outline width in points.
    pub border_width: f32,
    pub rounded: bool,
}

impl Fill {
    /// Rounded box without an outline.
    pub fn solid(color: Rgb) -> Self {
        Self {
            color,
            border: None,
            border_width: 0.0,
            rounded: true,
        }
    }

    /// Rounded box with a 1pt outline.
    pub fn outlined(color: Rgb, border: Rgb) -> Self {
        Self {
            color,
            border: Some(border),
            border_width: 1.0,
            rounded: true,
        }
    }

    pub fn square(mut self) -> Self {
        self.rounded = false;
        self
    }
}

/// Filled rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RectShape {
    pub frame: Frame,
    pub fill: Fill,
}

/// Layout output shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Text frame.
    Text(TextShape),
    /// Background or decoration box.
    Rect(RectShape),
}

impl Shape {
    pub fn frame(&self) -> &Frame {
        match self {
            Self::Text(text) => &text.frame,
            Self::Rect(rect) => &rect.frame,
        }
    }

    pub fn as_text(&self) -> Option<&TextShape> {
        match self {
            Self::Text(text) => Some(text),
            Self::Rect(_) => None,
        }
    }

    /// Move vertically; the only mutation allowed after placement.
    pub(crate) fn set_top(&mut self, top: f32) {
        match self {
            Self::Text(text) => text.frame.top = top,
            Self::Rect(rect) => rect.frame.top = top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_detection_is_case_insensitive() {
        assert!(is_monospace_font("Consolas"));
        assert!(is_monospace_font("Courier New"));
        assert!(is_monospace_font(" courier "));
        assert!(!is_monospace_font("Arial"));
        assert!(TextStyle::new(10.0).code().is_monospace());
    }

    #[test]
    fn frame_intersection_and_degeneracy() {
        let a = Frame::new(1.0, 1.0, 3.0, 0.5);
        let b = Frame::new(2.0, 1.2, 3.0, 0.5);
        let (w, h) = a.intersection(&b);
        assert!((w - 2.0).abs() < 1e-6);
        assert!((h - 0.3).abs() < 1e-6);
        assert!(Frame::new(0.0, 0.0, 0.0, 1.0).is_degenerate());
        assert!(Frame::new(0.0, 0.0, 1.0, f32::NAN).is_degenerate());
        assert!(!a.is_degenerate());
    }

    #[test]
    fn run_bodies_report_bold_and_text() {
        let runs = vec![
            RichTextRun::plain("plain "),
            RichTextRun {
                text: "strong".to_string(),
                bold: true,
                ..RichTextRun::default()
            },
        ];
        let shape = TextShape::with_runs(Frame::default(), TextStyle::new(12.0), runs);
        assert!(shape.is_bold());
        assert_eq!(shape.body.plain_text(), "plain strong");
        assert!(TextBody::Plain(" \n ".to_string()).is_blank());
    }
}
