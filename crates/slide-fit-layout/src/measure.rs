//! Wrapped text height estimation.
//!
//! A text frame loses a fixed inset on each side. Each explicit paragraph
//! either fits on one line or wraps to `ceil(width / usable * inefficiency)`
//! lines (never fewer than two), empty paragraphs count as a fraction of a
//! line, and the height is the line count times the line pitch plus the
//! vertical inset.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::glyph_metrics::{GlyphMetrics, TextMeasurer};

/// Points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Text frame geometry and wrap model parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasureConfig {
    /// Combined left and right frame inset, in inches.
    pub horizontal_inset: f32,
    /// Combined top and bottom frame inset, in inches.
    pub vertical_inset: f32,
    /// Floor for the usable line width, in inches.
    pub min_usable_width: f32,
    /// Default line pitch as a multiple of the font size.
    pub line_spacing: f32,
    /// Wrapped lines never break perfectly at word boundaries.
    pub wrap_inefficiency: f32,
    /// Share of a line taken by an empty paragraph.
    pub empty_paragraph_lines: f32,
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            horizontal_inset: 0.20,
            vertical_inset: 0.10,
            min_usable_width: 0.5,
            line_spacing: 1.2,
            wrap_inefficiency: 1.05,
            empty_paragraph_lines: 0.4,
        }
    }
}

/// Font parameters that influence measured height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSpec {
    pub size_pt: f32,
    pub bold: bool,
    pub monospace: bool,
    /// Line pitch override; `None` uses the configured default.
    pub line_spacing: Option<f32>,
}

impl FontSpec {
    pub fn new(size_pt: f32) -> Self {
        Self {
            size_pt,
            bold: false,
            monospace: false,
            line_spacing: None,
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

    pub fn monospace(mut self) -> Self {
        self.monospace = true;
        self
    }

    pub fn with_line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = Some(spacing);
        self
    }
}

/// Result of measuring a block of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Estimated frame height in inches, insets included.
    pub height: f32,
    /// Estimated line count, empty paragraphs rounded up.
    pub line_count: u32,
}

/// Height estimator bound to a measure config and a width source.
#[derive(Clone)]
pub struct Measurer {
    cfg: MeasureConfig,
    glyphs: GlyphMetrics,
    text_measurer: Option<Arc<dyn TextMeasurer>>,
}

impl core::fmt::Debug for Measurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Measurer")
            .field("cfg", &self.cfg)
            .field("glyphs", &self.glyphs)
            .field("has_text_measurer", &self.text_measurer.is_some())
            .finish()
    }
}

impl Default for Measurer {
    fn default() -> Self {
        Self::new(MeasureConfig::default(), GlyphMetrics::default())
    }
}

impl Measurer {
    pub fn new(cfg: MeasureConfig, glyphs: GlyphMetrics) -> Self {
        Self {
            cfg,
            glyphs,
            text_measurer: None,
        }
    }

    /// Install a shared text measurer in place of the glyph table.
    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.text_measurer = Some(measurer);
        self
    }

    pub fn config(&self) -> &MeasureConfig {
        &self.cfg
    }

    /// Rendered width of one line in points.
    pub fn line_width_pt(&self, text: &str, font: FontSpec) -> f32 {
        match &self.text_measurer {
            Some(m) if font.monospace => m.measure_monospace_pt(text, font.size_pt),
            Some(m) => m.measure_text_pt(text, font.size_pt, font.bold),
            None => self
                .glyphs
                .text_width_pt(text, font.size_pt, font.bold, font.monospace),
        }
    }

    /// Usable line width in points for a frame `width_in` inches wide.
    pub fn usable_width_pt(&self, width_in: f32) -> f32 {
        ((width_in - self.cfg.horizontal_inset) * POINTS_PER_INCH)
            .max(self.cfg.min_usable_width * POINTS_PER_INCH)
    }

    /// Line pitch in inches.
    pub fn line_height(&self, font: FontSpec) -> f32 {
        font.size_pt / POINTS_PER_INCH * font.line_spacing.unwrap_or(self.cfg.line_spacing)
    }

    /// Fractional line count of `text` wrapped into a frame `width_in` wide.
    pub fn wrapped_lines(&self, text: &str, font: FontSpec, width_in: f32) -> f32 {
        let usable = self.usable_width_pt(width_in);
        let mut lines = 0.0f32;
        for para in text.split('\n') {
            let para = para.trim();
            if para.is_empty() {
                lines += self.cfg.empty_paragraph_lines;
                continue;
            }
            let rendered = self.line_width_pt(para, font);
            if rendered <= usable {
                lines += 1.0;
            } else {
                lines += (rendered / usable * self.cfg.wrap_inefficiency)
                    .ceil()
                    .max(2.0);
            }
        }
        lines
    }

    /// Measure `text` set in `font` inside a frame `width_in` inches wide.
    pub fn measure(&self, text: &str, font: FontSpec, width_in: f32) -> TextMetrics {
        let lines = self.wrapped_lines(text, font, width_in);
        TextMetrics {
            height: lines * self.line_height(font) + self.cfg.vertical_inset,
            line_count: lines.ceil() as u32,
        }
    }

    /// Shorthand for `measure(..).height`.
    pub fn height(&self, text: &str, font: FontSpec, width_in: f32) -> f32 {
        self.measure(text, font, width_in).height
    }

    /// Frame height of a single unwrapped line.
    pub fn single_line_height(&self, font: FontSpec) -> f32 {
        self.line_height(font) + self.cfg.vertical_inset
    }
}

/// Measure with the built-in glyph table and default frame geometry.
pub fn measure(
    text: &str,
    font_size_pt: f32,
    width_in: f32,
    bold: bool,
    monospace: bool,
) -> TextMetrics {
    let mut font = FontSpec::new(font_size_pt).with_bold(bold);
    font.monospace = monospace;
    Measurer::default().measure(text, font, width_in)
}

/// [`measure`] with an explicit line pitch.
pub fn measure_with_spacing(
    text: &str,
    font_size_pt: f32,
    width_in: f32,
    bold: bool,
    monospace: bool,
    line_spacing: f32,
) -> TextMetrics {
    let mut font = FontSpec::new(font_size_pt)
        .with_bold(bold)
        .with_line_spacing(line_spacing);
    font.monospace = monospace;
    Measurer::default().measure(text, font, width_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn empty_text_is_a_fraction_of_a_line() {
        let m = measure("", 12.0, 4.0, false, false);
        assert!(approx(m.height, 0.4 * 0.2 + 0.1));
        assert_eq!(m.line_count, 1);
    }

    #[test]
    fn short_text_is_one_line() {
        let m = measure("Hello", 18.0, 5.0, false, false);
        assert!(approx(m.height, 0.3 + 0.1));
        assert_eq!(m.line_count, 1);
    }

    #[test]
    fn overflowing_paragraph_wraps_to_at_least_two_lines() {
        // 20 "W" at 10pt is 188pt against 64.8pt usable.
        let m = measure(&"W".repeat(20), 10.0, 1.1, false, false);
        assert_eq!(m.line_count, 4);
        let barely = measure(&"x".repeat(14), 10.0, 1.1, false, false);
        assert_eq!(barely.line_count, 2);
    }

    #[test]
    fn narrow_frames_use_the_minimum_usable_width() {
        let a = measure("some text here", 12.0, 0.1, false, false);
        let b = measure("some text here", 12.0, 0.7, false, false);
        assert_eq!(a, b);
    }

    #[test]
    fn explicit_paragraphs_add_up() {
        let one = measure("alpha", 12.0, 4.0, false, false);
        let two = measure("alpha\nbeta", 12.0, 4.0, false, false);
        let gap = measure("alpha\n\nbeta", 12.0, 4.0, false, false);
        assert!(approx(two.height - one.height, 0.2));
        assert!(approx(gap.height - two.height, 0.08));
        assert_eq!(gap.line_count, 3);
    }

    #[test]
    fn spacing_and_monospace_change_height() {
        let tight = measure_with_spacing("a\nb", 10.0, 4.0, false, true, 1.0);
        assert!(approx(tight.height, 2.0 * 10.0 / 72.0 + 0.1));
        let mono_wide = measure(&"i".repeat(60), 10.0, 3.0, false, true);
        let prop = measure(&"i".repeat(60), 10.0, 3.0, false, false);
        assert!(mono_wide.height > prop.height);
    }

    #[test]
    fn bold_never_measures_shorter() {
        let text = "A reasonably long sentence that needs to wrap across lines";
        for width in [1.5f32, 2.5, 4.0, 8.4] {
            let regular = measure(text, 14.0, width, false, false);
            let bold = measure(text, 14.0, width, true, false);
            assert!(bold.height >= regular.height);
        }
    }

    struct FixedWidth;

    impl TextMeasurer for FixedWidth {
        fn measure_text_pt(&self, text: &str, font_size_pt: f32, _bold: bool) -> f32 {
            text.chars().count() as f32 * font_size_pt
        }
    }

    #[test]
    fn custom_measurer_replaces_the_table() {
        let measurer = Measurer::default().with_text_measurer(Arc::new(FixedWidth));
        // 10 chars at 10pt = 100pt against 72pt usable.
        let m = measurer.measure("abcdefghij", FontSpec::new(10.0), 1.2);
        assert_eq!(m.line_count, 2);
        let mono = measurer.line_width_pt("abc", FontSpec::new(10.0).monospace());
        assert!(approx(mono, 30.0));
    }
}
