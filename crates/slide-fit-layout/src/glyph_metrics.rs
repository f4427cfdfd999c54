//! Per-character advance widths for width estimation without a font renderer.

use serde::{Deserialize, Serialize};

/// Optional text measurement hook replacing the built-in glyph table.
pub trait TextMeasurer: Send + Sync {
    /// Rendered width of a single line of text, in points.
    fn measure_text_pt(&self, text: &str, font_size_pt: f32, bold: bool) -> f32;

    /// Rendered width of a single line set in a fixed-pitch face, in points.
    ///
    /// Default delegates to `measure_text_pt`.
    fn measure_monospace_pt(&self, text: &str, font_size_pt: f32) -> f32 {
        self.measure_text_pt(text, font_size_pt, false)
    }
}

/// Width model for the proportional deck face and its fixed-pitch code face.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlyphMetrics {
    /// Em width of characters missing from the table.
    pub default_width: f32,
    /// Multiplier applied to proportional text set in bold.
    pub bold_scale: f32,
    /// Em width of every character in the fixed-pitch face.
    pub monospace_factor: f32,
}

impl Default for GlyphMetrics {
    fn default() -> Self {
        Self {
            default_width: 0.56,
            bold_scale: 1.08,
            monospace_factor: 0.60,
        }
    }
}

impl GlyphMetrics {
    /// Em width of `ch` in the proportional face.
    pub fn em_width(&self, ch: char) -> f32 {
        arial_em_width(ch).unwrap_or(self.default_width)
    }

    /// Rendered width of `text` in points.
    ///
    /// Fixed-pitch text ignores `bold`: the code face keeps its advance.
    pub fn text_width_pt(&self, text: &str, font_size_pt: f32, bold: bool, monospace: bool) -> f32 {
        if monospace {
            return text.chars().count() as f32 * self.monospace_factor * font_size_pt;
        }
        let em_sum: f32 = text.chars().map(|ch| self.em_width(ch)).sum();
        let width = em_sum * font_size_pt;
        if bold {
            width * self.bold_scale
        } else {
            width
        }
    }
}

impl TextMeasurer for GlyphMetrics {
    fn measure_text_pt(&self, text: &str, font_size_pt: f32, bold: bool) -> f32 {
        self.text_width_pt(text, font_size_pt, bold, false)
    }

    fn measure_monospace_pt(&self, text: &str, font_size_pt: f32) -> f32 {
        self.text_width_pt(text, font_size_pt, false, true)
    }
}

/// Regular-weight Arial advances as a fraction of the em, printable ASCII only.
fn arial_em_width(ch: char) -> Option<f32> {
    let em = match ch {
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | '[' | '\\' | ']' | 'I' | 'f' | 't' => 0.28,
        '"' => 0.35,
        '#' | '$' | '?' | '_' | 'L' => 0.56,
        '0'..='9' => 0.56,
        '%' => 0.89,
        '&' => 0.67,
        '\'' => 0.19,
        '(' | ')' | '-' | '`' | '{' | '}' | 'r' => 0.33,
        '*' => 0.39,
        '+' | '<' | '=' | '>' | '~' => 0.58,
        '@' => 1.02,
        'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 0.67,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' | 'w' => 0.72,
        'F' | 'T' | 'Z' => 0.61,
        'G' | 'O' | 'Q' => 0.78,
        'J' => 0.50,
        'M' | 'm' => 0.83,
        'W' => 0.94,
        '^' => 0.47,
        'a' | 'b' | 'd' | 'e' | 'g' | 'h' | 'n' | 'o' | 'p' | 'q' | 'u' => 0.56,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 0.50,
        'i' | 'j' | 'l' => 0.22,
        '|' => 0.26,
        _ => return None,
    };
    Some(em)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_narrow_and_wide_glyphs() {
        let m = GlyphMetrics::default();
        assert_eq!(m.em_width('i'), 0.22);
        assert_eq!(m.em_width('W'), 0.94);
        assert_eq!(m.em_width('7'), 0.56);
        assert_eq!(m.em_width('\u{2026}'), 0.56);
    }

    #[test]
    fn bold_widens_proportional_text_only() {
        let m = GlyphMetrics::default();
        let regular = m.text_width_pt("Hello", 10.0, false, false);
        let bold = m.text_width_pt("Hello", 10.0, true, false);
        assert!((bold - regular * 1.08).abs() < 1e-4);

        let mono = m.text_width_pt("Hello", 10.0, false, true);
        assert!((mono - 30.0).abs() < 1e-4);
        assert_eq!(m.text_width_pt("Hello", 10.0, true, true), mono);
    }

    #[test]
    fn measurer_trait_routes_to_table() {
        let m = GlyphMetrics::default();
        let measurer: &dyn TextMeasurer = &m;
        assert!((measurer.measure_text_pt("ab", 10.0, false) - 11.2).abs() < 1e-4);
        assert!((measurer.measure_monospace_pt("ab", 10.0) - 12.0).abs() < 1e-4);
    }
}
