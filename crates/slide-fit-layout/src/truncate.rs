//! Longest-prefix truncation against a height budget.

use crate::measure::{FontSpec, Measurer};

/// Appended when trailing content is cut.
pub const ELLIPSIS: &str = "\u{2026}";

impl Measurer {
    /// Longest prefix of `text` whose measured height fits `max_height`.
    ///
    /// Whole paragraphs are kept first (marked with a trailing `…` line);
    /// when not even one paragraph fits, words of the first non-blank
    /// paragraph are kept instead, at least one. Text that already fits is
    /// returned unchanged.
    pub fn truncate_to_fit(
        &self,
        text: &str,
        font: FontSpec,
        width_in: f32,
        max_height: f32,
    ) -> String {
        let fits = |candidate: &str| self.height(candidate, font, width_in) <= max_height;
        if fits(text) {
            return text.to_string();
        }

        let paragraphs: Vec<&str> = text.split('\n').collect();
        let keep = largest_fitting(paragraphs.len(), |k| {
            let mut candidate = paragraphs[..k].join("\n");
            candidate.push('\n');
            candidate.push_str(ELLIPSIS);
            fits(&candidate)
        });
        if keep >= 1 {
            let mut out = paragraphs[..keep].join("\n");
            out.push('\n');
            out.push_str(ELLIPSIS);
            return out;
        }

        let words: Vec<&str> = paragraphs
            .iter()
            .find(|p| !p.trim().is_empty())
            .map(|p| p.split_whitespace().collect())
            .unwrap_or_default();
        if words.is_empty() {
            return ELLIPSIS.to_string();
        }
        let keep = largest_fitting(words.len(), |k| {
            let mut candidate = words[..k].join(" ");
            candidate.push_str(ELLIPSIS);
            fits(&candidate)
        })
        .max(1);
        let mut out = words[..keep].join(" ");
        out.push_str(ELLIPSIS);
        out
    }
}

/// Largest `k` in `1..=n` with `accepts(k)`, or 0 when none does.
///
/// `accepts` must be monotone: once it rejects, every larger `k` rejects.
fn largest_fitting(n: usize, mut accepts: impl FnMut(usize) -> bool) -> usize {
    let (mut lo, mut hi) = (0usize, n);
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        if accepts(mid) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

/// Truncate with the built-in glyph table and default frame geometry.
pub fn truncate_to_fit(
    text: &str,
    font_size_pt: f32,
    width_in: f32,
    max_height: f32,
    bold: bool,
) -> String {
    Measurer::default().truncate_to_fit(
        text,
        FontSpec::new(font_size_pt).with_bold(bold),
        width_in,
        max_height,
    )
}
