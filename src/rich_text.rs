//! Formatted text runs and their normalization.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::color::Rgb;

/// One span of uniformly formatted text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextRun {
    pub text: String,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    /// Explicit run color; `None` defers to the containing shape's color.
    #[serde(default)]
    pub color: Option<Rgb>,
}

impl RichTextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    fn same_format(&self, other: &RichTextRun) -> bool {
        self.bold == other.bold && self.italic == other.italic && self.color == other.color
    }
}

/// Inherited inline formatting while walking nested markup.
///
/// Entering an element folds its own formatting into the parent scope:
/// bold and italic accumulate with OR, the innermost explicit color wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InlineScope {
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Rgb>,
}

impl InlineScope {
    pub fn enter(self, bold: bool, italic: bool, color: Option<Rgb>) -> Self {
        Self {
            bold: self.bold || bold,
            italic: self.italic || italic,
            color: color.or(self.color),
        }
    }

    pub fn run(self, text: impl Into<String>) -> RichTextRun {
        RichTextRun {
            text: text.into(),
            bold: self.bold,
            italic: self.italic,
            color: self.color,
        }
    }
}

/// Collapse whitespace inside each line to single spaces while keeping
/// explicit line breaks. A single boundary space is kept so adjacent runs
/// stay separated.
pub fn collapse_run_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch == '\n' {
            pending_space = false;
            out.push('\n');
        } else if ch.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() && !out.ends_with('\n') {
                out.push(' ');
            } else if pending_space && out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch);
        }
    }
    if pending_space && !out.ends_with('\n') {
        out.push(' ');
    }
    out
}

/// Normalize plain text: collapse whitespace per line, trim every line and
/// trim the whole.
pub fn normalize_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        let mut first = true;
        for word in line.split_whitespace() {
            if !first {
                out.push(' ');
            }
            out.push_str(word);
            first = false;
        }
    }
    out.trim().to_string()
}

/// Finalize a run sequence: merge neighbours with identical formatting,
/// strip the outer whitespace and drop empty runs.
pub fn normalize_runs<I>(runs: I) -> Vec<RichTextRun>
where
    I: IntoIterator<Item = RichTextRun>,
{
    let mut merged: SmallVec<[RichTextRun; 8]> = SmallVec::new();
    for run in runs {
        if run.text.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.same_format(&run) => last.text.push_str(&run.text),
            _ => merged.push(run),
        }
    }

    if let Some(first) = merged.first_mut() {
        let trimmed = first.text.trim_start().len();
        let cut = first.text.len() - trimmed;
        first.text.drain(..cut);
    }
    if let Some(last) = merged.last_mut() {
        let keep = last.text.trim_end().len();
        last.text.truncate(keep);
    }

    let mut out: Vec<RichTextRun> = Vec::with_capacity(merged.len());
    for run in merged {
        if run.text.is_empty() {
            continue;
        }
        // Dropping an empty run can bring equal neighbours together.
        match out.last_mut() {
            Some(last) if last.same_format(&run) => last.text.push_str(&run.text),
            _ => out.push(run),
        }
    }
    // Leading runs that were pure whitespace may have been dropped above.
    if let Some(first) = out.first_mut() {
        let trimmed = first.text.trim_start().len();
        let cut = first.text.len() - trimmed;
        first.text.drain(..cut);
    }
    if let Some(last) = out.last_mut() {
        let keep = last.text.trim_end().len();
        last.text.truncate(keep);
    }
    out.retain(|run| !run.text.is_empty());
    out
}

/// Plain text of a run sequence.
pub fn runs_text(runs: &[RichTextRun]) -> String {
    let mut out = String::new();
    for run in runs {
        out.push_str(&run.text);
    }
    out
}
