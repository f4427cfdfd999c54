//! Errors raised while reading deck markup.

use core::fmt;

/// Structured error for markup reading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupError {
    /// Stable machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: Box<str>,
    /// Optional tokenizer offset in bytes.
    pub offset: Option<usize>,
}

impl MarkupError {
    pub const XML_ERROR: &'static str = "MARKUP_XML_ERROR";
    pub const DECODE_ERROR: &'static str = "MARKUP_DECODE_ERROR";
    pub const NO_SLIDES: &'static str = "MARKUP_NO_SLIDES";

    pub(crate) fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into().into_boxed_str(),
            offset: None,
        }
    }

    pub(crate) fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        if let Some(offset) = self.offset {
            write!(f, " [offset={}]", offset)?;
        }
        Ok(())
    }
}

impl std::error::Error for MarkupError {}
