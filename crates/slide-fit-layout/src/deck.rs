//! Laid-out deck output and its JSON/postcard encodings.

use core::fmt;

use serde::{Deserialize, Serialize};
use slide_fit::Rgb;

use crate::config::Canvas;
use crate::engine::LayoutDiagnostic;
use crate::shape::Shape;

/// Format version written into every encoded deck.
pub const DECK_FORMAT_VERSION: u16 = 1;

/// One finished slide: background plus shapes in paint order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaidOutSlide {
    /// 1-based slide number.
    pub number: usize,
    pub background: Rgb,
    pub shapes: Vec<Shape>,
}

impl LaidOutSlide {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            background: Rgb::BLACK,
            shapes: Vec::new(),
        }
    }

    /// Lowest shape bottom on the slide, `0.0` when empty.
    pub fn content_bottom(&self) -> f32 {
        self.shapes
            .iter()
            .map(|shape| shape.frame().bottom())
            .fold(0.0, f32::max)
    }
}

/// Whole laid-out deck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LaidOutDeck {
    pub version: u16,
    pub canvas: Canvas,
    pub slides: Vec<LaidOutSlide>,
    /// Diagnostics raised while laying out the deck.
    #[serde(default)]
    pub diagnostics: Vec<LayoutDiagnostic>,
}

impl LaidOutDeck {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            version: DECK_FORMAT_VERSION,
            canvas,
            slides: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn shape_count(&self) -> usize {
        self.slides.iter().map(|slide| slide.shapes.len()).sum()
    }

    pub fn to_json(&self) -> Result<String, DeckCodecError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DeckCodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DeckCodecError> {
        let deck: Self = serde_json::from_str(json)?;
        deck.check_version()
    }

    /// Compact binary snapshot.
    pub fn to_postcard(&self) -> Result<Vec<u8>, DeckCodecError> {
        Ok(postcard::to_allocvec(self)?)
    }

    pub fn from_postcard(bytes: &[u8]) -> Result<Self, DeckCodecError> {
        let deck: Self = postcard::from_bytes(bytes)?;
        deck.check_version()
    }

    fn check_version(self) -> Result<Self, DeckCodecError> {
        if self.version != DECK_FORMAT_VERSION {
            return Err(DeckCodecError::UnsupportedVersion(self.version));
        }
        Ok(self)
    }
}

/// Errors while encoding or decoding a [`LaidOutDeck`].
#[derive(Debug)]
pub enum DeckCodecError {
    Json(serde_json::Error),
    Postcard(postcard::Error),
    UnsupportedVersion(u16),
}

impl fmt::Display for DeckCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(err) => write!(f, "deck json error: {}", err),
            Self::Postcard(err) => write!(f, "deck postcard error: {}", err),
            Self::UnsupportedVersion(version) => write!(
                f,
                "unsupported deck format version {} (expected {})",
                version, DECK_FORMAT_VERSION
            ),
        }
    }
}

impl std::error::Error for DeckCodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Postcard(err) => Some(err),
            Self::UnsupportedVersion(_) => None,
        }
    }
}

impl From<serde_json::Error> for DeckCodecError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<postcard::Error> for DeckCodecError {
    fn from(err: postcard::Error) -> Self {
        Self::Postcard(err)
    }
}
