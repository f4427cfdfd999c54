//! Semantic slide model and HTML deck reader for `slide-fit`.
//!
//! The root crate turns deck markup into a [`SemanticDeck`]: a closed set of
//! block kinds, formatted text runs and deck theming. Layout and audit live
//! in the `slide-fit-layout` and `slide-fit-audit` crates.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod class_map;
pub mod color;
pub mod error;
pub mod markup;
pub mod model;
pub mod rich_text;
pub mod theme;

pub use color::Rgb;
pub use error::MarkupError;
pub use markup::{parse_deck, DeckReader, MarkupOptions};
pub use model::{
    BlockKind, Node, SemanticBlock, SemanticDeck, SlideSource, SlotRole, StyleHints, Tone,
};
pub use rich_text::{normalize_runs, runs_text, InlineScope, RichTextRun};
