//! Streaming HTML deck reader.
//!
//! Walks the markup once with `quick-xml`, building a [`SemanticDeck`]:
//! every `div.slide` / `section.slide` becomes a [`SlideSource`], classed
//! elements become [`SemanticBlock`]s through [`crate::class_map`], and text
//! is attached as formatted runs resolved by folding the inline scope of
//! the enclosing elements. `<br>` becomes a `\n` run during the walk.

use std::collections::BTreeMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::class_map::classify;
use crate::color::span_color;
use crate::error::MarkupError;
use crate::model::{Node, SemanticBlock, SemanticDeck, SlideSource};
use crate::rich_text::{collapse_run_whitespace, InlineScope, RichTextRun};
use crate::theme::{extract_css_vars, resolve_accent};

/// Reader limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkupOptions {
    /// Maximum element nesting tracked; deeper elements are flattened into
    /// their ancestor.
    pub max_nesting: usize,
    /// Fail when the document holds no slide elements.
    pub require_slides: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            max_nesting: 64,
            require_slides: false,
        }
    }
}

/// Parse deck markup with default options.
pub fn parse_deck(html: &str) -> Result<SemanticDeck, MarkupError> {
    DeckReader::new(MarkupOptions::default()).read_str(html)
}

/// Reusable deck reader.
#[derive(Clone, Copy, Debug, Default)]
pub struct DeckReader {
    options: MarkupOptions,
}

struct OpenElement {
    tag: String,
    block: Option<SemanticBlock>,
    scope: InlineScope,
    preformatted: bool,
    slide: Option<SlideSource>,
}

#[derive(Default)]
struct ReadState {
    stack: Vec<OpenElement>,
    slides: Vec<SlideSource>,
    css_vars: BTreeMap<String, String>,
    skip_depth: usize,
    style_depth: usize,
    nesting_overflow: usize,
}

impl DeckReader {
    pub fn new(options: MarkupOptions) -> Self {
        Self { options }
    }

    pub fn read_str(&self, html: &str) -> Result<SemanticDeck, MarkupError> {
        self.read_bytes(html.as_bytes())
    }

    pub fn read_bytes(&self, html: &[u8]) -> Result<SemanticDeck, MarkupError> {
        let mut reader = Reader::from_reader(html);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        config.allow_dangling_amp = true;

        let mut buf = Vec::with_capacity(64);
        let mut st = ReadState::default();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let tag = decode_tag_name(&reader, e.name().as_ref())?;
                    if st.skip_depth > 0 {
                        if should_skip_tag(&tag) {
                            st.skip_depth += 1;
                        }
                    } else if tag == "style" {
                        st.style_depth += 1;
                    } else if should_skip_tag(&tag) {
                        st.skip_depth += 1;
                    } else if is_void_tag(&tag) {
                        self.handle_void(&mut st, &reader, &e, &tag)?;
                    } else {
                        self.open_element(&mut st, &reader, &e, tag)?;
                    }
                }
                Ok(Event::Empty(e)) => {
                    let tag = decode_tag_name(&reader, e.name().as_ref())?;
                    if st.skip_depth == 0 && st.style_depth == 0 && !should_skip_tag(&tag) {
                        self.handle_void(&mut st, &reader, &e, &tag)?;
                    }
                }
                Ok(Event::End(e)) => {
                    let tag = decode_tag_name(&reader, e.name().as_ref())?;
                    if st.skip_depth > 0 {
                        if should_skip_tag(&tag) {
                            st.skip_depth -= 1;
                        }
                    } else if tag == "style" {
                        st.style_depth = st.style_depth.saturating_sub(1);
                    } else if !is_void_tag(&tag) {
                        close_element(&mut st, &tag);
                    }
                }
                Ok(Event::Text(e)) => {
                    if st.skip_depth == 0 {
                        let text = e.decode().map_err(|err| {
                            MarkupError::new(
                                MarkupError::DECODE_ERROR,
                                format!("text decode error: {:?}", err),
                            )
                            .with_offset(reader_offset(&reader))
                        })?;
                        if st.style_depth > 0 {
                            extract_css_vars(&text, &mut st.css_vars);
                        } else {
                            push_text(&mut st, &text);
                        }
                    }
                }
                Ok(Event::CData(e)) => {
                    if st.skip_depth == 0 {
                        let text = reader.decoder().decode(&e).map_err(|err| {
                            MarkupError::new(
                                MarkupError::DECODE_ERROR,
                                format!("cdata decode error: {:?}", err),
                            )
                            .with_offset(reader_offset(&reader))
                        })?;
                        if st.style_depth > 0 {
                            extract_css_vars(&text, &mut st.css_vars);
                        } else {
                            push_text(&mut st, &text);
                        }
                    }
                }
                Ok(Event::GeneralRef(e)) => {
                    if st.skip_depth == 0 && st.style_depth == 0 {
                        let name = e.decode().map_err(|err| {
                            MarkupError::new(
                                MarkupError::DECODE_ERROR,
                                format!("entity decode error: {:?}", err),
                            )
                            .with_offset(reader_offset(&reader))
                        })?;
                        let resolved = resolve_entity(&name);
                        push_text(&mut st, &resolved);
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    return Err(MarkupError::new(
                        MarkupError::XML_ERROR,
                        format!("XML error: {:?}", err),
                    )
                    .with_offset(reader_offset(&reader)));
                }
            }
            buf.clear();
        }

        // Unterminated elements close at end of input.
        while !st.stack.is_empty() {
            pop_element(&mut st);
        }

        if st.slides.is_empty() && self.options.require_slides {
            return Err(MarkupError::new(
                MarkupError::NO_SLIDES,
                "no div.slide or section.slide elements found",
            ));
        }
        if st.slides.is_empty() {
            log::warn!("No slides found in markup; expected div.slide or section.slide");
        }

        Ok(SemanticDeck {
            accent: resolve_accent(&st.css_vars),
            slides: st.slides,
        })
    }

    fn open_element(
        &self,
        st: &mut ReadState,
        reader: &Reader<&[u8]>,
        e: &BytesStart<'_>,
        tag: String,
    ) -> Result<(), MarkupError> {
        if st.stack.len() >= self.options.max_nesting {
            st.nesting_overflow += 1;
            log::warn!(
                "Element nesting depth {} exceeds max_nesting ({}); flattening",
                st.stack.len() + st.nesting_overflow,
                self.options.max_nesting
            );
            return Ok(());
        }

        let attrs = read_attributes(reader, e);
        let parent_scope = st.stack.last().map(|el| el.scope).unwrap_or_default();
        let parent_pre = st.stack.last().is_some_and(|el| el.preformatted);
        let in_slide = st.stack.iter().any(|el| el.slide.is_some());

        let is_slide_element = !in_slide
            && matches!(tag.as_str(), "div" | "section")
            && attrs.classes.iter().any(|c| c == "slide");
        if is_slide_element {
            let centered = attrs
                .classes
                .iter()
                .any(|c| c == "center" || c == "title-slide");
            st.stack.push(OpenElement {
                tag,
                block: None,
                scope: InlineScope::default(),
                preformatted: false,
                slide: Some(SlideSource {
                    centered,
                    blocks: Vec::new(),
                }),
            });
            return Ok(());
        }

        let (bold, italic) = match tag.as_str() {
            "strong" | "b" => (true, false),
            "em" | "i" => (false, true),
            _ => (false, false),
        };
        let color = if tag == "span" {
            attrs.classes.iter().find_map(|c| span_color(c))
        } else {
            None
        };
        let scope = parent_scope.enter(bold, italic, color);

        let block = if in_slide {
            classify(&tag, &attrs.classes, attrs.style.as_deref()).map(|class| {
                let mut block = SemanticBlock::new(class.kind).with_hints(class.hints);
                block.role = class.role;
                block
            })
        } else {
            None
        };
        let preformatted = parent_pre
            || tag == "pre"
            || block.as_ref().is_some_and(|b| b.kind.is_preformatted());

        st.stack.push(OpenElement {
            tag,
            block,
            scope,
            preformatted,
            slide: None,
        });
        Ok(())
    }

    fn handle_void(
        &self,
        st: &mut ReadState,
        reader: &Reader<&[u8]>,
        e: &BytesStart<'_>,
        tag: &str,
    ) -> Result<(), MarkupError> {
        match tag {
            "br" => {
                push_text(st, "\n");
                Ok(())
            }
            "img" | "hr" | "meta" | "link" | "input" | "wbr" | "col" | "source" | "area"
            | "base" | "embed" | "param" | "track" => Ok(()),
            // Self-closed non-void elements (`<div class="x"/>`) open and close at once.
            _ => {
                let depth = st.stack.len();
                self.open_element(st, reader, e, tag.to_string())?;
                if st.stack.len() > depth {
                    pop_element(st);
                }
                Ok(())
            }
        }
    }
}

struct Attributes {
    classes: Vec<String>,
    style: Option<String>,
}

fn read_attributes(reader: &Reader<&[u8]>, e: &BytesStart<'_>) -> Attributes {
    let mut classes = Vec::new();
    let mut style = None;
    for attr in e.attributes().flatten() {
        let key = match reader.decoder().decode(attr.key.as_ref()) {
            Ok(v) => v.to_ascii_lowercase(),
            Err(_) => continue,
        };
        let val = match reader.decoder().decode(&attr.value) {
            Ok(v) => v.to_string(),
            Err(_) => continue,
        };
        if key == "class" {
            classes = val
                .split_whitespace()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect();
        } else if key == "style" {
            style = Some(val);
        }
    }
    Attributes { classes, style }
}

fn close_element(st: &mut ReadState, tag: &str) {
    if st.nesting_overflow > 0 {
        st.nesting_overflow -= 1;
        return;
    }
    let Some(pos) = st.stack.iter().rposition(|el| el.tag == tag) else {
        log::warn!("Ignoring unmatched end tag </{}>", tag);
        return;
    };
    while st.stack.len() > pos {
        pop_element(st);
    }
}

fn pop_element(st: &mut ReadState) {
    let Some(el) = st.stack.pop() else {
        return;
    };
    if let Some(slide) = el.slide {
        st.slides.push(slide);
        return;
    }
    let Some(block) = el.block else {
        return;
    };
    for parent in st.stack.iter_mut().rev() {
        if let Some(parent_block) = parent.block.as_mut() {
            parent_block.content.push(Node::Block(block));
            return;
        }
        if let Some(slide) = parent.slide.as_mut() {
            slide.blocks.push(block);
            return;
        }
    }
}

fn push_text(st: &mut ReadState, raw: &str) {
    let Some(top) = st.stack.last() else {
        return;
    };
    let scope = top.scope;
    let preformatted = top.preformatted;
    let Some(target) = st
        .stack
        .iter_mut()
        .rev()
        .take_while(|el| el.slide.is_none())
        .find_map(|el| el.block.as_mut())
    else {
        return;
    };

    let text = if preformatted {
        raw.replace("\r\n", "\n")
    } else {
        collapse_run_whitespace(raw)
    };
    if text.is_empty() {
        return;
    }
    let whitespace_only = text.chars().all(|c| c == ' ');
    if whitespace_only && !matches!(target.content.last(), Some(Node::Text(_))) {
        return;
    }

    let run = scope.run(text);
    if let Some(Node::Text(last)) = target.content.last_mut() {
        if last.bold == run.bold && last.italic == run.italic && last.color == run.color {
            append_run_text(last, &run.text, preformatted);
            return;
        }
    }
    target.content.push(Node::Text(run));
}

fn append_run_text(last: &mut RichTextRun, text: &str, preformatted: bool) {
    if !preformatted && last.text.ends_with(' ') && text.starts_with(' ') {
        last.text.push_str(&text[1..]);
    } else {
        last.text.push_str(text);
    }
}

fn decode_tag_name(reader: &Reader<&[u8]>, raw: &[u8]) -> Result<String, MarkupError> {
    let decoded = reader.decoder().decode(raw).map_err(|err| {
        MarkupError::new(
            MarkupError::DECODE_ERROR,
            format!("tag name decode error: {:?}", err),
        )
        .with_offset(reader_offset(reader))
    })?;
    let local_name = decoded.rsplit(':').next().unwrap_or(decoded.as_ref());
    Ok(local_name.to_ascii_lowercase())
}

fn reader_offset(reader: &Reader<&[u8]>) -> usize {
    usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX)
}

fn should_skip_tag(tag: &str) -> bool {
    matches!(tag, "script" | "noscript" | "template" | "title" | "svg")
}

fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "br" | "img"
            | "hr"
            | "meta"
            | "link"
            | "input"
            | "wbr"
            | "col"
            | "source"
            | "area"
            | "base"
            | "embed"
            | "param"
            | "track"
    )
}

/// Resolve an entity reference body (`nbsp`, `#8594`, `#x2192`, `amp`).
fn resolve_entity(name: &str) -> String {
    let named = match name {
        "nbsp" => Some('\u{00A0}'),
        "mdash" => Some('\u{2014}'),
        "ndash" => Some('\u{2013}'),
        "rarr" => Some('\u{2192}'),
        "larr" => Some('\u{2190}'),
        "harr" => Some('\u{2194}'),
        "hellip" => Some('\u{2026}'),
        "times" => Some('\u{00D7}'),
        "middot" => Some('\u{00B7}'),
        "bull" => Some('\u{2022}'),
        "copy" => Some('\u{00A9}'),
        "check" => Some('\u{2713}'),
        "rsquo" => Some('\u{2019}'),
        "lsquo" => Some('\u{2018}'),
        "rdquo" => Some('\u{201D}'),
        "ldquo" => Some('\u{201C}'),
        _ => None,
    };
    if let Some(ch) = named {
        return ch.to_string();
    }
    let reference = format!("&{};", name);
    match quick_xml::escape::unescape(&reference) {
        Ok(resolved) => resolved.into_owned(),
        Err(err) => {
            log::warn!("Unknown entity &{}; kept literally ({:?})", name, err);
            reference
        }
    }
}
