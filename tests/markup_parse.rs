mod common;

use common::fixtures::read_fixture;
use slide_fit::{parse_deck, BlockKind, DeckReader, MarkupOptions, Rgb, SemanticDeck};
use slide_fit_audit::audit_deck;
use slide_fit_layout::{LaidOutDeck, LayoutEngine, Shape, CODE_FONT};

fn fixture_deck(name: &str) -> SemanticDeck {
    let html = read_fixture(name);
    DeckReader::new(MarkupOptions {
        require_slides: true,
        ..MarkupOptions::default()
    })
    .read_str(&html)
    .unwrap_or_else(|e| panic!("parse {}: {}", name, e))
}

fn texts(deck: &LaidOutDeck, slide: usize) -> Vec<String> {
    deck.slides[slide]
        .shapes
        .iter()
        .filter_map(Shape::as_text)
        .map(|t| t.body.plain_text().into_owned())
        .collect()
}

#[test]
fn agent_patterns_reads_every_slide() {
    let deck = fixture_deck("tests/fixtures/agent_patterns.html");
    assert_eq!(deck.slides.len(), 6);
    assert_eq!(deck.accent, Rgb(0x00, 0xB4, 0xFF));
    assert!(deck.slides[0].centered);
    assert!(!deck.slides[1].centered);

    let kinds: Vec<BlockKind> = deck.slides[0].blocks.iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        [
            BlockKind::SectionLabel,
            BlockKind::Headline,
            BlockKind::Subhead,
            BlockKind::TitleMeta
        ]
    );
    assert!(deck.slides[0].blocks[1].hints.gradient);
    assert_eq!(deck.slides[0].blocks[3].text(), "Platform team \u{b7} Q3 review");
    assert_eq!(
        deck.slides[1].blocks[2].text(),
        "Every token the agent reads is a token it cannot spend on the task.\nMeasure what goes in before tuning what comes out."
    );
}

#[test]
fn script_text_never_reaches_the_deck() {
    let deck = fixture_deck("tests/fixtures/agent_patterns.html");
    let all_text: String = deck
        .slides
        .iter()
        .flat_map(|s| s.blocks.iter())
        .map(|b| b.text())
        .collect();
    assert!(!all_text.contains("addEventListener"));
    assert!(!all_text.contains("--color-accent"));
}

#[test]
fn agent_patterns_lays_out_and_audits_clean() {
    let deck = fixture_deck("tests/fixtures/agent_patterns.html");
    let laid_out = LayoutEngine::default().layout_deck(&deck);
    assert_eq!(laid_out.slides.len(), 6);
    for slide in &laid_out.slides {
        assert!(!slide.shapes.is_empty(), "slide {} is empty", slide.number);
        for shape in &slide.shapes {
            let frame = shape.frame();
            assert!(frame.width > 0.0 && frame.height > 0.0, "slide {}: {:?}", slide.number, frame);
            assert!(frame.right() <= laid_out.canvas.width + 1e-3);
        }
    }

    let tools = texts(&laid_out, 2);
    assert!(tools.iter().any(|t| t == "search"));
    assert!(tools.iter().any(|t| t.contains("62% of calls")));

    let code = laid_out.slides[3]
        .shapes
        .iter()
        .filter_map(Shape::as_text)
        .find(|t| t.body.plain_text().starts_with("loop {"))
        .expect("code shape");
    assert_eq!(code.style.font_name, CODE_FONT);

    let quote = texts(&laid_out, 5);
    assert!(quote
        .iter()
        .any(|t| t == "\u{201c}Make it work, make it right, make it fast.\u{201d}"));
    assert!(quote.iter().any(|t| t == "Kent Beck"));

    let report = audit_deck("agent_patterns", &laid_out);
    assert_eq!(report.total_slides, 6);
    assert_eq!(report.total_overflows(), 0);
}

#[test]
fn metrics_deck_places_stats_tiers_and_cards() {
    let deck = fixture_deck("tests/fixtures/metrics_deck.html");
    assert_eq!(deck.slides.len(), 5);
    assert_eq!(deck.accent, Rgb::GREEN);

    let laid_out = LayoutEngine::default().layout_deck(&deck);
    let stats = texts(&laid_out, 0);
    for number in ["3.2x", "-41%", "97%"] {
        assert!(stats.iter().any(|t| t == number), "missing {number}");
    }
    assert!(texts(&laid_out, 1).iter().any(|t| t == "1.8M"));
    assert!(texts(&laid_out, 2).iter().any(|t| t == "L1"));

    let before_after = texts(&laid_out, 3);
    assert!(before_after.iter().any(|t| t == "45 min"));
    assert!(before_after.iter().any(|t| t == "12 min"));

    let report = audit_deck("metrics", &laid_out);
    assert_eq!(report.total_overflows(), 0);
}

#[test]
fn laid_out_fixtures_survive_both_encodings() {
    let deck = fixture_deck("tests/fixtures/metrics_deck.html");
    let laid_out = LayoutEngine::default().layout_deck(&deck);

    let json = laid_out.to_json().unwrap();
    assert_eq!(LaidOutDeck::from_json(&json).unwrap(), laid_out);

    let bytes = laid_out.to_postcard().unwrap();
    assert!(bytes.len() < json.len());
    assert_eq!(LaidOutDeck::from_postcard(&bytes).unwrap(), laid_out);
}

#[test]
fn semantic_deck_json_lays_out_like_markup() {
    let deck = fixture_deck("tests/fixtures/agent_patterns.html");
    let json = serde_json::to_string(&deck).unwrap();
    let from_json: SemanticDeck = serde_json::from_str(&json).unwrap();
    assert_eq!(from_json, deck);

    let engine = LayoutEngine::default();
    assert_eq!(engine.layout_deck(&from_json), engine.layout_deck(&deck));
}

#[test]
fn empty_markup_is_an_empty_deck() {
    let deck = parse_deck("<html><body></body></html>").unwrap();
    assert!(deck.slides.is_empty());
    let laid_out = LayoutEngine::default().layout_deck(&deck);
    assert!(laid_out.slides.is_empty());
    assert!(audit_deck("empty", &laid_out).is_clean());
}
