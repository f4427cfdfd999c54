use slide_fit::{BlockKind, SemanticBlock, SemanticDeck, SlideSource, SlotRole, StyleHints};
use slide_fit_layout::{
    compress_slide, measure, resolve_columns, truncate_to_fit, CompressionConfig, Fill, Frame,
    LayoutConfig, LayoutEngine, RectShape, Shape, ELLIPSIS,
};

fn approx(a: f32, b: f32, tol: f32) -> bool {
    (a - b).abs() <= tol
}

fn slot(role: SlotRole, text: &str) -> SemanticBlock {
    SemanticBlock::new(BlockKind::Generic)
        .with_role(role)
        .with_text(text)
}

fn card(title: &str, text: &str) -> SemanticBlock {
    SemanticBlock::new(BlockKind::Card)
        .with_child(slot(SlotRole::CardTitle, title))
        .with_child(slot(SlotRole::CardText, text))
}

fn single_slide(centered: bool, blocks: Vec<SemanticBlock>) -> SemanticDeck {
    SemanticDeck {
        slides: vec![SlideSource { centered, blocks }],
        ..SemanticDeck::default()
    }
}

fn rects(shapes: &[Shape]) -> Vec<&Frame> {
    shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Rect(rect) => Some(&rect.frame),
            Shape::Text(_) => None,
        })
        .collect()
}

fn flow_of(steps: &[(&str, &str)]) -> SemanticBlock {
    steps
        .iter()
        .enumerate()
        .fold(SemanticBlock::new(BlockKind::FlowDiagram), |flow, (i, (title, desc))| {
            flow.with_child(
                SemanticBlock::new(BlockKind::FlowStep)
                    .with_child(slot(SlotRole::StepNumber, &(i + 1).to_string()))
                    .with_child(slot(SlotRole::StepTitle, title))
                    .with_child(slot(SlotRole::StepDesc, desc)),
            )
        })
}

fn six_steps(long_desc: &str) -> SemanticBlock {
    flow_of(&[
        ("Read", "Stream the markup."),
        ("Index", long_desc),
        ("Claim", "Rules take blocks."),
        ("Place", "Stack down the cursor."),
        ("Compact", "Pull content up."),
        ("Audit", "Re-measure frames."),
    ])
}

/// Text frames centered inside `boxes` never reach past the box bottom.
fn assert_text_inside(shapes: &[Shape], boxes: &[&Frame]) {
    for (frame, body) in texts(shapes) {
        let cx = frame.left + frame.width / 2.0;
        let cy = frame.top + frame.height / 2.0;
        for b in boxes {
            if cx > b.left && cx < b.right() && cy > b.top && cy < b.bottom() {
                assert!(frame.bottom() <= b.bottom() + 1e-4, "{body:?} leaves {b:?}");
            }
        }
    }
}

fn texts(shapes: &[Shape]) -> Vec<(&Frame, String)> {
    shapes
        .iter()
        .filter_map(|shape| shape.as_text())
        .map(|text| (&text.frame, text.body.plain_text().into_owned()))
        .collect()
}

#[test]
fn wide_glyphs_wrap_to_four_lines() {
    let text = "W".repeat(20);
    let metrics = measure(&text, 20.0, 2.0, false, false);
    assert_eq!(metrics.line_count, 4);
    assert!(approx(metrics.height, 1.4333, 1e-3), "height {}", metrics.height);
}

#[test]
fn oversized_column_hint_steps_down_to_three() {
    let grid = resolve_columns(5, Some(5));
    assert_eq!(grid.columns, 3);
    assert_eq!(grid.rows, 2);
    assert!(approx(grid.item_width, 2.6667, 1e-3));
}

#[test]
fn column_floor_holds_for_every_hint() {
    for count in 1..=12 {
        for hint in [None, Some(1), Some(2), Some(4), Some(6), Some(12)] {
            let grid = resolve_columns(count, hint);
            assert!(grid.columns >= 1);
            assert!(
                grid.columns == 1 || grid.item_width >= 2.5,
                "count {count} hint {hint:?} gave {grid:?}"
            );
        }
    }
}

#[test]
fn height_never_shrinks_when_text_grows() {
    let sample = "Renderer-free layout keeps every slide inside its canvas without a font engine.";
    for (size, width, bold) in [(11.0, 2.0, false), (14.0, 4.2, true), (24.0, 8.4, false)] {
        let mut prev = 0.0f32;
        for end in 0..=sample.len() {
            let h = measure(&sample[..end], size, width, bold, false).height;
            assert!(h + 1e-6 >= prev, "{size}pt at {end}: {h} < {prev}");
            prev = h;
        }
    }
}

#[test]
fn truncation_fits_and_is_idempotent() {
    let paragraphs = "First paragraph with a handful of words.\n\
                      Second paragraph that keeps going for a while longer than the first.\n\
                      Third.\n\
                      Fourth paragraph closing things out with yet more words to wrap.";
    let single_words = "lorem ipsum dolor sit amet ".repeat(60);
    for text in [paragraphs, single_words.as_str()] {
        for budget in [0.35, 0.6, 1.0, 2.0] {
            let out = truncate_to_fit(text, 14.0, 3.0, budget, false);
            assert!(!out.is_empty());
            assert!(
                measure(&out, 14.0, 3.0, false, false).height <= budget + 1e-5,
                "{out:?} exceeds {budget}"
            );
            assert_eq!(truncate_to_fit(&out, 14.0, 3.0, budget, false), out);
            if out != text {
                assert!(out.ends_with(ELLIPSIS));
            }
        }
    }
}

#[test]
fn compression_moves_positions_only() {
    let cfg = CompressionConfig::default();
    let mut shapes: Vec<Shape> = (0..8)
        .map(|i| {
            Shape::Rect(RectShape {
                frame: Frame::new(0.8, 0.6 + i as f32 * 0.9, 8.4, 0.8),
                fill: Fill::solid(slide_fit::Rgb::DARK_GRAY),
            })
        })
        .collect();
    let before: Vec<Frame> = shapes.iter().map(|s| *s.frame()).collect();
    compress_slide(&mut shapes, 0.0, 5.625, &cfg);
    for (old, shape) in before.iter().zip(&shapes) {
        let new = shape.frame();
        assert_eq!(new.height, old.height);
        assert_eq!(new.width, old.width);
        assert!(new.top <= old.top + 1e-6);
        assert!(new.top + 1e-6 >= 0.6 + (old.top - 0.6) * cfg.floor_scale);
    }
}

#[test]
fn headings_stack_down_the_cursor() {
    let deck = single_slide(
        false,
        vec![
            SemanticBlock::new(BlockKind::SectionLabel).with_text("Overview"),
            SemanticBlock::new(BlockKind::Headline).with_text("Layout without a renderer"),
            SemanticBlock::new(BlockKind::Subhead).with_text("Predicting text height from glyph widths"),
        ],
    );
    let out = LayoutEngine::default().layout_deck(&deck);
    let placed = texts(&out.slides[0].shapes);
    assert_eq!(placed.len(), 3);
    assert_eq!(placed[0].1, "OVERVIEW");
    for pair in placed.windows(2) {
        assert!(pair[0].0.bottom() <= pair[1].0.top + 1e-4, "{pair:?}");
    }
}

#[test]
fn centered_headline_starts_low() {
    let deck = single_slide(
        true,
        vec![SemanticBlock::new(BlockKind::Headline).with_text("Title slide")],
    );
    let out = LayoutEngine::default().layout_deck(&deck);
    let top = out.slides[0].shapes[0].frame().top;
    assert!(top >= 1.5 - 1e-6);
}

#[test]
fn three_column_grid_shares_a_row() {
    let hints = StyleHints {
        columns: Some(3),
        ..StyleHints::default()
    };
    let grid = SemanticBlock::new(BlockKind::Grid)
        .with_hints(hints)
        .with_child(card("Parse", "Read markup into semantic blocks."))
        .with_child(card("Place", "Run rules down the cursor."))
        .with_child(card("Audit", "Check every text frame."));
    let out = LayoutEngine::default().layout_deck(&single_slide(false, vec![grid]));
    let rects: Vec<&Frame> = out.slides[0]
        .shapes
        .iter()
        .filter_map(|shape| match shape {
            Shape::Rect(rect) => Some(&rect.frame),
            Shape::Text(_) => None,
        })
        .collect();
    assert_eq!(rects.len(), 3);
    assert!(rects.iter().all(|r| approx(r.top, rects[0].top, 1e-6)));
    assert!(rects.iter().all(|r| approx(r.width, 8.0 / 3.0, 1e-3)));
    assert!(rects[0].left < rects[1].left && rects[1].left < rects[2].left);
}

#[test]
fn code_blocks_use_a_monospace_font() {
    let code = SemanticBlock::new(BlockKind::CodeBlock).with_text("fn main() {\n    run();\n}");
    let out = LayoutEngine::default().layout_deck(&single_slide(false, vec![code]));
    let text = out.slides[0]
        .shapes
        .iter()
        .find_map(Shape::as_text)
        .expect("code text");
    assert!(text.style.is_monospace());
}

#[test]
fn fallback_truncates_runaway_text() {
    let essay = (0..80)
        .map(|i| format!("Paragraph {i} rambles on about slide layout for quite some time."))
        .collect::<Vec<_>>()
        .join("\n");
    let block = SemanticBlock::new(BlockKind::Generic).with_text(essay);
    let cfg = LayoutConfig::default();
    let out = LayoutEngine::new(cfg).layout_deck(&single_slide(false, vec![block]));
    let placed = texts(&out.slides[0].shapes);
    assert_eq!(placed.len(), 1);
    assert!(placed[0].1.ends_with(ELLIPSIS));
    assert!(placed[0].0.height <= cfg.fallback_max_height + 1e-4);
}

#[test]
fn short_unclaimed_text_is_dropped() {
    let block = SemanticBlock::new(BlockKind::Generic).with_text("tiny");
    let out = LayoutEngine::default().layout_deck(&single_slide(false, vec![block]));
    assert!(out.slides[0].shapes.is_empty());
}

#[test]
fn every_rule_emits_positive_frames() {
    let blocks = vec![
        SemanticBlock::new(BlockKind::SectionNumber).with_text("02"),
        SemanticBlock::new(BlockKind::Headline).with_text("Everything at once"),
        SemanticBlock::new(BlockKind::StatGroup)
            .with_child(
                SemanticBlock::new(BlockKind::Stat)
                    .with_child(slot(SlotRole::StatNumber, "33"))
                    .with_child(slot(SlotRole::StatLabel, "rules")),
            )
            .with_child(
                SemanticBlock::new(BlockKind::Stat)
                    .with_child(slot(SlotRole::StatNumber, "0.40"))
                    .with_child(slot(SlotRole::StatLabel, "floor")),
            ),
        SemanticBlock::new(BlockKind::FeatureList)
            .with_child(SemanticBlock::new(BlockKind::ListItem).with_text("\u{2713} fast"))
            .with_child(SemanticBlock::new(BlockKind::ListItem).with_text("\u{2717} exact")),
        SemanticBlock::new(BlockKind::Quote)
            .with_text("Measure twice.")
            .with_child(SemanticBlock::new(BlockKind::QuoteAttribution).with_text("a carpenter")),
        SemanticBlock::new(BlockKind::SmallText).with_text("Footnote text"),
    ];
    let out = LayoutEngine::default().layout_deck(&single_slide(false, blocks));
    let shapes = &out.slides[0].shapes;
    assert!(shapes.len() >= 8);
    for shape in shapes {
        let frame = shape.frame();
        assert!(frame.width > 0.0 && frame.height > 0.0, "{shape:?}");
    }
    let bodies: Vec<String> = texts(shapes).into_iter().map(|(_, t)| t).collect();
    assert!(bodies.iter().any(|t| t == "\u{201C}Measure twice.\u{201D}"));
    assert!(bodies.iter().any(|t| t == "a carpenter"));
}

#[test]
fn six_step_flow_wraps_into_two_rows() {
    let long_desc = "Walk every element once and record parents, children and kinds. ".repeat(4);
    let deck = single_slide(
        false,
        vec![
            SemanticBlock::new(BlockKind::Headline).with_text("Pipeline"),
            six_steps(&long_desc),
        ],
    );
    let out = LayoutEngine::default().layout_deck(&deck);
    let shapes = &out.slides[0].shapes;
    let boxes = rects(shapes);
    assert_eq!(boxes.len(), 6);

    let (first, second) = boxes.split_at(3);
    for row in [first, second] {
        assert!(row.iter().all(|b| approx(b.top, row[0].top, 1e-5)));
        assert!(row[0].right() <= row[1].left && row[1].right() <= row[2].left);
    }
    for (upper, lower) in first.iter().zip(second) {
        assert!(approx(upper.left, lower.left, 1e-5));
        assert!(lower.top >= upper.bottom() + 0.25 - 1e-4, "{upper:?} / {lower:?}");
    }
    assert!(second[0].bottom() <= 5.625 + 1e-4);
    assert_text_inside(shapes, &boxes);
}

fn long_code() -> SemanticBlock {
    let code = (0..18)
        .map(|i| format!("let step_{i} = place(&deck, {i});"))
        .collect::<Vec<_>>()
        .join("\n");
    SemanticBlock::new(BlockKind::CodeBlock).with_text(code)
}

#[test]
fn low_flow_keeps_its_step_height() {
    let long_desc = "Descriptions that cannot fit a floored box are cut short. ".repeat(5);
    let deck = single_slide(
        false,
        vec![
            SemanticBlock::new(BlockKind::Headline).with_text("Late flow"),
            long_code(),
            six_steps(&long_desc),
        ],
    );

    let uncompressed = LayoutConfig {
        compression: CompressionConfig {
            floor_scale: 1.0,
            ..CompressionConfig::default()
        },
        ..LayoutConfig::default()
    };
    let out = LayoutEngine::new(uncompressed).layout_deck(&deck);
    let shapes = &out.slides[0].shapes;
    let boxes: Vec<&Frame> = rects(shapes).into_iter().filter(|r| r.width < 4.0).collect();
    assert_eq!(boxes.len(), 6);
    assert!(boxes[0].top > 4.0, "flow starts at {}", boxes[0].top);
    for b in &boxes {
        assert!(b.height >= 1.05 - 1e-5, "{b:?}");
    }
    assert!(boxes[3].top >= boxes[0].bottom() + 0.25 - 1e-4);
    assert_text_inside(shapes, &boxes);

    // Compaction moves the boxes but never shrinks them.
    let out = LayoutEngine::default().layout_deck(&deck);
    assert!(!out.diagnostics.is_empty());
    let boxes: Vec<&Frame> = rects(&out.slides[0].shapes)
        .into_iter()
        .filter(|r| r.width < 4.0)
        .collect();
    assert_eq!(boxes.len(), 6);
    assert!(boxes.iter().all(|b| b.height >= 1.05 - 1e-5));
}

#[test]
fn low_single_row_flow_keeps_its_floor() {
    let flow = flow_of(&[("Read", "Markup in."), ("Place", "Shapes out."), ("Audit", "Report.")]);
    let deck = single_slide(
        false,
        vec![
            SemanticBlock::new(BlockKind::Headline).with_text("Late flow"),
            long_code(),
            flow,
        ],
    );
    let out = LayoutEngine::default().layout_deck(&deck);
    let boxes: Vec<&Frame> = rects(&out.slides[0].shapes)
        .into_iter()
        .filter(|r| r.width < 4.0)
        .collect();
    assert_eq!(boxes.len(), 3);
    for b in &boxes {
        assert!(b.height >= 0.9 - 1e-5, "{b:?}");
        assert!(approx(b.top, boxes[0].top, 1e-5));
    }
}

fn table_row(cells: &[&str], header: bool) -> SemanticBlock {
    let hints = StyleHints {
        header,
        ..StyleHints::default()
    };
    cells.iter().fold(SemanticBlock::new(BlockKind::TableRow), |row, cell| {
        row.with_child(
            SemanticBlock::new(BlockKind::TableCell)
                .with_hints(hints)
                .with_text(*cell),
        )
    })
}

#[test]
fn long_table_cell_sets_its_row_height() {
    let long = "Streams events straight from the markup and builds semantic blocks \
                without ever holding a document tree in memory";
    let table = SemanticBlock::new(BlockKind::Table)
        .with_child(table_row(&["Stage", "Crate", "Notes"], true))
        .with_child(table_row(&["Parse", "quick-xml", long], false))
        .with_child(table_row(&["Encode", "postcard", "Compact"], false));
    let out = LayoutEngine::default().layout_deck(&single_slide(false, vec![table]));
    let placed = texts(&out.slides[0].shapes);
    let frame_of = |text: &str| {
        placed
            .iter()
            .find(|(_, body)| body == text)
            .map(|(frame, _)| **frame)
            .unwrap_or_else(|| panic!("missing {text:?}"))
    };

    let long_frame = frame_of(long);
    assert!(long_frame.height > 0.42, "{long_frame:?}");
    assert!(long_frame.height <= 0.8 + 1e-5);
    for short in ["Parse", "quick-xml"] {
        let frame = frame_of(short);
        assert!(approx(frame.top, long_frame.top, 1e-5));
        assert!(approx(frame.height, long_frame.height, 1e-5), "{short}: {frame:?}");
    }
    let next = frame_of("Encode");
    assert!(next.top >= long_frame.bottom() - 1e-4);
    assert!(next.height < long_frame.height);
}

fn versus_of(sides: &[&str]) -> SemanticBlock {
    sides.iter().fold(SemanticBlock::new(BlockKind::Versus), |versus, title| {
        versus.with_child(
            SemanticBlock::new(BlockKind::VersusSide)
                .with_child(slot(SlotRole::VersusTitle, title))
                .with_child(
                    SemanticBlock::new(BlockKind::FeatureList)
                        .with_child(SemanticBlock::new(BlockKind::ListItem).with_text("\u{2713} predictable"))
                        .with_child(SemanticBlock::new(BlockKind::ListItem).with_text("\u{2717} verbose")),
                ),
        )
    })
}

#[test]
fn narrow_canvas_keeps_shapes_inside() {
    let tenets = (0..4).map(|i| {
        SemanticBlock::new(BlockKind::Tenet)
            .with_child(slot(SlotRole::TenetTitle, &format!("Tenet {i}")))
            .with_child(slot(SlotRole::TenetText, "Frames grow to fit their text."))
    });
    let table = SemanticBlock::new(BlockKind::Table)
        .with_child(table_row(&["Before", "After"], true))
        .with_child(table_row(&["45 min", "12 min"], false));
    let blocks = vec![versus_of(&["Manual", "Measured"]), table]
        .into_iter()
        .chain(tenets)
        .collect();
    let cfg = LayoutConfig::for_canvas(7.0, 5.625);
    let out = LayoutEngine::new(cfg).layout_deck(&single_slide(false, blocks));
    let shapes = &out.slides[0].shapes;
    assert!(shapes.len() > 10);
    for shape in shapes {
        let frame = shape.frame();
        assert!(frame.left >= 0.0 && frame.right() <= 7.0 + 1e-4, "{shape:?}");
    }
}

#[test]
fn three_sided_versus_columns_stay_apart() {
    let cfg = LayoutConfig::default();
    let out = LayoutEngine::new(cfg).layout_deck(&single_slide(false, vec![versus_of(&["Rust", "Go", "Zig"])]));
    let placed = texts(&out.slides[0].shapes);
    let titles: Vec<&Frame> = ["Rust", "Go", "Zig"]
        .iter()
        .filter_map(|title| placed.iter().find(|(_, body)| body == title).map(|(frame, _)| *frame))
        .collect();
    assert_eq!(titles.len(), 3);
    for pair in titles.windows(2) {
        assert!(pair[0].right() <= pair[1].left + 1e-4, "{pair:?}");
    }
    assert_eq!(placed.iter().filter(|(_, body)| body == "vs").count(), 2);
    for (frame, body) in &placed {
        assert!(frame.right() <= cfg.canvas.content_right() + 1e-4, "{body:?} at {frame:?}");
    }
}
