use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use slide_fit::{DeckReader, MarkupOptions, SemanticDeck};
use slide_fit_audit::{format_report, format_summary, Auditor};
use slide_fit_layout::{
    FontSpec, LaidOutDeck, LayoutConfig, LayoutDiagnostic, LayoutEngine, Measurer,
};

use crate::cli::{AuditArgs, DeckFormat, LayoutArgs, MeasureArgs};

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Semantic deck from JSON or HTML markup, by extension.
pub fn read_semantic_deck(path: &Path) -> Result<SemanticDeck> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if has_extension(path, "json") {
        return serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing semantic deck {}", path.display()));
    }
    let reader = DeckReader::new(MarkupOptions {
        require_slides: true,
        ..MarkupOptions::default()
    });
    reader
        .read_bytes(&bytes)
        .with_context(|| format!("reading deck markup {}", path.display()))
}

/// Laid-out deck from JSON or a postcard snapshot, by extension.
pub fn read_laid_out_deck(path: &Path) -> Result<LaidOutDeck> {
    let deck = if has_extension(path, "json") {
        let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        LaidOutDeck::from_json(&json)
    } else {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        LaidOutDeck::from_postcard(&bytes)
    };
    deck.with_context(|| format!("decoding laid-out deck {}", path.display()))
}

pub fn layout(args: &LayoutArgs) -> Result<()> {
    let deck = read_semantic_deck(&args.input)?;
    let cfg = LayoutConfig::for_canvas(args.width, args.height);
    let mut engine = LayoutEngine::new(cfg);
    engine.set_diagnostic_sink(|diagnostic| {
        if let LayoutDiagnostic::SevereOverflow { .. } = diagnostic {
            eprintln!("warning: {diagnostic}");
        }
    });
    let laid_out = engine.layout_deck(&deck);
    log::info!(
        "{}: {} slide(s), {} shape(s)",
        args.input.display(),
        laid_out.slides.len(),
        laid_out.shape_count()
    );

    let bytes = match args.format {
        DeckFormat::Json if args.pretty => laid_out.to_json_pretty()?.into_bytes(),
        DeckFormat::Json => laid_out.to_json()?.into_bytes(),
        DeckFormat::Postcard => laid_out.to_postcard()?,
    };
    match &args.output {
        Some(path) => {
            fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
        }
        None if args.format == DeckFormat::Postcard => {
            bail!("postcard output needs --output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.write_all(b"\n")?;
        }
    }

    if args.audit {
        let auditor = Auditor::default().with_measurer(engine.measurer().clone());
        let report = auditor.audit_deck(&display_name(&args.input), &laid_out);
        eprintln!("{}", format_report(&report, false));
    }
    Ok(())
}

/// Returns whether every deck came back clean.
pub fn audit(args: &AuditArgs) -> Result<bool> {
    let auditor = Auditor::default();
    let mut reports = Vec::with_capacity(args.decks.len());
    for path in &args.decks {
        let deck = read_laid_out_deck(path)?;
        let report = auditor.audit_deck(&display_name(path), &deck);
        println!("{}", format_report(&report, args.verbose));
        reports.push(report);
    }
    println!("{}", format_summary(&reports));
    Ok(reports.iter().all(|r| r.is_clean()))
}

pub fn measure(args: &MeasureArgs) -> Result<()> {
    if args.width <= 0.0 || args.size <= 0.0 {
        bail!("--width and --size must be positive");
    }
    let mut font = FontSpec::new(args.size)
        .with_bold(args.bold)
        .with_line_spacing(args.spacing);
    if args.mono {
        font = font.monospace();
    }
    let measurer = Measurer::default();
    let metrics = measurer.measure(&args.text, font, args.width);
    println!(
        "{:.3}in over {} line(s) at {}pt in {}in",
        metrics.height, metrics.line_count, args.size, args.width
    );
    if let Some(max_height) = args.fit {
        println!("{}", measurer.truncate_to_fit(&args.text, font, args.width, max_height));
    }
    Ok(())
}
