//! DHAT heap profiler for slide-fit.
//!
//! Profiles allocation patterns across the deck pipeline:
//! parse -> layout -> audit -> encode.
//!
//! Usage:
//!   cargo run -p slide-fit-heap-profile --release -- [OPTIONS] [DECK_FILES...]
//!
//! Outputs dhat-<phase>.json files in the output directory (default: target/memory).
//! Open in https://nnethercote.github.io/dh_view/dh_view.html

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::path::{Path, PathBuf};
use std::process::Command;

use slide_fit::{parse_deck, SemanticDeck};
use slide_fit_audit::Auditor;
use slide_fit_layout::LayoutEngine;

const DEFAULT_FIXTURES: &[&str] = &[
    "tests/fixtures/agent_patterns.html",
    "tests/fixtures/metrics_deck.html",
];

/// Passes over the deck per profiled run, so steady-state churn shows up.
const REPEAT: usize = 20;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Phase {
    Parse,
    Layout,
    Audit,
    Encode,
    Full,
}

impl Phase {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "parse" => Some(Self::Parse),
            "layout" => Some(Self::Layout),
            "audit" => Some(Self::Audit),
            "encode" => Some(Self::Encode),
            "full" => Some(Self::Full),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Layout => "layout",
            Self::Audit => "audit",
            Self::Encode => "encode",
            Self::Full => "full",
        }
    }
}

fn load_deck(path: &Path) -> (String, SemanticDeck) {
    let html = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("read {}: {}", path.display(), e));
    let deck = parse_deck(&html).unwrap_or_else(|e| panic!("parse {}: {}", path.display(), e));
    (html, deck)
}

/// Work outside the profiled phase happens before `profiler` is built.
fn profile_file(path: &Path, phase: Phase, json_path: Option<PathBuf>) {
    let (html, deck) = load_deck(path);
    let engine = LayoutEngine::default();
    let auditor = Auditor::default();
    let laid_out = engine.layout_deck(&deck);

    let _profiler = json_path.map(|p| dhat::Profiler::builder().file_name(p).build());
    for _ in 0..REPEAT {
        match phase {
            Phase::Parse => {
                let _ = parse_deck(&html);
            }
            Phase::Layout => {
                let _ = engine.layout_deck(&deck);
            }
            Phase::Audit => {
                let _ = auditor.audit_deck("profile", &laid_out);
            }
            Phase::Encode => {
                let _ = laid_out.to_postcard();
                let _ = laid_out.to_json();
            }
            Phase::Full => {
                let deck = parse_deck(&html).unwrap_or_else(|e| panic!("parse: {}", e));
                let laid_out = engine.layout_deck(&deck);
                let _ = auditor.audit_deck("profile", &laid_out);
            }
        }
    }
}

fn short_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string())
}

fn usage() {
    eprintln!("Usage: heap-profile [OPTIONS] [DECK_FILES...]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --phase <parse|layout|audit|encode|full>  Pipeline phase to profile (default: layout)");
    eprintln!("  --out-dir <DIR>                           Output directory for dhat JSON (default: target/memory)");
    eprintln!("  --aggregate                               Single profile for all files (default: per-file)");
    eprintln!();
    eprintln!("If no deck files are given, profiles the markup fixtures under tests/fixtures.");
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut phase = Phase::Layout;
    let mut out_dir = PathBuf::from("target/memory");
    let mut files: Vec<PathBuf> = Vec::new();
    let mut aggregate = false;
    let mut single_file_mode = false;
    let mut args_iter = args.iter();

    while let Some(arg) = args_iter.next() {
        match arg.as_str() {
            "--phase" => {
                let value = args_iter.next().map(String::as_str).unwrap_or("");
                phase = Phase::parse(value).unwrap_or_else(|| {
                    eprintln!("Unknown phase: {}", value);
                    usage();
                    std::process::exit(1);
                });
            }
            "--out-dir" => {
                if let Some(dir) = args_iter.next() {
                    out_dir = PathBuf::from(dir);
                }
            }
            "--aggregate" => aggregate = true,
            // Child process: profile exactly one file.
            "--single-file" => single_file_mode = true,
            "--help" | "-h" => {
                usage();
                std::process::exit(0);
            }
            other => files.push(PathBuf::from(other)),
        }
    }

    if files.is_empty() {
        files.extend(
            DEFAULT_FIXTURES
                .iter()
                .map(PathBuf::from)
                .filter(|p| p.exists()),
        );
    }
    if files.is_empty() {
        eprintln!("No deck files found. Provide paths or run from the workspace root.");
        std::process::exit(1);
    }

    std::fs::create_dir_all(&out_dir).unwrap_or_else(|e| {
        eprintln!("Failed to create output dir {}: {}", out_dir.display(), e);
        std::process::exit(1);
    });

    let phase_name = phase.name();

    if single_file_mode {
        assert!(files.len() == 1, "--single-file expects exactly one file");
        let file = &files[0];
        let json_path = out_dir.join(format!("dhat-{phase_name}-{}.json", short_name(file)));
        profile_file(file, phase, Some(json_path));
        return;
    }

    if aggregate {
        let json_path = out_dir.join(format!("dhat-{phase_name}.json"));
        eprintln!(
            "heap-profile: phase={}, files={} (aggregate), out={}",
            phase_name,
            files.len(),
            out_dir.display()
        );
        let _profiler = dhat::Profiler::builder().file_name(json_path.clone()).build();
        for file in &files {
            eprintln!("  profiling: {}", file.display());
            profile_file(file, phase, None);
        }
        eprintln!(
            "Done. Open {} in https://nnethercote.github.io/dh_view/dh_view.html",
            json_path.display()
        );
        return;
    }

    // Per-file mode: one child process per deck keeps each DHAT session clean.
    let self_exe = std::env::current_exe().unwrap_or_else(|e| {
        eprintln!("Failed to determine own executable path: {}", e);
        std::process::exit(1);
    });
    eprintln!(
        "heap-profile: phase={}, files={} (per-file), out={}",
        phase_name,
        files.len(),
        out_dir.display()
    );

    let mut any_failed = false;
    for file in &files {
        eprintln!(
            "  profiling: {} -> dhat-{}-{}.json",
            file.display(),
            phase_name,
            short_name(file)
        );
        let status = Command::new(&self_exe)
            .arg("--single-file")
            .arg("--phase")
            .arg(phase_name)
            .arg("--out-dir")
            .arg(&out_dir)
            .arg(file)
            .status();
        match status {
            Ok(s) if s.success() => {}
            Ok(s) => {
                eprintln!("    FAILED (exit {})", s.code().unwrap_or(-1));
                any_failed = true;
            }
            Err(e) => {
                eprintln!("    FAILED to spawn: {}", e);
                any_failed = true;
            }
        }
    }

    eprintln!();
    eprintln!("Open profiles in https://nnethercote.github.io/dh_view/dh_view.html");
    if any_failed {
        std::process::exit(1);
    }
}
