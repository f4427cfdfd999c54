use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Lay out slide decks and check them for text overflow without a renderer.
#[derive(Parser, Debug)]
#[command(name = "slide-fit", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Lay out an HTML deck (or semantic deck JSON) into positioned shapes.
    Layout(LayoutArgs),

    /// Check laid-out decks for text overflow and overlapping frames.
    Audit(AuditArgs),

    /// Predict the frame height of a piece of text.
    Measure(MeasureArgs),
}

/// Encoding of a laid-out deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DeckFormat {
    #[default]
    Json,
    Postcard,
}

#[derive(clap::Args, Debug)]
pub struct LayoutArgs {
    /// Deck markup, or `.json` semantic deck.
    pub input: PathBuf,

    /// Output file; defaults to stdout for JSON.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = DeckFormat::Json)]
    pub format: DeckFormat,

    /// Pretty-print JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Audit the result and print the report to stderr.
    #[arg(long)]
    pub audit: bool,

    /// Canvas width in inches.
    #[arg(long, default_value_t = 10.0)]
    pub width: f32,

    /// Canvas height in inches.
    #[arg(long, default_value_t = 5.625)]
    pub height: f32,
}

#[derive(clap::Args, Debug)]
pub struct AuditArgs {
    /// Laid-out decks: `.json`, or postcard snapshots for any other extension.
    #[arg(required = true)]
    pub decks: Vec<PathBuf>,

    /// Also list clean slides.
    #[arg(short, long)]
    pub verbose: bool,

    /// Exit with failure when any issue is found.
    #[arg(long)]
    pub strict: bool,
}

#[derive(clap::Args, Debug)]
pub struct MeasureArgs {
    pub text: String,

    /// Font size in points.
    #[arg(long, default_value_t = 14.0)]
    pub size: f32,

    /// Frame width in inches.
    #[arg(long)]
    pub width: f32,

    #[arg(long)]
    pub bold: bool,

    /// Monospace (code) font.
    #[arg(long)]
    pub mono: bool,

    /// Line pitch as a multiple of the font size.
    #[arg(long, default_value_t = 1.2)]
    pub spacing: f32,

    /// Also print the longest prefix fitting this height, in inches.
    #[arg(long)]
    pub fit: Option<f32>,
}
