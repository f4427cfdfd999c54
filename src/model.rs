//! Semantic slide model consumed by the layout engine.
//!
//! A deck is an ordered list of slides, each holding a tree of
//! [`SemanticBlock`]s. Blocks carry a closed [`BlockKind`], an optional
//! [`SlotRole`] naming the sub-slot they fill inside their parent, and
//! content nodes interleaving child blocks with formatted text runs.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::rich_text::{normalize_lines, normalize_runs, RichTextRun};

/// Every block kind the layout engine knows how to place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    SectionNumber,
    SectionTitle,
    SectionLabel,
    Headline,
    MediumHeadline,
    Subhead,
    ArchitectureDiagram,
    ComparisonGrid,
    Grid,
    Card,
    ModuleCard,
    PrincipleGrid,
    Principle,
    CodeBlock,
    FlowDiagram,
    FlowStep,
    Tenet,
    Versus,
    VersusSide,
    Table,
    TableRow,
    TableCell,
    FeatureList,
    ListItem,
    NotificationStack,
    Notification,
    StatGroup,
    Stat,
    BigStat,
    TierStack,
    Tier,
    TierRow,
    Diagram,
    DiagramBox,
    BeforeAfter,
    BeforeAfterCard,
    TokenDisplay,
    GoodPattern,
    BadPattern,
    SummaryRow,
    SummaryCell,
    BodyText,
    TitleMeta,
    HighlightBox,
    Quote,
    QuoteAttribution,
    SmallText,
    Heading,
    Paragraph,
    Generic,
}

impl BlockKind {
    /// Kinds whose text keeps source line structure and indentation.
    pub fn is_preformatted(self) -> bool {
        matches!(
            self,
            Self::CodeBlock | Self::ArchitectureDiagram | Self::TokenDisplay
        )
    }

    /// Kinds whose boundaries read as line breaks in extracted text.
    pub fn breaks_lines(self) -> bool {
        matches!(
            self,
            Self::Paragraph | Self::Heading | Self::ListItem | Self::TableRow
        )
    }
}

/// Named sub-slot a block fills inside its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotRole {
    CardTitle,
    CardText,
    CardUsage,
    CardNumber,
    ModuleName,
    ModuleContract,
    ModulePurpose,
    PrincipleNumber,
    PrincipleContent,
    StepNumber,
    StepTitle,
    StepDesc,
    StepTurns,
    TenetTitle,
    TenetText,
    VersusTitle,
    NotificationTitle,
    NotificationBody,
    StatNumber,
    StatLabel,
    BigStatNumber,
    BigStatUnit,
    TierLabel,
    TierTitle,
    TierDesc,
    TierTokens,
    TierName,
    TierUses,
    TierCost,
    DiagramBoxTitle,
    DiagramBoxContent,
    ComparisonLabel,
    ComparisonValue,
    /// Left column of a comparison grid row.
    Left,
    /// Right column of a comparison grid row.
    Right,
}

/// Status tone attached to notifications and before/after cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    Allowed,
    Blocked,
    Before,
    After,
}

/// Presentation hints read from markup classes and inline styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleHints {
    /// Explicit accent color (`green`, `ms-red`, `warning`, ...).
    #[serde(default)]
    pub accent: Option<Rgb>,
    /// Inline style points at the deck accent variable.
    #[serde(default)]
    pub deck_accent: bool,
    /// Requested column count for multi-item containers.
    #[serde(default)]
    pub columns: Option<u8>,
    /// Column count is an upper bound filled by item count rather than forced.
    #[serde(default)]
    pub auto_fit: bool,
    #[serde(default)]
    pub tone: Option<Tone>,
    /// Header cell or header row.
    #[serde(default)]
    pub header: bool,
    /// Source heading level (1..=6) when the block came from a heading tag.
    #[serde(default)]
    pub heading_level: Option<u8>,
    /// Oversized gradient headline treatment.
    #[serde(default)]
    pub gradient: bool,
}

/// Content node: a child block or a formatted text run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Node {
    Block(SemanticBlock),
    Text(RichTextRun),
}

/// One semantic node of a slide.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SemanticBlock {
    pub kind: BlockKind,
    #[serde(default)]
    pub role: Option<SlotRole>,
    #[serde(default)]
    pub hints: StyleHints,
    #[serde(default)]
    pub content: Vec<Node>,
}

impl SemanticBlock {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            kind,
            role: None,
            hints: StyleHints::default(),
            content: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: SlotRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_hints(mut self, hints: StyleHints) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.content.push(Node::Text(RichTextRun::plain(text)));
        self
    }

    pub fn with_run(mut self, run: RichTextRun) -> Self {
        self.content.push(Node::Text(run));
        self
    }

    pub fn with_child(mut self, child: SemanticBlock) -> Self {
        self.content.push(Node::Block(child));
        self
    }

    /// Direct child blocks in order.
    pub fn children(&self) -> impl Iterator<Item = &SemanticBlock> {
        self.content.iter().filter_map(|node| match node {
            Node::Block(block) => Some(block),
            Node::Text(_) => None,
        })
    }

    /// Normalized plain text of this block and all descendants.
    ///
    /// Line-breaking children start on a new line, other nodes are joined
    /// with a space, then whitespace is collapsed per line. Preformatted
    /// kinds keep their interior spacing.
    pub fn text(&self) -> String {
        let mut raw = String::new();
        collect_text(self, &mut raw);
        if self.kind.is_preformatted() {
            trim_blank_edges(&raw)
        } else {
            normalize_lines(&raw)
        }
    }

    /// Formatted runs of this block and all descendants, normalized.
    pub fn rich_text(&self) -> Vec<RichTextRun> {
        let mut runs = Vec::new();
        collect_runs(self, &mut runs);
        normalize_runs(runs)
    }

    /// First descendant (depth-first) filling `role`.
    pub fn slot(&self, role: SlotRole) -> Option<&SemanticBlock> {
        for child in self.children() {
            if child.role == Some(role) {
                return Some(child);
            }
            if let Some(found) = child.slot(role) {
                return Some(found);
            }
        }
        None
    }

    /// Text of the `role` sub-slot, empty when absent.
    pub fn slot_text(&self, role: SlotRole) -> String {
        self.slot(role).map(SemanticBlock::text).unwrap_or_default()
    }

    /// All descendants of `kind` in document order, not descending into matches.
    pub fn descendants_of(&self, kind: BlockKind) -> Vec<&SemanticBlock> {
        let mut out = Vec::new();
        collect_kind(self, kind, &mut out);
        out
    }

    /// First descendant of `kind` in document order.
    pub fn find_kind(&self, kind: BlockKind) -> Option<&SemanticBlock> {
        for child in self.children() {
            if child.kind == kind {
                return Some(child);
            }
            if let Some(found) = child.find_kind(kind) {
                return Some(found);
            }
        }
        None
    }

    pub fn has_text(&self) -> bool {
        !self.text().is_empty()
    }
}

fn collect_text(block: &SemanticBlock, out: &mut String) {
    let preformatted = block.kind.is_preformatted();
    for node in &block.content {
        match node {
            Node::Text(run) => {
                if !preformatted && !out.is_empty() && !out.ends_with(['\n', ' ']) {
                    out.push(' ');
                }
                out.push_str(&run.text);
            }
            Node::Block(child) => {
                if child.kind.breaks_lines() && !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                } else if !preformatted && !out.is_empty() && !out.ends_with(['\n', ' ']) {
                    out.push(' ');
                }
                let mut inner = String::new();
                collect_text(child, &mut inner);
                out.push_str(&inner);
                if child.kind.breaks_lines() {
                    out.push('\n');
                }
            }
        }
    }
}

fn collect_runs(block: &SemanticBlock, out: &mut Vec<RichTextRun>) {
    for node in &block.content {
        match node {
            Node::Text(run) => out.push(run.clone()),
            Node::Block(child) => {
                let breaks = child.kind.breaks_lines();
                if breaks && !out.is_empty() && !out.last().is_some_and(|r| r.text.ends_with('\n'))
                {
                    out.push(RichTextRun::plain("\n"));
                }
                collect_runs(child, out);
                if breaks {
                    out.push(RichTextRun::plain("\n"));
                }
            }
        }
    }
}

fn collect_kind<'a>(block: &'a SemanticBlock, kind: BlockKind, out: &mut Vec<&'a SemanticBlock>) {
    for child in block.children() {
        if child.kind == kind {
            out.push(child);
        } else {
            collect_kind(child, kind, out);
        }
    }
}

fn trim_blank_edges(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// One slide of source content.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideSource {
    /// Title-style slide with centered content.
    #[serde(default)]
    pub centered: bool,
    pub blocks: Vec<SemanticBlock>,
}

/// Whole deck of source slides plus deck-level theming.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SemanticDeck {
    pub slides: Vec<SlideSource>,
    #[serde(default = "default_accent")]
    pub accent: Rgb,
}

fn default_accent() -> Rgb {
    Rgb::BLUE
}

impl Default for SemanticDeck {
    fn default() -> Self {
        Self {
            slides: Vec::new(),
            accent: default_accent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str, text: &str) -> SemanticBlock {
        SemanticBlock::new(BlockKind::Card)
            .with_child(
                SemanticBlock::new(BlockKind::Generic)
                    .with_role(SlotRole::CardTitle)
                    .with_text(title),
            )
            .with_child(
                SemanticBlock::new(BlockKind::Generic)
                    .with_role(SlotRole::CardText)
                    .with_text(text),
            )
    }

    #[test]
    fn slot_lookup_finds_nested_roles() {
        let wrapped = SemanticBlock::new(BlockKind::Card)
            .with_child(SemanticBlock::new(BlockKind::Generic).with_child(
                SemanticBlock::new(BlockKind::Generic)
                    .with_role(SlotRole::CardTitle)
                    .with_text("Deep"),
            ));
        assert_eq!(wrapped.slot_text(SlotRole::CardTitle), "Deep");
        assert_eq!(wrapped.slot_text(SlotRole::CardText), "");
    }

    #[test]
    fn text_joins_inline_nodes_with_spaces() {
        let block = card("Title", "Body   text");
        assert_eq!(block.text(), "Title Body text");
    }

    #[test]
    fn paragraphs_break_lines() {
        let block = SemanticBlock::new(BlockKind::Generic)
            .with_child(SemanticBlock::new(BlockKind::Paragraph).with_text("one"))
            .with_child(SemanticBlock::new(BlockKind::Paragraph).with_text("two"));
        assert_eq!(block.text(), "one\ntwo");
        let runs = block.rich_text();
        assert_eq!(crate::rich_text::runs_text(&runs), "one\ntwo");
    }

    #[test]
    fn explicit_breaks_survive_normalization() {
        let block = SemanticBlock::new(BlockKind::BodyText)
            .with_text("first  line")
            .with_text("\n")
            .with_text("  second");
        assert_eq!(block.text(), "first line\nsecond");
    }

    #[test]
    fn preformatted_text_keeps_indentation() {
        let block = SemanticBlock::new(BlockKind::CodeBlock).with_text("\nfn main() {\n    go();\n}\n");
        assert_eq!(block.text(), "fn main() {\n    go();\n}");
    }

    #[test]
    fn descendants_of_does_not_descend_into_matches() {
        let grid = SemanticBlock::new(BlockKind::Grid)
            .with_child(card("a", "b"))
            .with_child(SemanticBlock::new(BlockKind::Generic).with_child(card("c", "d")));
        assert_eq!(grid.descendants_of(BlockKind::Card).len(), 2);
        assert!(grid.find_kind(BlockKind::Card).is_some());
        assert!(grid.find_kind(BlockKind::Table).is_none());
    }
}
