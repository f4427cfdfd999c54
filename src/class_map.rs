//! Markup class vocabulary mapped onto the closed block model.
//!
//! This is the only place where class strings are matched; everything past
//! the markup reader dispatches on [`BlockKind`] and [`SlotRole`].

use crate::color::tone_color;
use crate::model::{BlockKind, SlotRole, StyleHints, Tone};

/// Grid container classes and the column count they request.
/// The flag marks auto-fit containers whose count is only an upper bound.
const GRID_CLASSES: &[(&str, Option<u8>, bool)] = &[
    ("grid", None, false),
    ("tools-grid", None, false),
    ("card-grid", None, false),
    ("grid-2", Some(2), false),
    ("grid-3", Some(3), false),
    ("grid-4", Some(4), false),
    ("grid-5", Some(5), false),
    ("fifths", Some(5), false),
    ("fourths", Some(4), false),
    ("thirds", Some(3), false),
    ("halves", Some(3), true),
];

const KIND_CLASSES: &[(&str, BlockKind)] = &[
    ("section-number", BlockKind::SectionNumber),
    ("section-title", BlockKind::SectionTitle),
    ("section-label", BlockKind::SectionLabel),
    ("headline", BlockKind::Headline),
    ("medium-headline", BlockKind::MediumHeadline),
    ("subhead", BlockKind::Subhead),
    ("architecture-diagram", BlockKind::ArchitectureDiagram),
    ("comparison-table", BlockKind::ComparisonGrid),
    ("card", BlockKind::Card),
    ("tool-card", BlockKind::Card),
    ("module-card", BlockKind::ModuleCard),
    ("principles-grid", BlockKind::PrincipleGrid),
    ("principle", BlockKind::Principle),
    ("code-block", BlockKind::CodeBlock),
    ("flow-diagram", BlockKind::FlowDiagram),
    ("workflow", BlockKind::FlowDiagram),
    ("flow", BlockKind::FlowDiagram),
    ("flow-box", BlockKind::FlowStep),
    ("flow-step", BlockKind::FlowStep),
    ("workflow-step", BlockKind::FlowStep),
    ("tenet", BlockKind::Tenet),
    ("versus", BlockKind::Versus),
    ("versus-side", BlockKind::VersusSide),
    ("feature-list", BlockKind::FeatureList),
    ("notification-stack", BlockKind::NotificationStack),
    ("notification", BlockKind::Notification),
    ("stat-grid", BlockKind::StatGroup),
    ("stat-row", BlockKind::StatGroup),
    ("velocity-grid", BlockKind::StatGroup),
    ("stat", BlockKind::Stat),
    ("velocity-stat", BlockKind::Stat),
    ("big-stat", BlockKind::BigStat),
    ("tier-stack", BlockKind::TierStack),
    ("tier", BlockKind::Tier),
    ("tier-row", BlockKind::TierRow),
    ("diagram", BlockKind::Diagram),
    ("diagram-box", BlockKind::DiagramBox),
    ("before-after", BlockKind::BeforeAfter),
    ("before-card", BlockKind::BeforeAfterCard),
    ("after-card", BlockKind::BeforeAfterCard),
    ("token-display", BlockKind::TokenDisplay),
    ("good-pattern", BlockKind::GoodPattern),
    ("bad-pattern", BlockKind::BadPattern),
    ("summary-row", BlockKind::SummaryRow),
    ("summary-cell", BlockKind::SummaryCell),
    ("body-text", BlockKind::BodyText),
    ("title-meta", BlockKind::TitleMeta),
    ("highlight-box", BlockKind::HighlightBox),
    ("quote", BlockKind::Quote),
    ("quote-attribution", BlockKind::QuoteAttribution),
    ("quote-attr", BlockKind::QuoteAttribution),
    ("small-text", BlockKind::SmallText),
];

const ROLE_CLASSES: &[(&str, SlotRole)] = &[
    ("card-title", SlotRole::CardTitle),
    ("tool-name", SlotRole::CardTitle),
    ("card-text", SlotRole::CardText),
    ("card-desc", SlotRole::CardText),
    ("tool-desc", SlotRole::CardText),
    ("tool-usage", SlotRole::CardUsage),
    ("card-number", SlotRole::CardNumber),
    ("module-name", SlotRole::ModuleName),
    ("module-contract", SlotRole::ModuleContract),
    ("module-purpose", SlotRole::ModulePurpose),
    ("principle-number", SlotRole::PrincipleNumber),
    ("principle-num", SlotRole::PrincipleNumber),
    ("principle-content", SlotRole::PrincipleContent),
    ("principle-text", SlotRole::PrincipleContent),
    ("step-number", SlotRole::StepNumber),
    ("flow-step-title", SlotRole::StepTitle),
    ("workflow-step-title", SlotRole::StepTitle),
    ("step-title", SlotRole::StepTitle),
    ("flow-step-desc", SlotRole::StepDesc),
    ("workflow-step-desc", SlotRole::StepDesc),
    ("step-desc", SlotRole::StepDesc),
    ("step-turns", SlotRole::StepTurns),
    ("tenet-title", SlotRole::TenetTitle),
    ("tenet-text", SlotRole::TenetText),
    ("versus-title", SlotRole::VersusTitle),
    ("notification-title", SlotRole::NotificationTitle),
    ("notification-body", SlotRole::NotificationBody),
    ("stat-number", SlotRole::StatNumber),
    ("stat-value", SlotRole::StatNumber),
    ("velocity-number", SlotRole::StatNumber),
    ("stat-label", SlotRole::StatLabel),
    ("velocity-label", SlotRole::StatLabel),
    ("big-stat-number", SlotRole::BigStatNumber),
    ("big-stat-unit", SlotRole::BigStatUnit),
    ("tier-label", SlotRole::TierLabel),
    ("tier-title", SlotRole::TierTitle),
    ("tier-desc", SlotRole::TierDesc),
    ("tier-tokens", SlotRole::TierTokens),
    ("tier-name", SlotRole::TierName),
    ("tier-uses", SlotRole::TierUses),
    ("tier-cost", SlotRole::TierCost),
    ("diagram-box-title", SlotRole::DiagramBoxTitle),
    ("diagram-box-content", SlotRole::DiagramBoxContent),
    ("comparison-label", SlotRole::ComparisonLabel),
    ("comparison-value", SlotRole::ComparisonValue),
    ("left", SlotRole::Left),
    ("right", SlotRole::Right),
];

/// Structural tags that always open a block even without a known class.
const BLOCK_TAGS: &[&str] = &[
    "div", "section", "article", "header", "footer", "main", "aside", "nav", "figure",
    "blockquote", "p", "ul", "ol", "li", "table", "thead", "tbody", "tfoot", "tr", "td", "th",
    "pre", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Classification of one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementClass {
    pub kind: BlockKind,
    pub role: Option<SlotRole>,
    pub hints: StyleHints,
}

/// Classify an element. `None` means the element is inline formatting only.
pub fn classify(tag: &str, classes: &[String], inline_style: Option<&str>) -> Option<ElementClass> {
    let mut hints = StyleHints::default();
    let mut kind = None;
    let mut role = None;
    let mut is_grid = false;

    for class in classes {
        let class = class.as_str();
        if let Some(&(_, columns, auto_fit)) = GRID_CLASSES.iter().find(|(name, _, _)| *name == class)
        {
            is_grid = true;
            if columns.is_some() {
                hints.columns = columns;
                hints.auto_fit = auto_fit;
            }
        }
        if kind.is_none() {
            kind = KIND_CLASSES
                .iter()
                .find(|(name, _)| *name == class)
                .map(|&(_, kind)| kind);
        }
        if role.is_none() {
            role = ROLE_CLASSES
                .iter()
                .find(|(name, _)| *name == class)
                .map(|&(_, role)| role);
        }
        if hints.accent.is_none() {
            hints.accent = tone_color(class);
        }
        match class {
            "allowed" => hints.tone = Some(Tone::Allowed),
            "blocked" => hints.tone = Some(Tone::Blocked),
            "before-card" => hints.tone = Some(Tone::Before),
            "after-card" => hints.tone = Some(Tone::After),
            "header" => hints.header = true,
            "big-text" => hints.gradient = true,
            _ => {}
        }
    }

    let heading_level = match tag {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    };
    hints.heading_level = heading_level;
    if tag == "th" {
        hints.header = true;
    }
    if let Some(style) = inline_style {
        let style = style.to_ascii_lowercase();
        if style.contains("color:") && style.contains("var(--accent)") {
            hints.deck_accent = true;
        }
    }

    let kind = match (kind, tag) {
        // A `comparison-table` written as a real table lays out as a table.
        (Some(BlockKind::ComparisonGrid), "table") => Some(BlockKind::Table),
        (Some(kind), _) => Some(kind),
        (None, _) if is_grid => Some(BlockKind::Grid),
        (None, "h1") => Some(BlockKind::Headline),
        (None, "h2" | "h3" | "h4" | "h5" | "h6") => Some(BlockKind::Heading),
        (None, "p") => Some(BlockKind::Paragraph),
        (None, "li") => Some(BlockKind::ListItem),
        (None, "table") => Some(BlockKind::Table),
        (None, "tr") => Some(BlockKind::TableRow),
        (None, "td" | "th") => Some(BlockKind::TableCell),
        (None, _) if role.is_some() || BLOCK_TAGS.contains(&tag) => Some(BlockKind::Generic),
        (None, _) => None,
    }?;

    Some(ElementClass { kind, role, hints })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(raw: &str) -> Vec<String> {
        raw.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn grid_classes_carry_column_hints() {
        let c = classify("div", &classes("grid grid-5"), None).unwrap();
        assert_eq!(c.kind, BlockKind::Grid);
        assert_eq!(c.hints.columns, Some(5));
        assert!(!c.hints.auto_fit);

        let halves = classify("div", &classes("halves"), None).unwrap();
        assert_eq!(halves.hints.columns, Some(3));
        assert!(halves.hints.auto_fit);
    }

    #[test]
    fn stat_grid_is_not_a_card_grid() {
        let c = classify("div", &classes("stat-grid"), None).unwrap();
        assert_eq!(c.kind, BlockKind::StatGroup);
        let p = classify("div", &classes("principles-grid"), None).unwrap();
        assert_eq!(p.kind, BlockKind::PrincipleGrid);
    }

    #[test]
    fn headings_and_tables_classify_by_tag() {
        assert_eq!(classify("h1", &[], None).unwrap().kind, BlockKind::Headline);
        assert_eq!(classify("h3", &[], None).unwrap().kind, BlockKind::Heading);
        let h2 = classify("h2", &classes("headline big-text"), None).unwrap();
        assert_eq!(h2.kind, BlockKind::Headline);
        assert!(h2.hints.gradient);
        assert_eq!(h2.hints.heading_level, Some(2));
        let comp = classify("table", &classes("comparison-table"), None).unwrap();
        assert_eq!(comp.kind, BlockKind::Table);
        assert!(classify("th", &[], None).unwrap().hints.header);
    }

    #[test]
    fn inline_elements_stay_inline() {
        assert!(classify("span", &classes("highlight"), None).is_none());
        assert!(classify("strong", &[], None).is_none());
        let slot = classify("span", &classes("stat-number"), None).unwrap();
        assert_eq!(slot.kind, BlockKind::Generic);
        assert_eq!(slot.role, Some(SlotRole::StatNumber));
    }

    #[test]
    fn tones_and_accents_are_read_from_classes() {
        let n = classify("div", &classes("notification blocked"), None).unwrap();
        assert_eq!(n.hints.tone, Some(Tone::Blocked));
        let hb = classify("div", &classes("highlight-box warning"), None).unwrap();
        assert_eq!(hb.hints.accent, Some(crate::color::Rgb::ORANGE));
        let td = classify("td", &[], Some("color: var(--accent); font-weight: 600")).unwrap();
        assert!(td.hints.deck_accent);
    }
}
