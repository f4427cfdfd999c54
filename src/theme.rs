//! Deck theming from stylesheet custom properties.

use std::collections::BTreeMap;

use crate::color::Rgb;

/// Custom property names consulted for the deck accent, in priority order.
const ACCENT_VARIABLES: &[&str] = &["color-accent", "accent"];

/// Collect `--name: value` declarations from stylesheet text.
///
/// Later declarations of the same name replace earlier ones.
pub fn extract_css_vars(css: &str, out: &mut BTreeMap<String, String>) {
    let mut rest = css;
    while let Some(pos) = rest.find("--") {
        rest = &rest[pos + 2..];
        let name_len = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
            .unwrap_or(rest.len());
        let name = &rest[..name_len];
        let after = rest[name_len..].trim_start();
        let Some(value_part) = after.strip_prefix(':') else {
            rest = &rest[name_len..];
            continue;
        };
        let value_end = value_part
            .find([';', '}'])
            .unwrap_or(value_part.len());
        let value = value_part[..value_end].trim();
        if !name.is_empty() && !value.is_empty() {
            out.insert(name.to_string(), value.to_string());
        }
        rest = &value_part[value_end..];
    }
}

/// Deck accent from custom properties, falling back to the default blue.
pub fn resolve_accent(vars: &BTreeMap<String, String>) -> Rgb {
    for name in ACCENT_VARIABLES {
        let Some(value) = vars.get(*name) else {
            continue;
        };
        if value.starts_with('#') {
            if let Some(rgb) = Rgb::from_hex(value) {
                return rgb;
            }
        }
    }
    Rgb::BLUE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_custom_properties() {
        let mut vars = BTreeMap::new();
        extract_css_vars(
            ":root { --color-accent: #FF9F0A; --bg:#000 } .x { color: var(--color-accent); }",
            &mut vars,
        );
        assert_eq!(vars.get("color-accent").map(String::as_str), Some("#FF9F0A"));
        assert_eq!(vars.get("bg").map(String::as_str), Some("#000"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn accent_prefers_color_accent_then_accent() {
        let mut vars = BTreeMap::new();
        vars.insert("accent".to_string(), "#00CC6A".to_string());
        assert_eq!(resolve_accent(&vars), Rgb::GREEN);
        vars.insert("color-accent".to_string(), "#8B5CF6".to_string());
        assert_eq!(resolve_accent(&vars), Rgb::PURPLE);
    }

    #[test]
    fn non_hex_accent_falls_back_to_blue() {
        let mut vars = BTreeMap::new();
        vars.insert("accent".to_string(), "rebeccapurple".to_string());
        assert_eq!(resolve_accent(&vars), Rgb::BLUE);
        assert_eq!(resolve_accent(&BTreeMap::new()), Rgb::BLUE);
    }
}
