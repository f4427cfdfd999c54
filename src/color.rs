//! RGB colors and the fixed deck palette.

use core::fmt;
use serde::{Deserialize, Serialize};

/// 24-bit sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const BLUE: Rgb = Rgb(0x00, 0x78, 0xD4);
    pub const CYAN: Rgb = Rgb(0x50, 0xE6, 0xFF);
    pub const GREEN: Rgb = Rgb(0x00, 0xCC, 0x6A);
    pub const ORANGE: Rgb = Rgb(0xFF, 0x9F, 0x0A);
    pub const RED: Rgb = Rgb(0xFF, 0x45, 0x3A);
    pub const PURPLE: Rgb = Rgb(0x8B, 0x5C, 0xF6);

    pub const GRAY_70: Rgb = Rgb(0xB3, 0xB3, 0xB3);
    pub const GRAY_50: Rgb = Rgb(0x80, 0x80, 0x80);
    pub const DARK_GRAY: Rgb = Rgb(0x1A, 0x1A, 0x1A);
    pub const BORDER_GRAY: Rgb = Rgb(0x33, 0x33, 0x33);

    pub const CODE_BG: Rgb = Rgb(0x0D, 0x11, 0x17);
    pub const CODE_BORDER: Rgb = Rgb(0x30, 0x30, 0x30);
    pub const CODE_GREEN: Rgb = Rgb(0x4A, 0xDE, 0x80);
    pub const CODE_BLUE: Rgb = Rgb(0x60, 0xA5, 0xFA);
    pub const CODE_YELLOW: Rgb = Rgb(0xFB, 0xBF, 0x24);
    pub const CODE_GRAY: Rgb = Rgb(0x6B, 0x73, 0x80);
    pub const CODE_PURPLE: Rgb = Rgb(0xC0, 0x84, 0xFC);
    pub const CODE_DEFAULT: Rgb = Rgb(0xE6, 0xE6, 0xE6);

    /// Parse `#RGB` or `#RRGGBB` (the `#` is optional).
    pub fn from_hex(raw: &str) -> Option<Self> {
        let hex = raw.trim().trim_start_matches('#');
        let expanded: [u8; 6] = match hex.len() {
            3 => {
                let b = hex.as_bytes();
                [b[0], b[0], b[1], b[1], b[2], b[2]]
            }
            6 => {
                let b = hex.as_bytes();
                [b[0], b[1], b[2], b[3], b[4], b[5]]
            }
            _ => return None,
        };
        let channel = |hi: u8, lo: u8| -> Option<u8> {
            let hi = (hi as char).to_digit(16)?;
            let lo = (lo as char).to_digit(16)?;
            Some((hi * 16 + lo) as u8)
        };
        Some(Self(
            channel(expanded[0], expanded[1])?,
            channel(expanded[2], expanded[3])?,
            channel(expanded[4], expanded[5])?,
        ))
    }

    /// Dark tinted background paired with a callout border color.
    pub fn callout_background(self) -> Rgb {
        match self {
            Rgb::GREEN => Rgb(0x00, 0x1A, 0x0D),
            Rgb::ORANGE => Rgb(0x33, 0x1A, 0x00),
            Rgb::RED => Rgb(0x1A, 0x0D, 0x0D),
            _ => Rgb(0x00, 0x1A, 0x33),
        }
    }

    /// Dark tinted background paired with a tenet accent bar.
    pub fn tenet_background(self) -> Rgb {
        match self {
            Rgb::GREEN => Rgb(0x0D, 0x1A, 0x0D),
            Rgb::ORANGE => Rgb(0x1A, 0x15, 0x0D),
            Rgb::RED => Rgb(0x1A, 0x0D, 0x0D),
            _ => Rgb(0x0D, 0x15, 0x1A),
        }
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Accent color named by a presentation class (`green`, `ms-red`, `warning`, ...).
pub fn tone_color(class: &str) -> Option<Rgb> {
    match class {
        "green" | "ms-green" => Some(Rgb::GREEN),
        "orange" | "ms-orange" | "warning" => Some(Rgb::ORANGE),
        "red" | "ms-red" => Some(Rgb::RED),
        "ms-blue" => Some(Rgb::BLUE),
        "ms-cyan" => Some(Rgb::CYAN),
        "ms-purple" => Some(Rgb::PURPLE),
        _ => None,
    }
}

/// Run color carried by an inline `span` class: emphasis spans in prose and
/// syntax-highlight spans inside code.
pub fn span_color(class: &str) -> Option<Rgb> {
    match class {
        "highlight" => Some(Rgb::CYAN),
        "check" => Some(Rgb::GREEN),
        "code-keyword" | "keyword" | "layer-kernel" => Some(Rgb::CODE_BLUE),
        "code-string" | "string" | "code-func" | "func" | "layer-modules" => {
            Some(Rgb::CODE_YELLOW)
        }
        "code-comment" | "comment" => Some(Rgb::CODE_GRAY),
        "code-type" | "type" | "layer-foundation" => Some(Rgb::CODE_GREEN),
        "code-number" | "number" | "layer-apps" => Some(Rgb::CODE_PURPLE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_hex() {
        assert_eq!(Rgb::from_hex("#0078D4"), Some(Rgb::BLUE));
        assert_eq!(Rgb::from_hex("fff"), Some(Rgb::WHITE));
        assert_eq!(Rgb::from_hex(" #a1b "), Some(Rgb(0xAA, 0x11, 0xBB)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#zzzzzz"), None);
        assert_eq!(Rgb::from_hex(""), None);
    }

    #[test]
    fn display_round_trips_through_hex() {
        let c = Rgb(0x12, 0xAB, 0x0F);
        assert_eq!(c.to_string(), "#12AB0F");
        assert_eq!(Rgb::from_hex(&c.to_string()), Some(c));
    }

    #[test]
    fn tone_classes_map_to_palette() {
        assert_eq!(tone_color("warning"), Some(Rgb::ORANGE));
        assert_eq!(tone_color("ms-cyan"), Some(Rgb::CYAN));
        assert_eq!(tone_color("card"), None);
    }
}
