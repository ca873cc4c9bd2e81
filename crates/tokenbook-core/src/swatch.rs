//! Visual previews for resolved token values.
//!
//! Colour tokens get an RGBA swatch, dimensions a numeric size, font
//! families a specimen name. Anything that does not parse falls back to
//! plain text.

use std::fmt;

use serde::Serialize;

/// An 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return Err(format!("invalid hex color: {s}"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("invalid hex color {s}: {e}"))
        };
        let short = |i: usize| channel(i..i + 1).map(|v| v * 17);

        match hex.len() {
            3 => Ok(Self::rgb(short(0)?, short(1)?, short(2)?)),
            4 => Ok(Self {
                r: short(0)?,
                g: short(1)?,
                b: short(2)?,
                a: short(3)?,
            }),
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
                a: channel(6..8)?,
            }),
            _ => Err(format!("invalid hex color: {s}")),
        }
    }

    /// `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let Self { r, g, b, a } = *self;
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Relative luminance (sRGB, 0.0–1.0), used to pick a readable label colour.
    pub fn luminance(&self) -> f32 {
        fn linear(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    pub fn is_dark(&self) -> bool {
        self.luminance() < 0.5
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Swatch {
    Color { color: Rgba },
    Dimension { amount: f32, unit: String },
    Font { family: String },
    Text { text: String },
}

impl Swatch {
    /// Pick a preview for a resolved value given its token type.
    pub fn classify(token_type: &str, resolved: &str) -> Self {
        let kind = token_type.to_ascii_lowercase();
        let text = || Self::Text {
            text: resolved.to_string(),
        };

        if kind.contains("color") || (kind.is_empty() && resolved.starts_with('#')) {
            return Rgba::from_hex(resolved)
                .map(|color| Self::Color { color })
                .unwrap_or_else(|_| text());
        }

        if kind.contains("font") && (kind.contains("famil") || kind == "fonts") {
            return Self::Font {
                family: resolved.trim().to_string(),
            };
        }

        if is_dimension_type(&kind) {
            return parse_dimension(resolved)
                .map(|(amount, unit)| Self::Dimension { amount, unit })
                .unwrap_or_else(text);
        }

        text()
    }

    /// CSS background for colour swatches.
    pub fn background(&self) -> Option<String> {
        match self {
            Self::Color { color } => Some(color.to_hex()),
            _ => None,
        }
    }
}

fn is_dimension_type(kind: &str) -> bool {
    matches!(
        kind,
        "dimension"
            | "spacing"
            | "sizing"
            | "size"
            | "borderradius"
            | "borderwidth"
            | "fontsize"
            | "fontsizes"
            | "lineheight"
            | "lineheights"
            | "letterspacing"
    )
}

/// Split `"16px"` into `(16.0, "px")`. A bare number has an empty unit.
fn parse_dimension(s: &str) -> Option<(f32, String)> {
    let s = s.trim();
    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(s.len());
    let (number, unit) = s.split_at(split);
    let amount: f32 = number.parse().ok()?;
    let unit = unit.trim();
    if unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') {
        Some((amount, unit.to_string()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(Rgba::from_hex("#fff").unwrap(), Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::from_hex("#0A84FF").unwrap(), Rgba::rgb(10, 132, 255));
        assert_eq!(Rgba::from_hex("0a84ff").unwrap(), Rgba::rgb(10, 132, 255));
        assert_eq!(
            Rgba::from_hex("#00000080").unwrap(),
            Rgba {
                r: 0,
                g: 0,
                b: 0,
                a: 128
            }
        );
        assert_eq!(Rgba::from_hex("#f008").unwrap().a, 0x88);
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Rgba::from_hex("#ggg").is_err());
        assert!(Rgba::from_hex("#12345").is_err());
        assert!(Rgba::from_hex("rgb(0,0,0)").is_err());
        assert!(Rgba::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgba::rgb(10, 132, 255).to_hex(), "#0A84FF");
        assert_eq!(Rgba::from_hex("#00000080").unwrap().to_hex(), "#00000080");
    }

    #[test]
    fn test_is_dark() {
        assert!(Rgba::rgb(0, 0, 0).is_dark());
        assert!(!Rgba::rgb(255, 255, 255).is_dark());
    }

    #[test]
    fn test_classify_color() {
        assert_eq!(
            Swatch::classify("color", "#0A84FF"),
            Swatch::Color {
                color: Rgba::rgb(10, 132, 255)
            }
        );
        assert_eq!(
            Swatch::classify("", "#fff").background().as_deref(),
            Some("#FFFFFF")
        );
    }

    #[test]
    fn test_unparsable_color_degrades_to_text() {
        assert_eq!(
            Swatch::classify("color", "{brand.missing}"),
            Swatch::Text {
                text: "{brand.missing}".into()
            }
        );
    }

    #[test]
    fn test_classify_dimension() {
        assert_eq!(
            Swatch::classify("dimension", "16px"),
            Swatch::Dimension {
                amount: 16.0,
                unit: "px".into()
            }
        );
        assert_eq!(
            Swatch::classify("borderRadius", "0.5rem"),
            Swatch::Dimension {
                amount: 0.5,
                unit: "rem".into()
            }
        );
        assert_eq!(
            Swatch::classify("spacing", "8"),
            Swatch::Dimension {
                amount: 8.0,
                unit: String::new()
            }
        );
        assert!(matches!(
            Swatch::classify("spacing", "calc(4px * 2)"),
            Swatch::Text { .. }
        ));
    }

    #[test]
    fn test_classify_font() {
        assert_eq!(
            Swatch::classify("fontFamilies", "Georgia"),
            Swatch::Font {
                family: "Georgia".into()
            }
        );
        assert!(matches!(
            Swatch::classify("fontWeights", "700"),
            Swatch::Text { .. }
        ));
    }
}
