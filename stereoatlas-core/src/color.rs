//! Named and hex colours

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear RGB colour with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

// Matplotlib/CSS names. Covers the names used when plotting atlas regions.
const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("pink", [255, 192, 203]),
    ("brown", [165, 42, 42]),
    ("grey", [128, 128, 128]),
    ("gray", [128, 128, 128]),
    ("lightgrey", [211, 211, 211]),
    ("lightgray", [211, 211, 211]),
    ("darkgrey", [169, 169, 169]),
    ("darkgray", [169, 169, 169]),
    ("silver", [192, 192, 192]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("olive", [128, 128, 0]),
    ("maroon", [128, 0, 0]),
    ("lime", [0, 255, 0]),
    ("gold", [255, 215, 0]),
    ("salmon", [250, 128, 114]),
    ("coral", [255, 127, 80]),
    ("tomato", [255, 99, 71]),
    ("orchid", [218, 112, 214]),
    ("violet", [238, 130, 238]),
    ("indigo", [75, 0, 130]),
    ("skyblue", [135, 206, 235]),
    ("lightskyblue", [135, 206, 250]),
    ("deepskyblue", [0, 191, 255]),
    ("lightblue", [173, 216, 230]),
    ("powderblue", [176, 224, 230]),
    ("steelblue", [70, 130, 180]),
    ("royalblue", [65, 105, 225]),
    ("dodgerblue", [30, 144, 255]),
    ("cornflowerblue", [100, 149, 237]),
    ("darkblue", [0, 0, 139]),
    ("lightgreen", [144, 238, 144]),
    ("darkgreen", [0, 100, 0]),
    ("seagreen", [46, 139, 87]),
    ("forestgreen", [34, 139, 34]),
    ("limegreen", [50, 205, 50]),
    ("darkred", [139, 0, 0]),
    ("firebrick", [178, 34, 34]),
    ("crimson", [220, 20, 60]),
    ("khaki", [240, 230, 140]),
    ("beige", [245, 245, 220]),
    ("ivory", [255, 255, 240]),
    ("tan", [210, 180, 140]),
    ("turquoise", [64, 224, 208]),
    ("aquamarine", [127, 255, 212]),
    ("lavender", [230, 230, 250]),
    ("plum", [221, 160, 221]),
    ("slategrey", [112, 128, 144]),
    ("slategray", [112, 128, 144]),
];

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Colour from 8-bit channels, as stored in atlas structure tables
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
        )
    }

    /// Look up a colour by name. Case, spaces and underscores are ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(_, rgb)| Self::from_rgb8(*rgb))
    }

    /// Parse `#rrggbb` or `#rgb`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Self::from_rgb8([
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            ])),
            3 => {
                let mut rgb = [0u8; 3];
                for (i, c) in digits.chars().enumerate() {
                    let v = c.to_digit(16)? as u8;
                    rgb[i] = v * 16 + v;
                }
                Some(Self::from_rgb8(rgb))
            }
            _ => None,
        }
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn with_alpha(&self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    pub const GREY: Self = Self::new(128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0);
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::new(0.0, 128.0 / 255.0, 0.0);
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parsed = if trimmed.starts_with('#') {
            Self::from_hex(trimmed)
        } else {
            Self::from_name(trimmed)
        };
        parsed.ok_or_else(|| Error::InvalidData(format!("Unknown colour: {}", s)))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_u8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(f, "#{:02x}{:02x}{:02x}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GREY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_used_for_plotting() {
        for name in ["grey", "lightskyblue", "powderblue", "blue", "green", "red"] {
            assert!(name.parse::<Color>().is_ok(), "missing colour {}", name);
        }
        assert_eq!(Color::from_name("Light Sky_Blue"), Color::from_name("lightskyblue"));
    }

    #[test]
    fn test_hex_parsing() {
        let c: Color = "#ff8000".parse().unwrap();
        assert_eq!(c.to_string(), "#ff8000");
        let short: Color = "#f80".parse().unwrap();
        assert_eq!(short.to_string(), "#ff8800");
        assert!("#12345".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_unknown_name_is_error() {
        let err = "notacolour".parse::<Color>().unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_display_roundtrips_named() {
        assert_eq!(Color::from_name("grey").unwrap().to_string(), "#808080");
        assert_eq!(Color::from_name("lightskyblue").unwrap().to_string(), "#87cefa");
    }
}
