//! Core value types for table models.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use crate::errors::ModelError;

/// Identifier of a table within a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TableId(pub String);

impl TableId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for TableId {
    fn from(s: &str) -> Self {
        TableId(s.to_string())
    }
}

impl From<String> for TableId {
    fn from(s: String) -> Self {
        TableId(s)
    }
}

impl Borrow<str> for TableId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A color value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from 8-bit RGB values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create from 8-bit RGBA values.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex string: `#RGB`, `#RRGGBB` or `#RRGGBBAA`, `#` optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        // from_str_radix accepts a leading sign, so check digits up front.
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

        match hex.len() {
            3 => {
                // Each nibble expands to a full byte (0xA -> 0xAA).
                let r = channel(0..1)? * 17;
                let g = channel(1..2)? * 17;
                let b = channel(2..3)? * 17;
                Some(Self::from_rgb8(r, g, b))
            }
            6 => Some(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Some(Self::from_rgba8(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    /// Convert to 8-bit RGBA tuple.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        let quantize = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        (quantize(self.r), quantize(self.g), quantize(self.b), quantize(self.a))
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

impl FromStr for Color {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s).ok_or_else(|| ModelError::InvalidColor {
            value: s.to_string(),
        })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.to_rgba8();
        if a == 255 {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        let color: Color = "#3B82F6".parse().unwrap();
        assert_eq!(color.to_rgba8(), (0x3B, 0x82, 0xF6, 255));
        assert_eq!(color.to_string(), "#3B82F6");
    }

    #[test]
    fn test_parse_short_hex_expands_nibbles() {
        let color = Color::from_hex("#f0a").unwrap();
        assert_eq!(color.to_rgba8(), (0xFF, 0x00, 0xAA, 255));
    }

    #[test]
    fn test_parse_without_hash_and_with_alpha() {
        let color = Color::from_hex("00000080").unwrap();
        assert_eq!(color.to_rgba8(), (0, 0, 0, 0x80));
        assert!(!color.is_opaque());
        assert_eq!(color.to_string(), "#00000080");
    }

    #[test]
    fn test_invalid_colors() {
        assert!(Color::from_hex("").is_none());
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#ggg").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn test_signed_channels_rejected() {
        assert!(Color::from_hex("#+1+2+3").is_none());
        assert!(Color::from_hex("+f+f+f").is_none());
        assert!(Color::from_hex("#-1").is_none());
        assert_eq!(
            "#+1+2+3".parse::<Color>().unwrap_err(),
            ModelError::InvalidColor { value: "#+1+2+3".into() }
        );
    }

    #[test]
    fn test_named_color_rejected() {
        let err = "blue".parse::<Color>().unwrap_err();
        assert_eq!(err, ModelError::InvalidColor { value: "blue".into() });
    }

    #[test]
    fn test_table_id_blank_is_empty() {
        assert!(TableId::from("  ").is_empty());
        assert!(!TableId::from("inner").is_empty());
        assert_eq!(TableId::from("inner").to_string(), "inner");
    }
}
