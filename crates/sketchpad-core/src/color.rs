//! Stroke and background colors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Color parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Invalid color: {0:?}")]
    Invalid(String),
}

/// RGBA8 color, serialized as a CSS hex string (`#rrggbb` or `#rrggbbaa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or `transparent`.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let text = input.trim();
        if text.eq_ignore_ascii_case("transparent") {
            return Ok(Self::transparent());
        }

        let invalid = || ColorError::Invalid(input.to_string());
        let hex = text.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };

        match hex.len() {
            3 => Ok(Self::rgb(byte(0..1)? * 17, byte(1..2)? * 17, byte(2..3)? * 17)),
            6 => Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
            _ => Err(invalid()),
        }
    }

    /// Lowercase hex form; the alpha byte is only written when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Alpha as a 0..=1 fraction.
    pub fn alpha(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for SerializableColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(SerializableColor::parse("#fff").unwrap(), SerializableColor::white());
        assert_eq!(
            SerializableColor::parse("#FF3B30").unwrap(),
            SerializableColor::rgb(0xff, 0x3b, 0x30)
        );
        assert_eq!(
            SerializableColor::parse("#00000080").unwrap(),
            SerializableColor::new(0, 0, 0, 0x80)
        );
        assert_eq!(
            SerializableColor::parse("transparent").unwrap(),
            SerializableColor::transparent()
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(SerializableColor::parse("red").is_err());
        assert!(SerializableColor::parse("#12345").is_err());
        assert!(SerializableColor::parse("#gggggg").is_err());
        assert!(SerializableColor::parse("#ééé").is_err());
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(SerializableColor::rgb(0x22, 0x22, 0x22).to_hex(), "#222222");
        assert_eq!(SerializableColor::new(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&SerializableColor::rgb(0, 0x79, 0xff)).unwrap();
        assert_eq!(json, "\"#0079ff\"");
        let back: SerializableColor = serde_json::from_str("\"#0579FF\"").unwrap();
        assert_eq!(back, SerializableColor::rgb(0x05, 0x79, 0xff));
        assert!(serde_json::from_str::<SerializableColor>("\"nope\"").is_err());
    }
}
