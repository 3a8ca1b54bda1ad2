use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    pub fn to_discord(self) -> u32 {
        let r = u32::from(self.r);
        let g = u32::from(self.g);
        let b = u32::from(self.b);
        (r << 16) | (g << 8) | b
    }

    /// Returns `None` if the value does not fit into 24 bits.
    #[must_use]
    pub const fn from_discord(value: u32) -> Option<Self> {
        if value > 0x00FF_FFFF {
            return None;
        }
        let [_, r, g, b] = value.to_be_bytes();
        Some(Self::new(r, g, b))
    }

    /// Interprets the raw text of the color input.
    ///
    /// `#`-prefixed text is read as hexadecimal, anything else as decimal.
    /// Whitespace between `#` and the digits is skipped.
    /// Only the leading run of valid digits counts, so `"12px"` is 12.
    /// Text without digits, negative numbers and values wider than 24 bits
    /// all fall back to white.
    #[must_use]
    pub fn parse_input(raw: &str) -> Self {
        let raw = raw.trim();
        let value = match raw.strip_prefix('#') {
            Some(hex) => {
                let hex = hex.trim_start();
                let hex = hex
                    .strip_prefix("0x")
                    .or_else(|| hex.strip_prefix("0X"))
                    .unwrap_or(hex);
                parse_digit_prefix(hex, 16)
            }
            None => parse_digit_prefix(raw, 10),
        };
        value.and_then(Self::from_discord).unwrap_or(Self::WHITE)
    }

    /// Formats the color the way the color input expects it, e.g. `#0000ff`.
    #[must_use]
    pub fn to_hex_input(self) -> String {
        format!("#{:06x}", self.to_discord())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_input())
    }
}

fn parse_digit_prefix(string: &str, radix: u32) -> Option<u32> {
    let string = string.strip_prefix('+').unwrap_or(string);
    let end = string
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(string.len());
    if end == 0 {
        return None;
    }
    u32::from_str_radix(&string[..end], radix).ok()
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.to_discord())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = u32::deserialize(deserializer)?;
        Self::from_discord(value).ok_or_else(|| {
            serde::de::Error::custom(format!("Color {value:#x} does not fit into 24 bits"))
        })
    }
}
