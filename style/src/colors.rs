use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// 8-bit RGBA.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    /// Parses `#RGB` (each digit duplicated), `#RRGGBB` (alpha fully
    /// opaque), or `rgba(R, G, B, A)` with integer channels.
    pub fn parse(raw: &str) -> Result<Color> {
        if raw.starts_with('#') {
            Color::parse_hex(raw)
        } else {
            Color::parse_rgba(raw)
        }
    }

    fn parse_hex(raw: &str) -> Result<Color> {
        let digits = &raw[1..];
        if !digits.is_ascii() {
            bail!("invalid color string {:?}", raw);
        }
        match digits.len() {
            6 => Ok(Color::rgb(
                u8::from_str_radix(&digits[0..2], 16)?,
                u8::from_str_radix(&digits[2..4], 16)?,
                u8::from_str_radix(&digits[4..6], 16)?,
            )),
            3 => {
                // Each digit stands for both nibbles: f -> ff
                let r = u8::from_str_radix(&digits[0..1], 16)?;
                let g = u8::from_str_radix(&digits[1..2], 16)?;
                let b = u8::from_str_radix(&digits[2..3], 16)?;
                Ok(Color::rgb(r * 17, g * 17, b * 17))
            }
            _ => bail!("invalid hex color length in {:?} (must be 3 or 6 digits)", raw),
        }
    }

    fn parse_rgba(raw: &str) -> Result<Color> {
        let inner = raw
            .strip_prefix("rgba(")
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(|| anyhow!("invalid color string {:?}", raw))?;
        let channels = inner
            .split(',')
            .map(|c| c.trim().parse::<u8>())
            .collect::<Result<Vec<u8>, _>>()?;
        if channels.len() != 4 {
            bail!("rgba color {:?} needs exactly 4 channels", raw);
        }
        Ok(Color::rgba(channels[0], channels[1], channels[2], channels[3]))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as the 0.0 - 1.0 opacity SVG and friends want.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Color(r={}, g={}, b={}, a={})",
            self.r, self.g, self.b, self.a
        )
    }
}
