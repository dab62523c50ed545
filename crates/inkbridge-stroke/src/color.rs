//! Ink colors

use inkbridge_errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with alpha, written and parsed in CSS notation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `[0, 1]`.
    pub a: f32,
}

impl InkColor {
    pub const BLACK: InkColor = InkColor::rgb(0, 0, 0);
    pub const WHITE: InkColor = InkColor::rgb(255, 255, 255);
    pub const RED: InkColor = InkColor::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        let a = if a.is_finite() { a.clamp(0.0, 1.0) } else { 1.0 };
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn invalid(text: &str, reason: &str) -> ConfigError {
    ConfigError::invalid("color", format!("'{text}': {reason}"))
}

fn channel(text: &str, part: &str) -> Result<u8, ConfigError> {
    part.trim()
        .parse::<u8>()
        .ok()
        .ok_or_else(|| invalid(text, "color channels must be 0-255"))
}

fn hex_pair(text: &str, digits: &str) -> Result<u8, ConfigError> {
    u8::from_str_radix(digits, 16)
        .ok()
        .ok_or_else(|| invalid(text, "bad hex digit"))
}

impl FromStr for InkColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let lower = text.to_ascii_lowercase();

        match lower.as_str() {
            "black" => return Ok(InkColor::BLACK),
            "white" => return Ok(InkColor::WHITE),
            "red" => return Ok(InkColor::RED),
            _ => {}
        }

        if let Some(hex) = lower.strip_prefix('#') {
            let expanded: String = match hex.len() {
                3 => hex.chars().flat_map(|c| [c, c]).collect(),
                6 => hex.to_string(),
                _ => return Err(invalid(text, "expected #rgb or #rrggbb")),
            };
            if !expanded.is_ascii() {
                return Err(invalid(text, "bad hex digit"));
            }
            let (r, rest) = expanded.split_at(2);
            let (g, b) = rest.split_at(2);
            return Ok(InkColor::rgb(
                hex_pair(text, r)?,
                hex_pair(text, g)?,
                hex_pair(text, b)?,
            ));
        }

        let body = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| invalid(text, "unrecognized color"))?;
        let parts: Vec<&str> = body.split(',').collect();
        match parts.as_slice() {
            [r, g, b] => Ok(InkColor::rgb(
                channel(text, r)?,
                channel(text, g)?,
                channel(text, b)?,
            )),
            [r, g, b, a] => {
                let alpha = a
                    .trim()
                    .parse::<f32>()
                    .ok()
                    .filter(|a| (0.0..=1.0).contains(a))
                    .ok_or_else(|| invalid(text, "alpha must be within 0-1"))?;
                Ok(InkColor::rgba(
                    channel(text, r)?,
                    channel(text, g)?,
                    channel(text, b)?,
                    alpha,
                ))
            }
            _ => Err(invalid(text, "expected 3 or 4 components")),
        }
    }
}

impl TryFrom<String> for InkColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InkColor> for String {
    fn from(color: InkColor) -> Self {
        color.to_string()
    }
}

impl fmt::Display for InkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            f.write_str(&self.hex())
        } else {
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}
