//! Color values for palettes
//!
//! A [`Color`] is kept in its textual form, `#rrggbb`. Generated colors are
//! always well-formed lowercase hex; colors decoded from a share link are
//! taken as-is and may not be (see [`Color::is_valid`]).

use image::Rgba;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Largest 24-bit RGB value (`#ffffff`)
pub const MAX_COLOR_VALUE: u32 = 0xFF_FFFF;

/// Number of hex digits in a canonical color
pub const HEX_DIGITS: usize = 6;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Wrong number of hex digits after the optional '#'
    #[error("invalid color length {0}, expected 6 hex digits")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// A single palette color in `#rrggbb` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Wrap a string without validating it.
    ///
    /// Used where upstream input is accepted verbatim (share links). Check
    /// [`Color::is_valid`] before relying on the value.
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Build a color from a 24-bit RGB value. Bits above 24 are ignored.
    pub fn from_value(value: u32) -> Self {
        Self(format!("#{:06x}", value & MAX_COLOR_VALUE))
    }

    /// Parse a user-supplied color strictly.
    ///
    /// Accepts `#RRGGBB` or `RRGGBB` in any case and normalizes to lowercase.
    ///
    /// ```
    /// use huebox::color::Color;
    ///
    /// let c = Color::parse("FF8800").unwrap();
    /// assert_eq!(c.as_str(), "#ff8800");
    /// assert!(Color::parse("#12345").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ColorError> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.is_empty() {
            return Err(ColorError::Empty);
        }
        if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(c));
        }
        if hex.len() != HEX_DIGITS {
            return Err(ColorError::InvalidLength(hex.len()));
        }
        Ok(Self(format!("#{}", hex.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The color without its leading '#'.
    pub fn hex_digits(&self) -> &str {
        self.0.strip_prefix('#').unwrap_or(&self.0)
    }

    /// True when the value is exactly '#' followed by 6 hex digits.
    pub fn is_valid(&self) -> bool {
        match self.0.strip_prefix('#') {
            Some(hex) => hex.len() == HEX_DIGITS && hex.bytes().all(|b| b.is_ascii_hexdigit()),
            None => false,
        }
    }

    /// Convert to an opaque RGBA pixel, or `None` for a malformed color.
    pub fn to_rgba(&self) -> Option<Rgba<u8>> {
        if !self.is_valid() {
            return None;
        }
        let hex = self.hex_digits();
        let r = parse_hex_pair(&hex[0..2])?;
        let g = parse_hex_pair(&hex[2..4])?;
        let b = parse_hex_pair(&hex[4..6])?;
        Some(Rgba([r, g, b, 255]))
    }

    /// Upper-case code as shown on a color card (e.g. `#FF8800`).
    pub fn display_code(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl From<Rgba<u8>> for Color {
    fn from(rgba: Rgba<u8>) -> Self {
        Color::from_value(u32::from_be_bytes([0, rgba[0], rgba[1], rgba[2]]))
    }
}

/// Draw a uniformly random color from `#000000..=#ffffff`.
pub fn generate_random_color() -> Color {
    random_color_with(&mut rand::rng())
}

/// Same as [`generate_random_color`], with a caller-supplied RNG.
pub fn random_color_with<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::from_value(rng.random_range(0..=MAX_COLOR_VALUE))
}

fn parse_hex_pair(s: &str) -> Option<u8> {
    u8::from_str_radix(s, 16).ok()
}
