#![forbid(unsafe_code)]

//! Color codec: CSS-style hex and `rgb(...)` strings to integer triples and back.
//!
//! Two grammars are accepted:
//!
//! - hex: `#rgb` or `#rrggbb`, case-insensitive. Shorthand digits expand by
//!   duplication (`#abc` is `#aabbcc`).
//! - functional: `rgb(r, g, b)` where each component is 1–3 ASCII digits and
//!   any whitespace may follow a comma.
//!
//! Decoding never clamps: `rgb(300, 0, 999)` decodes to the channels as
//! written. Encoding does not clamp either, so out-of-range channels are
//! rendered verbatim.
//!
//! # Example
//!
//! ```
//! use brandtint_style::color::{Rgb, decode, encode_hex, encode_rgb};
//!
//! let brand = decode("#3182CE").unwrap();
//! assert_eq!(brand, Rgb::new(49, 130, 206));
//! assert_eq!(encode_rgb(brand), "rgb(49, 130, 206)");
//! assert_eq!(encode_hex(decode("rgb(49,130, 206)").unwrap()), "#3182ce");
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An RGB triple.
///
/// Channels are conceptually `0..=255` but are stored as `u16` because the
/// functional grammar admits three-digit components up to `999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u16,
    pub g: u16,
    pub b: u16,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a triple from its channels.
    pub const fn new(r: u16, g: u16, b: u16) -> Self {
        Self { r, g, b }
    }

    /// Channels in `[r, g, b]` order.
    pub const fn channels(self) -> [u16; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// Comparing squared distances orders colors exactly like the Euclidean
    /// distance does, without a square root and without rounding.
    pub fn distance_squared(self, other: Self) -> u32 {
        self.channels()
            .into_iter()
            .zip(other.channels())
            .map(|(a, b)| {
                let d = u32::from(a.abs_diff(b));
                d * d
            })
            .sum()
    }

    /// Euclidean distance in RGB space.
    pub fn distance(self, other: Self) -> f64 {
        f64::from(self.distance_squared(other)).sqrt()
    }

    /// `#rrggbb` with lowercase digits.
    #[must_use]
    pub fn to_hex_string(self) -> String {
        encode_hex(self)
    }

    /// `rgb(r, g, b)` with a single space after each comma.
    #[must_use]
    pub fn to_rgb_string(self) -> String {
        encode_rgb(self)
    }

    /// Encode in the requested form.
    #[must_use]
    pub fn encode(self, encoding: ColorEncoding) -> String {
        match encoding {
            ColorEncoding::Rgb => encode_rgb(self),
            ColorEncoding::Hex => encode_hex(self),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(u16::from(r), u16::from(g), u16::from(b))
    }
}

/// String form a color is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ColorEncoding {
    /// `rgb(r, g, b)`.
    #[default]
    Rgb,
    /// `#rrggbb`.
    Hex,
}

impl ColorEncoding {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rgb => "rgb",
            Self::Hex => "hex",
        }
    }
}

/// A string matched neither the hex nor the `rgb(...)` grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: expected `#rgb`, `#rrggbb`, or `rgb(r, g, b)`")]
pub struct ColorFormatError {
    input: String,
}

impl ColorFormatError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The rejected input, as supplied.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Decode a hex or `rgb(...)` color string.
///
/// Leading and trailing whitespace is ignored; values usually come from
/// environment variables or JSON documents.
pub fn decode(s: &str) -> Result<Rgb, ColorFormatError> {
    let trimmed = s.trim();
    let parsed = match trimmed.strip_prefix('#') {
        Some(digits) => decode_hex_digits(digits),
        None => decode_functional(trimmed),
    };
    parsed.ok_or_else(|| ColorFormatError::new(s))
}

/// Render `#rrggbb` with lowercase, zero-padded digits.
///
/// Channels above 255 saturate to `ff`, so the result is always a valid
/// six-digit hex color. Use [`encode_rgb`] to keep out-of-range values.
pub fn encode_hex(t: Rgb) -> String {
    let [r, g, b] = t.channels().map(|c| c.min(255));
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Render `rgb(r, g, b)`.
pub fn encode_rgb(t: Rgb) -> String {
    t.to_string()
}

fn decode_hex_digits(digits: &str) -> Option<Rgb> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u16::from_str_radix(&digits[i..=i], 16).ok();
    let byte = |i: usize| u16::from_str_radix(&digits[i..i + 2], 16).ok();
    match digits.len() {
        3 => {
            let [r, g, b] = [nibble(0)?, nibble(1)?, nibble(2)?];
            Some(Rgb::new(r * 0x11, g * 0x11, b * 0x11))
        }
        6 => Some(Rgb::new(byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

fn decode_functional(s: &str) -> Option<Rgb> {
    let body = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let mut parts = body.split(',');
    let r = parse_component(parts.next()?, false)?;
    let g = parse_component(parts.next()?, true)?;
    let b = parse_component(parts.next()?, true)?;
    if parts.next().is_some() {
        return None;
    }
    Some(Rgb::new(r, g, b))
}

/// Components after a comma may carry leading whitespace; nothing else may.
fn parse_component(raw: &str, after_comma: bool) -> Option<u16> {
    let digits = if after_comma { raw.trim_start() } else { raw };
    if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
