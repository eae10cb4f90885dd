//! sRGB color values and hex parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors produced when a string cannot be read as a hex color.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("missing color value")]
    Empty,

    #[error("invalid color value '{0}': expected #RRGGBB")]
    InvalidLength(String),

    #[error("invalid color value '{0}': contains non-hex characters")]
    InvalidDigit(String),
}

/// An 8-bit-per-channel sRGB color.
///
/// Constructed from `#RRGGBB`, `RRGGBB` or the `#RGB` shorthand. Formats
/// back out as uppercase `#RRGGBB`, which is the normalized form used for
/// every comparison in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Creates a color from channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a hex color string.
    ///
    /// Leading/trailing whitespace and a leading `#` are ignored. Both
    /// upper- and lowercase digits are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use deckguard::color::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
    /// assert_eq!(Rgb::from_hex("FFF").unwrap(), Rgb::WHITE);
    /// assert!(Rgb::from_hex("#12345").is_err());
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if digits.is_empty() {
            return Err(ColorError::Empty);
        }
        // Checked before slicing so multi-byte input never reaches the
        // byte-indexed slices below.
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(trimmed.to_string()));
        }

        let expanded;
        let digits = match digits.len() {
            6 => digits,
            3 => {
                expanded = digits.chars().flat_map(|c| [c, c]).collect::<String>();
                expanded.as_str()
            }
            _ => return Err(ColorError::InvalidLength(trimmed.to_string())),
        };

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorError::InvalidDigit(trimmed.to_string()))
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Formats the color as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Channels scaled to `0.0..=1.0`.
    #[inline]
    pub(crate) fn unit_channels(self) -> [f64; 3] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Serialized as the normalized hex string so reports stay readable.
impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Parses a hex string into an [`Rgb`].
pub fn hex_to_rgb(hex: &str) -> Result<Rgb, ColorError> {
    Rgb::from_hex(hex)
}

/// Formats an [`Rgb`] as uppercase `#RRGGBB`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    rgb.to_hex()
}

/// Normalizes a hex string to uppercase `#RRGGBB`.
pub fn normalize_hex(hex: &str) -> Result<String, ColorError> {
    Rgb::from_hex(hex).map(Rgb::to_hex)
}
