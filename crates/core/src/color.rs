//! Colors used by the navigation bar appearance attributes.
//!
//! A [`Color`] is either the platform [`Color::Default`] or an explicit RGBA
//! value. Colors are written as `default`, `#RRGGBB` or `#RRGGBBAA` in
//! settings files and scripts.
//!
//! ```
//! use pagestack_core::color::Color;
//!
//! let red: Color = "#ff0000".parse()?;
//! assert_eq!(red, Color::rgb(255, 0, 0));
//! assert_eq!(red.to_string(), "#ff0000");
//! # Ok::<(), pagestack_core::color::ColorParseError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const RED: Color = Color::rgb(255, 0, 0);
pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The value does not start with `#` and is not `default`
    #[error("color must be `default` or start with '#': {0:?}")]
    MissingHash(String),

    /// The hex part has a length other than 6 or 8
    #[error("color must have 6 or 8 hex digits, got {0}")]
    InvalidLength(usize),

    /// The hex part contains a non-hex character
    #[error("invalid hex digits in color {0:?}")]
    InvalidDigits(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// Let the platform decide.
    #[default]
    Default,
    Rgba { r: u8, g: u8, b: u8, a: u8 },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::Rgba { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color::Rgba { r, g, b, a }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Color::Default)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Default => f.write_str("default"),
            Color::Rgba { r, g, b, a: 255 } => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
            Color::Rgba { r, g, b, a } => write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a),
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("default") {
            return Ok(Color::Default);
        }

        let Some(hex) = s.strip_prefix('#') else {
            return Err(ColorParseError::MissingHash(s.to_string()));
        };

        if hex.len() != 6 && hex.len() != 8 {
            return Err(ColorParseError::InvalidLength(hex.len()));
        }

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigits(s.to_string()));
        }

        let channel = |index: usize| {
            u8::from_str_radix(&hex[index..index + 2], 16)
                .map_err(|_| ColorParseError::InvalidDigits(s.to_string()))
        };

        let a = if hex.len() == 8 { channel(6)? } else { 255 };

        Ok(Color::Rgba {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
