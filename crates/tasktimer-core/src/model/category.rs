//! Categories and their display colors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// ARGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const DEFAULT: Color = Color(0xFF42_85F4);

    /// Colors offered when creating a category.
    pub const PALETTE: [Color; 10] = [
        Color(0xFF42_85F4), // blue
        Color(0xFF34_A853), // green
        Color(0xFFEA_4335), // red
        Color(0xFFFB_BC04), // yellow
        Color(0xFF9C_27B0), // purple
        Color(0xFFFF_6D00), // orange
        Color(0xFF00_897B), // teal
        Color(0xFFD8_1B60), // pink
        Color(0xFF54_6E7A), // blue grey
        Color(0xFF6D_4C41), // brown
    ];

    /// Palette color for the `n`-th category, wrapping around.
    pub fn nth_palette(n: usize) -> Color {
        Self::PALETTE[n % Self::PALETTE.len()]
    }

    pub fn argb(self) -> u32 {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::DEFAULT
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    /// Accepts `#RRGGBB` (opaque) or `#AARRGGBB`, with or without `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidColor(s.into()));
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| ValidationError::InvalidColor(s.into()))?;
        match hex.len() {
            6 => Ok(Color(0xFF00_0000 | value)),
            8 => Ok(Color(value)),
            _ => Err(ValidationError::InvalidColor(s.into())),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// User-defined task category, referenced by tasks through `category_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}
