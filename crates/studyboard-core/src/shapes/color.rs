//! Packed ARGB color used throughout the document model.

use peniko::Color;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A 32-bit color packed as `0xAARRGGBB`.
///
/// On the wire the value is written as a signed 32-bit integer, so opaque black is
/// `-16777216`. Decoding accepts both the signed and the unsigned spelling.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ArgbColor(pub u32);

impl ArgbColor {
    pub const BLACK: Self = Self(0xFF00_0000);
    pub const WHITE: Self = Self(0xFFFF_FFFF);
    pub const TRANSPARENT: Self = Self(0x0000_0000);

    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// The value as the signed integer used in exported documents.
    pub const fn to_signed(self) -> i32 {
        self.0 as i32
    }
}

impl fmt::Debug for ArgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArgbColor(#{:08X})", self.0)
    }
}

impl From<Color> for ArgbColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self::from_argb(rgba.a, rgba.r, rgba.g, rgba.b)
    }
}

impl From<ArgbColor> for Color {
    fn from(color: ArgbColor) -> Self {
        Color::from_rgba8(color.red(), color.green(), color.blue(), color.alpha())
    }
}

impl Serialize for ArgbColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.to_signed())
    }
}

impl<'de> Deserialize<'de> for ArgbColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        if value < i64::from(i32::MIN) || value > i64::from(u32::MAX) {
            return Err(de::Error::custom(format!(
                "color {value} does not fit in 32 bits"
            )));
        }
        // Negative values are the two's complement spelling of the same bits.
        Ok(Self(value as u32))
    }
}
