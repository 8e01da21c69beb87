// spooltag-rs/spooltag/src/types.rs

use crate::CodecError;
use derive_more::Display;

/// Color - 3 バイトの swatch (Newtype Pattern)
///
/// A fixed 3-byte color swatch as stored on the tag; not an index into
/// a palette. Renders as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "#{:02X}{:02X}{:02X}", r, g, b)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self::from_rgb(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::from_rgb(0xFF, 0xFF, 0xFF);
    pub const RED: Self = Self::from_rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Self = Self::from_rgb(0x00, 0xFF, 0x00);
    pub const BLUE: Self = Self::from_rgb(0x00, 0x00, 0xFF);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` (or bare `RRGGBB`) hex string.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let bytes = crate::utils::parse_hex(hex).ok()?;
        match bytes[..] {
            [r, g, b] => Some(Self { r, g, b }),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    pub const fn as_bytes(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Diameter - 1/100 mm 単位 (Newtype Pattern)
///
/// Filament diameter in hundredths of a millimetre, matching the
/// 16-bit field on the tag (175 = 1.75 mm).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diameter(u16);

impl Diameter {
    /// The common 1.75 mm filament diameter.
    pub const STANDARD: Self = Self(175);

    pub const fn from_hundredths(raw: u16) -> Self {
        Self(raw)
    }

    /// Convert from millimetres, failing when the value exceeds the
    /// field's 16-bit range (655.35 mm).
    pub fn from_mm(mm: f64) -> Result<Self, CodecError> {
        let raw = (mm * 100.0).round();
        if !(0.0..=f64::from(u16::MAX)).contains(&raw) {
            return Err(CodecError::FieldOverflow {
                field: "diameter",
                value: raw.max(0.0) as u32,
                max: u32::from(u16::MAX),
            });
        }
        Ok(Self(raw as u16))
    }

    pub const fn as_hundredths(&self) -> u16 {
        self.0
    }

    pub fn as_mm(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

/// Decoded GetFirmwareVersion response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareVersion {
    /// IC identifier (0x32 for a PN532)
    pub ic: u8,
    /// Firmware major version
    pub ver: u8,
    /// Firmware revision
    pub rev: u8,
    /// Supported-protocols bitmask
    pub support: u8,
}
