// spooltag-rs/spooltag/src/record/mod.rs

//! The decoded filament record and spool-amount helpers.

pub mod material;

pub use material::Material;

use crate::types::{Color, Diameter};

/// A filament spool record as stored on (or destined for) a tag.
///
/// Constructed either from user-entered fields and encoded for writing,
/// or decoded fresh from a read buffer; it has no lifecycle beyond a
/// single encode/decode call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilamentRecord {
    /// Vendor SKU, up to 20 encoded bytes
    pub sku: String,
    /// Brand name, up to 20 encoded bytes
    pub brand: String,
    /// Material name (e.g. "PLA"), up to 20 encoded bytes
    pub material: String,
    /// Swatch color
    pub color: Color,
    /// Extruder temperature range, °C
    pub print_temp_min: u16,
    /// Extruder temperature range, °C
    pub print_temp_max: u16,
    /// Bed temperature range, °C
    pub bed_temp_min: u16,
    /// Bed temperature range, °C
    pub bed_temp_max: u16,
    /// Filament diameter
    pub diameter: Diameter,
    /// Net filament weight in grams; must fit the 16-bit tag field at
    /// encode time
    pub weight_grams: u32,
}

impl FilamentRecord {
    /// Build a record pre-filled with the preset temperature ranges for
    /// a known material, 1.75 mm diameter and a 1 kg spool.
    pub fn with_material_defaults(
        sku: impl Into<String>,
        brand: impl Into<String>,
        material: Material,
        color: Color,
    ) -> Self {
        let (print_temp_min, print_temp_max) = material.default_print_temps();
        let (bed_temp_min, bed_temp_max) = material.default_bed_temps();
        Self {
            sku: sku.into(),
            brand: brand.into(),
            material: material.to_string(),
            color,
            print_temp_min,
            print_temp_max,
            bed_temp_min,
            bed_temp_max,
            diameter: Diameter::STANDARD,
            weight_grams: 1000,
        }
    }
}

/// Spool length (metres) to weight (grams) lookup, largest first.
/// 330 m of 1.75 mm PLA is the common 1 kg spool.
const SPOOL_TABLE: [(f64, u32); 5] = [
    (330.0, 1000),
    (165.0, 500),
    (82.5, 250),
    (66.0, 200),
    (33.0, 100),
];

/// Convert a spool length in metres to the nearest standard weight in
/// grams, falling back to a proportional conversion for off-table
/// lengths.
pub fn weight_for_length(length_m: f64) -> u32 {
    for &(len, weight) in &SPOOL_TABLE {
        if length_m >= len {
            return weight;
        }
    }
    (length_m * (1000.0 / 330.0)).round().max(0.0) as u32
}

/// Inverse of [`weight_for_length`]: nominal spool length in metres for
/// a given weight in grams.
pub fn length_for_weight(grams: u32) -> f64 {
    f64::from(grams) * (330.0 / 1000.0)
}
