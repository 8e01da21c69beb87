// spooltag-rs/spooltag/src/record/material.rs

use std::fmt;
use std::str::FromStr;

/// Known filament material families and their preset print parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Material {
    Pla,
    Abs,
    Petg,
    Tpu,
    Wood,
    Metal,
    CarbonFiber,
    GlowInTheDark,
    WaterSoluble,
    Other,
}

impl Material {
    /// All known materials, in menu order.
    pub const ALL: [Material; 10] = [
        Material::Pla,
        Material::Abs,
        Material::Petg,
        Material::Tpu,
        Material::Wood,
        Material::Metal,
        Material::CarbonFiber,
        Material::GlowInTheDark,
        Material::WaterSoluble,
        Material::Other,
    ];

    /// Display name as stored in the tag's material field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Material::Pla => "PLA",
            Material::Abs => "ABS",
            Material::Petg => "PETG",
            Material::Tpu => "TPU",
            Material::Wood => "Wood",
            Material::Metal => "Metal",
            Material::CarbonFiber => "Carbon Fiber",
            Material::GlowInTheDark => "Glow in the Dark",
            Material::WaterSoluble => "Water Soluble",
            Material::Other => "Other",
        }
    }

    /// Preset extruder temperature range (min, max) in °C.
    pub const fn default_print_temps(&self) -> (u16, u16) {
        match self {
            Material::Pla => (180, 200),
            Material::Abs => (220, 240),
            Material::Petg => (210, 230),
            Material::Tpu => (200, 220),
            Material::Wood => (180, 200),
            Material::Metal => (190, 210),
            Material::CarbonFiber => (230, 250),
            Material::GlowInTheDark => (180, 200),
            Material::WaterSoluble => (180, 200),
            Material::Other => (180, 200),
        }
    }

    /// Preset bed temperature range (min, max) in °C.
    pub const fn default_bed_temps(&self) -> (u16, u16) {
        match self {
            Material::Pla => (50, 60),
            Material::Abs => (80, 80),
            Material::Petg => (70, 70),
            Material::Tpu => (50, 50),
            Material::Wood => (60, 60),
            Material::Metal => (60, 60),
            Material::CarbonFiber => (80, 80),
            Material::GlowInTheDark => (60, 60),
            Material::WaterSoluble => (60, 60),
            Material::Other => (60, 60),
        }
    }

    /// Preset part-cooling fan speed in percent.
    pub const fn default_fan_speed(&self) -> u8 {
        match self {
            Material::Pla => 100,
            Material::Abs => 0,
            Material::Petg => 50,
            Material::Tpu => 30,
            Material::Wood => 100,
            Material::Metal => 80,
            Material::CarbonFiber => 50,
            Material::GlowInTheDark => 100,
            Material::WaterSoluble => 100,
            Material::Other => 50,
        }
    }

    /// Preset print speed in mm/s.
    pub const fn default_print_speed(&self) -> u16 {
        match self {
            Material::Pla => 60,
            Material::Abs => 50,
            Material::Petg => 50,
            Material::Tpu => 25,
            Material::Wood => 40,
            Material::Metal => 45,
            Material::CarbonFiber => 40,
            Material::GlowInTheDark => 50,
            Material::WaterSoluble => 40,
            Material::Other => 50,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Material {
    type Err = ();

    /// Case-insensitive lookup by display name; unknown names map to
    /// `Other` only on exact match, otherwise err.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Material::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}
