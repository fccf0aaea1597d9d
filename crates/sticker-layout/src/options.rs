use crate::types::*;
use crate::units::DEFAULT_DPI;

/// Configuration for the fixed-grid layout path.
///
/// Every length is in inches; the single DPI here is the one used for all
/// pixel conversions downstream.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOptions {
    pub sheet_size: SheetSize,
    /// Side length of each (square) cell
    pub cell_size_in: f32,
    /// Outer margin on every side of the sheet
    pub outer_margin_in: f32,
    /// Gap between adjacent cells
    pub cell_gap_in: f32,
    /// Blank border left inside each cell around the artwork
    pub white_border_in: f32,
    /// Extra artwork area outside the intended cut, for cutter misalignment
    pub bleed_in: f32,
    pub dpi: f32,
    /// Cut-line corner radius as a fraction of the cut rectangle's shorter
    /// side. TODO: confirm with the print vendor whether they require a
    /// fixed physical radius instead of a proportional one.
    pub corner_radius_ratio: f32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            sheet_size: SheetSize::FourByFour,
            cell_size_in: 0.25,
            outer_margin_in: 0.125,
            cell_gap_in: 0.25,
            white_border_in: 0.0,
            bleed_in: 0.0,
            dpi: DEFAULT_DPI,
            corner_radius_ratio: 0.1,
        }
    }
}

impl GridOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        validate_common(
            self.outer_margin_in,
            self.cell_gap_in,
            self.white_border_in,
            self.bleed_in,
            self.dpi,
            self.corner_radius_ratio,
        )?;
        if !self.cell_size_in.is_finite() || self.cell_size_in <= 0.0 {
            return Err(LayoutError::Config(format!(
                "cell size must be positive, got {}",
                self.cell_size_in
            )));
        }
        if 2.0 * self.white_border_in >= self.cell_size_in {
            return Err(LayoutError::Config(format!(
                "white border {}\" leaves no artwork area in a {}\" cell",
                self.white_border_in, self.cell_size_in
            )));
        }
        Ok(())
    }

    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options: Self = serde_json::from_slice(&bytes)
            .map_err(|e| LayoutError::Config(format!("Failed to parse options: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize options: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

/// Configuration for the aspect-aware (dynamic) layout path.
///
/// No cell size here: each count option solves for its own largest cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicOptions {
    pub outer_margin_in: f32,
    pub cell_gap_in: f32,
    pub white_border_in: f32,
    pub bleed_in: f32,
    pub dpi: f32,
    pub corner_radius_ratio: f32,
    /// Smallest sticker dimension still considered legible; count options
    /// below it are discarded
    pub min_sticker_in: f32,
    /// Fraction of the usable area the recommended option should cover
    pub target_coverage: f32,
}

impl Default for DynamicOptions {
    fn default() -> Self {
        Self {
            outer_margin_in: 0.125,
            cell_gap_in: 0.25,
            white_border_in: 0.0,
            bleed_in: 0.0,
            dpi: DEFAULT_DPI,
            corner_radius_ratio: 0.1,
            min_sticker_in: 0.5,
            target_coverage: 0.5,
        }
    }
}

impl DynamicOptions {
    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        validate_common(
            self.outer_margin_in,
            self.cell_gap_in,
            self.white_border_in,
            self.bleed_in,
            self.dpi,
            self.corner_radius_ratio,
        )?;
        if !self.min_sticker_in.is_finite() || self.min_sticker_in <= 0.0 {
            return Err(LayoutError::Config(format!(
                "minimum sticker size must be positive, got {}",
                self.min_sticker_in
            )));
        }
        if !self.target_coverage.is_finite()
            || self.target_coverage <= 0.0
            || self.target_coverage > 1.0
        {
            return Err(LayoutError::Config(format!(
                "target coverage must be in (0, 1], got {}",
                self.target_coverage
            )));
        }
        Ok(())
    }
}

fn validate_common(
    outer_margin_in: f32,
    cell_gap_in: f32,
    white_border_in: f32,
    bleed_in: f32,
    dpi: f32,
    corner_radius_ratio: f32,
) -> Result<()> {
    for (name, value) in [
        ("outer margin", outer_margin_in),
        ("cell gap", cell_gap_in),
        ("white border", white_border_in),
        ("bleed", bleed_in),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(LayoutError::Config(format!(
                "{} must be non-negative, got {}",
                name, value
            )));
        }
    }
    if !dpi.is_finite() || dpi <= 0.0 {
        return Err(LayoutError::Config(format!(
            "dpi must be positive, got {}",
            dpi
        )));
    }
    if !corner_radius_ratio.is_finite() || !(0.0..=0.5).contains(&corner_radius_ratio) {
        return Err(LayoutError::Config(format!(
            "corner radius ratio must be in [0, 0.5], got {}",
            corner_radius_ratio
        )));
    }
    Ok(())
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;
    use serde::{Deserialize, Serialize};

    // SheetSize carries data in its Custom variant, so it gets a manual
    // implementation: named sizes as strings, Custom as a map.
    impl Serialize for SheetSize {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            use serde::ser::SerializeStruct;
            match self {
                SheetSize::ThreeByThree => serializer.serialize_str("3x3"),
                SheetSize::FourByFour => serializer.serialize_str("4x4"),
                SheetSize::FiveHalfByFiveHalf => serializer.serialize_str("5.5x5.5"),
                SheetSize::Custom { width_in, height_in } => {
                    let mut s = serializer.serialize_struct("Custom", 2)?;
                    s.serialize_field("width_in", width_in)?;
                    s.serialize_field("height_in", height_in)?;
                    s.end()
                }
            }
        }
    }

    impl<'de> Deserialize<'de> for SheetSize {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            use serde::de::{self, MapAccess, Visitor};
            use std::fmt;

            struct SheetSizeVisitor;

            impl<'de> Visitor<'de> for SheetSizeVisitor {
                type Value = SheetSize;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a sheet size")
                }

                fn visit_str<E>(self, value: &str) -> std::result::Result<SheetSize, E>
                where
                    E: de::Error,
                {
                    value.parse().map_err(|_| {
                        de::Error::unknown_variant(value, &["3x3", "4x4", "5.5x5.5", "Custom"])
                    })
                }

                fn visit_map<M>(self, mut map: M) -> std::result::Result<SheetSize, M::Error>
                where
                    M: MapAccess<'de>,
                {
                    let mut width_in = None;
                    let mut height_in = None;

                    while let Some(key) = map.next_key::<String>()? {
                        match key.as_str() {
                            "width_in" => width_in = Some(map.next_value()?),
                            "height_in" => height_in = Some(map.next_value()?),
                            _ => {
                                let _: serde::de::IgnoredAny = map.next_value()?;
                            }
                        }
                    }

                    match (width_in, height_in) {
                        (Some(w), Some(h)) => Ok(SheetSize::Custom {
                            width_in: w,
                            height_in: h,
                        }),
                        _ => Err(de::Error::missing_field("width_in or height_in")),
                    }
                }
            }

            deserializer.deserialize_any(SheetSizeVisitor)
        }
    }
}
