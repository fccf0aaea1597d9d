use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("unsupported sheet size: {0}")]
    InvalidSheetSize(String),
    #[error(
        "degenerate geometry on {sheet_name} sheet: usable side {usable_in:.3}\" \
         (cell {cell_size_in}\", margin {outer_margin_in}\", gap {cell_gap_in}\")"
    )]
    DegenerateGeometry {
        sheet_name: String,
        usable_in: f32,
        cell_size_in: f32,
        outer_margin_in: f32,
        cell_gap_in: f32,
    },
    #[error(
        "no viable layout on {sheet_name} sheet for aspect ratio {aspect_ratio:.3} \
         (minimum sticker size {min_sticker_in}\")"
    )]
    NoViableOption {
        sheet_name: String,
        aspect_ratio: f32,
        min_sticker_in: f32,
    },
    #[error("sticker dimensions unknown: {width_px}x{height_px}px")]
    UnknownStickerDimensions { width_px: u32, height_px: u32 },
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "raster")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Supported physical sheet sizes
///
/// The named sizes are the ones the print pipeline is configured for.
/// `Custom` exists for callers that own their sheet stock; it can only be
/// constructed explicitly, never parsed from user input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetSize {
    /// 3" x 3" sheet
    ThreeByThree,
    /// 4" x 4" sheet
    FourByFour,
    /// 5.5" x 5.5" sheet
    FiveHalfByFiveHalf,
    Custom { width_in: f32, height_in: f32 },
}

impl SheetSize {
    /// Physical dimensions in inches as (width, height).
    ///
    /// The named sizes happen to be square; nothing downstream may rely
    /// on width == height.
    pub fn dimensions_in(self) -> (f32, f32) {
        match self {
            SheetSize::ThreeByThree => (3.0, 3.0),
            SheetSize::FourByFour => (4.0, 4.0),
            SheetSize::FiveHalfByFiveHalf => (5.5, 5.5),
            SheetSize::Custom { width_in, height_in } => (width_in, height_in),
        }
    }

    pub fn name(&self) -> String {
        match self {
            SheetSize::ThreeByThree => "3x3".to_string(),
            SheetSize::FourByFour => "4x4".to_string(),
            SheetSize::FiveHalfByFiveHalf => "5.5x5.5".to_string(),
            SheetSize::Custom { width_in, height_in } => {
                format!("{}x{}", width_in, height_in)
            }
        }
    }
}

impl fmt::Display for SheetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for SheetSize {
    type Err = LayoutError;

    /// Only the named sizes parse; anything else is an error, never a
    /// silent default.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "3x3" => Ok(SheetSize::ThreeByThree),
            "4x4" => Ok(SheetSize::FourByFour),
            "5.5x5.5" => Ok(SheetSize::FiveHalfByFiveHalf),
            other => Err(LayoutError::InvalidSheetSize(other.to_string())),
        }
    }
}

/// Pixel dimensions of the source artwork, resolved once per layout request.
///
/// The aspect ratio is derived at construction and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StickerDimensions {
    pub width_px: u32,
    pub height_px: u32,
    /// width_px / height_px
    pub aspect_ratio: f32,
}

impl StickerDimensions {
    /// Derive dimensions from decoded artwork pixels.
    ///
    /// A zero dimension means the collaborator never resolved the image;
    /// guessing an aspect ratio here is not allowed.
    pub fn from_pixels(width_px: u32, height_px: u32) -> Result<Self> {
        if width_px == 0 || height_px == 0 {
            return Err(LayoutError::UnknownStickerDimensions {
                width_px,
                height_px,
            });
        }
        Ok(Self {
            width_px,
            height_px,
            aspect_ratio: width_px as f32 / height_px as f32,
        })
    }
}
