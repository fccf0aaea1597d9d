//! Layout data types
//!
//! These types carry the results of the grid calculators through placement
//! generation to the manifest. Everything is computed fresh per request and
//! never mutated afterwards.

use crate::types::{SheetSize, StickerDimensions};

/// A rectangle in sheet pixel space.
///
/// The origin is the sheet's top-left corner; y grows downward, matching
/// raster coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PxRect {
    /// X position (left edge)
    pub x_px: i64,
    /// Y position (top edge)
    pub y_px: i64,
    pub width_px: i64,
    pub height_px: i64,
}

impl PxRect {
    pub fn new(x_px: i64, y_px: i64, width_px: i64, height_px: i64) -> Self {
        Self {
            x_px,
            y_px,
            width_px,
            height_px,
        }
    }

    /// Right edge x coordinate
    pub fn right_px(&self) -> i64 {
        self.x_px + self.width_px
    }

    /// Bottom edge y coordinate
    pub fn bottom_px(&self) -> i64 {
        self.y_px + self.height_px
    }

    /// Shrink the rectangle by `d` pixels on every side.
    pub fn inset(&self, d: i64) -> Self {
        Self {
            x_px: self.x_px + d,
            y_px: self.y_px + d,
            width_px: self.width_px - 2 * d,
            height_px: self.height_px - 2 * d,
        }
    }

    /// Grow the rectangle by `d` pixels on every side.
    pub fn outset(&self, d: i64) -> Self {
        self.inset(-d)
    }

    /// True when the two rectangles share any interior area.
    pub fn intersects(&self, other: &PxRect) -> bool {
        self.x_px < other.right_px()
            && other.x_px < self.right_px()
            && self.y_px < other.bottom_px()
            && other.y_px < self.bottom_px()
    }

    /// True when `other` lies entirely within this rectangle.
    pub fn contains(&self, other: &PxRect) -> bool {
        other.x_px >= self.x_px
            && other.y_px >= self.y_px
            && other.right_px() <= self.right_px()
            && other.bottom_px() <= self.bottom_px()
    }
}

/// Result of the fixed-grid calculation: a symmetric N x N grid of square
/// cells on one sheet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetConfig {
    pub sheet_size: SheetSize,
    pub sheet_width_in: f32,
    pub sheet_height_in: f32,
    pub sheet_width_px: i64,
    pub sheet_height_px: i64,
    /// Cells along the limiting axis; the grid is cells_per_side squared
    pub cells_per_side: u32,
    pub total_minis: u32,
    pub cell_px: i64,
    pub gap_px: i64,
    pub outer_margin_px: i64,
    pub dpi: f32,
}

/// One candidate count/size configuration from the aspect-aware calculator.
///
/// Options are alternatives, not a sequence; each one independently chose
/// the largest per-copy size for its count.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutOption {
    pub count: u32,
    pub cols: u32,
    pub rows: u32,
    pub sticker_width_in: f32,
    pub sticker_height_in: f32,
    pub sticker_width_px: i64,
    pub sticker_height_px: i64,
    pub display_name: String,
    pub description: String,
}

/// The aspect-aware calculator's full answer for one sheet size.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicSheetLayout {
    pub sheet_size: SheetSize,
    pub sticker: StickerDimensions,
    /// Never empty; construction fails with NoViableOption instead
    pub options: Vec<LayoutOption>,
    /// Index into `options`, so the recommendation is a member by
    /// construction
    pub recommended: usize,
}

impl DynamicSheetLayout {
    pub fn recommended_option(&self) -> &LayoutOption {
        &self.options[self.recommended]
    }
}

/// One physical cell on the sheet, ready for compositing and cutting.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Row index (0 = top row)
    pub row: u32,
    /// Column index (0 = leftmost column)
    pub col: u32,
    /// Full cell rectangle
    pub cell: PxRect,
    /// Artwork bounding box: the cell inset by the white border
    pub art_bbox: PxRect,
    /// Kiss-cut path around this cell, in sheet coordinates
    pub cutline_path: String,
}
