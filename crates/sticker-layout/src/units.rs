//! Unit and DPI conversion
//!
//! This module centralizes every inch/pixel conversion used by the layout
//! calculators. All rounding happens here, after the unit conversion, so
//! accumulated rounding error stays within one pixel per dimension.

/// Print resolution used when the caller does not specify one.
///
/// 300 DPI is the resolution the print vendor rasterizes at. There is no
/// implicit 72 or 96 DPI anywhere in the pipeline; every manifest carries
/// its DPI explicitly.
pub const DEFAULT_DPI: f32 = 300.0;

/// Convert a physical length in inches to pixels at the given DPI,
/// rounded to the nearest pixel.
#[inline]
pub fn to_pixels(value_in: f32, dpi: f32) -> i64 {
    (value_in * dpi).round() as i64
}

/// Convert a pixel length back to inches at the given DPI.
#[inline]
pub fn to_inches(value_px: i64, dpi: f32) -> f32 {
    value_px as f32 / dpi
}

/// Usable length of a sheet side after subtracting the outer margin on
/// both ends.
///
/// The result can be zero or negative when the margins exceed half the
/// sheet; callers must treat that as "no cells fit", never as a negative
/// cell count.
#[inline]
pub fn usable_length_in(sheet_length_in: f32, outer_margin_in: f32) -> f32 {
    sheet_length_in - 2.0 * outer_margin_in
}

// =============================================================================
// Tests
// =============================================================================
