//! Fixed-grid layout calculation
//!
//! Computes a symmetric N x N grid of uniform square cells that maximizes
//! how many whole cells fit in the sheet's usable area.

use log::debug;

use crate::options::GridOptions;
use crate::types::{LayoutError, Result};
use crate::units::{to_pixels, usable_length_in};

use super::SheetConfig;

/// Calculate the fixed grid for the given options.
///
/// N cells need only N-1 internal gaps, which is why one gap is added to
/// the usable length before dividing:
///
/// `cells_per_side = floor((usable + gap) / (cell + gap))`
///
/// The limiting axis is the sheet's shorter side; the grid is square, so
/// the longer side can only be more permissive.
///
/// # Errors
/// [`LayoutError::DegenerateGeometry`] when the margins leave no usable
/// area or the cell/gap combination fits no cells at all. A zero-cell
/// configuration is a caller input error, never an empty-but-valid sheet.
pub fn calculate_fixed_grid(options: &GridOptions) -> Result<SheetConfig> {
    options.validate()?;

    let (sheet_width_in, sheet_height_in) = options.sheet_size.dimensions_in();
    let limit_in = sheet_width_in.min(sheet_height_in);
    let usable_in = usable_length_in(limit_in, options.outer_margin_in);

    let degenerate = || LayoutError::DegenerateGeometry {
        sheet_name: options.sheet_size.name(),
        usable_in,
        cell_size_in: options.cell_size_in,
        outer_margin_in: options.outer_margin_in,
        cell_gap_in: options.cell_gap_in,
    };

    if usable_in <= 0.0 {
        return Err(degenerate());
    }

    let cells = ((usable_in + options.cell_gap_in)
        / (options.cell_size_in + options.cell_gap_in))
        .floor();
    if cells < 1.0 {
        return Err(degenerate());
    }

    let cells_per_side = cells as u32;
    let config = SheetConfig {
        sheet_size: options.sheet_size,
        sheet_width_in,
        sheet_height_in,
        sheet_width_px: to_pixels(sheet_width_in, options.dpi),
        sheet_height_px: to_pixels(sheet_height_in, options.dpi),
        cells_per_side,
        total_minis: cells_per_side * cells_per_side,
        cell_px: to_pixels(options.cell_size_in, options.dpi),
        gap_px: to_pixels(options.cell_gap_in, options.dpi),
        outer_margin_px: to_pixels(options.outer_margin_in, options.dpi),
        dpi: options.dpi,
    };

    debug!(
        "fixed grid on {}: {}x{} cells of {}px at {}dpi",
        config.sheet_size,
        cells_per_side,
        cells_per_side,
        config.cell_px,
        config.dpi
    );

    Ok(config)
}

// =============================================================================
// Tests
// =============================================================================
