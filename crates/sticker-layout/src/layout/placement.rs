//! Placement generation
//!
//! Turns a chosen grid into per-cell pixel rectangles, artwork bounding
//! boxes, and kiss-cut paths. The grid is laid out left- and top-aligned
//! from the outer margin; when it under-fills the usable area (the fixed
//! grid can, by construction) the compositor centers it explicitly.

use crate::cutline::rounded_rect_path;
use crate::options::{DynamicOptions, GridOptions};
use crate::types::{LayoutError, Result};
use crate::units::to_pixels;

use super::{LayoutOption, Placement, PxRect, SheetConfig};

struct CellGrid {
    cols: u32,
    rows: u32,
    cell_width_px: i64,
    cell_height_px: i64,
    gap_px: i64,
    outer_margin_px: i64,
    white_border_px: i64,
    /// White border plus bleed; the cut line sits this far outside the cell
    cut_offset_px: i64,
    corner_radius_ratio: f32,
}

fn generate(grid: &CellGrid) -> Result<Vec<Placement>> {
    if 2 * grid.white_border_px >= grid.cell_width_px.min(grid.cell_height_px) {
        return Err(LayoutError::Config(format!(
            "white border of {}px leaves no artwork in a {}x{}px cell",
            grid.white_border_px, grid.cell_width_px, grid.cell_height_px
        )));
    }

    let mut placements = Vec::with_capacity((grid.cols * grid.rows) as usize);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let cell = PxRect::new(
                grid.outer_margin_px + col as i64 * (grid.cell_width_px + grid.gap_px),
                grid.outer_margin_px + row as i64 * (grid.cell_height_px + grid.gap_px),
                grid.cell_width_px,
                grid.cell_height_px,
            );
            let cutline = cell.outset(grid.cut_offset_px);
            placements.push(Placement {
                row,
                col,
                cell,
                art_bbox: cell.inset(grid.white_border_px),
                cutline_path: rounded_rect_path(&cutline, grid.corner_radius_ratio),
            });
        }
    }
    Ok(placements)
}

/// Placements for a fixed-grid configuration.
pub fn placements_for_grid(config: &SheetConfig, options: &GridOptions) -> Result<Vec<Placement>> {
    generate(&CellGrid {
        cols: config.cells_per_side,
        rows: config.cells_per_side,
        cell_width_px: config.cell_px,
        cell_height_px: config.cell_px,
        gap_px: config.gap_px,
        outer_margin_px: config.outer_margin_px,
        white_border_px: to_pixels(options.white_border_in, options.dpi),
        cut_offset_px: to_pixels(options.white_border_in + options.bleed_in, options.dpi),
        corner_radius_ratio: options.corner_radius_ratio,
    })
}

/// Placements for one option chosen from the dynamic menu.
pub fn placements_for_option(
    option: &LayoutOption,
    options: &DynamicOptions,
) -> Result<Vec<Placement>> {
    generate(&CellGrid {
        cols: option.cols,
        rows: option.rows,
        cell_width_px: option.sticker_width_px,
        cell_height_px: option.sticker_height_px,
        gap_px: to_pixels(options.cell_gap_in, options.dpi),
        outer_margin_px: to_pixels(options.outer_margin_in, options.dpi),
        white_border_px: to_pixels(options.white_border_in, options.dpi),
        cut_offset_px: to_pixels(options.white_border_in + options.bleed_in, options.dpi),
        corner_radius_ratio: options.corner_radius_ratio,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::calculate_fixed_grid;

    fn default_placements() -> (SheetConfig, Vec<Placement>) {
        let options = GridOptions::default();
        let config = calculate_fixed_grid(&options).unwrap();
        let placements = placements_for_grid(&config, &options).unwrap();
        (config, placements)
    }

    #[test]
    fn test_grid_coordinates() {
        let (config, placements) = default_placements();
        assert_eq!(placements.len(), 64);

        // Row-major iteration, top-left first
        let first = &placements[0];
        assert_eq!((first.row, first.col), (0, 0));
        assert_eq!(first.cell.x_px, config.outer_margin_px);
        assert_eq!(first.cell.y_px, config.outer_margin_px);

        let second = &placements[1];
        assert_eq!((second.row, second.col), (0, 1));
        assert_eq!(
            second.cell.x_px,
            config.outer_margin_px + config.cell_px + config.gap_px
        );
        assert_eq!(second.cell.y_px, config.outer_margin_px);
    }

    #[test]
    fn test_no_two_cells_overlap() {
        let (_, placements) = default_placements();
        for (i, a) in placements.iter().enumerate() {
            for b in placements.iter().skip(i + 1) {
                assert!(
                    !a.cell.intersects(&b.cell),
                    "cells ({},{}) and ({},{}) overlap",
                    a.row,
                    a.col,
                    b.row,
                    b.col
                );
            }
        }
    }

    #[test]
    fn test_cells_inside_sheet() {
        let (config, placements) = default_placements();
        let sheet = PxRect::new(0, 0, config.sheet_width_px, config.sheet_height_px);
        // Rounding the margin independently can cost up to one pixel per
        // side against the exact margin inset, so the strict bound is the
        // sheet and the margin bound gets a one-pixel allowance.
        let usable = PxRect::new(
            config.outer_margin_px,
            config.outer_margin_px,
            config.sheet_width_px - 2 * config.outer_margin_px,
            config.sheet_height_px - 2 * config.outer_margin_px,
        )
        .outset(1);
        for p in &placements {
            assert!(sheet.contains(&p.cell));
            assert!(usable.contains(&p.cell));
        }
    }

    #[test]
    fn test_art_bbox_inset_by_border() {
        let options = GridOptions {
            cell_size_in: 1.0,
            white_border_in: 0.1,
            ..Default::default()
        };
        let config = calculate_fixed_grid(&options).unwrap();
        let placements = placements_for_grid(&config, &options).unwrap();

        let border_px = to_pixels(0.1, options.dpi);
        assert_eq!(border_px, 30);
        for p in &placements {
            assert_eq!(p.art_bbox.x_px, p.cell.x_px + border_px);
            assert_eq!(p.art_bbox.y_px, p.cell.y_px + border_px);
            assert_eq!(p.art_bbox.width_px, p.cell.width_px - 2 * border_px);
            assert_eq!(p.art_bbox.height_px, p.cell.height_px - 2 * border_px);
            assert!(p.cell.contains(&p.art_bbox));
        }
    }

    #[test]
    fn test_border_swallowing_cell_rejected() {
        let options = GridOptions::default();
        let config = calculate_fixed_grid(&options).unwrap();
        let bad = GridOptions {
            white_border_in: 0.125,
            ..options
        };
        // 0.125" border on a 0.25" cell leaves nothing
        assert!(placements_for_grid(&config, &bad).is_err());
    }
}
