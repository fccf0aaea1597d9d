//! Sheet manifest assembly
//!
//! The manifest is the one artifact that crosses the engine's boundary: it
//! records the DPI, sheet geometry, the exact parameters that produced the
//! layout, every placement, and the concatenated cut-line SVG. A separate
//! compositor pairs it with the rasterized sheet for fulfillment.

use crate::cutline::sheet_cutline_svg;
use crate::layout::{
    calculate_fixed_grid, placements_for_grid, placements_for_option, LayoutOption, Placement,
};
use crate::options::{DynamicOptions, GridOptions};
use crate::types::{Result, SheetSize};
use crate::units::to_pixels;

/// Provenance of the source artwork.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceInfo {
    pub width_px: u32,
    pub height_px: u32,
    /// Whether the background was already removed upstream
    pub background_removed: bool,
}

/// The layout parameters a manifest was produced with, kept for
/// reproducibility and audit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ManifestParameters {
    pub cell_width_in: f32,
    pub cell_height_in: f32,
    pub outer_margin_in: f32,
    pub cell_gap_in: f32,
    pub white_border_in: f32,
    pub bleed_in: f32,
    pub corner_radius_ratio: f32,
}

/// One print-ready sheet: geometry, placements, and the cut-line document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetManifest {
    pub sheet_name: String,
    /// Always explicit; nothing downstream may assume 72 or 96 DPI
    pub dpi: f32,
    pub sheet_width_in: f32,
    pub sheet_height_in: f32,
    pub sheet_width_px: i64,
    pub sheet_height_px: i64,
    pub cols: u32,
    pub rows: u32,
    /// Set on the fixed-grid path, where cols == rows by construction
    pub cells_per_side: Option<u32>,
    pub total_stickers: u32,
    pub parameters: ManifestParameters,
    pub placements: Vec<Placement>,
    /// All cut lines concatenated into one sheet-scoped SVG document
    pub cutline_svg: String,
    pub source: Option<SourceInfo>,
}

/// Build the manifest for a fixed uniform grid.
pub fn build_grid_manifest(
    options: &GridOptions,
    source: Option<SourceInfo>,
) -> Result<SheetManifest> {
    let config = calculate_fixed_grid(options)?;
    let placements = placements_for_grid(&config, options)?;
    let cutline_svg = sheet_cutline_svg(config.sheet_width_px, config.sheet_height_px, &placements);

    Ok(SheetManifest {
        sheet_name: config.sheet_size.name(),
        dpi: config.dpi,
        sheet_width_in: config.sheet_width_in,
        sheet_height_in: config.sheet_height_in,
        sheet_width_px: config.sheet_width_px,
        sheet_height_px: config.sheet_height_px,
        cols: config.cells_per_side,
        rows: config.cells_per_side,
        cells_per_side: Some(config.cells_per_side),
        total_stickers: config.total_minis,
        parameters: ManifestParameters {
            cell_width_in: options.cell_size_in,
            cell_height_in: options.cell_size_in,
            outer_margin_in: options.outer_margin_in,
            cell_gap_in: options.cell_gap_in,
            white_border_in: options.white_border_in,
            bleed_in: options.bleed_in,
            corner_radius_ratio: options.corner_radius_ratio,
        },
        placements,
        cutline_svg,
        source,
    })
}

/// Build the manifest for one option chosen from the dynamic menu.
pub fn build_dynamic_manifest(
    sheet_size: SheetSize,
    option: &LayoutOption,
    options: &DynamicOptions,
    source: Option<SourceInfo>,
) -> Result<SheetManifest> {
    options.validate()?;
    let (sheet_width_in, sheet_height_in) = sheet_size.dimensions_in();
    let sheet_width_px = to_pixels(sheet_width_in, options.dpi);
    let sheet_height_px = to_pixels(sheet_height_in, options.dpi);
    let placements = placements_for_option(option, options)?;
    let cutline_svg = sheet_cutline_svg(sheet_width_px, sheet_height_px, &placements);

    Ok(SheetManifest {
        sheet_name: sheet_size.name(),
        dpi: options.dpi,
        sheet_width_in,
        sheet_height_in,
        sheet_width_px,
        sheet_height_px,
        cols: option.cols,
        rows: option.rows,
        cells_per_side: None,
        total_stickers: option.count,
        parameters: ManifestParameters {
            cell_width_in: option.sticker_width_in,
            cell_height_in: option.sticker_height_in,
            outer_margin_in: options.outer_margin_in,
            cell_gap_in: options.cell_gap_in,
            white_border_in: options.white_border_in,
            bleed_in: options.bleed_in,
            corner_radius_ratio: options.corner_radius_ratio,
        },
        placements,
        cutline_svg,
        source,
    })
}

#[cfg(feature = "serde")]
impl SheetManifest {
    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            crate::types::LayoutError::Config(format!("Failed to serialize manifest: {}", e))
        })
    }

    /// Save the manifest to a JSON file.
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        tokio::fs::write(path, self.to_json()?).await?;
        Ok(())
    }

    /// Load a manifest from a JSON file.
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            crate::types::LayoutError::Config(format!("Failed to parse manifest: {}", e))
        })
    }
}
