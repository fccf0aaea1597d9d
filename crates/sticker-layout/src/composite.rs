//! Compositing seam
//!
//! The layout engine only computes coordinates; drawing pixels belongs to
//! whichever rendering backend the caller has. [`SheetCompositor`] is that
//! seam: given a source image and a manifest full of placements, produce a
//! raster sheet. [`RasterCompositor`] is the in-process implementation on
//! top of the `image` crate.

use crate::manifest::SheetManifest;
use crate::types::Result;

/// Renders a manifest's placements against a source image.
///
/// Implementations must be pure with respect to the manifest: the same
/// source and manifest always produce the same output.
pub trait SheetCompositor {
    type Source;
    type Output;

    fn composite(&self, source: &Self::Source, manifest: &SheetManifest) -> Result<Self::Output>;
}

#[cfg(feature = "raster")]
pub use raster::RasterCompositor;

#[cfg(feature = "raster")]
mod raster {
    use std::collections::HashMap;

    use image::imageops::{self, FilterType};
    use image::{DynamicImage, Rgba, RgbaImage};

    use super::SheetCompositor;
    use crate::manifest::SheetManifest;
    use crate::types::{LayoutError, Result};

    /// CPU compositor backed by the `image` crate.
    pub struct RasterCompositor {
        /// Center an under-filled grid within the sheet instead of leaving
        /// it left/top-aligned as the placements describe
        pub center_grid: bool,
        /// Sheet background, default opaque white
        pub background: Rgba<u8>,
    }

    impl Default for RasterCompositor {
        fn default() -> Self {
            Self {
                center_grid: true,
                background: Rgba([255, 255, 255, 255]),
            }
        }
    }

    impl SheetCompositor for RasterCompositor {
        type Source = DynamicImage;
        type Output = RgbaImage;

        fn composite(&self, source: &DynamicImage, manifest: &SheetManifest) -> Result<RgbaImage> {
            if manifest.sheet_width_px <= 0 || manifest.sheet_height_px <= 0 {
                return Err(LayoutError::Config(format!(
                    "sheet pixel size {}x{} is not drawable",
                    manifest.sheet_width_px, manifest.sheet_height_px
                )));
            }

            let mut sheet = RgbaImage::from_pixel(
                manifest.sheet_width_px as u32,
                manifest.sheet_height_px as u32,
                self.background,
            );

            let (dx, dy) = if self.center_grid {
                centering_offset(manifest)
            } else {
                (0, 0)
            };

            // All placements in one layout share a size, but a cache keyed
            // on dimensions keeps this correct if that ever changes.
            let mut scaled: HashMap<(u32, u32), RgbaImage> = HashMap::new();
            for placement in &manifest.placements {
                let bbox = &placement.art_bbox;
                if bbox.width_px <= 0 || bbox.height_px <= 0 {
                    return Err(LayoutError::Config(format!(
                        "artwork box {}x{} at cell ({}, {}) is not drawable",
                        bbox.width_px, bbox.height_px, placement.row, placement.col
                    )));
                }
                let key = (bbox.width_px as u32, bbox.height_px as u32);
                let copy = scaled
                    .entry(key)
                    .or_insert_with(|| imageops::resize(source, key.0, key.1, FilterType::Lanczos3));
                imageops::overlay(&mut sheet, copy, bbox.x_px + dx, bbox.y_px + dy);
            }

            Ok(sheet)
        }
    }

    /// Offset that centers the placed grid on the sheet. Outer margins are
    /// uniform, so centering on the sheet also centers within the usable
    /// area.
    fn centering_offset(manifest: &SheetManifest) -> (i64, i64) {
        let min_x = manifest.placements.iter().map(|p| p.cell.x_px).min();
        let max_x = manifest.placements.iter().map(|p| p.cell.right_px()).max();
        let min_y = manifest.placements.iter().map(|p| p.cell.y_px).min();
        let max_y = manifest.placements.iter().map(|p| p.cell.bottom_px()).max();

        match (min_x, max_x, min_y, max_y) {
            (Some(min_x), Some(max_x), Some(min_y), Some(max_y)) => {
                let dx = (manifest.sheet_width_px - (max_x - min_x)) / 2 - min_x;
                let dy = (manifest.sheet_height_px - (max_y - min_y)) / 2 - min_y;
                (dx, dy)
            }
            _ => (0, 0),
        }
    }
}
