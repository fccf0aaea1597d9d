//! Sheet layout engine for kiss-cut sticker printing.
//!
//! Turns one sticker image's dimensions plus a physical sheet size into
//! placements, cut-line geometry, and a serializable manifest at an
//! explicit print DPI. Compositing pixels into the final raster sheet is
//! behind the [`SheetCompositor`] seam; everything else here is pure
//! arithmetic.

pub mod composite;
pub mod cutline;
pub mod layout;
mod manifest;
mod options;
mod types;
mod units;

pub use composite::SheetCompositor;
#[cfg(feature = "raster")]
pub use composite::RasterCompositor;
pub use cutline::{rounded_rect_path, sheet_cutline_svg};
pub use layout::{
    calculate_dynamic_layout, calculate_fixed_grid, placements_for_grid, placements_for_option,
    DynamicSheetLayout, LayoutOption, Placement, PxRect, SheetConfig,
};
pub use manifest::{
    build_dynamic_manifest, build_grid_manifest, ManifestParameters, SheetManifest, SourceInfo,
};
pub use options::{DynamicOptions, GridOptions};
pub use types::{LayoutError, Result, SheetSize, StickerDimensions};
pub use units::{to_inches, to_pixels, usable_length_in, DEFAULT_DPI};
