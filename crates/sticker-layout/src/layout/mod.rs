//! Layout calculation
//!
//! The two grid calculators (fixed and aspect-aware) plus placement
//! generation. Everything here is a pure function of its inputs.

mod dynamic;
mod grid;
mod placement;
mod types;

pub use dynamic::calculate_dynamic_layout;
pub use grid::calculate_fixed_grid;
pub use placement::{placements_for_grid, placements_for_option};
pub use types::{DynamicSheetLayout, LayoutOption, Placement, PxRect, SheetConfig};
