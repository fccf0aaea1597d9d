//! Aspect-aware layout calculation
//!
//! Generates a short menu of count options for a sheet, where each option
//! independently maximizes the per-copy size while preserving the sticker's
//! true aspect ratio, then recommends one option by a deterministic score.

use log::debug;

use crate::options::DynamicOptions;
use crate::types::{LayoutError, Result, SheetSize, StickerDimensions};
use crate::units::{to_pixels, usable_length_in};

use super::{DynamicSheetLayout, LayoutOption};

/// Counts offered on the menu, ascending. A single copy is not offered
/// (one sticker is not a sheet) but is still probed as the last resort
/// before declaring the sheet unviable.
const CANDIDATE_COUNTS: [u32; 10] = [2, 4, 6, 8, 9, 12, 16, 20, 25, 30];

/// Comparisons between floating-point scores treat differences below this
/// as ties, so the documented tie-break order is what actually decides.
const SCORE_EPS: f32 = 1e-6;

/// Penalty added to the recommendation score of odd counts; customers
/// overwhelmingly order even sheet counts.
const ODD_COUNT_PENALTY: f32 = 0.05;

/// Calculate the dynamic layout menu for one sheet size.
///
/// # Errors
/// - [`LayoutError::DegenerateGeometry`] when the margins alone exhaust
///   the sheet.
/// - [`LayoutError::NoViableOption`] when no candidate count (not even a
///   single copy) clears the minimum sticker size.
pub fn calculate_dynamic_layout(
    sheet_size: SheetSize,
    sticker: StickerDimensions,
    options: &DynamicOptions,
) -> Result<DynamicSheetLayout> {
    options.validate()?;

    let aspect = sticker.aspect_ratio;
    let (sheet_width_in, sheet_height_in) = sheet_size.dimensions_in();
    let usable_width_in = usable_length_in(sheet_width_in, options.outer_margin_in);
    let usable_height_in = usable_length_in(sheet_height_in, options.outer_margin_in);

    if usable_width_in <= 0.0 || usable_height_in <= 0.0 {
        return Err(LayoutError::DegenerateGeometry {
            sheet_name: sheet_size.name(),
            usable_in: usable_width_in.min(usable_height_in),
            cell_size_in: 0.0,
            outer_margin_in: options.outer_margin_in,
            cell_gap_in: options.cell_gap_in,
        });
    }

    let mut menu = Vec::new();
    for &count in &CANDIDATE_COUNTS {
        let (cols, rows) = best_factorization(count, aspect);
        if let Some(option) =
            solve_option(count, cols, rows, aspect, usable_width_in, usable_height_in, options)
        {
            menu.push(option);
        }
    }

    // If the whole menu failed, a lone copy is the last thing to try
    // before reporting the sheet unviable for this artwork.
    if menu.is_empty() {
        match solve_option(1, 1, 1, aspect, usable_width_in, usable_height_in, options) {
            Some(option) => menu.push(option),
            None => {
                return Err(LayoutError::NoViableOption {
                    sheet_name: sheet_size.name(),
                    aspect_ratio: aspect,
                    min_sticker_in: options.min_sticker_in,
                });
            }
        }
    }

    let recommended = recommend(&menu, usable_width_in * usable_height_in, options);
    debug!(
        "dynamic layout on {}: {} options, recommending {} copies",
        sheet_size,
        menu.len(),
        menu[recommended].count
    );

    Ok(DynamicSheetLayout {
        sheet_size,
        sticker,
        options: menu,
        recommended,
    })
}

// =============================================================================
// Factorization
// =============================================================================

/// Pick the (cols, rows) factorization of `count` whose cols/rows ratio is
/// closest to the sticker's aspect ratio, in log space so that 2:1 and 1:2
/// are equally far from square.
///
/// Tie-break order: squarer pair first (smaller |cols - rows|), then the
/// orientation matching the artwork (more columns for wide stickers, more
/// rows for tall ones).
fn best_factorization(count: u32, aspect: f32) -> (u32, u32) {
    let target = aspect.ln();
    let mut best: Option<(u32, u32, f32)> = None;

    for cols in 1..=count {
        if count % cols != 0 {
            continue;
        }
        let rows = count / cols;
        let score = ((cols as f32 / rows as f32).ln() - target).abs();

        let candidate_wins = match best {
            None => true,
            Some((best_cols, best_rows, best_score)) => {
                if score + SCORE_EPS < best_score {
                    true
                } else if (score - best_score).abs() > SCORE_EPS {
                    false
                } else {
                    let squareness = cols.abs_diff(rows);
                    let best_squareness = best_cols.abs_diff(best_rows);
                    if squareness != best_squareness {
                        squareness < best_squareness
                    } else if aspect >= 1.0 {
                        cols > best_cols
                    } else {
                        rows > best_rows
                    }
                }
            }
        };
        if candidate_wins {
            best = Some((cols, rows, score));
        }
    }

    // count >= 1 always has the (count, 1) factorization
    let (cols, rows, _) = best.unwrap_or((count, 1, 0.0));
    (cols, rows)
}

// =============================================================================
// Per-count solve
// =============================================================================

/// Solve for the largest per-copy size at which `cols x rows` copies tile
/// the usable area, preserving the aspect ratio. Returns None when the
/// count does not fit at the minimum legible size.
fn solve_option(
    count: u32,
    cols: u32,
    rows: u32,
    aspect: f32,
    usable_width_in: f32,
    usable_height_in: f32,
    options: &DynamicOptions,
) -> Option<LayoutOption> {
    let avail_width_in =
        (usable_width_in - (cols - 1) as f32 * options.cell_gap_in) / cols as f32;
    let avail_height_in =
        (usable_height_in - (rows - 1) as f32 * options.cell_gap_in) / rows as f32;
    if avail_width_in <= 0.0 || avail_height_in <= 0.0 {
        return None;
    }

    // The width constraint and the height constraint each cap the copy
    // size; the binding one wins.
    let sticker_width_in = avail_width_in.min(avail_height_in * aspect);
    let sticker_height_in = sticker_width_in / aspect;

    if sticker_width_in.min(sticker_height_in) < options.min_sticker_in {
        return None;
    }
    // The white border must leave visible artwork at this size
    if 2.0 * options.white_border_in >= sticker_width_in.min(sticker_height_in) {
        return None;
    }

    Some(LayoutOption {
        count,
        cols,
        rows,
        sticker_width_in,
        sticker_height_in,
        sticker_width_px: to_pixels(sticker_width_in, options.dpi),
        sticker_height_px: to_pixels(sticker_height_in, options.dpi),
        display_name: format!("{} stickers", count),
        description: format!(
            "{} x {} grid of {:.2}\" x {:.2}\" stickers",
            cols, rows, sticker_width_in, sticker_height_in
        ),
    })
}

// =============================================================================
// Recommendation
// =============================================================================

/// Score every option and return the index of the winner.
///
/// score = |coverage - target_coverage| + odd-count penalty, where
/// coverage is the fraction of the usable area the copies occupy. Lowest
/// score wins; ties go to the lower count (larger stickers), which works
/// out naturally because the menu is ascending and only a strictly better
/// score displaces the incumbent.
fn recommend(menu: &[LayoutOption], usable_area_sq_in: f32, options: &DynamicOptions) -> usize {
    let mut best_index = 0;
    let mut best_score = f32::INFINITY;

    for (index, option) in menu.iter().enumerate() {
        let coverage = option.count as f32
            * option.sticker_width_in
            * option.sticker_height_in
            / usable_area_sq_in;
        let mut score = (coverage - options.target_coverage).abs();
        if option.count % 2 == 1 {
            score += ODD_COUNT_PENALTY;
        }
        if score + SCORE_EPS < best_score {
            best_index = index;
            best_score = score;
        }
    }

    best_index
}

// =============================================================================
// Tests
// =============================================================================
