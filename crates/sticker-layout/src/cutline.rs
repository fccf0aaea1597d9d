//! Kiss-cut path generation
//!
//! Emits the SVG geometry the print vendor's cutter follows. The path
//! command sequence here is contractual, not cosmetic: one move, four
//! straight edges each followed by a quadrant quadratic Bezier corner,
//! then a close. Vendors diff these paths byte-for-byte between proofs,
//! so emission must stay deterministic.

use crate::layout::{Placement, PxRect};

/// Stroke color of the cut layer. Magenta is the de-facto kiss-cut
/// convention the vendor's preflight looks for.
const CUT_STROKE: &str = "#FF00FF";

/// Stroke width of the cut layer in pixels.
const CUT_STROKE_WIDTH_PX: f32 = 1.0;

/// Rounded rectangle path for one cut line.
///
/// The corner radius is `corner_radius_ratio` times the rectangle's
/// shorter side. Emitted as `M`, then four `L`+`Q` pairs walking
/// clockwise from the top edge, then `Z`.
pub fn rounded_rect_path(rect: &PxRect, corner_radius_ratio: f32) -> String {
    let x = rect.x_px as f32;
    let y = rect.y_px as f32;
    let w = rect.width_px as f32;
    let h = rect.height_px as f32;
    let r = w.min(h) * corner_radius_ratio;

    format!(
        "M {} {} \
         L {} {} Q {} {} {} {} \
         L {} {} Q {} {} {} {} \
         L {} {} Q {} {} {} {} \
         L {} {} Q {} {} {} {} \
         Z",
        // start of the top edge
        x + r,
        y,
        // top edge, then top-right corner
        x + w - r,
        y,
        x + w,
        y,
        x + w,
        y + r,
        // right edge, then bottom-right corner
        x + w,
        y + h - r,
        x + w,
        y + h,
        x + w - r,
        y + h,
        // bottom edge, then bottom-left corner
        x + r,
        y + h,
        x,
        y + h,
        x,
        y + h - r,
        // left edge, then top-left corner back to the start
        x,
        y + r,
        x,
        y,
        x + r,
        y,
    )
}

/// Concatenate every placement's cut line into one sheet-scoped SVG
/// document: fixed header, a single group carrying the stroke styling,
/// one path per placement.
pub fn sheet_cutline_svg(
    sheet_width_px: i64,
    sheet_height_px: i64,
    placements: &[Placement],
) -> String {
    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
        w = sheet_width_px,
        h = sheet_height_px
    ));
    svg.push_str(&format!(
        "  <g id=\"kiss-cut\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\">\n",
        CUT_STROKE, CUT_STROKE_WIDTH_PX
    ));
    for placement in placements {
        svg.push_str(&format!("    <path d=\"{}\"/>\n", placement.cutline_path));
    }
    svg.push_str("  </g>\n");
    svg.push_str("</svg>\n");
    svg
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_command_sequence() {
        let rect = PxRect::new(100, 200, 300, 300);
        let path = rounded_rect_path(&rect, 0.1);

        assert!(path.starts_with("M "));
        assert!(path.ends_with("Z"));
        assert_eq!(path.matches('L').count(), 4);
        assert_eq!(path.matches('Q').count(), 4);
    }

    #[test]
    fn test_path_geometry() {
        // 300px square, ratio 0.1 -> radius 30
        let rect = PxRect::new(100, 200, 300, 300);
        let path = rounded_rect_path(&rect, 0.1);

        // Starts at (x + r, y), top edge runs to (x + w - r, y)
        assert!(path.starts_with("M 130 200 L 370 200 Q 400 200 400 230"));
        // Left edge closes through the top-left corner control point
        assert!(path.ends_with("L 100 230 Q 100 200 130 200 Z"));
    }

    #[test]
    fn test_radius_uses_shorter_side() {
        let rect = PxRect::new(0, 0, 400, 200);
        let path = rounded_rect_path(&rect, 0.1);
        // radius = 200 * 0.1 = 20, so the top edge starts at x = 20
        assert!(path.starts_with("M 20 0 L 380 0"));
    }

    #[test]
    fn test_zero_ratio_degenerates_to_sharp_corners() {
        let rect = PxRect::new(0, 0, 100, 100);
        let path = rounded_rect_path(&rect, 0.0);
        assert!(path.starts_with("M 0 0 L 100 0 Q 100 0 100 0"));
    }

    #[test]
    fn test_sheet_svg_shape() {
        let placements = vec![
            Placement {
                row: 0,
                col: 0,
                cell: PxRect::new(10, 10, 50, 50),
                art_bbox: PxRect::new(10, 10, 50, 50),
                cutline_path: rounded_rect_path(&PxRect::new(10, 10, 50, 50), 0.1),
            },
            Placement {
                row: 0,
                col: 1,
                cell: PxRect::new(70, 10, 50, 50),
                art_bbox: PxRect::new(70, 10, 50, 50),
                cutline_path: rounded_rect_path(&PxRect::new(70, 10, 50, 50), 0.1),
            },
        ];
        let svg = sheet_cutline_svg(130, 70, &placements);

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg "));
        assert!(svg.contains("viewBox=\"0 0 130 70\""));
        assert!(svg.contains("stroke=\"#FF00FF\""));
        assert_eq!(svg.matches("<path ").count(), 2);
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
