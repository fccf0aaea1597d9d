#![cfg(feature = "raster")]

use image::{DynamicImage, Rgba, RgbaImage};
use sticker_layout::composite::RasterCompositor;
use sticker_layout::*;

fn red_square(side: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(side, side, Rgba([255, 0, 0, 255])))
}

fn small_sheet_options() -> GridOptions {
    // 1" sheet at 72 dpi keeps the raster tiny: 2x2 grid of 18px cells
    GridOptions {
        sheet_size: SheetSize::Custom {
            width_in: 1.0,
            height_in: 1.0,
        },
        dpi: 72.0,
        ..Default::default()
    }
}

#[test]
fn test_output_matches_sheet_pixels() {
    let manifest = build_grid_manifest(&small_sheet_options(), None).unwrap();
    let sheet = RasterCompositor::default()
        .composite(&red_square(40), &manifest)
        .unwrap();

    assert_eq!(sheet.width(), manifest.sheet_width_px as u32);
    assert_eq!(sheet.height(), manifest.sheet_height_px as u32);
}

#[test]
fn test_artwork_lands_in_every_cell() {
    let manifest = build_grid_manifest(&small_sheet_options(), None).unwrap();
    let compositor = RasterCompositor {
        center_grid: false,
        ..Default::default()
    };
    let sheet = compositor.composite(&red_square(40), &manifest).unwrap();

    for placement in &manifest.placements {
        let cx = (placement.art_bbox.x_px + placement.art_bbox.width_px / 2) as u32;
        let cy = (placement.art_bbox.y_px + placement.art_bbox.height_px / 2) as u32;
        let pixel = sheet.get_pixel(cx, cy);
        assert!(
            pixel[0] > 200 && pixel[1] < 50 && pixel[2] < 50,
            "cell ({}, {}) center is {:?}, expected red",
            placement.row,
            placement.col,
            pixel
        );
    }
}

#[test]
fn test_background_outside_cells() {
    let manifest = build_grid_manifest(&small_sheet_options(), None).unwrap();
    let sheet = RasterCompositor::default()
        .composite(&red_square(40), &manifest)
        .unwrap();

    // The sheet corner is margin, never artwork
    assert_eq!(*sheet.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_centering_preserves_grid_span() {
    let manifest = build_grid_manifest(&small_sheet_options(), None).unwrap();
    let centered = RasterCompositor::default()
        .composite(&red_square(40), &manifest)
        .unwrap();
    let aligned = RasterCompositor {
        center_grid: false,
        ..Default::default()
    }
    .composite(&red_square(40), &manifest)
    .unwrap();

    let non_white = |img: &RgbaImage| {
        img.pixels()
            .filter(|p| p.0 != [255, 255, 255, 255])
            .count()
    };
    assert_eq!(non_white(&centered), non_white(&aligned));
}

#[test]
fn test_dynamic_layout_composites() {
    let sticker = StickerDimensions::from_pixels(200, 100).unwrap();
    let dynamic_options = DynamicOptions {
        dpi: 72.0,
        ..Default::default()
    };
    let layout =
        calculate_dynamic_layout(SheetSize::ThreeByThree, sticker, &dynamic_options).unwrap();
    let manifest = build_dynamic_manifest(
        SheetSize::ThreeByThree,
        layout.recommended_option(),
        &dynamic_options,
        None,
    )
    .unwrap();

    let source = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        200,
        100,
        Rgba([0, 0, 255, 255]),
    ));
    let sheet = RasterCompositor::default()
        .composite(&source, &manifest)
        .unwrap();
    assert_eq!(sheet.width(), 216);
    assert_eq!(sheet.height(), 216);
}
