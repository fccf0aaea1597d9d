use sticker_layout::*;

#[test]
fn test_reference_grid_arithmetic() {
    // 4x4" sheet, 0.25" cells, 0.125" margin, 0.25" gap, 300 dpi:
    // usable = 3.75, (3.75 + 0.25) / (0.25 + 0.25) = 8
    let manifest = build_grid_manifest(&GridOptions::default(), None).unwrap();

    assert_eq!(manifest.sheet_name, "4x4");
    assert_eq!(manifest.dpi, 300.0);
    assert_eq!(
        (manifest.sheet_width_px, manifest.sheet_height_px),
        (1200, 1200)
    );
    assert_eq!(manifest.cells_per_side, Some(8));
    assert_eq!(manifest.total_stickers, 64);
    assert_eq!(manifest.placements.len(), 64);
}

#[test]
fn test_degenerate_margin_is_an_error() {
    // Margin equal to half the sheet leaves zero usable area; that must
    // surface as an error, not a zero-cell manifest.
    let options = GridOptions {
        outer_margin_in: 2.0,
        ..Default::default()
    };
    match build_grid_manifest(&options, None) {
        Err(LayoutError::DegenerateGeometry { usable_in, .. }) => {
            assert!(usable_in <= 0.0);
        }
        other => panic!("expected DegenerateGeometry, got {other:?}"),
    }
}

#[test]
fn test_placements_disjoint_and_contained() {
    let manifest = build_grid_manifest(&GridOptions::default(), None).unwrap();
    let sheet = PxRect::new(0, 0, manifest.sheet_width_px, manifest.sheet_height_px);

    for (i, a) in manifest.placements.iter().enumerate() {
        assert!(sheet.contains(&a.cell));
        assert!(a.cell.contains(&a.art_bbox));
        for b in manifest.placements.iter().skip(i + 1) {
            assert!(!a.cell.intersects(&b.cell));
        }
    }
}

#[test]
fn test_cutline_offset_by_border_plus_bleed() {
    let options = GridOptions {
        cell_size_in: 1.0,
        white_border_in: 0.05,
        bleed_in: 0.033,
        ..Default::default()
    };
    let manifest = build_grid_manifest(&options, None).unwrap();

    // round((0.05 + 0.033) * 300) = 25
    let offset_px = to_pixels(0.05 + 0.033, 300.0);
    assert_eq!(offset_px, 25);
    for placement in &manifest.placements {
        let expected = rounded_rect_path(
            &placement.cell.outset(offset_px),
            options.corner_radius_ratio,
        );
        assert_eq!(placement.cutline_path, expected);
    }
}

#[test]
fn test_cutline_svg_lists_every_placement() {
    let manifest = build_grid_manifest(&GridOptions::default(), None).unwrap();
    assert_eq!(
        manifest.cutline_svg.matches("<path ").count(),
        manifest.placements.len()
    );
    assert!(manifest.cutline_svg.contains("viewBox=\"0 0 1200 1200\""));
}

#[test]
fn test_wide_sticker_menu_preserves_aspect() {
    let sticker = StickerDimensions::from_pixels(1600, 800).unwrap();
    let layout = calculate_dynamic_layout(
        SheetSize::ThreeByThree,
        sticker,
        &DynamicOptions::default(),
    )
    .unwrap();

    assert!(!layout.options.is_empty());
    for option in &layout.options {
        let ratio = option.sticker_width_in / option.sticker_height_in;
        assert!((ratio - 2.0).abs() < 1e-4);
    }
    // The recommendation is a member of the menu by construction
    assert!(layout
        .options
        .contains(layout.recommended_option()));
}

#[test]
fn test_dynamic_manifest_from_recommended_option() {
    let sticker = StickerDimensions::from_pixels(1000, 1000).unwrap();
    let dynamic_options = DynamicOptions::default();
    let layout =
        calculate_dynamic_layout(SheetSize::FourByFour, sticker, &dynamic_options).unwrap();
    let option = layout.recommended_option();

    let manifest = build_dynamic_manifest(
        SheetSize::FourByFour,
        option,
        &dynamic_options,
        Some(SourceInfo {
            width_px: 1000,
            height_px: 1000,
            background_removed: true,
        }),
    )
    .unwrap();

    assert_eq!(manifest.cells_per_side, None);
    assert_eq!(manifest.total_stickers, option.count);
    assert_eq!(manifest.placements.len(), option.count as usize);
    assert_eq!(manifest.cols, option.cols);
    assert_eq!(manifest.rows, option.rows);
    assert_eq!(manifest.source.unwrap().width_px, 1000);
}

#[cfg(feature = "serde")]
#[test]
fn test_manifest_build_is_byte_identical() {
    let options = GridOptions::default();
    let a = build_grid_manifest(&options, None).unwrap();
    let b = build_grid_manifest(&options, None).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[cfg(feature = "serde")]
#[test]
fn test_manifest_json_round_trip() {
    let manifest = build_grid_manifest(&GridOptions::default(), None).unwrap();
    let json = manifest.to_json().unwrap();
    let parsed: SheetManifest = serde_json::from_str(&json).unwrap();
    assert_eq!(manifest, parsed);
}
