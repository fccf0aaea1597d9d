use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use sticker_layout::{
    build_dynamic_manifest, build_grid_manifest, calculate_dynamic_layout, DynamicOptions,
    GridOptions, RasterCompositor, SheetCompositor, SheetManifest, SheetSize, SourceInfo,
    StickerDimensions,
};

#[derive(Parser)]
#[command(name = "stickers", about = "Kiss-cut sticker sheet layout tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a fixed grid of uniform square cells
    Grid {
        /// Sheet size
        #[arg(long, default_value = "4x4", value_enum)]
        sheet: SheetArg,

        /// Cell size in inches
        #[arg(long, default_value = "0.25")]
        cell_size_in: f32,

        /// Outer margin in inches
        #[arg(long, default_value = "0.125")]
        margin_in: f32,

        /// Gap between cells in inches
        #[arg(long, default_value = "0.25")]
        gap_in: f32,

        /// White border inside each cell in inches
        #[arg(long, default_value = "0")]
        border_in: f32,

        /// Bleed outside the cut line in inches
        #[arg(long, default_value = "0")]
        bleed_in: f32,

        /// Print resolution in dots per inch
        #[arg(long, default_value = "300")]
        dpi: f32,

        /// Write the manifest JSON here
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Write the cut-line SVG here
        #[arg(long)]
        cutlines: Option<PathBuf>,

        /// Print the grid summary only, don't write files
        #[arg(long)]
        stats_only: bool,
    },

    /// List count/size options for a sticker's aspect ratio
    Options {
        /// Sheet size
        #[arg(long, default_value = "4x4", value_enum)]
        sheet: SheetArg,

        /// Sticker image to probe for pixel dimensions
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Sticker width in pixels (with --height-px, instead of --input)
        #[arg(long)]
        width_px: Option<u32>,

        /// Sticker height in pixels (with --width-px, instead of --input)
        #[arg(long)]
        height_px: Option<u32>,

        /// Smallest legible sticker dimension in inches
        #[arg(long, default_value = "0.5")]
        min_sticker_in: f32,

        /// Print resolution in dots per inch
        #[arg(long, default_value = "300")]
        dpi: f32,
    },

    /// Compose a sticker image into a print-ready sheet
    Compose {
        /// Sticker image
        #[arg(short, long)]
        input: PathBuf,

        /// Sheet size
        #[arg(long, default_value = "4x4", value_enum)]
        sheet: SheetArg,

        /// Sticker count; defaults to the recommended option
        #[arg(long)]
        count: Option<u32>,

        /// Output sheet image (PNG)
        #[arg(short, long)]
        output: PathBuf,

        /// Write the manifest JSON here
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Write the cut-line SVG here
        #[arg(long)]
        cutlines: Option<PathBuf>,

        /// White border inside each cell in inches
        #[arg(long, default_value = "0")]
        border_in: f32,

        /// Bleed outside the cut line in inches
        #[arg(long, default_value = "0")]
        bleed_in: f32,

        /// Print resolution in dots per inch
        #[arg(long, default_value = "300")]
        dpi: f32,

        /// Record that the background was already removed upstream
        #[arg(long)]
        background_removed: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SheetArg {
    #[value(name = "3x3")]
    ThreeByThree,
    #[value(name = "4x4")]
    FourByFour,
    #[value(name = "5.5x5.5")]
    FiveHalfByFiveHalf,
}

impl From<SheetArg> for SheetSize {
    fn from(arg: SheetArg) -> Self {
        match arg {
            SheetArg::ThreeByThree => Self::ThreeByThree,
            SheetArg::FourByFour => Self::FourByFour,
            SheetArg::FiveHalfByFiveHalf => Self::FiveHalfByFiveHalf,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Grid {
            sheet,
            cell_size_in,
            margin_in,
            gap_in,
            border_in,
            bleed_in,
            dpi,
            manifest,
            cutlines,
            stats_only,
        } => {
            let options = GridOptions {
                sheet_size: sheet.into(),
                cell_size_in,
                outer_margin_in: margin_in,
                cell_gap_in: gap_in,
                white_border_in: border_in,
                bleed_in,
                dpi,
                ..Default::default()
            };

            let sheet_manifest = build_grid_manifest(&options, None)?;
            println!("Sheet {}:", sheet_manifest.sheet_name);
            println!(
                "  {} x {} cells, {} stickers total",
                sheet_manifest.cols, sheet_manifest.rows, sheet_manifest.total_stickers
            );
            println!(
                "  {} x {} px at {} dpi",
                sheet_manifest.sheet_width_px, sheet_manifest.sheet_height_px, sheet_manifest.dpi
            );

            if stats_only {
                return Ok(());
            }
            write_artifacts(&sheet_manifest, manifest.as_deref(), cutlines.as_deref()).await?;
        }

        Commands::Options {
            sheet,
            input,
            width_px,
            height_px,
            min_sticker_in,
            dpi,
        } => {
            let sticker = resolve_sticker(input.as_deref(), width_px, height_px).await?;
            let options = DynamicOptions {
                min_sticker_in,
                dpi,
                ..Default::default()
            };

            let layout = calculate_dynamic_layout(sheet.into(), sticker, &options)?;
            println!(
                "Options for a {}x{}px sticker on a {} sheet:",
                sticker.width_px,
                sticker.height_px,
                layout.sheet_size
            );
            for (index, option) in layout.options.iter().enumerate() {
                let marker = if index == layout.recommended { "*" } else { " " };
                println!(
                    "{} {:<12} {}",
                    marker, option.display_name, option.description
                );
            }
            println!("(* recommended)");
        }

        Commands::Compose {
            input,
            sheet,
            count,
            output,
            manifest,
            cutlines,
            border_in,
            bleed_in,
            dpi,
            background_removed,
        } => {
            let source = load_image(&input).await?;
            let sticker = StickerDimensions::from_pixels(source.width(), source.height())?;
            let options = DynamicOptions {
                white_border_in: border_in,
                bleed_in,
                dpi,
                ..Default::default()
            };

            let sheet_size: SheetSize = sheet.into();
            let layout = calculate_dynamic_layout(sheet_size, sticker, &options)?;
            let option = match count {
                Some(n) => layout
                    .options
                    .iter()
                    .find(|o| o.count == n)
                    .with_context(|| {
                        let counts: Vec<String> =
                            layout.options.iter().map(|o| o.count.to_string()).collect();
                        format!(
                            "count {} is not offered on this sheet (available: {})",
                            n,
                            counts.join(", ")
                        )
                    })?,
                None => layout.recommended_option(),
            };

            let sheet_manifest = build_dynamic_manifest(
                sheet_size,
                option,
                &options,
                Some(SourceInfo {
                    width_px: sticker.width_px,
                    height_px: sticker.height_px,
                    background_removed,
                }),
            )?;

            let composited =
                RasterCompositor::default().composite(&source, &sheet_manifest)?;
            let output_clone = output.clone();
            tokio::task::spawn_blocking(move || composited.save(output_clone))
                .await
                .context("image encode task failed")??;

            println!(
                "Composed {} copies ({} x {}) → {}",
                option.count,
                option.cols,
                option.rows,
                output.display()
            );
            write_artifacts(&sheet_manifest, manifest.as_deref(), cutlines.as_deref()).await?;
        }
    }

    Ok(())
}

async fn load_image(path: &Path) -> Result<image::DynamicImage> {
    let path = path.to_path_buf();
    let display = path.display().to_string();
    tokio::task::spawn_blocking(move || image::open(path))
        .await
        .context("image decode task failed")?
        .with_context(|| format!("failed to open {}", display))
}

/// Sticker dimensions come from the image itself or explicit pixel flags;
/// the engine refuses to guess an aspect ratio.
async fn resolve_sticker(
    input: Option<&Path>,
    width_px: Option<u32>,
    height_px: Option<u32>,
) -> Result<StickerDimensions> {
    match (input, width_px, height_px) {
        (Some(path), None, None) => {
            let img = load_image(path).await?;
            Ok(StickerDimensions::from_pixels(img.width(), img.height())?)
        }
        (None, Some(w), Some(h)) => Ok(StickerDimensions::from_pixels(w, h)?),
        _ => bail!("specify either --input or both --width-px and --height-px"),
    }
}

async fn write_artifacts(
    sheet_manifest: &SheetManifest,
    manifest_path: Option<&Path>,
    cutlines_path: Option<&Path>,
) -> Result<()> {
    if let Some(path) = manifest_path {
        sheet_manifest.save(path).await?;
        println!("Manifest → {}", path.display());
    }
    if let Some(path) = cutlines_path {
        tokio::fs::write(path, &sheet_manifest.cutline_svg).await?;
        println!("Cut lines → {}", path.display());
    }
    Ok(())
}
