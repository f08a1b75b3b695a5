use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use palette_drop::codec::DEFAULT_PREVIEW_SCALE;
use palette_drop::{DragSource, DropOutcome, DropTarget, Normalization, PaletteCodec, PaletteStation};
use tracing_subscriber::EnvFilter;

/// Build a 9×3 colour palette from an image and store it in the pictures folder.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// The dropped file; exactly one png/jpg/jpeg/bmp/gif image is accepted
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Directory holding the palette file (defaults to ~/Pictures)
    #[arg(short = 'd', long, env = "PALETTE_DROP_OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Stretch brightness to the full range instead of only lifting the maximum
    #[arg(long)]
    contrast: bool,

    /// Also write an upscaled preview of the palette to this path
    #[arg(short, long)]
    preview: Option<PathBuf>,

    /// Pixels per palette cell in the preview
    #[arg(long, default_value_t = DEFAULT_PREVIEW_SCALE)]
    preview_scale: u32,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

fn pictures_dir() -> Result<PathBuf> {
    let home = env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .context("no home directory; pass --out-dir")?;
    Ok(PathBuf::from(home).join("Pictures"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let out_dir = match args.out_dir {
        Some(dir) => dir,
        None => pictures_dir()?,
    };
    let mode = if args.contrast {
        Normalization::Contrast
    } else {
        Normalization::Brightness
    };
    let station = PaletteStation::with_normalization(PaletteCodec::new(out_dir), mode);

    let (path, palette) = match station.files_dropped(&args.inputs) {
        DropOutcome::Saved { path, palette } => (path, palette),
        DropOutcome::Rejected(reason) => bail!("drop rejected: {reason}"),
        DropOutcome::Busy => bail!("another palette is being built"),
        DropOutcome::Failed(e) => return Err(e).context("palette processing failed"),
    };

    if let Some(preview) = &args.preview {
        station
            .preview(args.preview_scale)
            .save(preview)
            .with_context(|| format!("writing preview {}", preview.display()))?;
    }

    let hex = palette.to_hex();
    if args.json {
        let out = serde_json::json!({
            "path": path,
            "drag": station.drag_files(),
            "palette": hex,
        });
        println!("{out}");
    } else {
        println!("Saved → {}", path.display());
        for row in hex.chunks(palette_drop::PALETTE_WIDTH) {
            println!("{}", row.join(" "));
        }
    }

    Ok(())
}
