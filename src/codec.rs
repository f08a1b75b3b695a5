use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbImage, imageops::FilterType};
use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error::{PaletteError, Result};
use crate::grid::{PALETTE_HEIGHT, PALETTE_WIDTH, PaletteGrid};

/// File name of the palette inside the output directory.
pub const PALETTE_FILE_NAME: &str = "bwImg2ColGenPalette.png";

/// Preview scale matching a 900×300 window.
pub const DEFAULT_PREVIEW_SCALE: u32 = 100;

/// Reads and writes the single palette slot in `output_dir`.
#[derive(Clone, Debug)]
pub struct PaletteCodec {
    output_dir: PathBuf,
}

impl PaletteCodec {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Canonical location of the palette file.
    pub fn path(&self) -> PathBuf {
        self.output_dir.join(PALETTE_FILE_NAME)
    }

    /// Write `grid` to [`Self::path`], replacing any previous palette.
    ///
    /// The PNG is written to a temporary file in the same directory and then
    /// renamed over the canonical path, so readers see either the old file or
    /// the complete new one.
    pub fn save(&self, grid: &PaletteGrid) -> Result<PathBuf> {
        let bytes = encode_png(grid)?;
        let dest = self.path();

        fs::create_dir_all(&self.output_dir).map_err(|source| PaletteError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut tmp = NamedTempFile::new_in(&self.output_dir).map_err(|source| PaletteError::Io {
            path: self.output_dir.clone(),
            source,
        })?;
        tmp.write_all(&bytes)
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|source| PaletteError::Io {
                path: tmp.path().to_path_buf(),
                source,
            })?;
        debug!("wrote {} byte palette to {}", bytes.len(), tmp.path().display());

        tmp.persist(&dest).map_err(|e| PaletteError::Persist {
            path: dest.clone(),
            source: e.error,
        })?;

        info!("saved palette to {}", dest.display());
        Ok(dest)
    }

    /// Decode the palette currently stored in the slot.
    pub fn load(&self) -> Result<PaletteGrid> {
        load_palette(&self.path())
    }
}

/// PNG bytes of the 9×3 RGB palette (no alpha).
pub fn encode_png(grid: &PaletteGrid) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    grid.to_image()
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

pub fn decode_png(bytes: &[u8]) -> Result<PaletteGrid> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
    PaletteGrid::from_image(&img.to_rgb8())
}

pub fn load_palette(path: &Path) -> Result<PaletteGrid> {
    let img = image::open(path).map_err(|source| PaletteError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    PaletteGrid::from_image(&img.to_rgb8())
}

/// Nearest-neighbour upscale of the palette, `scale` pixels per cell.
pub fn render_preview(grid: &PaletteGrid, scale: u32) -> RgbImage {
    let scale = scale.max(1);
    image::imageops::resize(
        &grid.to_image(),
        PALETTE_WIDTH as u32 * scale,
        PALETTE_HEIGHT as u32 * scale,
        FilterType::Nearest,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use palette::Srgb;

    fn gradient() -> PaletteGrid {
        let mut grid = PaletteGrid::default();
        for y in 0..PALETTE_HEIGHT {
            for x in 0..PALETTE_WIDTH {
                grid.set(x, y, Srgb::new((x * 28) as u8, (y * 100) as u8, 255 - x as u8));
            }
        }
        grid
    }

    #[test]
    fn png_is_lossless() {
        let grid = gradient();
        let bytes = encode_png(&grid).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!(decode_png(&bytes).unwrap(), grid);
    }

    #[test]
    fn png_has_no_alpha() {
        let bytes = encode_png(&gradient()).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!(img.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn save_replaces_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let codec = PaletteCodec::new(dir.path());

        codec.save(&PaletteGrid::filled(Srgb::new(1, 1, 1))).unwrap();
        let path = codec.save(&gradient()).unwrap();

        assert_eq!(path, dir.path().join(PALETTE_FILE_NAME));
        assert_eq!(codec.load().unwrap(), gradient());
        // only the palette itself is left behind
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let codec = PaletteCodec::new(dir.path().join("Pictures"));
        let path = codec.save(&gradient()).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn preview_scales_cells() {
        let grid = gradient();
        let preview = render_preview(&grid, DEFAULT_PREVIEW_SCALE);
        assert_eq!(preview.dimensions(), (900, 300));
        let c = grid.get(4, 1);
        assert_eq!(preview.get_pixel(450, 150), &Rgb([c.red, c.green, c.blue]));
        assert_eq!(render_preview(&grid, 0).dimensions(), (9, 3));
    }
}
