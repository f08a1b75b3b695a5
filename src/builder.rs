use image::RgbImage;
use log::debug;

use crate::error::{PaletteError, Result};
use crate::grid::{PALETTE_HEIGHT, PALETTE_WIDTH, PaletteGrid};
use crate::sampler::average_color;

/// Top-left source pixel sampled for grid column `x` / row `y`.
///
/// The fractional cell position is mapped onto the source in `f32` and
/// truncated, so neighbouring windows may overlap or leave gaps.
#[inline]
pub fn block_origin(x: usize, y: usize, src_w: u32, src_h: u32) -> (u32, u32) {
    let xr = x as f32 / PALETTE_WIDTH as f32;
    let yr = y as f32 / PALETTE_HEIGHT as f32;
    ((xr * src_w as f32) as u32, (yr * src_h as f32) as u32)
}

/// Width and height of every sampling block.
///
/// Sources narrower than 9 or shorter than 3 pixels would give an empty block;
/// those sizes are raised to 1 so each cell takes the single pixel at its origin.
#[inline]
pub fn block_size(src_w: u32, src_h: u32) -> (u32, u32) {
    let bw = src_w / PALETTE_WIDTH as u32;
    let bh = src_h / PALETTE_HEIGHT as u32;
    (bw.max(1), bh.max(1))
}

/// Sample `src` into a fresh 9×3 palette by block averaging.
pub fn build_palette(src: &RgbImage) -> Result<PaletteGrid> {
    let (src_w, src_h) = src.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(PaletteError::EmptySource);
    }

    let (bw, bh) = block_size(src_w, src_h);
    if (bw, bh) != (src_w / PALETTE_WIDTH as u32, src_h / PALETTE_HEIGHT as u32) {
        debug!("source {src_w}x{src_h} is smaller than the grid; sampling single pixels");
    }

    let mut grid = PaletteGrid::default();
    for y in 0..PALETTE_HEIGHT {
        for x in 0..PALETTE_WIDTH {
            let (ox, oy) = block_origin(x, y, src_w, src_h);
            grid.set(x, y, average_color(src, ox, oy, bw, bh));
        }
    }

    debug!("built palette from {src_w}x{src_h} source with {bw}x{bh} blocks");
    Ok(grid)
}
