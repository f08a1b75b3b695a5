//! Turn a dropped image into a 9×3 colour palette.
//!
//! The pipeline samples the source into a fixed grid by block averaging, lifts
//! the palette's brightness, sorts every row from dark to bright and stores the
//! result as a PNG in a single, always-overwritten slot.

pub mod builder;
pub mod codec;
pub mod color;
pub mod error;
pub mod grid;
pub mod normalize;
pub mod sampler;
pub mod sort;
pub mod station;
pub mod wasm;

use image::RgbImage;

pub use codec::{PALETTE_FILE_NAME, PaletteCodec};
pub use color::Color;
pub use error::{DropRejection, PaletteError, Result};
pub use grid::{PALETTE_HEIGHT, PALETTE_WIDTH, PaletteGrid};
pub use normalize::{Normalization, NormalizeReport};
pub use station::{DragSource, DropOutcome, DropTarget, PaletteStation};

/// Build, normalize and sort a palette for `src`.
///
/// Steps performed:
/// 1. Average 27 blocks of the source into a 9×3 grid.
/// 2. Rescale brightness (or contrast) across the whole grid.
/// 3. Sort every row by ascending brightness.
pub fn generate_palette(src: &RgbImage, mode: Normalization) -> Result<PaletteGrid> {
    let mut grid = builder::build_palette(src)?;
    normalize::normalize(&mut grid, mode);
    sort::sort_rows_by_brightness(&mut grid);
    Ok(grid)
}

/// Decode an in-memory image and return the palette as PNG bytes plus its
/// 27 `RRGGBB` entries, row by row.
pub fn palette_bytes(input: &[u8], mode: Normalization) -> Result<(Vec<u8>, Vec<String>)> {
    let img = image::load_from_memory(input)?;
    let grid = generate_palette(&img.to_rgb8(), mode)?;
    let png = codec::encode_png(&grid)?;
    Ok((png, grid.to_hex()))
}
