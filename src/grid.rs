use image::{Rgb, RgbImage};
use palette::Srgb;

use crate::color::{self, BLACK, Color};
use crate::error::{PaletteError, Result};

pub const PALETTE_WIDTH: usize = 9;
pub const PALETTE_HEIGHT: usize = 3;

/// The 9×3 palette, row-major.
///
/// The dimensions are part of the type, so a grid can never be resized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteGrid {
    rows: [[Color; PALETTE_WIDTH]; PALETTE_HEIGHT],
}

impl Default for PaletteGrid {
    fn default() -> Self {
        Self::filled(BLACK)
    }
}

impl PaletteGrid {
    pub fn filled(c: Color) -> Self {
        Self {
            rows: [[c; PALETTE_WIDTH]; PALETTE_HEIGHT],
        }
    }

    pub fn from_rows(rows: [[Color; PALETTE_WIDTH]; PALETTE_HEIGHT]) -> Self {
        Self { rows }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Color {
        self.rows[y][x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, c: Color) {
        self.rows[y][x] = c;
    }

    pub fn rows(&self) -> &[[Color; PALETTE_WIDTH]; PALETTE_HEIGHT] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [[Color; PALETTE_WIDTH]; PALETTE_HEIGHT] {
        &mut self.rows
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Color> + '_ {
        self.rows.iter().flatten().copied()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Color> + '_ {
        self.rows.iter_mut().flatten()
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.cells().map(color::to_hex).collect()
    }

    /// 9×3 RGB raster, one pixel per cell.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(PALETTE_WIDTH as u32, PALETTE_HEIGHT as u32, |x, y| {
            let c = self.get(x as usize, y as usize);
            Rgb([c.red, c.green, c.blue])
        })
    }

    pub fn from_image(img: &RgbImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        if width as usize != PALETTE_WIDTH || height as usize != PALETTE_HEIGHT {
            return Err(PaletteError::Dimensions {
                width,
                height,
                expected_width: PALETTE_WIDTH as u32,
                expected_height: PALETTE_HEIGHT as u32,
            });
        }

        let mut grid = Self::default();
        for (x, y, p) in img.enumerate_pixels() {
            grid.set(x as usize, y as usize, Srgb::new(p[0], p[1], p[2]));
        }
        Ok(grid)
    }
}
