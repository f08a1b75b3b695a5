use log::{debug, warn};

use crate::color::{brightness, with_brightness};
use crate::grid::PaletteGrid;

/// How the palette's brightness is rescaled after sampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Normalization {
    /// Scale so the brightest cell reaches full value.
    #[default]
    Brightness,
    /// Stretch so the darkest cell drops to zero and the brightest reaches full value.
    Contrast,
}

/// What a normalization pass did to the grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NormalizeReport {
    /// Every cell was rescaled by `gain`.
    Scaled { gain: f32 },
    /// The grid was left untouched because no usable range exists
    /// (an all-black palette, or a flat one for contrast).
    Skipped,
}

pub fn normalize(grid: &mut PaletteGrid, mode: Normalization) -> NormalizeReport {
    match mode {
        Normalization::Brightness => maximize_brightness(grid),
        Normalization::Contrast => maximize_contrast(grid),
    }
}

/// Multiply every cell's HSB value by `1 / max_value`, keeping hue and saturation.
pub fn maximize_brightness(grid: &mut PaletteGrid) -> NormalizeReport {
    let max = grid.cells().map(brightness).fold(0.0f32, f32::max);

    if max <= 0.0 {
        warn!("palette is all black; brightness left unchanged");
        return NormalizeReport::Skipped;
    }

    let gain = 1.0 / max;
    if gain != 1.0 {
        for c in grid.cells_mut() {
            *c = with_brightness(*c, brightness(*c) * gain);
        }
    }

    debug!("maximized brightness with gain {gain}");
    NormalizeReport::Scaled { gain }
}

/// Map the value range `[min, max]` onto `[0, 1]`.
pub fn maximize_contrast(grid: &mut PaletteGrid) -> NormalizeReport {
    let (min, max) = grid
        .cells()
        .map(brightness)
        .fold((1.0f32, 0.0f32), |(lo, hi), b| (lo.min(b), hi.max(b)));

    let range = max - min;
    if range <= 0.0 {
        warn!("palette brightness is flat; contrast left unchanged");
        return NormalizeReport::Skipped;
    }

    let gain = 1.0 / range;
    for c in grid.cells_mut() {
        *c = with_brightness(*c, (brightness(*c) - min) * gain);
    }

    debug!("maximized contrast over [{min}, {max}]");
    NormalizeReport::Scaled { gain }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::BLACK;
    use palette::Srgb;

    fn sample_grid() -> PaletteGrid {
        let mut grid = PaletteGrid::filled(Srgb::new(0, 34, 0));
        grid.set(3, 1, Srgb::new(51, 0, 0));
        grid.set(7, 2, Srgb::new(0, 0, 17));
        grid
    }

    #[test]
    fn brightest_cell_reaches_full_value() {
        let mut grid = sample_grid();
        let report = maximize_brightness(&mut grid);

        match report {
            NormalizeReport::Scaled { gain } => assert!((gain - 5.0).abs() < 1e-4),
            NormalizeReport::Skipped => panic!("expected a gain"),
        }
        assert_eq!(grid.get(3, 1), Srgb::new(255, 0, 0));
        assert_eq!(grid.get(0, 0), Srgb::new(0, 170, 0));
        assert_eq!(grid.get(7, 2), Srgb::new(0, 0, 85));
        assert!(grid.cells().all(|c| brightness(c) <= 1.0));
    }

    #[test]
    fn second_pass_is_a_no_op() {
        let mut once = sample_grid();
        maximize_brightness(&mut once);
        let mut twice = once;
        let report = maximize_brightness(&mut twice);

        assert_eq!(report, NormalizeReport::Scaled { gain: 1.0 });
        assert_eq!(once, twice);
    }

    #[test]
    fn all_black_is_skipped() {
        let mut grid = PaletteGrid::filled(BLACK);
        assert_eq!(maximize_brightness(&mut grid), NormalizeReport::Skipped);
        assert_eq!(grid, PaletteGrid::filled(BLACK));
    }

    #[test]
    fn contrast_stretches_to_full_range() {
        let mut grid = sample_grid();
        maximize_contrast(&mut grid);

        assert_eq!(grid.get(3, 1), Srgb::new(255, 0, 0));
        assert_eq!(grid.get(7, 2), BLACK);
    }

    #[test]
    fn flat_palette_skips_contrast() {
        let mut grid = PaletteGrid::filled(Srgb::new(10, 20, 30));
        assert_eq!(maximize_contrast(&mut grid), NormalizeReport::Skipped);
        assert_eq!(grid, PaletteGrid::filled(Srgb::new(10, 20, 30)));
    }
}
