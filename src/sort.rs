use crate::color::brightness_level;
use crate::grid::PaletteGrid;

/// Order each row by ascending HSB value.
///
/// The sort is stable, so equally bright cells keep their left-to-right order.
/// Rows never exchange cells.
pub fn sort_rows_by_brightness(grid: &mut PaletteGrid) {
    for row in grid.rows_mut().iter_mut() {
        row.sort_by_key(|&c| brightness_level(c));
    }
}
