use image::RgbImage;
use palette::Srgb;

use crate::color::{BLACK, Color};

/// Mean colour of the `width`×`height` block whose top-left corner is `(x, y)`.
///
/// Each channel is summed over the block and divided by the pixel count with
/// integer truncation. The block is clipped to the image bounds first; if no
/// pixel remains (zero-sized block, or an origin outside the image) the result
/// is black.
pub fn average_color(img: &RgbImage, x: u32, y: u32, width: u32, height: u32) -> Color {
    let (img_w, img_h) = img.dimensions();
    let x_end = x.saturating_add(width).min(img_w);
    let y_end = y.saturating_add(height).min(img_h);

    let mut sum = [0u64; 3];
    let mut count = 0u64;

    for py in y..y_end {
        for px in x..x_end {
            let p = img.get_pixel(px, py).0;
            sum[0] += p[0] as u64;
            sum[1] += p[1] as u64;
            sum[2] += p[2] as u64;
            count += 1;
        }
    }

    if count == 0 {
        return BLACK;
    }

    Srgb::new(
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checker() -> RgbImage {
        // 4×2: left half (10, 20, 30), right half (20, 41, 0)
        RgbImage::from_fn(4, 2, |x, _| {
            if x < 2 { Rgb([10, 20, 30]) } else { Rgb([20, 41, 0]) }
        })
    }

    #[test]
    fn averages_with_truncation() {
        let img = checker();
        // 15, 30.5 -> 30, 15
        assert_eq!(average_color(&img, 0, 0, 4, 2), Srgb::new(15, 30, 15));
        assert_eq!(average_color(&img, 2, 1, 2, 1), Srgb::new(20, 41, 0));
    }

    #[test]
    fn zero_area_block_is_black() {
        let img = checker();
        assert_eq!(average_color(&img, 1, 1, 0, 1), BLACK);
        assert_eq!(average_color(&img, 1, 1, 3, 0), BLACK);
    }

    #[test]
    fn block_is_clipped_to_bounds() {
        let img = checker();
        assert_eq!(average_color(&img, 3, 1, 10, 10), Srgb::new(20, 41, 0));
        assert_eq!(average_color(&img, 4, 0, 1, 1), BLACK);
    }
}
