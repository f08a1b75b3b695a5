use palette::{FromColor, Hsv, Srgb};

/// An 8-bit RGB palette entry.
pub type Color = Srgb<u8>;

pub const BLACK: Color = Srgb::new(0, 0, 0);

/// HSB brightness ("value") of a colour in `0.0..=1.0`, i.e. `max(r, g, b) / 255`.
#[inline]
pub fn brightness(c: Color) -> f32 {
    brightness_level(c) as f32 / 255.0
}

/// Integer form of [`brightness`]; orders colours exactly like the float does.
#[inline]
pub fn brightness_level(c: Color) -> u8 {
    c.red.max(c.green).max(c.blue)
}

/// Replace the HSB value of `c` while holding hue and saturation.
///
/// `value` is clamped to `0.0..=1.0` before converting back to 8-bit channels.
pub fn with_brightness(c: Color, value: f32) -> Color {
    let mut hsv: Hsv = Hsv::from_color(c.into_format::<f32>());
    hsv.value = value.clamp(0.0, 1.0);
    let rgb: Srgb<f32> = Srgb::from_color(hsv);
    rgb.into_format()
}

/// Upper-case `RRGGBB`, no leading `#`.
pub fn to_hex(c: Color) -> String {
    format!("{:02X}{:02X}{:02X}", c.red, c.green, c.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_is_max_channel() {
        assert_eq!(brightness_level(Srgb::new(10, 200, 30)), 200);
        assert_eq!(brightness(Srgb::new(0, 0, 255)), 1.0);
        assert_eq!(brightness(BLACK), 0.0);
    }

    #[test]
    fn with_brightness_keeps_hue_and_saturation() {
        let dark_red = Srgb::new(128, 0, 0);
        assert_eq!(with_brightness(dark_red, 1.0), Srgb::new(255, 0, 0));

        let olive = Srgb::new(128, 128, 0);
        assert_eq!(with_brightness(olive, 1.0), Srgb::new(255, 255, 0));
    }

    #[test]
    fn with_brightness_clamps() {
        assert_eq!(with_brightness(Srgb::new(0, 255, 0), 3.5), Srgb::new(0, 255, 0));
        assert_eq!(with_brightness(Srgb::new(0, 255, 0), -1.0), BLACK);
    }

    #[test]
    fn unchanged_value_round_trips() {
        for c in [Srgb::new(12, 34, 56), Srgb::new(255, 255, 255), Srgb::new(1, 0, 0)] {
            assert_eq!(with_brightness(c, brightness(c)), c);
        }
    }

    #[test]
    fn hex_is_upper_case() {
        assert_eq!(to_hex(Srgb::new(255, 10, 171)), "FF0AAB");
    }
}
