//! Linear RGB color arithmetic.

use crate::Vec3;

/// Color type alias (linear RGB, channels nominally in 0-1)
pub type Color = Vec3;

/// Named colors used by the reference scenes.
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::ZERO;
    pub const WHITE: Color = Color::ONE;
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);
}

/// Extension trait for color-specific operations on [`Color`].
pub trait ColorExt {
    /// Scale all channels down by the largest one if it exceeds 1.
    ///
    /// Keeps the hue of over-bright colors instead of clipping each
    /// channel independently. Idempotent, and a no-op when every
    /// channel is already <= 1.
    fn max_to_one(self) -> Self;

    /// Quantize to 8-bit RGB. Channels are clamped to [0, 1] first.
    fn to_rgb8(self) -> [u8; 3];

    /// Build a color from 8-bit RGB.
    fn from_rgb8(rgb: [u8; 3]) -> Self;

    /// Largest of the three channels.
    fn max_channel(self) -> f32;
}

impl ColorExt for Color {
    fn max_to_one(self) -> Self {
        let max = self.max_channel();
        if max > 1.0 {
            self / max
        } else {
            self
        }
    }

    fn to_rgb8(self) -> [u8; 3] {
        let c = self.clamp(Color::ZERO, Color::ONE) * 255.0;
        [c.x as u8, c.y as u8, c.z as u8]
    }

    fn from_rgb8(rgb: [u8; 3]) -> Self {
        Color::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32) / 255.0
    }

    #[inline]
    fn max_channel(self) -> f32 {
        self.max_element()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_max_to_one_scales_by_max() {
        let c = Color::new(2.0, 1.0, 0.5).max_to_one();
        assert_eq!(c, Color::new(1.0, 0.5, 0.25));
    }

    #[test]
    fn test_max_to_one_noop_below_one() {
        let c = Color::new(0.2, 1.0, 0.7);
        assert_eq!(c.max_to_one(), c);
        assert_eq!(colors::BLACK.max_to_one(), colors::BLACK);
    }

    #[test]
    fn test_max_to_one_idempotent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let c = Color::new(
                rng.gen_range(0.0..10.0),
                rng.gen_range(0.0..10.0),
                rng.gen_range(0.0..10.0),
            );
            let once = c.max_to_one();
            let twice = once.max_to_one();
            assert_eq!(once, twice);
            assert!(once.max_channel() <= 1.0);
        }
    }

    #[test]
    fn test_to_rgb8() {
        assert_eq!(colors::WHITE.to_rgb8(), [255, 255, 255]);
        assert_eq!(Color::new(-1.0, 0.5, 3.0).to_rgb8(), [0, 127, 255]);
    }

    #[test]
    fn test_from_rgb8() {
        let c = Color::from_rgb8([255, 0, 51]);
        assert!((c - Color::new(1.0, 0.0, 0.2)).length() < 1e-6);
    }
}
