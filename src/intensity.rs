//! Highlighting of table cells close to the player's green number.
//!
//! The closer a projected green number is to the baseline, the more intense its cell is painted.
//! Closeness is measured on the logarithm of the ratio, so doubling and halving the green number
//! are equally far.

use std::fmt;

/// How close `projected` is to `green_number`, within `0.0..=1.0`.
///
/// This is `1 - min(|ln(projected / green_number)|, 1)`: exactly 1 when they are equal, falling
/// to 0 once the ratio leaves `e^-1..=e`. A projected value of 0 is infinitely far.
#[must_use]
pub fn visual_intensity(projected: u32, green_number: u32) -> f64 {
    let distance = (projected as f64 / green_number as f64).ln().abs();
    if distance.is_nan() {
        return 0.0;
    }
    num::clamp(1.0 - distance.min(1.0), 0.0, 1.0)
}

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
}

impl Rgb {
    /// Color of cells with no intensity.
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    /// Color of cells matching the green number exactly.
    pub const HIGHLIGHT: Self = Self::new(0x4c, 0xaf, 0x50);

    /// Creates a color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Interpolates linearly from `self` at `t = 0` to `other` at `t = 1`.
    ///
    /// `t` is clamped into `0.0..=1.0`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { num::clamp(t, 0.0, 1.0) };
        let mix = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Background color of a cell with the intensity.
    #[must_use]
    pub fn for_intensity(intensity: f64) -> Self {
        Self::WHITE.lerp(Self::HIGHLIGHT, intensity)
    }
}

impl fmt::Display for Rgb {
    /// Formats as a CSS hex color such as `#4caf50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
