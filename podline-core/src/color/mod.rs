//! Color math for cover-art sampling.
//!
//! Channels are stored as `u8`, so every [`Rgb`] is in `[0, 255]` by
//! construction and callers never need to clamp before formatting.

mod hsl;

pub use hsl::Hsl;

use std::fmt;

/// Every channel must exceed this value for a color to count as near-white.
pub const NEAR_WHITE_THRESHOLD: u8 = 230;

const BRIGHT_CUTOFF: f64 = 200.0;
const DARK_CUTOFF: f64 = 50.0;
const BRIGHT_FACTOR: f64 = 0.7;
const DARK_FACTOR: f64 = 1.3;
const LOW_SATURATION: f64 = 0.2;
const SATURATION_BOOST: f64 = 0.5;

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        hex_to_rgb(hex)
    }

    pub fn is_near_white(self) -> bool {
        is_near_white(self.r, self.g, self.b)
    }

    /// See [`adjust_color`].
    pub fn adjusted(self) -> Self {
        adjust_color(self.r, self.g, self.b)
    }

    /// Linear per-channel blend; `weight` is the share of `other` in the result.
    ///
    /// Fractional channels round half up, which is how the blended value is
    /// printed in CSS anyway.
    pub fn mix(self, other: Rgb, weight: f64) -> Rgb {
        let weight = weight.clamp(0.0, 1.0);
        let blend = |a: u8, b: u8| {
            let value = f64::from(a) * (1.0 - weight) + f64::from(b) * weight;
            round_channel(value)
        };

        Rgb::new(
            blend(self.r, other.r),
            blend(self.g, other.g),
            blend(self.b, other.b),
        )
    }

    pub fn to_hsl(self) -> Hsl {
        Hsl::from(self)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse `#rrggbb` or `rrggbb` (any case).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

pub fn is_near_white(r: u8, g: u8, b: u8) -> bool {
    r > NEAR_WHITE_THRESHOLD
        && g > NEAR_WHITE_THRESHOLD
        && b > NEAR_WHITE_THRESHOLD
}

/// Perceptual touch-up applied to every sampled pixel.
///
/// Washed-out colors get their channels pushed away from the mean, then very
/// bright colors are dimmed and very dark colors are lifted. The saturation
/// boost must run before the brightness factor.
pub fn adjust_color(r: u8, g: u8, b: u8) -> Rgb {
    let channels = [f64::from(r), f64::from(g), f64::from(b)];
    let brightness = channels.iter().sum::<f64>() / 3.0;

    let max = f64::from(r.max(g).max(b));
    let min = f64::from(r.min(g).min(b));
    let saturation = if max == 0.0 { 0.0 } else { (max - min) / max };

    let factor = if brightness > BRIGHT_CUTOFF {
        BRIGHT_FACTOR
    } else if brightness < DARK_CUTOFF {
        DARK_FACTOR
    } else {
        1.0
    };

    let channels = if saturation < LOW_SATURATION {
        channels.map(|c| c + (c - brightness) * SATURATION_BOOST)
    } else {
        channels
    };

    let [r, g, b] = channels.map(|c| round_channel(c * factor));
    Rgb::new(r, g, b)
}

/// Round half up, then clamp into a channel.
pub(crate) fn round_channel(value: f64) -> u8 {
    // `f64::round` breaks ties away from zero, which is "half up" for the
    // non-negative values that reach here; the clamp absorbs anything else.
    value.round().clamp(0.0, 255.0) as u8
}
