//! Color space conversion utilities
//!
//! Provides the conversions the classifier depends on:
//! - 8-bit RGB to HSL (hue in degrees, saturation and lightness in percent)
//! - HSL back to sRGB for display
//! - Hex color representation
//!
//! Conversions go through `palette`; this module only rescales its unit
//! ranges to degrees and percent.

use palette::{FromColor, Hsl, Srgb};
use serde::{Deserialize, Serialize};

/// Raw 8-bit RGB observation of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RgbSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbSample {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for RgbSample {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<image::Rgb<u8>> for RgbSample {
    fn from(pixel: image::Rgb<u8>) -> Self {
        let [r, g, b] = pixel.0;
        Self { r, g, b }
    }
}

/// HSL triple used for classification
///
/// `hue` is in degrees `[0, 360)`, `saturation` and `lightness` in percent
/// `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HslColor {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl HslColor {
    pub const fn new(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    /// Pure white at full lightness
    pub const fn white() -> Self {
        Self::new(0.0, 0.0, 100.0)
    }
}

/// Stateless color converter
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB (0-255) to HSL
    ///
    /// Achromatic inputs (`r == g == b`) have no defined hue and come back
    /// with hue and saturation both zero.
    pub fn rgb_to_hsl(&self, sample: RgbSample) -> HslColor {
        let srgb = Srgb::new(sample.r, sample.g, sample.b).into_format::<f32>();
        let hsl: Hsl = Hsl::from_color(srgb);

        if hsl.saturation <= f32::EPSILON {
            return HslColor::new(0.0, 0.0, hsl.lightness * 100.0);
        }

        let hue = hsl.hue.into_positive_degrees();
        HslColor::new(
            if hue >= 360.0 { 0.0 } else { hue },
            hsl.saturation * 100.0,
            hsl.lightness * 100.0,
        )
    }

    /// Convert HSL back to sRGB, clamped to the valid gamut
    pub fn hsl_to_srgb(&self, hsl: HslColor) -> Srgb {
        let color = Hsl::new(hsl.hue, hsl.saturation / 100.0, hsl.lightness / 100.0);
        let srgb = Srgb::from_color(color);
        Srgb::new(
            srgb.red.clamp(0.0, 1.0),
            srgb.green.clamp(0.0, 1.0),
            srgb.blue.clamp(0.0, 1.0),
        )
    }

    /// Convert HSL to an 8-bit RGB sample
    pub fn hsl_to_rgb(&self, hsl: HslColor) -> RgbSample {
        let srgb = self.hsl_to_srgb(hsl);
        RgbSample::new(
            (srgb.red * 255.0).round() as u8,
            (srgb.green * 255.0).round() as u8,
            (srgb.blue * 255.0).round() as u8,
        )
    }

    /// Convert an RGB sample to a hexadecimal color string (e.g. "#FF0000")
    pub fn rgb_to_hex(&self, sample: RgbSample) -> String {
        format!("#{:02X}{:02X}{:02X}", sample.r, sample.g, sample.b)
    }
}
