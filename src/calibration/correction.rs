//! White-facelet exposure correction
//!
//! A single sample of the white center facelet is compared with the expected
//! white. The resulting [`CorrectionVector`] is applied to every reference
//! color, producing a corrected table for the rest of the session.
//!
//! Only lightness is measured from the sample. Hue shift and saturation factor
//! come from configuration and default to the identity.

use crate::color::{HslColor, ReferenceTable};
use crate::config::CalibrationConfig;
use crate::constants::calibration::MIN_SAMPLE_LIGHTNESS;
use serde::{Deserialize, Serialize};

/// Correction applied to each reference color
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionVector {
    /// Degrees added to hue, modulo 360
    pub hue_shift: f32,
    /// Multiplier for saturation
    pub saturation_factor: f32,
    /// Multiplier for lightness
    pub lightness_factor: f32,
}

impl Default for CorrectionVector {
    fn default() -> Self {
        Self::identity()
    }
}

impl CorrectionVector {
    pub const fn identity() -> Self {
        Self {
            hue_shift: 0.0,
            saturation_factor: 1.0,
            lightness_factor: 1.0,
        }
    }

    /// Apply the correction to one HSL value
    pub fn apply(&self, hsl: HslColor) -> HslColor {
        HslColor::new(
            (hsl.hue + self.hue_shift).rem_euclid(360.0),
            (hsl.saturation * self.saturation_factor).clamp(0.0, 100.0),
            (hsl.lightness * self.lightness_factor).clamp(0.0, 100.0),
        )
    }
}

/// Derives correction vectors from white samples
#[derive(Debug, Clone)]
pub struct Calibrator {
    expected_white: HslColor,
    hue_shift: f32,
    saturation_factor: f32,
}

impl Default for Calibrator {
    fn default() -> Self {
        Self::from_config(&CalibrationConfig::default())
    }
}

impl Calibrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &CalibrationConfig) -> Self {
        Self {
            expected_white: config.expected_white,
            hue_shift: config.hue_shift,
            saturation_factor: config.saturation_factor,
        }
    }

    pub fn expected_white(&self) -> HslColor {
        self.expected_white
    }

    /// Correction for a sample of the white facelet
    pub fn compute_correction(&self, sample: HslColor) -> CorrectionVector {
        compute_correction(sample, self.expected_white, self.hue_shift, self.saturation_factor)
    }
}

/// Correction mapping `sample` onto `expected_white`
///
/// The lightness factor is `expected.l / max(sample.l, 1)`.
pub fn compute_correction(
    sample: HslColor,
    expected_white: HslColor,
    hue_shift: f32,
    saturation_factor: f32,
) -> CorrectionVector {
    CorrectionVector {
        hue_shift,
        saturation_factor,
        lightness_factor: expected_white.lightness / sample.lightness.max(MIN_SAMPLE_LIGHTNESS),
    }
}

/// Corrected copy of `table`; the input table is not modified
pub fn apply_correction(table: &ReferenceTable, vector: &CorrectionVector) -> ReferenceTable {
    table.map_hsl(|hsl| vector.apply(hsl))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::FaceLabel;

    #[test]
    fn test_half_exposure_doubles_lightness() {
        let calibrator = Calibrator::new();
        let vector = calibrator.compute_correction(HslColor::new(0.0, 0.0, 50.0));
        assert_eq!(vector.lightness_factor, 2.0);
        assert_eq!(vector.hue_shift, 0.0);
        assert_eq!(vector.saturation_factor, 1.0);

        let table = ReferenceTable::from_hsl([HslColor::new(30.0, 60.0, 40.0); 6]);
        let corrected = apply_correction(&table, &vector);
        assert_eq!(corrected.get(FaceLabel::R).hsl.lightness, 80.0);
        assert_eq!(corrected.get(FaceLabel::R).hsl.saturation, 60.0);
        assert_eq!(table.get(FaceLabel::R).hsl.lightness, 40.0);
    }

    #[test]
    fn test_black_sample_does_not_divide_by_zero() {
        let vector = compute_correction(HslColor::new(0.0, 0.0, 0.0), HslColor::white(), 0.0, 1.0);
        assert_eq!(vector.lightness_factor, 100.0);
    }

    #[test]
    fn test_apply_clamps_and_wraps() {
        let vector = CorrectionVector {
            hue_shift: 20.0,
            saturation_factor: 3.0,
            lightness_factor: 2.0,
        };
        let corrected = vector.apply(HslColor::new(350.0, 50.0, 70.0));
        assert_eq!(corrected.hue, 10.0);
        assert_eq!(corrected.saturation, 100.0);
        assert_eq!(corrected.lightness, 100.0);

        let negative = CorrectionVector {
            hue_shift: -30.0,
            ..CorrectionVector::identity()
        };
        assert_eq!(negative.apply(HslColor::new(10.0, 0.0, 0.0)).hue, 340.0);
    }

    #[test]
    fn test_identity_is_noop_on_standard_table() {
        let table = ReferenceTable::standard();
        assert_eq!(apply_correction(&table, &CorrectionVector::identity()), table);
    }

    #[test]
    fn test_configured_policy() {
        let config = CalibrationConfig {
            expected_white: HslColor::new(0.0, 0.0, 90.0),
            hue_shift: 5.0,
            saturation_factor: 1.2,
        };
        let vector = Calibrator::from_config(&config).compute_correction(HslColor::new(0.0, 0.0, 45.0));
        assert_eq!(vector.lightness_factor, 2.0);
        assert_eq!(vector.hue_shift, 5.0);
        assert_eq!(vector.saturation_factor, 1.2);
    }
}
