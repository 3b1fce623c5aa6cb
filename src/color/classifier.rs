//! Nearest-reference color classification
//!
//! Distance between two HSL values is `dh² + ds² + dl²`, where `dh` is the
//! circular hue difference. The axes are not normalised against each other.

use super::conversion::HslColor;
use super::label::FaceLabel;
use super::reference::ReferenceTable;
use crate::constants::classification::DEFAULT_MAX_DISTANCE;
use serde::{Deserialize, Serialize};

/// How far a sample may be from its nearest reference
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ClassificationPolicy {
    /// Always accept the nearest reference
    #[default]
    Nearest,
    /// Accept the nearest reference only within `max_distance`
    Thresholded { max_distance: f32 },
}

impl ClassificationPolicy {
    pub fn thresholded() -> Self {
        ClassificationPolicy::Thresholded {
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }
}

/// Circular hue difference in degrees, in `[0, 180]`
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

/// Squared HSL distance with circular hue
pub fn hsl_distance(a: HslColor, b: HslColor) -> f32 {
    let dh = hue_distance(a.hue, b.hue);
    let ds = a.saturation - b.saturation;
    let dl = a.lightness - b.lightness;
    dh * dh + ds * ds + dl * dl
}

/// Nearest reference label and its distance
///
/// Ties resolve to the earliest label in canonical order.
pub fn nearest(hsl: HslColor, table: &ReferenceTable) -> (FaceLabel, f32) {
    let mut best = (FaceLabel::U, f32::INFINITY);
    for entry in table.iter() {
        let distance = hsl_distance(hsl, entry.hsl);
        if distance < best.1 {
            best = (entry.label, distance);
        }
    }
    best
}

/// Label of the nearest reference; never fails
pub fn classify(hsl: HslColor, table: &ReferenceTable) -> FaceLabel {
    nearest(hsl, table).0
}

/// Classifier applying a [`ClassificationPolicy`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorClassifier {
    policy: ClassificationPolicy,
}

impl ColorClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ClassificationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ClassificationPolicy {
        self.policy
    }

    /// Classify one sample, `None` when the policy rejects the nearest match
    pub fn classify(&self, hsl: HslColor, table: &ReferenceTable) -> Option<FaceLabel> {
        let (label, distance) = nearest(hsl, table);
        match self.policy {
            ClassificationPolicy::Nearest => Some(label),
            ClassificationPolicy::Thresholded { max_distance } if distance <= max_distance => {
                Some(label)
            }
            ClassificationPolicy::Thresholded { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorConverter, RgbSample};
    use crate::constants::stickers;

    #[test]
    fn test_exact_reference_matches() {
        let converter = ColorConverter::new();
        let table = ReferenceTable::standard();
        let cases = [
            (stickers::WHITE, FaceLabel::U),
            (stickers::RED, FaceLabel::R),
            (stickers::GREEN, FaceLabel::F),
            (stickers::YELLOW, FaceLabel::D),
            (stickers::ORANGE, FaceLabel::L),
            (stickers::BLUE, FaceLabel::B),
        ];
        for (rgb, expected) in cases {
            let hsl = converter.rgb_to_hsl(RgbSample::from(rgb));
            let (label, distance) = nearest(hsl, &table);
            assert_eq!(label, expected);
            assert_eq!(distance, 0.0);
        }
    }

    #[test]
    fn test_hue_distance_is_circular() {
        assert_eq!(hue_distance(359.0, 1.0), 2.0);
        assert_eq!(hue_distance(1.0, 359.0), 2.0);
        assert_eq!(hue_distance(0.0, 180.0), 180.0);
        assert_eq!(hue_distance(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_wrapped_hue_prefers_near_reference() {
        let table = ReferenceTable::from_hsl([
            HslColor::new(1.0, 80.0, 50.0),
            HslColor::new(180.0, 80.0, 50.0),
            HslColor::new(90.0, 0.0, 0.0),
            HslColor::new(90.0, 0.0, 0.0),
            HslColor::new(90.0, 0.0, 0.0),
            HslColor::new(90.0, 0.0, 0.0),
        ]);
        let sample = HslColor::new(359.0, 80.0, 50.0);
        let (label, distance) = nearest(sample, &table);
        assert_eq!(label, FaceLabel::U);
        assert_eq!(distance, 4.0);
    }

    #[test]
    fn test_ties_resolve_in_canonical_order() {
        let same = HslColor::new(10.0, 10.0, 10.0);
        let table = ReferenceTable::from_hsl([
            HslColor::new(200.0, 50.0, 50.0),
            same,
            HslColor::new(300.0, 50.0, 50.0),
            same,
            same,
            HslColor::new(100.0, 50.0, 50.0),
        ]);
        assert_eq!(classify(same, &table), FaceLabel::R);
    }

    #[test]
    fn test_nearest_policy_always_answers() {
        let classifier = ColorClassifier::new();
        let black = HslColor::new(0.0, 0.0, 0.0);
        assert!(classifier.classify(black, &ReferenceTable::standard()).is_some());
    }

    #[test]
    fn test_thresholded_policy_rejects_black() {
        let classifier = ColorClassifier::with_policy(ClassificationPolicy::thresholded());
        let table = ReferenceTable::standard();
        assert_eq!(classifier.classify(HslColor::new(0.0, 0.0, 0.0), &table), None);
        assert_eq!(
            classifier.classify(HslColor::new(2.0, 95.0, 48.0), &table),
            Some(FaceLabel::R)
        );
    }

    #[test]
    fn test_policy_serialization() {
        let json = serde_json::to_string(&ClassificationPolicy::Thresholded { max_distance: 900.0 })
            .unwrap();
        assert_eq!(json, r#"{"policy":"thresholded","max_distance":900.0}"#);
        let parsed: ClassificationPolicy = serde_json::from_str(r#"{"policy":"nearest"}"#).unwrap();
        assert_eq!(parsed, ClassificationPolicy::Nearest);
    }
}
