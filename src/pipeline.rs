//! Frame to face pipeline
//!
//! Chains the grid sampler, the HSL converter and the classifier:
//! frame → nine RGB samples → nine HSL values → nine facelets.

use crate::color::{ColorClassifier, ColorConverter, HslColor, ReferenceTable};
use crate::config::ScannerConfig;
use crate::error::Result;
use crate::sampling::FaceSampler;
use crate::scan::FaceScan;
use image::RgbImage;
use log::debug;

/// Classifies the nine cells of a frame into a [`FaceScan`]
#[derive(Debug, Clone, Default)]
pub struct FaceScanner {
    sampler: FaceSampler,
    converter: ColorConverter,
    classifier: ColorClassifier,
}

impl FaceScanner {
    pub fn new(sampler: FaceSampler, classifier: ColorClassifier) -> Self {
        Self {
            sampler,
            converter: ColorConverter::new(),
            classifier,
        }
    }

    pub fn from_config(config: &ScannerConfig) -> Self {
        Self::new(
            FaceSampler::from_config(&config.grid),
            ColorClassifier::with_policy(config.classification),
        )
    }

    pub fn sampler(&self) -> &FaceSampler {
        &self.sampler
    }

    /// Sample and classify all nine cells against `table`
    pub fn scan(&self, frame: &RgbImage, table: &ReferenceTable) -> Result<FaceScan> {
        let samples = self.sampler.sample_face(frame)?;

        let mut cells = [[None; 3]; 3];
        for (row, samples) in samples.iter().enumerate() {
            for (col, sample) in samples.iter().enumerate() {
                let hsl = self.converter.rgb_to_hsl(*sample);
                let facelet = self.classifier.classify(hsl, table);
                debug!(
                    "cell ({row}, {col}): {} -> h {:.1} s {:.1} l {:.1} -> {}",
                    self.converter.rgb_to_hex(*sample),
                    hsl.hue,
                    hsl.saturation,
                    hsl.lightness,
                    facelet.map_or('?', |label| label.as_char()),
                );
                cells[row][col] = facelet;
            }
        }
        Ok(FaceScan::new(cells))
    }

    /// HSL sample of the center cell, used for calibration
    pub fn white_sample(&self, frame: &RgbImage) -> Result<HslColor> {
        let sample = self.sampler.sample_center(frame)?;
        let hsl = self.converter.rgb_to_hsl(sample);
        debug!(
            "white sample {} -> l {:.1}",
            self.converter.rgb_to_hex(sample),
            hsl.lightness
        );
        Ok(hsl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ClassificationPolicy, FaceLabel};
    use crate::sampling::GridGeometry;
    use image::Rgb;

    fn face_frame(colors: [[[u8; 3]; 3]; 3]) -> RgbImage {
        let geometry = GridGeometry::default();
        let size = geometry.canvas_size();
        let mut frame = RgbImage::new(size, size);
        for (row, cells) in colors.iter().enumerate() {
            for (col, color) in cells.iter().enumerate() {
                let rect = geometry.cell_rect(row, col);
                for y in rect.y..rect.y + rect.height {
                    for x in rect.x..rect.x + rect.width {
                        frame.put_pixel(x, y, Rgb(*color));
                    }
                }
            }
        }
        frame
    }

    #[test]
    fn test_scan_mixed_face() {
        let w = [250, 250, 245];
        let r = [200, 20, 25];
        let g = [20, 180, 60];
        let frame = face_frame([[w, r, g], [g, w, r], [r, g, w]]);
        let scan = FaceScanner::default()
            .scan(&frame, &ReferenceTable::standard())
            .unwrap();
        assert_eq!(scan, FaceScan::from_chars("URFFURRFU").unwrap());
    }

    #[test]
    fn test_black_center_rejected_by_thresholded_policy() {
        let mut config = ScannerConfig::default();
        config.classification = ClassificationPolicy::thresholded();
        let scanner = FaceScanner::from_config(&config);

        let b = [0, 0, 255];
        let frame = face_frame([[b, b, b], [b, [0, 0, 0], b], [b, b, b]]);
        let scan = scanner.scan(&frame, &ReferenceTable::standard()).unwrap();
        assert_eq!(scan.center(), None);
        assert_eq!(scan.get(0, 0), Some(FaceLabel::B));
    }

    #[test]
    fn test_white_sample() {
        let grey = [128, 128, 128];
        let frame = face_frame([[grey; 3]; 3]);
        let hsl = FaceScanner::default().white_sample(&frame).unwrap();
        assert_eq!(hsl.saturation, 0.0);
        assert!((hsl.lightness - 128.0 / 255.0 * 100.0).abs() < 1e-3);
    }
}
