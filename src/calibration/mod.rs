//! Lighting calibration module
//!
//! This module derives a correction from a white-facelet sample and applies
//! it to the reference color table to compensate for exposure drift.

pub mod correction;

pub use correction::{apply_correction, compute_correction, Calibrator, CorrectionVector};
