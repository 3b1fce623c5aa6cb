//! Scan session state machine
//!
//! ```text
//! Uninitialized --calibrate--> Calibrated --submit--> Scanning --6th submit--> Complete
//! ```
//!
//! Each accepted scan is stored under its own center label. Re-scanning a
//! face overwrites the earlier scan and still counts toward the six
//! submissions; nothing checks that the six stored faces are physically
//! distinct.

use super::assembler::{CubeState, CubeStateAssembler};
use super::face::FaceScan;
use crate::calibration::{apply_correction, Calibrator, CorrectionVector};
use crate::color::{FaceLabel, HslColor, ReferenceTable};
use crate::error::{Result, ScanError};
use log::{info, warn};
use std::collections::BTreeMap;

/// Number of faces needed for a complete cube
pub const FACE_COUNT: usize = 6;

/// Progress of a scan session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Calibrated,
    Scanning,
    Complete,
}

/// Result of an accepted scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Face the scan was stored under
    pub face: FaceLabel,
    /// Whether an earlier scan of the same face was overwritten
    pub replaced: bool,
    /// Submissions left before the session completes
    pub remaining: usize,
}

/// Owns the calibrated reference table and the scanned faces
#[derive(Debug, Clone)]
pub struct ScanSession {
    calibrator: Calibrator,
    defaults: ReferenceTable,
    active: ReferenceTable,
    correction: Option<CorrectionVector>,
    results: BTreeMap<FaceLabel, FaceScan>,
    remaining: usize,
    state: SessionState,
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new(Calibrator::default())
    }
}

impl ScanSession {
    pub fn new(calibrator: Calibrator) -> Self {
        Self::with_references(calibrator, ReferenceTable::standard())
    }

    /// Session using `defaults` as the uncorrected reference table
    pub fn with_references(calibrator: Calibrator, defaults: ReferenceTable) -> Self {
        Self {
            calibrator,
            active: defaults.clone(),
            defaults,
            correction: None,
            results: BTreeMap::new(),
            remaining: FACE_COUNT,
            state: SessionState::Uninitialized,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_calibrated(&self) -> bool {
        self.correction.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining
    }

    pub fn results(&self) -> &BTreeMap<FaceLabel, FaceScan> {
        &self.results
    }

    /// Reference table currently used for classification
    pub fn reference_table(&self) -> &ReferenceTable {
        &self.active
    }

    /// Uncorrected reference table
    pub fn default_references(&self) -> &ReferenceTable {
        &self.defaults
    }

    pub fn correction(&self) -> Option<CorrectionVector> {
        self.correction
    }

    /// Calibrate from a sample of the white center facelet
    ///
    /// The correction is always derived from the uncorrected defaults, so
    /// calibrating again replaces the previous correction. Stored scans are
    /// kept.
    pub fn calibrate(&mut self, white_sample: HslColor) -> CorrectionVector {
        let vector = self.calibrator.compute_correction(white_sample);
        self.active = apply_correction(&self.defaults, &vector);
        self.correction = Some(vector);
        if self.state == SessionState::Uninitialized {
            self.state = SessionState::Calibrated;
        }
        info!(
            "calibrated: lightness factor {:.3}, hue shift {:.1}, saturation factor {:.3}",
            vector.lightness_factor, vector.hue_shift, vector.saturation_factor
        );
        vector
    }

    /// Store a classified face under its center label
    ///
    /// # Errors
    ///
    /// - `ScanError::NotCalibrated` before calibration
    /// - `ScanError::SessionComplete` once six scans were accepted
    /// - `ScanError::UnrecognizedCenter` if the center facelet has no label
    ///
    /// The session is unchanged on error.
    pub fn submit_scan(&mut self, scan: FaceScan) -> Result<ScanOutcome> {
        match self.state {
            SessionState::Uninitialized => return Err(ScanError::NotCalibrated),
            SessionState::Complete => return Err(ScanError::SessionComplete),
            SessionState::Calibrated | SessionState::Scanning => {}
        }

        let Some(face) = scan.center() else {
            warn!("scan rejected: unrecognized center facelet");
            return Err(ScanError::UnrecognizedCenter);
        };

        let replaced = self.results.insert(face, scan).is_some();
        if replaced {
            warn!("face {face} scanned again, previous scan replaced");
        }
        self.remaining = self.remaining.saturating_sub(1);
        self.state = if self.remaining == 0 {
            SessionState::Complete
        } else {
            SessionState::Scanning
        };
        info!("face {face} stored, {} scan(s) remaining", self.remaining);

        Ok(ScanOutcome {
            face,
            replaced,
            remaining: self.remaining,
        })
    }

    /// Cube state string from the stored faces
    pub fn assemble(&self) -> Result<CubeState> {
        CubeStateAssembler::new().assemble(&self.results)
    }

    /// Drop all scans and the calibration
    pub fn restart(&mut self) {
        self.active = self.defaults.clone();
        self.correction = None;
        self.results.clear();
        self.remaining = FACE_COUNT;
        self.state = SessionState::Uninitialized;
        info!("session restarted");
    }
}
