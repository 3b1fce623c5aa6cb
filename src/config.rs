//! Configuration structures for the cube scanning pipeline.
//!
//! This module defines all tunable parameters, organized into groups for
//! grid sampling, calibration, classification, the solver boundary and the
//! preview loop.
//!
//! # Configuration Loading
//!
//! ```no_run
//! use cube_scan::ScannerConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = ScannerConfig::from_json_file(Path::new("scanner.json"))?;
//!
//! // Or use defaults
//! let config = ScannerConfig::default();
//! # Ok::<(), cube_scan::ScanError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`GridConfig`]: overlay geometry and sample window
//! - [`CalibrationConfig`]: expected white and correction policy
//! - [`ClassificationPolicy`]: nearest or thresholded matching
//! - [`SolverConfig`]: solver endpoint and timeout
//! - [`PreviewConfig`]: preview frame interval

use crate::color::{ClassificationPolicy, HslColor};
use crate::constants::{calibration, grid, preview, solver};
use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Complete scanner configuration.
///
/// Can be serialized to/from JSON; missing sections fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Sampling grid geometry
    pub grid: GridConfig,

    /// White-facelet calibration policy
    pub calibration: CalibrationConfig,

    /// Matching policy for sampled colors
    pub classification: ClassificationPolicy,

    /// Remote solver settings
    pub solver: SolverConfig,

    /// Live preview settings
    pub preview: PreviewConfig,
}

/// Sampling grid geometry.
///
/// The grid is three cells square, offset from the frame origin by `margin`.
/// Each cell is sampled by averaging a `sample_window` square at its center;
/// a window equal to `cell_size` averages the whole cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cell edge length in pixels
    pub cell_size: u32,

    /// Offset of the grid from the frame origin in pixels
    pub margin: u32,

    /// Averaging window edge length in pixels
    pub sample_window: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: grid::CELL_SIZE,
            margin: grid::MARGIN,
            sample_window: grid::SAMPLE_WINDOW,
        }
    }
}

impl GridConfig {
    /// Canvas edge length, `None` if it does not fit in a `u32`
    pub fn canvas_size(&self) -> Option<u32> {
        self.cell_size
            .checked_mul(grid::GRID_SIZE as u32)?
            .checked_add(self.margin.checked_mul(2)?)
    }
}

/// Calibration parameters.
///
/// The lightness factor is always measured; hue shift and saturation factor
/// are fixed policy values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Appearance the white facelet should have
    pub expected_white: HslColor,

    /// Degrees added to every reference hue
    pub hue_shift: f32,

    /// Multiplier for every reference saturation
    pub saturation_factor: f32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            expected_white: HslColor::new(0.0, 0.0, calibration::EXPECTED_WHITE_LIGHTNESS),
            hue_shift: calibration::DEFAULT_HUE_SHIFT,
            saturation_factor: calibration::DEFAULT_SATURATION_FACTOR,
        }
    }
}

/// Solver service parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// URL accepting `POST { "cubeState": ... }`
    pub endpoint: String,

    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            endpoint: solver::DEFAULT_ENDPOINT.to_string(),
            timeout_ms: solver::DEFAULT_TIMEOUT_MS,
        }
    }
}

impl SolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Preview loop parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Delay between rendered frames in milliseconds
    pub frame_interval_ms: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: preview::DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl PreviewConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

impl ScannerConfig {
    /// Check parameter ranges
    pub fn validate(&self) -> Result<()> {
        if self.grid.cell_size == 0 {
            return Err(ScanError::invalid("grid.cell_size", self.grid.cell_size));
        }
        if self.grid.canvas_size().is_none() {
            return Err(ScanError::invalid(
                "grid",
                format!(
                    "cell_size {} with margin {} exceeds the pixel range",
                    self.grid.cell_size, self.grid.margin
                ),
            ));
        }
        if self.grid.sample_window == 0 || self.grid.sample_window > self.grid.cell_size {
            return Err(ScanError::invalid("grid.sample_window", self.grid.sample_window));
        }
        if self.calibration.expected_white.lightness <= 0.0 {
            return Err(ScanError::invalid(
                "calibration.expected_white.lightness",
                self.calibration.expected_white.lightness,
            ));
        }
        if self.calibration.saturation_factor <= 0.0 {
            return Err(ScanError::invalid(
                "calibration.saturation_factor",
                self.calibration.saturation_factor,
            ));
        }
        if let ClassificationPolicy::Thresholded { max_distance } = self.classification {
            if max_distance <= 0.0 {
                return Err(ScanError::invalid("classification.max_distance", max_distance));
            }
        }
        if self.solver.timeout_ms == 0 {
            return Err(ScanError::invalid("solver.timeout_ms", self.solver.timeout_ms));
        }
        if self.preview.frame_interval_ms == 0 {
            return Err(ScanError::invalid(
                "preview.frame_interval_ms",
                self.preview.frame_interval_ms,
            ));
        }
        Ok(())
    }

    /// Load and validate configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScanError::config(format!("cannot read {}", path.display()), e))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ScanError::config(format!("cannot parse {}", path.display()), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ScanError::config("cannot serialize configuration", e))?;
        std::fs::write(path, json)
            .map_err(|e| ScanError::config(format!("cannot write {}", path.display()), e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.grid.cell_size, 100);
        assert_eq!(config.grid.margin, 20);
        assert_eq!(config.grid.sample_window, 10);
        assert_eq!(config.classification, ClassificationPolicy::Nearest);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "grid": { "cell_size": 80, "margin": 10, "sample_window": 80 } }"#;
        let config: ScannerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.grid.cell_size, 80);
        assert_eq!(config.solver, SolverConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_window_larger_than_cell_is_rejected() {
        let mut config = ScannerConfig::default();
        config.grid.sample_window = 120;
        assert!(matches!(
            config.validate(),
            Err(ScanError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_oversized_grid_is_rejected() {
        let json = r#"{ "grid": { "cell_size": 2000000000, "margin": 20, "sample_window": 10 } }"#;
        let config: ScannerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.grid.canvas_size(), None);
        assert!(matches!(
            config.validate(),
            Err(ScanError::InvalidParameter { ref parameter, .. }) if parameter == "grid"
        ));

        let mut config = ScannerConfig::default();
        config.grid.margin = u32::MAX / 2;
        assert!(config.validate().is_err());

        config.grid.margin = 20;
        assert_eq!(config.grid.canvas_size(), Some(340));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let mut config = ScannerConfig::default();
        config.preview.frame_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("cube_scan_config_{}.json", std::process::id()));
        let mut config = ScannerConfig::default();
        config.classification = ClassificationPolicy::Thresholded { max_distance: 1200.0 };
        config.solver.endpoint = "http://127.0.0.1:9000/solve".to_string();

        config.to_json_file(&path).unwrap();
        let loaded = ScannerConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = ScannerConfig::from_json_file(Path::new("definitely/not/here.json"));
        assert!(matches!(result, Err(ScanError::ConfigError { .. })));
    }
}
