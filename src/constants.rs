//! Reference values and tunable defaults for cube scanning
//!
//! This module contains compile-time constants for grid geometry, the default
//! sticker palette, calibration and the solver boundary.

/// Sampling grid geometry
///
/// The overlay is a square canvas of `3 * CELL_SIZE + 2 * MARGIN` units with
/// one cell per facelet.
pub mod grid {
    /// Facelets per face edge
    pub const GRID_SIZE: usize = 3;

    /// Edge length of one grid cell
    pub const CELL_SIZE: u32 = 100;

    /// Border between the canvas edge and the grid
    pub const MARGIN: u32 = 20;

    /// Edge length of the averaging window centred in each cell
    pub const SAMPLE_WINDOW: u32 = 10;

    /// Canvas edge length for the default geometry
    pub const CANVAS_SIZE: u32 = GRID_SIZE as u32 * CELL_SIZE + 2 * MARGIN;
}

/// Default sticker palette in 8-bit sRGB
///
/// Standard color scheme: white up, yellow down, green front, blue back,
/// red right, orange left.
pub mod stickers {
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const RED: [u8; 3] = [255, 0, 0];
    pub const GREEN: [u8; 3] = [0, 255, 0];
    pub const YELLOW: [u8; 3] = [255, 255, 0];
    pub const ORANGE: [u8; 3] = [255, 165, 0];
    pub const BLUE: [u8; 3] = [0, 0, 255];
}

/// Calibration defaults
pub mod calibration {
    /// Lightness expected from the white facelet, in percent
    pub const EXPECTED_WHITE_LIGHTNESS: f32 = 100.0;

    /// Lower bound for the sampled lightness to avoid dividing by zero
    pub const MIN_SAMPLE_LIGHTNESS: f32 = 1.0;

    /// Hue shift applied by the default policy, in degrees
    pub const DEFAULT_HUE_SHIFT: f32 = 0.0;

    /// Saturation factor applied by the default policy
    pub const DEFAULT_SATURATION_FACTOR: f32 = 1.0;
}

/// Classification thresholds
pub mod classification {
    /// Squared HSL distance beyond which the thresholded policy gives up
    pub const DEFAULT_MAX_DISTANCE: f32 = 2500.0;
}

/// Solver boundary defaults
pub mod solver {
    /// Endpoint receiving `{ "cubeState": ... }`
    pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/solve";

    /// Request timeout in milliseconds
    pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
}

/// Preview loop defaults
pub mod preview {
    /// Frame interval in milliseconds (~30 fps)
    pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 33;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_size() {
        assert_eq!(grid::CANVAS_SIZE, 340);
        assert!(grid::SAMPLE_WINDOW <= grid::CELL_SIZE);
    }

    #[test]
    fn test_calibration_defaults() {
        assert!(calibration::MIN_SAMPLE_LIGHTNESS > 0.0);
        assert_eq!(calibration::DEFAULT_SATURATION_FACTOR, 1.0);
    }
}
