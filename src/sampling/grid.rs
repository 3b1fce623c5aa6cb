//! 3×3 grid sampling over a captured frame
//!
//! The grid sits `margin` pixels from the frame's top-left corner. Each cell
//! is `cell_size` pixels square and is read by averaging a `window` square
//! centred on the cell.

use crate::color::RgbSample;
use crate::config::GridConfig;
use crate::constants::grid::GRID_SIZE;
use crate::error::{Result, ScanError};
use image::RgbImage;

/// Raw samples of one face, indexed `[row][col]`
pub type FaceSamples = [[RgbSample; GRID_SIZE]; GRID_SIZE];

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Overlay line segment, endpoints in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLine {
    pub start: (u32, u32),
    pub end: (u32, u32),
}

/// Grid geometry shared by the sampler and the overlay renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    cell_size: u32,
    margin: u32,
    window: u32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::from_config(&GridConfig::default())
    }
}

impl GridGeometry {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            cell_size: config.cell_size,
            margin: config.margin,
            window: config.sample_window.min(config.cell_size),
        }
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Edge length of the square canvas holding the grid and its margins
    ///
    /// Saturates at `u32::MAX` for geometries that fail config validation.
    pub fn canvas_size(&self) -> u32 {
        (GRID_SIZE as u32)
            .saturating_mul(self.cell_size)
            .saturating_add(self.margin.saturating_mul(2))
    }

    /// Full extent of one cell
    pub fn cell_rect(&self, row: usize, col: usize) -> CellRect {
        CellRect {
            x: self.margin + col as u32 * self.cell_size,
            y: self.margin + row as u32 * self.cell_size,
            width: self.cell_size,
            height: self.cell_size,
        }
    }

    /// Averaging window centred on one cell
    pub fn sample_rect(&self, row: usize, col: usize) -> CellRect {
        let cell = self.cell_rect(row, col);
        let inset = (self.cell_size - self.window) / 2;
        CellRect {
            x: cell.x + inset,
            y: cell.y + inset,
            width: self.window,
            height: self.window,
        }
    }

    /// Interior grid lines: vertical lines first, then horizontal
    pub fn grid_lines(&self) -> Vec<GridLine> {
        let near = self.margin;
        let far = self.margin + GRID_SIZE as u32 * self.cell_size;
        let offsets = (1..GRID_SIZE as u32).map(|i| self.margin + i * self.cell_size);

        let vertical = offsets.clone().map(|x| GridLine {
            start: (x, near),
            end: (x, far),
        });
        let horizontal = offsets.map(|y| GridLine {
            start: (near, y),
            end: (far, y),
        });
        vertical.chain(horizontal).collect()
    }
}

/// Reads the nine cell samples of a face from a frame
#[derive(Debug, Clone, Default)]
pub struct FaceSampler {
    geometry: GridGeometry,
}

impl FaceSampler {
    pub fn new(geometry: GridGeometry) -> Self {
        Self { geometry }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(GridGeometry::from_config(config))
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Sample all nine cells, row-major
    ///
    /// # Errors
    ///
    /// Returns `ScanError::FrameTooSmall` if the frame does not cover the grid.
    pub fn sample_face(&self, frame: &RgbImage) -> Result<FaceSamples> {
        self.check_bounds(frame)?;

        let mut samples = [[RgbSample::default(); GRID_SIZE]; GRID_SIZE];
        for (row, cells) in samples.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = average_rect(frame, self.geometry.sample_rect(row, col));
            }
        }
        Ok(samples)
    }

    /// Sample only the center cell
    pub fn sample_center(&self, frame: &RgbImage) -> Result<RgbSample> {
        self.check_bounds(frame)?;
        let center = GRID_SIZE / 2;
        Ok(average_rect(frame, self.geometry.sample_rect(center, center)))
    }

    fn check_bounds(&self, frame: &RgbImage) -> Result<()> {
        let required = (GRID_SIZE as u32)
            .saturating_mul(self.geometry.cell_size)
            .saturating_add(self.geometry.margin);
        let (width, height) = frame.dimensions();
        if width < required || height < required {
            return Err(ScanError::FrameTooSmall {
                width,
                height,
                required,
            });
        }
        Ok(())
    }
}

/// Per-channel mean over a rectangle, rounded to the nearest integer
fn average_rect(frame: &RgbImage, rect: CellRect) -> RgbSample {
    let mut sums = [0u64; 3];
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            let pixel = frame.get_pixel(x, y);
            for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                *sum += channel as u64;
            }
        }
    }

    let count = (rect.width as u64 * rect.height as u64).max(1) as f64;
    let mean = |sum: u64| (sum as f64 / count).round() as u8;
    RgbSample::new(mean(sums[0]), mean(sums[1]), mean(sums[2]))
}
